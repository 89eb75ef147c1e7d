//! Pure transforms from wire responses to renderable view values. All
//! missing-field fallbacks live here so renderers never consult raw items.

use serde_json::{Map, Value};
use shared::protocol::{Applicability, RecommendResponse, RecommendationItem, Reference};

/// Shown under "Why suggested" when the backend sends no reasons.
pub const REASONS_FALLBACK: &str = "Best overall match for described conditions.";

/// Maps a raw relevance score to a whole percentage in [0, 100].
/// Absent and NaN scores count as 0; out-of-range values are clamped.
pub fn normalize_score(score: Option<f64>) -> u8 {
    let raw = score.unwrap_or(0.0);
    let raw = if raw.is_nan() { 0.0 } else { raw };
    (raw.clamp(0.0, 1.0) * 100.0).round() as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Low,
    Medium,
    HighMedium,
    High,
}

impl ScoreBand {
    pub fn for_percent(percent: u8) -> Self {
        if percent >= 80 {
            Self::High
        } else if percent >= 60 {
            Self::HighMedium
        } else if percent >= 40 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::HighMedium => "high-medium",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Joins extracted filter pairs as `key: value | key: value`, keeping the
/// backend's key order. Array values are joined with `, `.
pub fn format_filters_used(filters: &Map<String, Value>) -> String {
    filters
        .iter()
        .map(|(key, value)| format!("{key}: {}", filter_value_text(value)))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn filter_value_text(value: &Value) -> String {
    match value {
        Value::Array(elements) => elements
            .iter()
            .map(scalar_text)
            .collect::<Vec<_>>()
            .join(", "),
        other => scalar_text(other),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Flattens applicability into one tag row: road types, then issues, then
/// environments. Tags pass through verbatim, duplicates included.
pub fn collect_applicability_tags(applicability: &Applicability) -> Vec<String> {
    applicability
        .road_types
        .iter()
        .chain(&applicability.issues)
        .chain(&applicability.environments)
        .cloned()
        .collect()
}

pub fn format_reasons(reasons: &[String]) -> String {
    if reasons.is_empty() {
        REASONS_FALLBACK.to_string()
    } else {
        reasons.join("; ")
    }
}

pub fn format_constraints(constraints: &[String]) -> Option<String> {
    if constraints.is_empty() {
        None
    } else {
        Some(constraints.join(", "))
    }
}

/// Two-decimal raw score badge text, e.g. `0.82`. None when the backend
/// sent no score.
pub fn format_raw_score(score: Option<f64>) -> Option<String> {
    score.map(|s| format!("{s:.2}"))
}

#[derive(Debug, Clone)]
pub struct ViewReference {
    pub title: String,
    pub attribution: Option<String>,
    pub url: Option<String>,
    pub excerpt: Option<String>,
}

impl ViewReference {
    pub fn from_reference(reference: &Reference) -> Self {
        Self {
            title: reference.title.clone(),
            attribution: reference.source.as_ref().map(|source| format!("— {source}")),
            url: reference.url.clone(),
            excerpt: reference.excerpt.as_ref().map(|excerpt| format!("“{excerpt}”")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ViewItem {
    pub name: String,
    pub description: String,
    pub score_percent: u8,
    pub band: ScoreBand,
    pub raw_score: Option<String>,
    pub why_suggested: String,
    pub tags: Vec<String>,
    pub references: Vec<ViewReference>,
    pub constraints: Option<String>,
}

impl ViewItem {
    pub fn from_item(item: &RecommendationItem) -> Self {
        let score_percent = normalize_score(item.score);
        Self {
            name: item.name.clone(),
            description: item.description.clone(),
            score_percent,
            band: ScoreBand::for_percent(score_percent),
            raw_score: format_raw_score(item.score),
            why_suggested: format_reasons(&item.reasons),
            tags: collect_applicability_tags(&item.applicability),
            references: item
                .references
                .iter()
                .map(ViewReference::from_reference)
                .collect(),
            constraints: format_constraints(&item.constraints),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Presentation {
    pub filters_summary: Option<String>,
    pub items: Vec<ViewItem>,
}

pub fn present(response: &RecommendResponse) -> Presentation {
    Presentation {
        filters_summary: response.filters_used.as_ref().map(format_filters_used),
        items: response.items.iter().map(ViewItem::from_item).collect(),
    }
}

#[cfg(test)]
#[path = "tests/presenter_tests.rs"]
mod tests;
