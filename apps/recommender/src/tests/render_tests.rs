use super::*;
use client_core::QueryPhase;
use serde_json::json;
use shared::protocol::{Applicability, RecommendResponse, RecommendationItem, Reference};

fn sample_response() -> RecommendResponse {
    let mut filters = serde_json::Map::new();
    filters.insert("road_type".to_string(), json!("urban"));
    RecommendResponse {
        filters_used: Some(filters),
        items: vec![RecommendationItem {
            name: "Raised crossing".to_string(),
            description: "Raised pedestrian crossing with advance warning".to_string(),
            score: Some(0.82),
            reasons: vec!["Targets pedestrian crash pattern".to_string()],
            applicability: Applicability {
                road_types: vec!["arterial".to_string()],
                issues: Vec::new(),
                environments: vec!["school_zone".to_string()],
            },
            references: vec![Reference {
                title: "CMF Clearinghouse".to_string(),
                source: Some("FHWA".to_string()),
                url: Some("https://www.cmfclearinghouse.org".to_string()),
                excerpt: Some("35% reduction in pedestrian crashes".to_string()),
            }],
            constraints: vec!["drainage".to_string()],
        }],
    }
}

fn snapshot_with(
    phase: QueryPhase,
    response: Option<RecommendResponse>,
    error: Option<&str>,
) -> SessionSnapshot {
    SessionSnapshot {
        prompt: "School zone with pedestrian crashes".to_string(),
        phase,
        last_response: response,
        last_error: error.map(str::to_string),
    }
}

#[test]
fn renders_cards_with_percent_and_chip() {
    let renderer = ConsoleRenderer::new(false);
    let output = renderer.render(&snapshot_with(
        QueryPhase::Success,
        Some(sample_response()),
        None,
    ));
    assert!(output.contains("Recommendations"));
    assert!(output.contains("Parsed: road_type: urban"));
    assert!(output.contains("1. Raised crossing"));
    assert!(output.contains("Score 0.82"));
    assert!(output.contains("82% high"));
    assert!(output.contains("Why suggested: Targets pedestrian crash pattern"));
    assert!(output.contains("Applicability: [arterial] [school_zone]"));
    assert!(output.contains("- CMF Clearinghouse — FHWA <https://www.cmfclearinghouse.org>"));
    assert!(output.contains("“35% reduction in pedestrian crashes”"));
    assert!(output.contains("Constraints: drainage"));
}

#[test]
fn placeholder_shown_before_first_results() {
    let renderer = ConsoleRenderer::new(false);
    let output = renderer.render(&snapshot_with(QueryPhase::Idle, None, None));
    assert!(output.contains("Enter a description and click Get Recommendations."));
}

#[test]
fn error_line_keeps_previous_results_on_screen() {
    let renderer = ConsoleRenderer::new(false);
    let output = renderer.render(&snapshot_with(
        QueryPhase::Error,
        Some(sample_response()),
        Some("Request failed: 500"),
    ));
    assert!(output.contains("Request failed: 500"));
    assert!(output.contains("1. Raised crossing"));
}

#[test]
fn empty_sections_are_omitted_from_cards() {
    let renderer = ConsoleRenderer::new(false);
    let response = RecommendResponse {
        filters_used: None,
        items: vec![RecommendationItem {
            name: "Speed feedback signs".to_string(),
            description: "Driver feedback display".to_string(),
            score: Some(0.45),
            reasons: Vec::new(),
            applicability: Applicability::default(),
            references: Vec::new(),
            constraints: Vec::new(),
        }],
    };
    let output = renderer.render(&snapshot_with(QueryPhase::Success, Some(response), None));
    assert!(output.contains("45% medium"));
    assert!(output.contains("Why suggested: Best overall match for described conditions."));
    assert!(!output.contains("Parsed:"));
    assert!(!output.contains("Applicability:"));
    assert!(!output.contains("References:"));
    assert!(!output.contains("Constraints:"));
}

#[test]
fn plain_output_carries_no_ansi_codes() {
    let renderer = ConsoleRenderer::new(false);
    let output = renderer.render(&snapshot_with(
        QueryPhase::Success,
        Some(sample_response()),
        None,
    ));
    assert!(!output.contains('\x1b'));
}

#[test]
fn colored_output_uses_band_color_for_bar() {
    let renderer = ConsoleRenderer::new(true);
    let output = renderer.render(&snapshot_with(
        QueryPhase::Success,
        Some(sample_response()),
        None,
    ));
    assert!(output.contains("\x1b[32m"));
}

#[test]
fn score_bar_fills_one_cell_per_ten_percent() {
    assert_eq!(score_bar(0), "░░░░░░░░░░");
    assert_eq!(score_bar(82), "████████░░");
    assert_eq!(score_bar(100), "██████████");
}

#[test]
fn footer_points_at_backend_diagnostics() {
    let renderer = ConsoleRenderer::new(false);
    let footer = renderer.footer("http://localhost:8000");
    assert!(footer.contains("Built for safer streets • Evidence-led interventions"));
    assert!(footer.contains("http://localhost:8000/test"));
}

#[test]
fn status_line_shows_analyzing_and_prompt() {
    let renderer = ConsoleRenderer::new(false);
    let status = renderer.status_line("Rural highway with sharp curves");
    assert!(status.contains("Analyzing…"));
    assert!(status.contains("Rural highway with sharp curves"));
}
