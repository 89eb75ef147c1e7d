use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Number of recommendations requested when the caller does not override it.
pub const DEFAULT_TOP_K: u32 = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendRequest {
    pub prompt: String,
    pub top_k: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    /// Filter key/value pairs the backend extracted from the prompt,
    /// in the order the backend emitted them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters_used: Option<Map<String, Value>>,
    pub items: Vec<RecommendationItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationItem {
    pub name: String,
    pub description: String,
    /// Relevance score, nominally in [0, 1] but not guaranteed by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default)]
    pub reasons: Vec<String>,
    #[serde(default)]
    pub applicability: Applicability,
    #[serde(default)]
    pub references: Vec<Reference>,
    #[serde(default)]
    pub constraints: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Applicability {
    #[serde(default)]
    pub road_types: Vec<String>,
    #[serde(default)]
    pub issues: Vec<String>,
    #[serde(default)]
    pub environments: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reference {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
}
