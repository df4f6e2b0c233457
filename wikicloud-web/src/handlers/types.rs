//! Request and response types for the web handlers

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use wikicloud_analysis::{WordCloudEntry, WordCloudPayload};
use wikicloud_core::FrequencyTable;

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[schema(example = "0.1.0")]
    pub version: String,
}

/// Error body returned with 4xx/5xx responses
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Category name is required")]
    pub error: String,
}

/// Form submitted by the word cloud page
#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyzeForm {
    /// Category name, with or without the "Category:" prefix
    #[serde(default)]
    #[schema(example = "Physics")]
    pub category: String,
    /// Palette used to color the cloud; words are uncolored when absent
    #[schema(example = "ocean")]
    pub palette: Option<String>,
}

/// One word of the rendered cloud
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WordCloudItem {
    #[schema(example = "quantum")]
    pub text: String,
    /// Occurrences across the category
    #[schema(example = 42)]
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "#01579B")]
    pub color: Option<String>,
}

impl From<WordCloudEntry> for WordCloudItem {
    fn from(entry: WordCloudEntry) -> Self {
        Self {
            text: entry.text,
            size: entry.size,
            color: entry.color,
        }
    }
}

/// Analysis result for the word cloud page
#[derive(Debug, Serialize, ToSchema)]
pub struct AnalyzeResponse {
    /// Category as submitted
    #[schema(example = "Physics")]
    pub category: String,
    /// Every counted word and its count, in first-seen order
    #[serde(rename = "wordCount")]
    #[schema(value_type = Object)]
    pub word_count: FrequencyTable,
    /// Top words by descending count
    #[serde(rename = "wordCloudData")]
    pub word_cloud_data: Vec<WordCloudItem>,
}

impl From<WordCloudPayload> for AnalyzeResponse {
    fn from(payload: WordCloudPayload) -> Self {
        Self {
            category: payload.category,
            word_count: payload.word_count,
            word_cloud_data: payload
                .word_cloud_data
                .into_iter()
                .map(WordCloudItem::from)
                .collect(),
        }
    }
}

/// A named palette
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaletteInfo {
    #[schema(example = "ocean")]
    pub name: String,
    pub colors: Vec<String>,
}

/// All palettes accepted by `/analyze`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PalettesResponse {
    /// Palette used for unknown names
    #[schema(example = "default")]
    pub default: String,
    pub palettes: Vec<PaletteInfo>,
}
