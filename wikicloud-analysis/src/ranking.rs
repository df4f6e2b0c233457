//! Ranked word cloud entries

use serde::{Deserialize, Serialize};
use wikicloud_core::FrequencyTable;

/// Number of words shown in a rendered word cloud
pub const WORD_CLOUD_LIMIT: usize = 100;

/// One word in a word cloud
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCloudEntry {
    pub text: String,
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Top `limit` words by count, colored cyclically from `palette` by rank
/// when one is given. Ties keep first-seen order.
pub fn word_cloud_entries(
    table: &FrequencyTable,
    limit: usize,
    palette: Option<&[&str]>,
) -> Vec<WordCloudEntry> {
    let palette = palette.filter(|colors| !colors.is_empty());

    table
        .most_common(limit)
        .into_iter()
        .enumerate()
        .map(|(rank, (word, count))| WordCloudEntry {
            text: word.to_string(),
            size: count,
            color: palette.map(|colors| colors[rank % colors.len()].to_string()),
        })
        .collect()
}

/// Response body for an analyzed category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordCloudPayload {
    pub category: String,
    #[serde(rename = "wordCount")]
    pub word_count: FrequencyTable,
    #[serde(rename = "wordCloudData")]
    pub word_cloud_data: Vec<WordCloudEntry>,
}

impl WordCloudPayload {
    /// Payload with the top [`WORD_CLOUD_LIMIT`] words. `category` is echoed
    /// back as the caller supplied it.
    pub fn new(
        category: impl Into<String>,
        table: FrequencyTable,
        palette: Option<&[&str]>,
    ) -> Self {
        let word_cloud_data = word_cloud_entries(&table, WORD_CLOUD_LIMIT, palette);
        Self {
            category: category.into(),
            word_count: table,
            word_cloud_data,
        }
    }
}
