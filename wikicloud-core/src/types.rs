//! Core data type definitions

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ErrorContext, WikicloudError, WikicloudResult};

/// Namespace marker every category title carries on the content API
pub const CATEGORY_PREFIX: &str = "Category:";

/// Normalized category identifier, always carrying the `Category:` prefix
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CategoryName(String);

impl CategoryName {
    /// Normalize a user supplied category name.
    ///
    /// Surrounding whitespace is trimmed and the namespace prefix is added
    /// when missing. A name that is empty after trimming (or is only the
    /// prefix) is rejected.
    pub fn parse(raw: &str) -> WikicloudResult<Self> {
        let trimmed = raw.trim();
        let bare = trimmed.strip_prefix(CATEGORY_PREFIX).unwrap_or(trimmed).trim();

        if bare.is_empty() {
            return Err(WikicloudError::Input {
                message: "Category name is required".to_string(),
                field: Some("category".to_string()),
                context: ErrorContext::new("category_name")
                    .with_operation("parse")
                    .with_suggestion("Pass a category such as 'Category:Cats' or 'Cats'"),
            });
        }

        Ok(Self(format!("{}{}", CATEGORY_PREFIX, bare)))
    }

    /// Full title including the namespace prefix
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Title without the namespace prefix
    pub fn bare_name(&self) -> &str {
        &self.0[CATEGORY_PREFIX.len()..]
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CategoryName {
    type Error = WikicloudError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CategoryName> for String {
    fn from(value: CategoryName) -> Self {
        value.0
    }
}

/// Title of a single page on the content API
pub type PageTitle = String;

/// Word frequencies in first-seen order.
///
/// Keys are normalized words and values their occurrence counts. The
/// table only grows: counts are added, never decremented.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrequencyTable {
    counts: IndexMap<String, u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence of `word`
    pub fn add(&mut self, word: &str) {
        self.add_count(word, 1);
    }

    /// Add `count` occurrences of `word`
    pub fn add_count(&mut self, word: &str, count: u64) {
        if let Some(existing) = self.counts.get_mut(word) {
            *existing += count;
        } else {
            self.counts.insert(word.to_string(), count);
        }
    }

    /// Additive key-wise merge. New words are appended in `other`'s order.
    pub fn merge(&mut self, other: &FrequencyTable) {
        for (word, count) in &other.counts {
            self.add_count(word, *count);
        }
    }

    pub fn get(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.counts.contains_key(word)
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(word, count)| (word.as_str(), *count))
    }

    /// Top `n` words by descending count. Ties keep first-seen order.
    pub fn most_common(&self, n: usize) -> Vec<(&str, u64)> {
        let mut ranked: Vec<(&str, u64)> = self.iter().collect();
        // sort_by is stable, so equal counts stay in insertion order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }
}

impl<'a> FromIterator<&'a str> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut table = FrequencyTable::new();
        for word in iter {
            table.add(word);
        }
        table
    }
}

impl FromIterator<(String, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut table = FrequencyTable::new();
        for (word, count) in iter {
            table.add_count(&word, count);
        }
        table
    }
}

/// How the orchestrator reacts when a single page cannot be fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Abort the whole category on the first failing page
    #[default]
    FailFast,
    /// Skip failing pages and report their titles
    Isolate,
}

/// Outcome of analyzing one category
#[derive(Debug, Clone, Serialize)]
pub struct CategoryReport {
    pub category: CategoryName,
    pub table: FrequencyTable,
    /// Number of pages listed in the category (zero on a cache hit)
    pub pages_listed: usize,
    /// Pages skipped under [`FailurePolicy::Isolate`]
    pub failed_pages: Vec<PageTitle>,
    pub from_cache: bool,
}

impl CategoryReport {
    pub fn is_complete(&self) -> bool {
        self.failed_pages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_name_normalization() {
        let bare = CategoryName::parse("Foo").unwrap();
        let prefixed = CategoryName::parse("Category:Foo").unwrap();
        assert_eq!(bare, prefixed);
        assert_eq!(bare.as_str(), "Category:Foo");
        assert_eq!(bare.bare_name(), "Foo");

        let padded = CategoryName::parse("  Category:Foo  ").unwrap();
        assert_eq!(padded, bare);
    }

    #[test]
    fn test_category_name_rejects_empty() {
        for raw in ["", "   ", "Category:", "Category:  "] {
            let err = CategoryName::parse(raw).unwrap_err();
            assert!(err.is_input_error(), "expected input error for {:?}", raw);
        }
    }

    #[test]
    fn test_frequency_table_merge_is_additive() {
        let first: FrequencyTable = ["dog", "ran", "dog"].into_iter().collect();
        let second: FrequencyTable = ["dog", "bark"].into_iter().collect();

        let mut merged = first.clone();
        merged.merge(&second);

        assert_eq!(merged.get("dog"), 3);
        assert_eq!(merged.get("ran"), 1);
        assert_eq!(merged.get("bark"), 1);
        assert_eq!(merged.get("missing"), 0);
        assert_eq!(merged.total(), first.total() + second.total());

        let order: Vec<&str> = merged.iter().map(|(w, _)| w).collect();
        assert_eq!(order, vec!["dog", "ran", "bark"]);
    }

    #[test]
    fn test_most_common_stable_ties() {
        let mut table = FrequencyTable::new();
        table.add_count("a", 5);
        table.add_count("b", 5);
        table.add_count("c", 1);

        let top = table.most_common(2);
        assert_eq!(top, vec![("a", 5), ("b", 5)]);

        assert_eq!(table.most_common(10).len(), 3);
        assert!(table.most_common(0).is_empty());
    }

    #[test]
    fn test_frequency_table_json_is_flat_and_ordered() {
        let table: FrequencyTable = ["zebra", "apple", "zebra"].into_iter().collect();
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"zebra":2,"apple":1}"#);

        let back: FrequencyTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn test_failure_policy_serde_names() {
        let policy: FailurePolicy = serde_json::from_str("\"isolate\"").unwrap();
        assert_eq!(policy, FailurePolicy::Isolate);
        assert_eq!(FailurePolicy::default(), FailurePolicy::FailFast);
    }
}
