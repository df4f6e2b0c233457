//! Text normalization and word counting

use tracing::debug;
use wikicloud_core::{AnalysisConfig, FrequencyTable, WikicloudResult};

use crate::stopwords::{StopwordSet, DOMAIN_EXCLUSIONS};
use crate::tokenizer::tokenize;

/// Shortest word length (in characters) that is counted
pub const MIN_WORD_LENGTH: usize = 3;

/// Turns page text into a frequency table of meaningful words.
///
/// Pure and deterministic for a fixed stopword set.
#[derive(Debug, Clone)]
pub struct TextAnalyzer {
    stopwords: StopwordSet,
}

impl TextAnalyzer {
    /// Build an analyzer around a provisioned stopword set. The domain
    /// exclusions are always added on top.
    pub fn new(mut stopwords: StopwordSet) -> Self {
        stopwords.extend(DOMAIN_EXCLUSIONS.iter().copied());
        Self { stopwords }
    }

    /// Analyzer with the built-in English stopwords
    pub fn english() -> Self {
        Self::new(StopwordSet::english())
    }

    /// Resolve the stopword resource named by the configuration. Fails at
    /// startup if a configured file cannot be used.
    pub fn from_config(config: &AnalysisConfig) -> WikicloudResult<Self> {
        let stopwords = match config.resolved_stopwords_file() {
            Some(path) => StopwordSet::from_file(path)?,
            None => StopwordSet::english(),
        };
        Ok(Self::new(stopwords))
    }

    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }

    /// Whether a lowercase token counts as a meaningful word
    pub fn is_meaningful(&self, token: &str) -> bool {
        !is_punctuation(token)
            && !is_numeric(token)
            && !self.stopwords.contains(token)
            && token.chars().count() >= MIN_WORD_LENGTH
    }

    /// Lowercase, tokenize, filter and count
    pub fn analyze(&self, text: &str) -> FrequencyTable {
        let lowered = text.to_lowercase();
        let tokens = tokenize(&lowered);

        let table: FrequencyTable = tokens
            .iter()
            .map(String::as_str)
            .filter(|token| self.is_meaningful(token))
            .collect();

        debug!(
            tokens = tokens.len(),
            distinct_words = table.len(),
            "Analyzed text"
        );
        table
    }
}

impl Default for TextAnalyzer {
    fn default() -> Self {
        Self::english()
    }
}

/// Token with no letters or digits at all, such as `.` or `''`
fn is_punctuation(token: &str) -> bool {
    !token.chars().any(char::is_alphanumeric)
}

/// Digits, optionally with `.`/`,` separators (`1950`, `1,000`, `3.14`)
fn is_numeric(token: &str) -> bool {
    token.chars().any(char::is_numeric)
        && token
            .chars()
            .all(|c| c.is_numeric() || c == '.' || c == ',')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_to_end_pages() {
        let analyzer = TextAnalyzer::english();

        let mut table = analyzer.analyze("The Dog ran. The dog barked!");
        table.merge(&analyzer.analyze("Dogs bark loudly"));

        let expected: Vec<(&str, u64)> = vec![
            ("dog", 2),
            ("ran", 1),
            ("barked", 1),
            ("dogs", 1),
            ("bark", 1),
            ("loudly", 1),
        ];
        assert_eq!(table.iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_filters_noise() {
        let analyzer = TextAnalyzer::english();
        let table = analyzer.analyze(
            "Retrieved 12 March 2020 from https://www.example.com/page ... ISBN 978-3-16 \
             cite web; an ox is 1,000 or 3.14 -- [edit] (see) \"Quoted\"",
        );

        for word in ["retrieved", "isbn", "cite", "https", "www", "page"] {
            assert!(!table.contains(word), "{} should be filtered", word);
        }
        for word in ["12", "2020", "1,000", "3.14", "ox", "...", "--", "''", "``"] {
            assert!(!table.contains(word), "{} should be filtered", word);
        }
        assert!(table.contains("march"));
        assert!(table.contains("quoted"));
        assert!(table.contains("edit"));
    }

    #[test]
    fn test_filter_invariants_hold() {
        let analyzer = TextAnalyzer::english();
        let text = "It's 5 o'clock!!! Mr. Smith's cat -- a tabby -- sat (quietly) on 2 mats, \
                    didn't it? The www.cats.org page links to http://example.com and 42.";
        let table = analyzer.analyze(text);

        assert!(!table.is_empty());
        for (word, count) in table.iter() {
            assert!(count > 0);
            assert!(word.chars().count() > 2, "{} too short", word);
            assert!(!is_numeric(word), "{} is numeric", word);
            assert!(!is_punctuation(word), "{} is punctuation", word);
            assert!(!analyzer.stopwords().contains(word), "{} is a stopword", word);
            assert_eq!(word, word.to_lowercase());
        }
    }

    #[test]
    fn test_deterministic() {
        let analyzer = TextAnalyzer::english();
        let text = "Rust is a language. Rust is fast; rust is safe!";
        let first = analyzer.analyze(text);
        let second = analyzer.analyze(text);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        assert_eq!(first.get("rust"), 3);
    }

    #[test]
    fn test_custom_stopwords_plus_domain_list() {
        let analyzer = TextAnalyzer::new(StopwordSet::from_words(["dog"]));
        let table = analyzer.analyze("the dog cited the website link");
        assert!(!table.contains("dog"));
        assert!(!table.contains("website"));
        assert!(!table.contains("link"));
        // "the" is only an English stopword, not in the custom list
        assert_eq!(table.get("the"), 2);
        assert_eq!(table.get("cited"), 1);
    }

    #[test]
    fn test_empty_text() {
        assert!(TextAnalyzer::english().analyze("").is_empty());
    }

    #[test]
    fn test_from_config_missing_file_fails() {
        let config = AnalysisConfig {
            stopwords_file: Some("/no/such/file.txt".to_string()),
            ..AnalysisConfig::default()
        };
        assert!(TextAnalyzer::from_config(&config).is_err());
        assert!(TextAnalyzer::from_config(&AnalysisConfig::default()).is_ok());
    }
}
