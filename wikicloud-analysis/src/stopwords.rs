//! Stopword sets

use std::collections::HashSet;
use std::path::Path;
use wikicloud_core::{ErrorContext, WikicloudError, WikicloudResult};

/// Standard English stopword list (the 179-word NLTK corpus)
pub const ENGLISH_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

/// Wiki boilerplate that shows up in every article's references
pub const DOMAIN_EXCLUSIONS: &[&str] = &[
    "cite", "reference", "http", "https", "www", "com", "org", "retrieved", "isbn", "doi",
    "page", "pages", "website", "link",
];

/// Set of lowercase words excluded from frequency counts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// Built-in English list
    pub fn english() -> Self {
        Self::from_words(ENGLISH_STOPWORDS.iter().copied())
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// Load a newline separated list. Blank lines and `#` comments are
    /// ignored. A missing, unreadable or empty file is a configuration error:
    /// analyzing without the intended stopwords would silently skew results.
    pub fn from_file<P: AsRef<Path>>(path: P) -> WikicloudResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| WikicloudError::Config {
            message: format!("Failed to read stopword file {}: {}", path.display(), e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("stopwords")
                .with_operation("from_file")
                .with_suggestion("Set analysis.stopwords_file to an existing file or remove it"),
        })?;

        let set = Self::from_words(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.starts_with('#')),
        );

        if set.is_empty() {
            return Err(WikicloudError::Config {
                message: format!("Stopword file {} contains no words", path.display()),
                source: None,
                context: ErrorContext::new("stopwords").with_operation("from_file"),
            });
        }

        Ok(set)
    }

    /// Union with another set of words
    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words
            .extend(words.into_iter().map(|w| w.as_ref().trim().to_lowercase()));
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
