//! Wikicloud Analysis - Category word-frequency pipeline
//!
//! Turns a wiki category into a frequency table: list the category's pages,
//! fetch each page's text, tokenize and filter it, merge the counts, and keep
//! the result in a content-addressed cache so the next request is free.

pub mod analyzer;
pub mod cache;
pub mod ranking;
pub mod stopwords;
pub mod text;
pub mod tokenizer;

pub use analyzer::*;
pub use cache::*;
pub use ranking::*;
pub use stopwords::*;
pub use text::*;
pub use tokenizer::*;
