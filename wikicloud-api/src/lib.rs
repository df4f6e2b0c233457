//! Wikicloud API - Remote content API access
//!
//! Lists the members of a wiki category and fetches plain-text page extracts
//! through the MediaWiki action API.

pub mod client;
pub mod mediawiki;

pub use mediawiki::*;
