//! HTTP request handlers for the wikicloud web server

pub mod analyze;
pub mod health;
pub mod pages;
pub mod palettes;
pub mod types;

pub use analyze::*;
pub use health::*;
pub use pages::*;
pub use palettes::*;

pub use types::*;
