//! Wikicloud Core - Core data structures and trait definitions
//!
//! This module defines the shared types, error taxonomy, configuration and
//! logging used by every wikicloud crate

pub mod config;
pub mod error;
pub mod logging;
pub mod pacing;
pub mod traits;
pub mod types;

pub use config::*;
pub use error::*;
pub use logging::*;
pub use pacing::*;
pub use traits::*;
pub use types::*;

// Re-export commonly used external types
pub use async_trait::async_trait;
pub use tokio;
pub use tracing;
