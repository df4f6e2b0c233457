//! Unified error handling system
//!
//! Provides structured error types with context, recovery suggestions, and proper error chaining

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

pub type WikicloudResult<T> = Result<T, WikicloudError>;

/// Error context providing additional information for debugging and recovery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Unique error ID for tracking
    pub error_id: String,
    /// Timestamp when error occurred
    pub timestamp: DateTime<Utc>,
    /// Component where error originated
    pub component: String,
    /// Operation being performed when error occurred
    pub operation: Option<String>,
    /// Additional metadata
    pub metadata: std::collections::HashMap<String, String>,
    /// Recovery suggestions
    pub recovery_suggestions: Vec<String>,
}

impl ErrorContext {
    pub fn new(component: &str) -> Self {
        Self {
            error_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            component: component.to_string(),
            operation: None,
            metadata: std::collections::HashMap::new(),
            recovery_suggestions: Vec::new(),
        }
    }

    pub fn with_operation(mut self, operation: &str) -> Self {
        self.operation = Some(operation.to_string());
        self
    }

    pub fn with_metadata(mut self, key: &str, value: &str) -> Self {
        self.metadata.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.recovery_suggestions.push(suggestion.to_string());
        self
    }
}

/// Main error type for the wikicloud system
#[derive(Error, Debug)]
pub enum WikicloudError {
    /// The remote content API was unreachable, answered with a non-2xx
    /// status, or returned a body we could not decode.
    #[error("Retrieval error: {message}")]
    Retrieval {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },

    /// A cache entry could not be read or written.
    #[error("Cache error: {message}")]
    Cache {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },

    /// Caller supplied an unusable value, such as an empty category name.
    #[error("Input error: {message}")]
    Input {
        message: String,
        field: Option<String>,
        context: ErrorContext,
    },

    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },
}

impl WikicloudError {
    /// Get the error context
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            WikicloudError::Retrieval { context, .. } => Some(context),
            WikicloudError::Cache { context, .. } => Some(context),
            WikicloudError::Input { context, .. } => Some(context),
            WikicloudError::Config { context, .. } => Some(context),
            WikicloudError::Internal { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Check if error is recoverable
    ///
    /// Nothing retries automatically; this only tells a caller whether asking
    /// again later could succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, WikicloudError::Retrieval { .. })
    }

    /// Whether the error was caused by the caller's input
    pub fn is_input_error(&self) -> bool {
        matches!(self, WikicloudError::Input { .. })
    }

    /// Short description suitable for showing to an end user
    pub fn user_message(&self) -> String {
        match self {
            WikicloudError::Retrieval { .. } => {
                "Failed to retrieve category data from the content API".to_string()
            }
            WikicloudError::Input { message, .. } => message.clone(),
            WikicloudError::Cache { .. } => "Cache storage is unavailable".to_string(),
            WikicloudError::Config { .. } => "Server is misconfigured".to_string(),
            _ => "Internal error while analyzing category".to_string(),
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            WikicloudError::Internal { .. } => {
                error!(
                    error_id = ?self.context().map(|c| &c.error_id),
                    error = %self,
                    "Internal error occurred"
                );
            }
            WikicloudError::Config { .. } | WikicloudError::Input { .. } => {
                error!(
                    error_id = ?self.context().map(|c| &c.error_id),
                    error = %self,
                    "Configuration or input error"
                );
            }
            WikicloudError::Retrieval { .. } | WikicloudError::Cache { .. } => {
                warn!(
                    error_id = ?self.context().map(|c| &c.error_id),
                    error = %self,
                    "Retrieval or cache error"
                );
            }
            _ => {
                error!(
                    error_id = ?self.context().map(|c| &c.error_id),
                    error = %self,
                    "Error occurred"
                );
            }
        }
    }
}

/// Convenience macros for creating errors with context
#[macro_export]
macro_rules! retrieval_error {
    ($msg:expr, $component:expr) => {
        $crate::WikicloudError::Retrieval {
            message: $msg.to_string(),
            source: None,
            context: $crate::ErrorContext::new($component),
        }
    };
    ($msg:expr, $component:expr, $source:expr) => {
        $crate::WikicloudError::Retrieval {
            message: $msg.to_string(),
            source: Some(Box::new($source)),
            context: $crate::ErrorContext::new($component),
        }
    };
}

#[macro_export]
macro_rules! cache_error {
    ($msg:expr, $component:expr) => {
        $crate::WikicloudError::Cache {
            message: $msg.to_string(),
            source: None,
            context: $crate::ErrorContext::new($component),
        }
    };
    ($msg:expr, $component:expr, $source:expr) => {
        $crate::WikicloudError::Cache {
            message: $msg.to_string(),
            source: Some(Box::new($source)),
            context: $crate::ErrorContext::new($component)
                .with_suggestion("Check that the cache directory is writable"),
        }
    };
}

#[macro_export]
macro_rules! config_error {
    ($msg:expr, $component:expr) => {
        $crate::WikicloudError::Config {
            message: $msg.to_string(),
            source: None,
            context: $crate::ErrorContext::new($component)
                .with_suggestion("Check your configuration file")
                .with_suggestion("Run 'wikicloud config --init' to create default config"),
        }
    };
}

#[macro_export]
macro_rules! input_error {
    ($msg:expr, $field:expr, $component:expr) => {
        $crate::WikicloudError::Input {
            message: $msg.to_string(),
            field: Some($field.to_string()),
            context: $crate::ErrorContext::new($component)
                .with_suggestion("Check the field value and format"),
        }
    };
}
