//! Configuration management

use crate::error::{ErrorContext, WikicloudError, WikicloudResult};
use crate::pacing::Pacer;
use crate::types::FailurePolicy;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Largest batch the category-members endpoint accepts for regular clients
pub const MAX_BATCH_SIZE: u32 = 500;

pub const DEFAULT_ENDPOINT: &str = "https://en.wikipedia.org/w/api.php";

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WikicloudConfig {
    pub api: ApiConfig,
    pub cache: CacheConfig,
    pub analysis: AnalysisConfig,
}

/// Remote content API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// `api.php` endpoint of the wiki
    pub endpoint: String,
    pub user_agent: String,
    /// Request timeout. Unset leaves the transport default (no timeout).
    pub timeout_seconds: Option<u64>,
    /// Members requested per listing call
    pub batch_size: u32,
    /// Delay between paginated listing requests
    pub pagination_delay_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: format!("wikicloud/{}", env!("CARGO_PKG_VERSION")),
            timeout_seconds: None,
            batch_size: MAX_BATCH_SIZE,
            pagination_delay_ms: 1000,
        }
    }
}

impl ApiConfig {
    pub fn pagination_pacer(&self) -> Pacer {
        Pacer::from_millis(self.pagination_delay_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Directory holding one JSON file per analyzed category.
    /// A leading `~` expands to the home directory.
    pub dir: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: "~/.wikicloud/cache".to_string(),
        }
    }
}

impl CacheConfig {
    pub fn resolved_dir(&self) -> PathBuf {
        expand_home(&self.dir)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Delay after each processed page
    pub page_delay_ms: u64,
    /// Also pause after the final page of a category
    pub delay_after_last_page: bool,
    pub failure_policy: FailurePolicy,
    /// Newline separated stopword list replacing the built-in English list
    pub stopwords_file: Option<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            page_delay_ms: 500,
            delay_after_last_page: false,
            failure_policy: FailurePolicy::FailFast,
            stopwords_file: None,
        }
    }
}

impl AnalysisConfig {
    pub fn page_pacer(&self) -> Pacer {
        Pacer::from_millis(self.page_delay_ms)
    }

    pub fn resolved_stopwords_file(&self) -> Option<PathBuf> {
        self.stopwords_file.as_deref().map(expand_home)
    }
}

/// Expand a leading `~` to the user's home directory
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix('~') {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest.trim_start_matches(['/', '\\']));
        }
    }
    PathBuf::from(path)
}

impl WikicloudConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> WikicloudResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| WikicloudError::Config {
            message: format!("Failed to read config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("read_file")
                .with_suggestion("Check if the config file exists and is readable"),
        })?;

        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> WikicloudResult<Self> {
        let config: WikicloudConfig = toml::from_str(content).map_err(|e| WikicloudError::Config {
            message: format!("Failed to parse config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("parse_toml")
                .with_suggestion("Check TOML syntax in config file"),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> WikicloudResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| WikicloudError::Config {
            message: format!("Failed to serialize config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config").with_operation("serialize_toml"),
        })?;

        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        std::fs::write(path, content).map_err(|e| WikicloudError::Config {
            message: format!("Failed to write config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("write_file")
                .with_suggestion("Check if the directory exists and is writable"),
        })?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> WikicloudResult<()> {
        if self.api.batch_size == 0 || self.api.batch_size > MAX_BATCH_SIZE {
            return Err(WikicloudError::Config {
                message: format!(
                    "api.batch_size must be between 1 and {}, got {}",
                    MAX_BATCH_SIZE, self.api.batch_size
                ),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set api.batch_size to 500"),
            });
        }

        let endpoint = url::Url::parse(&self.api.endpoint).map_err(|e| WikicloudError::Config {
            message: format!("api.endpoint is not a valid URL: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config").with_operation("validate"),
        })?;

        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(WikicloudError::Config {
                message: format!("api.endpoint must use http or https, got {}", endpoint.scheme()),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Use an endpoint such as https://en.wikipedia.org/w/api.php"),
            });
        }

        if self.api.user_agent.trim().is_empty() {
            return Err(WikicloudError::Config {
                message: "api.user_agent must not be empty".to_string(),
                source: None,
                context: ErrorContext::new("config").with_operation("validate"),
            });
        }

        if self.cache.dir.trim().is_empty() {
            return Err(WikicloudError::Config {
                message: "cache.dir must not be empty".to_string(),
                source: None,
                context: ErrorContext::new("config").with_operation("validate"),
            });
        }

        Ok(())
    }
}
