//! Shared application state

use crate::{WebConfig, WebResult};
use std::sync::Arc;
use tracing::info;
use wikicloud_analysis::CategoryAnalyzer;
use wikicloud_api::MediaWikiClient;
use wikicloud_core::{ContentSource, WikicloudConfig};

/// Content source shared by every request
pub type SharedSource = Arc<dyn ContentSource>;

/// Analyzer type held by the server
pub type SharedAnalyzer = CategoryAnalyzer<SharedSource>;

/// State handed to every handler
#[derive(Clone)]
pub struct AppState {
    /// Configuration
    pub config: WebConfig,
    /// Category analyzer backed by the wiki API and the result cache
    pub analyzer: Arc<SharedAnalyzer>,
}

impl AppState {
    /// Build state from the analysis configuration named by `config`
    pub async fn new(config: WebConfig) -> WebResult<Self> {
        let settings = match &config.config_path {
            Some(path) => {
                info!("Loading configuration from {:?}", path);
                WikicloudConfig::from_file(path)?
            }
            None => WikicloudConfig::default(),
        };

        let source: SharedSource = Arc::new(MediaWikiClient::new(settings.api.clone())?);
        let analyzer = CategoryAnalyzer::from_config(source, &settings).await?;

        info!(
            endpoint = %settings.api.endpoint,
            cache_dir = ?analyzer.cache().cache_dir(),
            "Category analyzer ready"
        );

        Ok(Self::with_analyzer(config, analyzer))
    }

    /// State around an already built analyzer
    pub fn with_analyzer(config: WebConfig, analyzer: SharedAnalyzer) -> Self {
        Self {
            config,
            analyzer: Arc::new(analyzer),
        }
    }
}
