//! Wikicloud web server
//!
//! Binds the listener and serves the application router.

use crate::{create_app, AppState, WebConfig, WebError, WebResult};
use axum::serve;
use tokio::net::TcpListener;
use tracing::{error, info};

/// Main wikicloud web server
pub struct WikicloudServer {
    config: WebConfig,
    state: AppState,
}

impl WikicloudServer {
    /// Create a new server, wiring the analyzer from configuration
    pub async fn new(config: WebConfig) -> WebResult<Self> {
        let state = AppState::new(config.clone()).await?;

        Ok(Self { config, state })
    }

    /// Server around prepared state
    pub fn with_state(state: AppState) -> Self {
        Self {
            config: state.config.clone(),
            state,
        }
    }

    /// Start the web server
    pub async fn start(self) -> WebResult<()> {
        let address = self.config.address();

        info!("🚀 Starting wikicloud web server");

        let app = create_app(self.state.clone());

        let listener = TcpListener::bind(&address)
            .await
            .map_err(WebError::Server)?;

        info!("✅ Server listening on http://{}", address);

        if let Err(e) = serve(listener, app).await {
            error!("❌ Server error: {}", e);
            return Err(WebError::Server(e));
        }

        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &WebConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

/// Builder for WikicloudServer
pub struct WikicloudServerBuilder {
    config: WebConfig,
}

impl WikicloudServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self {
            config: WebConfig::default(),
        }
    }

    /// Start from an existing configuration
    pub fn from_config(config: WebConfig) -> Self {
        Self { config }
    }

    /// Set the server host
    pub fn host<S: Into<String>>(mut self, host: S) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the server port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the analysis configuration file
    pub fn config_path<P: Into<std::path::PathBuf>>(mut self, path: P) -> Self {
        self.config.config_path = Some(path.into());
        self
    }

    /// Build the server
    pub async fn build(self) -> WebResult<WikicloudServer> {
        WikicloudServer::new(self.config).await
    }
}

impl Default for WikicloudServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
