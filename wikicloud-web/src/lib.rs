//! Wikicloud Web Server
//!
//! Serves the word cloud page and the JSON endpoint that analyzes a
//! category for it.

pub mod handlers;
pub mod openapi;
pub mod palette;
pub mod routes;
pub mod server;
pub mod state;
pub mod templates;

// Re-export main types
pub use palette::Palette;
pub use server::WikicloudServer;
pub use state::AppState;

use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        Method, StatusCode,
    },
    response::{IntoResponse, Response},
    Json, Router,
};
use std::path::PathBuf;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::error;
use wikicloud_core::WikicloudError;

use crate::handlers::ErrorResponse;

/// Create the main application router
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([ACCEPT, CONTENT_TYPE]);

    Router::new()
        // Page and form endpoint
        .merge(routes::page_routes())
        // API routes
        .nest("/api", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(DefaultBodyLimit::max(64 * 1024))
        .with_state(state)
}

/// Configuration for the web server
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Analysis configuration file; defaults apply when unset
    pub config_path: Option<PathBuf>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            config_path: None,
        }
    }
}

impl WebConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("WIKICLOUD_HOST").unwrap_or(defaults.host),
            port: std::env::var("WIKICLOUD_PORT")
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or(defaults.port),
            config_path: std::env::var("WIKICLOUD_CONFIG").ok().map(PathBuf::from),
        }
    }

    /// Get the server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Error types for the web server
#[derive(thiserror::Error, Debug)]
pub enum WebError {
    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error(transparent)]
    Analysis(#[from] WikicloudError),
}

/// Result type for web operations
pub type WebResult<T> = Result<T, WebError>;

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            WebError::Analysis(e) if e.is_input_error() => (StatusCode::BAD_REQUEST, e.user_message()),
            WebError::Analysis(e) => {
                e.log();
                (StatusCode::INTERNAL_SERVER_ERROR, e.user_message())
            }
            other => {
                error!(error = %other, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Initialize logging for the web server. `RUST_LOG` wins over
/// `default_directives` when set.
pub fn init_logging(default_directives: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directives.into()),
        )
        .try_init();
}
