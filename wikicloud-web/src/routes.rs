//! Route definitions for the wikicloud web server

use crate::{handlers, AppState};
use axum::{
    routing::{get, post},
    Router,
};

/// HTML page and the form endpoint it posts to
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::index))
        .route("/analyze", post(handlers::analyze_category))
}

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/palettes", get(handlers::list_palettes))
        .route("/openapi.json", get(handlers::openapi_json))
}
