//! Page rendering and API documentation

use crate::{openapi::ApiDoc, templates::IndexTemplate, WebResult};
use askama::Template;
use axum::response::{Html, Json};
use utoipa::OpenApi;

/// Word cloud page
pub async fn index() -> WebResult<Html<String>> {
    let template = IndexTemplate::new();
    Ok(Html(template.render()?))
}

/// OpenAPI document for the JSON endpoints
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
