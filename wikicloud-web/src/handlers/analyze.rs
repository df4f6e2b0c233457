//! Category analysis handler

use super::types::{AnalyzeForm, AnalyzeResponse, ErrorResponse};
use crate::{palette::Palette, AppState, WebResult};
use axum::{
    extract::{Form, State},
    response::Json,
};
use tracing::info;
use wikicloud_analysis::WordCloudPayload;

/// Analyze a category into word cloud data
#[utoipa::path(
    post,
    path = "/analyze",
    tag = "Analysis",
    summary = "Analyze category",
    description = "List every page in the category, count meaningful words across them and \
                   return the full counts plus the top 100 words. Results are cached, so \
                   repeated requests for the same category do not contact the wiki.",
    request_body(content = AnalyzeForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Category analyzed", body = AnalyzeResponse),
        (status = 400, description = "Category name missing", body = ErrorResponse),
        (status = 500, description = "Category could not be analyzed", body = ErrorResponse)
    )
)]
pub async fn analyze_category(
    State(state): State<AppState>,
    Form(form): Form<AnalyzeForm>,
) -> WebResult<Json<AnalyzeResponse>> {
    info!("Analyze request for category: {:?}", form.category);

    let table = state.analyzer.analyze_category(&form.category).await?;

    let palette = form.palette.as_deref().map(Palette::lookup);
    let payload = WordCloudPayload::new(
        form.category.trim(),
        table,
        palette.as_ref().map(Palette::colors),
    );

    Ok(Json(payload.into()))
}
