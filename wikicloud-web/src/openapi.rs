//! OpenAPI specification for the wikicloud web server

use utoipa::OpenApi;

use crate::handlers::{
    AnalyzeForm, AnalyzeResponse, ErrorResponse, HealthResponse, PaletteInfo, PalettesResponse,
    WordCloudItem,
};

/// OpenAPI document covering the JSON endpoints
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Wikicloud Web API",
        description = "Word frequency analysis of wiki categories"
    ),
    paths(
        crate::handlers::health_check,
        crate::handlers::list_palettes,
        crate::handlers::analyze_category,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorResponse,
            AnalyzeForm,
            AnalyzeResponse,
            WordCloudItem,
            PaletteInfo,
            PalettesResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Analysis", description = "Category word frequency analysis"),
        (name = "Palettes", description = "Word cloud color palettes"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_generation() {
        let openapi = ApiDoc::openapi();
        assert_eq!(openapi.info.title, "Wikicloud Web API");
        assert!(openapi.paths.paths.contains_key("/analyze"));
        assert!(openapi.paths.paths.contains_key("/api/health"));
    }

    #[test]
    fn test_openapi_json() {
        let json = ApiDoc::openapi().to_pretty_json().unwrap();
        assert!(json.contains("Wikicloud Web API"));
        assert!(json.contains("wordCloudData"));
    }
}
