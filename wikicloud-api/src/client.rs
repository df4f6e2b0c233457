//! Shared HTTP plumbing for the content API client

use wikicloud_core::{ApiConfig, ErrorContext, WikicloudError, WikicloudResult};

/// Helper function to create HTTP client with common configuration
pub(crate) fn create_http_client(config: &ApiConfig) -> WikicloudResult<reqwest::Client> {
    let mut headers = reqwest::header::HeaderMap::new();

    headers.insert(
        reqwest::header::USER_AGENT,
        reqwest::header::HeaderValue::from_str(&config.user_agent).map_err(|e| {
            WikicloudError::Config {
                message: format!("Invalid user agent: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("http_client").with_operation("create_client"),
            }
        })?,
    );

    headers.insert(
        reqwest::header::ACCEPT,
        reqwest::header::HeaderValue::from_static("application/json"),
    );

    let mut builder = reqwest::Client::builder().default_headers(headers);

    // No timeout unless configured; a slow wiki keeps the caller waiting
    if let Some(timeout_seconds) = config.timeout_seconds {
        builder = builder.timeout(std::time::Duration::from_secs(timeout_seconds));
    }

    let client = builder.build().map_err(|e| WikicloudError::Config {
        message: format!("Failed to create HTTP client: {}", e),
        source: Some(Box::new(e)),
        context: ErrorContext::new("http_client").with_operation("create_client"),
    })?;

    Ok(client)
}

/// Helper function to handle HTTP response errors
pub(crate) async fn handle_response_error(
    response: reqwest::Response,
    context: &str,
) -> WikicloudError {
    let status = response.status();
    let url = response.url().clone();

    let error_body = response.text().await.unwrap_or_default();

    WikicloudError::Retrieval {
        message: format!(
            "HTTP {} error for {}: {}",
            status.as_u16(),
            url,
            if error_body.is_empty() {
                status.canonical_reason().unwrap_or("Unknown error")
            } else {
                &error_body
            }
        ),
        source: None,
        context: ErrorContext::new("api_client")
            .with_operation(context)
            .with_metadata("status", &status.as_u16().to_string())
            .with_suggestion(match status.as_u16() {
                403 => "Check the User-Agent policy of the wiki",
                404 => "Check api.endpoint in the configuration",
                429 => "Rate limited; increase api.pagination_delay_ms and analysis.page_delay_ms",
                _ => "Check network connectivity and API status",
            }),
    }
}
