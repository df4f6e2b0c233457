//! MediaWiki action API client

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Deserialize;
use std::collections::HashMap;
use wikicloud_core::{
    ApiConfig, CategoryName, ContentSource, ErrorContext, Pacer, PageTitle, WikicloudError,
    WikicloudResult,
};

use super::client::{create_http_client, handle_response_error};

/// Namespace number of category pages
const CATEGORY_NAMESPACE: i64 = 14;

/// MediaWiki API client
pub struct MediaWikiClient {
    client: reqwest::Client,
    config: ApiConfig,
    pacer: Pacer,
}

/// Error object the API returns with a 200 status
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: String,
    info: Option<String>,
}

/// `list=categorymembers` response
#[derive(Debug, Deserialize)]
struct CategoryMembersResponse {
    error: Option<ApiErrorBody>,
    #[serde(rename = "continue")]
    continuation: Option<HashMap<String, String>>,
    query: Option<CategoryMembersQuery>,
}

#[derive(Debug, Deserialize)]
struct CategoryMembersQuery {
    #[serde(default)]
    categorymembers: Vec<CategoryMember>,
}

#[derive(Debug, Deserialize)]
struct CategoryMember {
    title: String,
    ns: Option<i64>,
}

/// `prop=extracts` response
#[derive(Debug, Deserialize)]
struct ExtractsResponse {
    error: Option<ApiErrorBody>,
    query: Option<ExtractsQuery>,
}

#[derive(Debug, Deserialize)]
struct ExtractsQuery {
    #[serde(default)]
    pages: HashMap<String, ExtractPage>,
}

#[derive(Debug, Deserialize)]
struct ExtractPage {
    extract: Option<String>,
}

impl MediaWikiClient {
    /// Create a new MediaWiki API client
    pub fn new(config: ApiConfig) -> WikicloudResult<Self> {
        let client = create_http_client(&config)?;
        let pacer = config.pagination_pacer();

        info!("Created MediaWiki API client for {}", config.endpoint);

        Ok(Self {
            client,
            config,
            pacer,
        })
    }

    /// Override the delay between paginated listing requests
    pub fn with_pacer(mut self, pacer: Pacer) -> Self {
        self.pacer = pacer;
        self
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Make a GET request to the API and decode the JSON body
    async fn get_json<T>(&self, params: &[(&str, String)], operation: &str) -> WikicloudResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        debug!("Making MediaWiki API request to {} ({})", self.config.endpoint, operation);

        let response = self
            .client
            .get(&self.config.endpoint)
            .query(params)
            .send()
            .await
            .map_err(|e| WikicloudError::Retrieval {
                message: format!("Failed to make request to content API: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("mediawiki_client").with_operation(operation),
            })?;

        if !response.status().is_success() {
            return Err(handle_response_error(response, operation).await);
        }

        response.json::<T>().await.map_err(|e| WikicloudError::Retrieval {
            message: format!("Malformed response from content API: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("mediawiki_client")
                .with_operation(operation)
                .with_suggestion("Check that api.endpoint points at a MediaWiki api.php"),
        })
    }

    fn api_error(error: ApiErrorBody, operation: &str) -> WikicloudError {
        WikicloudError::Retrieval {
            message: format!(
                "Content API returned error '{}': {}",
                error.code,
                error.info.unwrap_or_default()
            ),
            source: None,
            context: ErrorContext::new("mediawiki_client")
                .with_operation(operation)
                .with_metadata("api_error_code", &error.code),
        }
    }

    fn listing_params(
        &self,
        category: &CategoryName,
        continuation: Option<&HashMap<String, String>>,
    ) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("action", "query".to_string()),
            ("format", "json".to_string()),
            ("list", "categorymembers".to_string()),
            ("cmtitle", category.as_str().to_string()),
            ("cmlimit", self.config.batch_size.to_string()),
            ("cmtype", "page".to_string()),
        ];

        if let Some(continuation) = continuation {
            if let Some(token) = continuation.get("cmcontinue") {
                params.push(("cmcontinue", token.clone()));
            }
            if let Some(token) = continuation.get("continue") {
                params.push(("continue", token.clone()));
            }
        }

        params
    }
}

#[async_trait]
impl ContentSource for MediaWikiClient {
    async fn list_pages(&self, category: &CategoryName) -> WikicloudResult<Vec<PageTitle>> {
        info!("Listing pages in {}", category);

        let mut pages = Vec::new();
        let mut continuation: Option<HashMap<String, String>> = None;
        let mut requests = 0usize;

        loop {
            let params = self.listing_params(category, continuation.as_ref());
            let response: CategoryMembersResponse =
                self.get_json(&params, "list_category_members").await?;
            requests += 1;

            if let Some(error) = response.error {
                return Err(Self::api_error(error, "list_category_members"));
            }

            if let Some(query) = response.query {
                for member in query.categorymembers {
                    if member.ns == Some(CATEGORY_NAMESPACE) {
                        warn!("Skipping subcategory {} returned for cmtype=page", member.title);
                        continue;
                    }
                    pages.push(member.title);
                }
            }

            match response.continuation {
                Some(next) if next.contains_key("cmcontinue") => {
                    continuation = Some(next);
                    // Pause only when another request follows
                    self.pacer.pause("category_pagination").await;
                }
                _ => break,
            }
        }

        info!(
            "Found {} pages in category '{}' ({} requests)",
            pages.len(),
            category,
            requests
        );
        Ok(pages)
    }

    async fn fetch_content(&self, title: &str) -> WikicloudResult<String> {
        debug!("Fetching extract for page {}", title);

        let params = [
            ("action", "query".to_string()),
            ("format", "json".to_string()),
            ("titles", title.to_string()),
            ("prop", "extracts".to_string()),
            ("explaintext", "1".to_string()),
            ("exsectionformat", "plain".to_string()),
        ];

        let response: ExtractsResponse = self.get_json(&params, "fetch_page_extract").await?;

        if let Some(error) = response.error {
            return Err(Self::api_error(error, "fetch_page_extract"));
        }

        // Missing pages, redirects and body-less pages have no extract
        let extract = response
            .query
            .into_iter()
            .flat_map(|query| query.pages.into_values())
            .find_map(|page| page.extract)
            .unwrap_or_default();

        if extract.is_empty() {
            debug!("Page {} has no extractable text", title);
        }

        Ok(extract)
    }
}
