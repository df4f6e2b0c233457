//! Route tests against an in-memory content source

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;
use wikicloud_analysis::{CacheStore, CategoryAnalyzer, TextAnalyzer};
use wikicloud_core::{
    async_trait, retrieval_error, CategoryName, ContentSource, PageTitle, WikicloudResult,
};
use wikicloud_web::{create_app, state::SharedSource, AppState, WebConfig};

struct FakeWiki {
    down: bool,
    list_calls: AtomicUsize,
}

#[async_trait]
impl ContentSource for FakeWiki {
    async fn list_pages(&self, category: &CategoryName) -> WikicloudResult<Vec<PageTitle>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.down {
            return Err(retrieval_error!(
                "HTTP 503 error for https://wiki.invalid/w/api.php: maintenance",
                "fake_wiki"
            ));
        }
        match category.bare_name() {
            "Test" => Ok(vec!["Page A".to_string(), "Page B".to_string()]),
            _ => Ok(Vec::new()),
        }
    }

    async fn fetch_content(&self, title: &str) -> WikicloudResult<String> {
        Ok(match title {
            "Page A" => "The Dog ran. The dog barked!",
            "Page B" => "Dogs bark loudly",
            _ => "",
        }
        .to_string())
    }
}

struct TestApp {
    app: Router,
    wiki: Arc<FakeWiki>,
    _cache_dir: TempDir,
}

async fn test_app(down: bool) -> TestApp {
    let cache_dir = TempDir::new().unwrap();
    let wiki = Arc::new(FakeWiki {
        down,
        list_calls: AtomicUsize::new(0),
    });

    let source: SharedSource = wiki.clone();
    let cache = CacheStore::open(cache_dir.path()).await.unwrap();
    let analyzer = CategoryAnalyzer::new(source, TextAnalyzer::english(), cache);
    let state = AppState::with_analyzer(WebConfig::default(), analyzer);

    TestApp {
        app: create_app(state),
        wiki,
        _cache_dir: cache_dir,
    }
}

fn analyze_request(form: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/analyze")
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

async fn send_json(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_analyze_returns_word_cloud_payload() {
    let test = test_app(false).await;

    let (status, body) = send_json(&test.app, analyze_request("category=Test")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category"], "Test");
    assert_eq!(
        body["wordCount"],
        serde_json::json!({"dog": 2, "ran": 1, "barked": 1, "dogs": 1, "bark": 1, "loudly": 1})
    );

    let cloud = body["wordCloudData"].as_array().unwrap();
    assert_eq!(cloud.len(), 6);
    assert_eq!(cloud[0], serde_json::json!({"text": "dog", "size": 2}));
    assert_eq!(cloud[1]["text"], "ran");
    assert!(cloud.iter().all(|entry| entry.get("color").is_none()));
}

#[tokio::test]
async fn test_analyze_with_palette_colors_by_rank() {
    let test = test_app(false).await;

    let (status, body) =
        send_json(&test.app, analyze_request("category=Category%3ATest&palette=Ocean")).await;

    assert_eq!(status, StatusCode::OK);
    let cloud = body["wordCloudData"].as_array().unwrap();
    assert_eq!(cloud[0]["color"], "#01579B");
    assert_eq!(cloud[1]["color"], "#0288D1");
    assert_eq!(cloud[5]["color"], "#E1F5FE");
}

#[tokio::test]
async fn test_unknown_palette_falls_back_to_default() {
    let test = test_app(false).await;

    let (_, body) = send_json(&test.app, analyze_request("category=Test&palette=neon")).await;

    assert_eq!(body["wordCloudData"][0]["color"], "#000000");
}

#[tokio::test]
async fn test_empty_category_is_bad_request() {
    let test = test_app(false).await;

    for form in ["category=", "category=%20%20", "palette=ocean"] {
        let (status, body) = send_json(&test.app, analyze_request(form)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "form {:?}", form);
        assert_eq!(body, serde_json::json!({"error": "Category name is required"}));
    }
    assert_eq!(test.wiki.list_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_retrieval_failure_is_server_error_without_details() {
    let test = test_app(true).await;

    let (status, body) = send_json(&test.app, analyze_request("category=Test")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().unwrap();
    assert!(!message.is_empty());
    assert!(!message.contains("wiki.invalid"));
}

#[tokio::test]
async fn test_second_request_is_served_from_cache() {
    let test = test_app(false).await;

    let (_, first) = send_json(&test.app, analyze_request("category=Test")).await;
    let (_, second) = send_json(&test.app, analyze_request("category=Category:Test")).await;

    assert_eq!(first["wordCount"], second["wordCount"]);
    assert_eq!(test.wiki.list_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_health_check() {
    let test = test_app(false).await;

    let (status, body) = send_json(&test.app, get_request("/api/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_palettes_listing() {
    let test = test_app(false).await;

    let (status, body) = send_json(&test.app, get_request("/api/palettes")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["default"], "default");
    let palettes = body["palettes"].as_array().unwrap();
    assert_eq!(palettes.len(), 7);
    assert_eq!(palettes[0]["name"], "default");
    assert!(palettes
        .iter()
        .all(|p| p["colors"].as_array().map(Vec::len) == Some(6)));
}

#[tokio::test]
async fn test_index_page() {
    let test = test_app(false).await;

    let (status, body) = send(&test.app, get_request("/")).await;

    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("<form"));
    assert!(html.contains("sunset"));
}

#[tokio::test]
async fn test_openapi_document() {
    let test = test_app(false).await;

    let (status, body) = send_json(&test.app, get_request("/api/openapi.json")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/analyze"]["post"].is_object());
}
