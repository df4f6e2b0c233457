//! Core trait definitions

use crate::error::WikicloudResult;
use crate::types::{CategoryName, PageTitle};
use async_trait::async_trait;

/// Remote source of category listings and page text
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Resolve a category to the titles of its content pages, following
    /// pagination until the source reports no more results.
    ///
    /// All-or-nothing: any failing request discards what was gathered so far.
    async fn list_pages(&self, category: &CategoryName) -> WikicloudResult<Vec<PageTitle>>;

    /// Plain-text body of a single page. Pages without extractable text
    /// yield an empty string rather than an error.
    async fn fetch_content(&self, title: &str) -> WikicloudResult<String>;
}

#[async_trait]
impl<T: ContentSource + ?Sized> ContentSource for std::sync::Arc<T> {
    async fn list_pages(&self, category: &CategoryName) -> WikicloudResult<Vec<PageTitle>> {
        (**self).list_pages(category).await
    }

    async fn fetch_content(&self, title: &str) -> WikicloudResult<String> {
        (**self).fetch_content(title).await
    }
}
