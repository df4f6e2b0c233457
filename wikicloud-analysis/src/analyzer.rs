//! Category analysis orchestration
//!
//! Cache lookup, page listing, sequential per-page fetch and analysis,
//! aggregation and cache write, in that order.

use tracing::{debug, info, warn};
use wikicloud_core::{
    log_operation_error, log_operation_start, log_operation_success, CategoryName,
    CategoryReport, ContentSource, FailurePolicy, FrequencyTable, Pacer, WikicloudConfig,
    WikicloudResult,
};

use crate::cache::CacheStore;
use crate::text::TextAnalyzer;

/// Builds a frequency table for a whole category
pub struct CategoryAnalyzer<S: ContentSource> {
    source: S,
    text: TextAnalyzer,
    cache: CacheStore,
    page_pacer: Pacer,
    delay_after_last_page: bool,
    failure_policy: FailurePolicy,
}

impl<S: ContentSource> CategoryAnalyzer<S> {
    /// Analyzer with no per-page delay and fail-fast behavior
    pub fn new(source: S, text: TextAnalyzer, cache: CacheStore) -> Self {
        Self {
            source,
            text,
            cache,
            page_pacer: Pacer::disabled(),
            delay_after_last_page: false,
            failure_policy: FailurePolicy::FailFast,
        }
    }

    /// Wire up an analyzer from configuration. Opens the cache directory and
    /// resolves the stopword list, so misconfiguration fails here rather
    /// than on the first request.
    pub async fn from_config(source: S, config: &WikicloudConfig) -> WikicloudResult<Self> {
        let text = TextAnalyzer::from_config(&config.analysis)?;
        let cache = CacheStore::open(config.cache.resolved_dir()).await?;

        Ok(Self::new(source, text, cache)
            .with_page_pacer(config.analysis.page_pacer())
            .with_delay_after_last_page(config.analysis.delay_after_last_page)
            .with_failure_policy(config.analysis.failure_policy))
    }

    pub fn with_page_pacer(mut self, pacer: Pacer) -> Self {
        self.page_pacer = pacer;
        self
    }

    pub fn with_delay_after_last_page(mut self, enabled: bool) -> Self {
        self.delay_after_last_page = enabled;
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    pub fn text_analyzer(&self) -> &TextAnalyzer {
        &self.text
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    /// Frequency table for a category, served from cache when possible
    pub async fn analyze_category(&self, category: &str) -> WikicloudResult<FrequencyTable> {
        let report = self.analyze_category_report(category).await?;
        Ok(report.table)
    }

    /// Same as [`analyze_category`](Self::analyze_category) but also reports
    /// how the table was produced.
    pub async fn analyze_category_report(&self, category: &str) -> WikicloudResult<CategoryReport> {
        let category = CategoryName::parse(category)?;
        log_operation_start!("analyze_category", category = %category);
        let start = std::time::Instant::now();

        match self.run(category.clone()).await {
            Ok(report) => {
                log_operation_success!(
                    "analyze_category",
                    duration_ms = start.elapsed().as_millis() as u64,
                    category = %category,
                    words = report.table.len(),
                    from_cache = report.from_cache
                );
                Ok(report)
            }
            Err(e) => {
                log_operation_error!("analyze_category", e, category = %category);
                Err(e)
            }
        }
    }

    async fn run(&self, category: CategoryName) -> WikicloudResult<CategoryReport> {
        let (cached, found) = self.cache.load(&category).await;
        if found {
            return Ok(CategoryReport {
                category,
                table: cached,
                pages_listed: 0,
                failed_pages: Vec::new(),
                from_cache: true,
            });
        }

        info!("Fetching pages from {}", category);
        let pages = self.source.list_pages(&category).await?;
        info!("Found {} pages in category", pages.len());

        let mut table = FrequencyTable::new();
        let mut failed_pages = Vec::new();
        let total = pages.len();

        for (i, title) in pages.iter().enumerate() {
            info!("Processing page {}/{}: {}", i + 1, total, title);

            match self.source.fetch_content(title).await {
                Ok(content) => {
                    let page_table = self.text.analyze(&content);
                    debug!(page = %title, words = page_table.len(), "Analyzed page");
                    table.merge(&page_table);
                }
                Err(e) if self.failure_policy == FailurePolicy::Isolate => {
                    warn!(page = %title, error = %e, "Skipping page that could not be fetched");
                    failed_pages.push(title.clone());
                }
                Err(e) => return Err(e),
            }

            let is_last = i + 1 == total;
            if !is_last || self.delay_after_last_page {
                self.page_pacer.pause("between pages").await;
            }
        }

        if failed_pages.is_empty() {
            self.cache.save(&category, &table).await;
        } else {
            warn!(
                category = %category,
                failed = failed_pages.len(),
                "Not caching partial results"
            );
        }

        Ok(CategoryReport {
            category,
            table,
            pages_listed: total,
            failed_pages,
            from_cache: false,
        })
    }
}
