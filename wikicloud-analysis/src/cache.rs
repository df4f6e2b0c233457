//! Content-addressed frequency table cache
//!
//! One JSON file per analyzed category, named by the SHA-256 of the
//! normalized category title. Entries never expire; they are reused until
//! someone deletes them.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};
use uuid::Uuid;
use wikicloud_core::{
    cache_error, CategoryName, ErrorContext, FrequencyTable, WikicloudError, WikicloudResult,
};

const ENTRY_EXTENSION: &str = "json";

/// Hex-encoded SHA-256 of a normalized category title
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Cache key for a category. Normalization already happened when the
/// `CategoryName` was built, so `Foo` and `Category:Foo` share a key.
pub fn key_for(category: &CategoryName) -> CacheKey {
    let mut hasher = Sha256::new();
    hasher.update(category.as_str().as_bytes());
    CacheKey(format!("{:x}", hasher.finalize()))
}

/// File-backed cache of frequency tables
#[derive(Debug, Clone)]
pub struct CacheStore {
    cache_dir: PathBuf,
}

impl CacheStore {
    /// Open a cache rooted at `cache_dir`, creating the directory if needed
    pub async fn open<P: AsRef<Path>>(cache_dir: P) -> WikicloudResult<Self> {
        let cache_dir = cache_dir.as_ref().to_path_buf();

        fs::create_dir_all(&cache_dir).await.map_err(|e| WikicloudError::Cache {
            message: format!("Failed to create cache directory {}: {}", cache_dir.display(), e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("cache_store")
                .with_operation("open")
                .with_suggestion("Set cache.dir to a writable location"),
        })?;

        debug!("Opened cache store at {:?}", cache_dir);
        Ok(Self { cache_dir })
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn key_for(&self, category: &CategoryName) -> CacheKey {
        key_for(category)
    }

    /// Path of the entry for a category
    pub fn entry_path(&self, category: &CategoryName) -> PathBuf {
        self.cache_dir
            .join(format!("{}.{}", key_for(category), ENTRY_EXTENSION))
    }

    /// Load the cached table for a category.
    ///
    /// Returns `(table, true)` on a hit. A missing, unreadable or corrupt
    /// entry is reported as a miss with an empty table.
    pub async fn load(&self, category: &CategoryName) -> (FrequencyTable, bool) {
        match self.try_load(category).await {
            Ok(Some(table)) => {
                info!("Loaded results from cache for category '{}'", category);
                (table, true)
            }
            Ok(None) => {
                debug!("No cache found for category: {}", category);
                (FrequencyTable::new(), false)
            }
            Err(e) => {
                warn!(
                    category = %category,
                    error = %e,
                    "Ignoring unreadable cache entry"
                );
                (FrequencyTable::new(), false)
            }
        }
    }

    async fn try_load(&self, category: &CategoryName) -> WikicloudResult<Option<FrequencyTable>> {
        let cache_file = self.entry_path(category);

        let content = match fs::read_to_string(&cache_file).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(cache_error!("Failed to read cache entry", "cache_store", e)),
        };

        let table: FrequencyTable = serde_json::from_str(&content)
            .map_err(|e| cache_error!("Failed to deserialize cache entry", "cache_store", e))?;

        Ok(Some(table))
    }

    /// Persist a table for a category. Failures are logged and reported as
    /// `false`; they never fail the analysis that produced the table.
    pub async fn save(&self, category: &CategoryName, table: &FrequencyTable) -> bool {
        match self.try_save(category, table).await {
            Ok(path) => {
                info!("Results cached to {:?}", path);
                true
            }
            Err(e) => {
                e.log();
                false
            }
        }
    }

    async fn try_save(
        &self,
        category: &CategoryName,
        table: &FrequencyTable,
    ) -> WikicloudResult<PathBuf> {
        let cache_file = self.entry_path(category);

        fs::create_dir_all(&self.cache_dir)
            .await
            .map_err(|e| cache_error!("Failed to create cache directory", "cache_store", e))?;

        let json_content = serde_json::to_string_pretty(table)
            .map_err(|e| cache_error!("Failed to serialize frequency table", "cache_store", e))?;

        // Write beside the final path and rename so readers never see a
        // partial entry under the key. Each save gets its own temp file.
        let temp_file = cache_file.with_extension(format!(
            "{}.{}.tmp",
            ENTRY_EXTENSION,
            Uuid::new_v4().simple()
        ));

        if let Err(e) = fs::write(&temp_file, json_content).await {
            let _ = fs::remove_file(&temp_file).await;
            return Err(cache_error!("Failed to write cache entry", "cache_store", e));
        }

        if let Err(e) = fs::rename(&temp_file, &cache_file).await {
            let _ = fs::remove_file(&temp_file).await;
            return Err(cache_error!("Failed to move cache entry into place", "cache_store", e));
        }

        Ok(cache_file)
    }

    /// Delete the entry for one category. Returns whether an entry existed.
    pub async fn remove(&self, category: &CategoryName) -> WikicloudResult<bool> {
        let cache_file = self.entry_path(category);

        match fs::remove_file(&cache_file).await {
            Ok(()) => {
                info!("Cleared cache for category: {}", category);
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(cache_error!("Failed to remove cache entry", "cache_store", e)),
        }
    }

    /// Keys of all cached entries
    pub async fn entries(&self) -> WikicloudResult<Vec<String>> {
        let mut keys = Vec::new();
        for path in self.entry_files().await? {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                keys.push(stem.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }

    /// Delete every cached entry. Returns the number removed.
    pub async fn clear(&self) -> WikicloudResult<usize> {
        let mut removed = 0;
        for path in self.entry_files().await? {
            fs::remove_file(&path)
                .await
                .map_err(|e| cache_error!("Failed to remove cache entry", "cache_store", e))?;
            removed += 1;
        }

        info!("Cleared {} cached categories", removed);
        Ok(removed)
    }

    /// Get cache statistics
    pub async fn stats(&self) -> WikicloudResult<CacheStats> {
        let mut stats = CacheStats::default();

        for path in self.entry_files().await? {
            stats.total_files += 1;

            if let Ok(metadata) = fs::metadata(&path).await {
                stats.total_size_bytes += metadata.len();

                if let Ok(modified) = metadata.modified() {
                    let modified_utc: DateTime<Utc> = modified.into();

                    if stats.oldest_entry.is_none() || Some(modified_utc) < stats.oldest_entry {
                        stats.oldest_entry = Some(modified_utc);
                    }
                    if stats.newest_entry.is_none() || Some(modified_utc) > stats.newest_entry {
                        stats.newest_entry = Some(modified_utc);
                    }
                }
            }
        }

        Ok(stats)
    }

    async fn entry_files(&self) -> WikicloudResult<Vec<PathBuf>> {
        let mut files = Vec::new();

        let mut entries = match fs::read_dir(&self.cache_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(files),
            Err(e) => return Err(cache_error!("Failed to read cache directory", "cache_store", e)),
        };

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| cache_error!("Failed to read cache directory", "cache_store", e))?
        {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some(ENTRY_EXTENSION) {
                files.push(path);
            }
        }

        Ok(files)
    }
}

/// Statistics about the cache
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    /// Total number of cached categories
    pub total_files: usize,
    /// Total size of cache in bytes
    pub total_size_bytes: u64,
    pub oldest_entry: Option<DateTime<Utc>>,
    pub newest_entry: Option<DateTime<Utc>>,
}

impl CacheStats {
    /// Get total cache size in human-readable format
    pub fn total_size_human(&self) -> String {
        let size = self.total_size_bytes as f64;
        if size < 1024.0 {
            format!("{} B", size)
        } else if size < 1024.0 * 1024.0 {
            format!("{:.1} KB", size / 1024.0)
        } else if size < 1024.0 * 1024.0 * 1024.0 {
            format!("{:.1} MB", size / (1024.0 * 1024.0))
        } else {
            format!("{:.1} GB", size / (1024.0 * 1024.0 * 1024.0))
        }
    }
}
