//! Wikicloud CLI - Command-line interface for category word analysis
//!
//! Analyzes a wiki category into its most frequent words and manages the
//! local result cache and configuration file.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use wikicloud_analysis::{word_cloud_entries, CacheStore, CategoryAnalyzer, WordCloudPayload};
use wikicloud_api::MediaWikiClient;
use wikicloud_core::{
    config_error, init_logging, CategoryName, ErrorContext, LoggingConfig, WikicloudConfig,
    WikicloudError, WikicloudResult,
};

#[derive(Parser, Debug)]
#[command(name = "wikicloud")]
#[command(about = "Most frequent words across the pages of a wiki category")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a category and print its most frequent words
    Analyze {
        /// Category name, with or without the "Category:" prefix
        category: String,

        /// Number of words to print
        #[arg(short = 'n', long, default_value = "50")]
        top: usize,

        /// Print the word cloud payload as JSON instead
        #[arg(long)]
        json: bool,
    },

    /// Inspect or clear cached results
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Initialize default configuration
        #[arg(long)]
        init: bool,

        /// Validate current configuration
        #[arg(long)]
        validate: bool,
    },
}

#[derive(Subcommand, Debug)]
enum CacheAction {
    /// List cached entries
    List,
    /// Show cache statistics
    Stats,
    /// Remove cached results
    Clear {
        /// Only clear this category
        #[arg(long)]
        category: Option<String>,
    },
}

#[tokio::main]
async fn main() -> WikicloudResult<()> {
    let cli = Cli::parse();

    let logging_config = if cli.verbose {
        LoggingConfig::verbose()
    } else {
        LoggingConfig::default()
    };

    init_logging(&logging_config).map_err(|e| WikicloudError::Config {
        message: format!("Failed to initialize logging: {}", e),
        source: Some(e),
        context: ErrorContext::new("cli")
            .with_operation("init_logging")
            .with_suggestion("Check RUST_LOG and logging configuration"),
    })?;

    info!("Starting wikicloud CLI v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Analyze {
            category,
            top,
            json,
        } => {
            let config = load_config(cli.config.as_ref())?;
            handle_analyze(&category, top, json, &config).await?;
        }
        Commands::Cache { action } => {
            let config = load_config(cli.config.as_ref())?;
            handle_cache(action, &config).await?;
        }
        Commands::Config {
            show,
            init,
            validate,
        } => {
            handle_config(show, init, validate, cli.config.as_ref())?;
        }
    }

    Ok(())
}

/// Config file locations searched when `--config` is not given, in order
fn default_config_paths() -> Vec<PathBuf> {
    [
        dirs::config_dir().map(|d| d.join("wikicloud").join("config.toml")),
        dirs::home_dir().map(|d| d.join(".wikicloud").join("config.toml")),
        Some(PathBuf::from("wikicloud.toml")),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn load_config(config_path: Option<&PathBuf>) -> WikicloudResult<WikicloudConfig> {
    if let Some(path) = config_path {
        info!("Loading configuration from {:?}", path);
        return WikicloudConfig::from_file(path);
    }

    for path in default_config_paths() {
        if path.exists() {
            info!("Loading configuration from {:?}", path);
            return WikicloudConfig::from_file(&path);
        }
    }

    info!("No configuration file found, using defaults");
    Ok(WikicloudConfig::default())
}

async fn handle_analyze(
    category: &str,
    top: usize,
    json: bool,
    config: &WikicloudConfig,
) -> WikicloudResult<()> {
    let client = MediaWikiClient::new(config.api.clone())?;
    let analyzer = CategoryAnalyzer::from_config(client, config).await?;

    let report = analyzer.analyze_category_report(category).await?;

    if json {
        let entries = word_cloud_entries(&report.table, top, None);
        let payload = WordCloudPayload {
            category: report.category.to_string(),
            word_count: report.table,
            word_cloud_data: entries,
        };
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    if report.from_cache {
        println!("Loaded {} from cache", report.category);
    } else {
        println!(
            "Analyzed {} pages in {}",
            report.pages_listed, report.category
        );
    }

    if !report.is_complete() {
        println!(
            "⚠️  {} pages could not be fetched and were skipped:",
            report.failed_pages.len()
        );
        for title in &report.failed_pages {
            println!("  - {}", title);
        }
    }

    println!("\nTop {} most frequent non-common words:", top);
    for (word, count) in report.table.most_common(top) {
        println!("{}: {}", word, count);
    }

    Ok(())
}

async fn handle_cache(action: CacheAction, config: &WikicloudConfig) -> WikicloudResult<()> {
    let cache = CacheStore::open(config.cache.resolved_dir()).await?;

    match action {
        CacheAction::List => {
            let entries = cache.entries().await?;
            if entries.is_empty() {
                println!("📭 Cache is empty ({})", cache.cache_dir().display());
            } else {
                println!("📦 {} cached categories:", entries.len());
                for key in entries {
                    println!("  {}", key);
                }
            }
        }
        CacheAction::Stats => {
            let stats = cache.stats().await?;
            println!("📊 Cache statistics");
            println!("  Location: {}", cache.cache_dir().display());
            println!("  Entries:  {}", stats.total_files);
            println!("  Size:     {}", stats.total_size_human());
            if let Some(oldest) = stats.oldest_entry {
                println!("  Oldest:   {}", oldest.format("%Y-%m-%d %H:%M:%S UTC"));
            }
            if let Some(newest) = stats.newest_entry {
                println!("  Newest:   {}", newest.format("%Y-%m-%d %H:%M:%S UTC"));
            }
        }
        CacheAction::Clear { category } => match category {
            Some(name) => {
                let category = CategoryName::parse(&name)?;
                if cache.remove(&category).await? {
                    println!("🗑️  Cleared cached results for {}", category);
                } else {
                    println!("No cached results for {}", category);
                }
            }
            None => {
                let removed = cache.clear().await?;
                println!("🗑️  Cleared {} cached categories", removed);
            }
        },
    }

    Ok(())
}

fn handle_config(
    show: bool,
    init: bool,
    validate: bool,
    config_path: Option<&PathBuf>,
) -> WikicloudResult<()> {
    if !(show || init || validate) {
        println!("Nothing to do. Use --show, --init or --validate.");
        return Ok(());
    }

    if init {
        let path = match config_path {
            Some(path) => path.clone(),
            None => default_config_paths()
                .into_iter()
                .next()
                .ok_or_else(|| config_error!("Cannot determine a config directory", "cli"))?,
        };

        if path.exists() {
            println!("⚠️  Configuration already exists at: {:?}", path);
        } else {
            WikicloudConfig::default().save_to_file(&path)?;
            println!("✅ Configuration initialized at: {:?}", path);
        }
    }

    if show {
        let config = load_config(config_path)?;
        let rendered = toml::to_string_pretty(&config).map_err(|e| WikicloudError::Config {
            message: format!("Failed to render configuration: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("cli").with_operation("show_config"),
        })?;
        println!("📋 Current configuration:");
        println!("{}", rendered);
    }

    if validate {
        // from_file already validates; a failure is reported by main
        load_config(config_path)?;
        println!("✅ Configuration is valid");
    }

    Ok(())
}
