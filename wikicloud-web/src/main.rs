//! Wikicloud Web Server
//!
//! Word clouds for wiki categories in the browser.

use clap::Parser;
use std::path::PathBuf;
use wikicloud_web::server::WikicloudServerBuilder;
use wikicloud_web::{init_logging, WebConfig};

/// Wikicloud Web Server - word clouds for wiki categories
#[derive(Parser, Debug)]
#[command(name = "wikicloud-web")]
#[command(about = "A web interface for wikicloud")]
#[command(version)]
struct Args {
    /// Server host to bind to [env: WIKICLOUD_HOST]
    #[arg(long)]
    host: Option<String>,

    /// Server port to listen on [env: WIKICLOUD_PORT]
    #[arg(short, long)]
    port: Option<u16>,

    /// Analysis configuration file [env: WIKICLOUD_CONFIG]
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    /// Command line flags win over the environment
    fn apply(self, mut config: WebConfig) -> WebConfig {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(path) = self.config {
            config.config_path = Some(path);
        }
        config
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Load environment variables
    dotenvy::dotenv().ok();

    init_logging(&format!(
        "wikicloud_web={level},wikicloud_analysis={level},wikicloud_api={level},tower_http=debug",
        level = args.log_level
    ));

    let config = args.apply(WebConfig::from_env());

    println!("🚀 Starting wikicloud web server");
    println!("📍 Server: http://{}", config.address());
    if let Some(path) = &config.config_path {
        println!("⚙️  Config: {}", path.display());
    }

    let server = match WikicloudServerBuilder::from_config(config).build().await {
        Ok(server) => server,
        Err(e) => {
            eprintln!("❌ Failed to build server: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.start().await {
        eprintln!("❌ Server failed to start: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parsing() {
        let args = Args::parse_from(["wikicloud-web"]);
        assert!(args.host.is_none());
        assert!(args.port.is_none());
        assert_eq!(args.log_level, "info");

        let args = Args::parse_from([
            "wikicloud-web",
            "--host",
            "0.0.0.0",
            "--port",
            "3000",
            "--config",
            "wikicloud.toml",
        ]);
        assert_eq!(args.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(args.port, Some(3000));
    }

    #[test]
    fn test_flags_override_environment() {
        let env_config = WebConfig {
            host: "10.0.0.1".to_string(),
            port: 9000,
            config_path: None,
        };

        let config = Args::parse_from(["wikicloud-web", "--port", "3000"]).apply(env_config);
        assert_eq!(config.host, "10.0.0.1");
        assert_eq!(config.port, 3000);
        assert!(config.config_path.is_none());
    }
}
