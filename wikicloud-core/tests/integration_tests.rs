//! Integration tests for wikicloud-core infrastructure

use wikicloud_core::{
    cache_error, config_error, init_logging, input_error, retrieval_error, CategoryName,
    ErrorContext, LogFormat, LoggingConfig, WikicloudConfig, WikicloudError,
};

#[test]
fn test_error_handling() {
    let error = retrieval_error!("Endpoint unreachable", "test_component");

    match &error {
        WikicloudError::Retrieval {
            message, context, ..
        } => {
            assert_eq!(message, "Endpoint unreachable");
            assert_eq!(context.component, "test_component");
            assert!(!context.error_id.is_empty());
        }
        _ => panic!("Expected Retrieval error"),
    }

    // Logging without a subscriber should not panic
    error.log();

    assert!(error.is_recoverable());
    assert!(!error.is_input_error());

    let config_err = config_error!("Invalid config", "test");
    assert!(!config_err.is_recoverable());
}

#[test]
fn test_error_macros() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
    let cache_err = cache_error!("Failed to write cache entry", "cache_store", io);
    match cache_err {
        WikicloudError::Cache {
            message,
            source,
            context,
        } => {
            assert_eq!(message, "Failed to write cache entry");
            assert!(source.is_some());
            assert_eq!(context.component, "cache_store");
            assert!(!context.recovery_suggestions.is_empty());
        }
        _ => panic!("Expected Cache error"),
    }

    let input_err = input_error!("Category name is required", "category", "web");
    match &input_err {
        WikicloudError::Input { field, context, .. } => {
            assert_eq!(field.as_deref(), Some("category"));
            assert_eq!(context.component, "web");
        }
        _ => panic!("Expected Input error"),
    }
    assert!(input_err.is_input_error());
    assert_eq!(input_err.user_message(), "Category name is required");
}

#[test]
fn test_user_message_hides_details() {
    let error = WikicloudError::Retrieval {
        message: "HTTP 503 from https://internal.example/api.php: upstream overloaded".to_string(),
        source: None,
        context: ErrorContext::new("test").with_metadata("status", "503"),
    };

    let message = error.user_message();
    assert!(!message.contains("internal.example"));
    assert!(!message.contains("503"));
}

#[test]
fn test_logging_initialization() {
    let config = LoggingConfig {
        level: "debug".to_string(),
        format: LogFormat::Compact,
        include_location: false,
        include_thread: false,
        log_to_file: false,
        log_file_path: None,
        enable_span_timing: false,
        filter_directives: vec!["wikicloud_core=debug".to_string()],
    };

    // Only the first initialization in a process can succeed, so the result
    // is not asserted here.
    let _ = init_logging(&config);
}

#[test]
fn test_logging_to_file_requires_path() {
    let config = LoggingConfig {
        log_to_file: true,
        log_file_path: None,
        ..LoggingConfig::default()
    };

    assert!(init_logging(&config).is_err());
}

#[test]
fn test_config_roundtrip_through_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = WikicloudConfig::default();
    config.cache.dir = "/var/cache/wikicloud".to_string();
    config.api.timeout_seconds = Some(20);
    config.save_to_file(&path).unwrap();

    let loaded = WikicloudConfig::from_file(&path).unwrap();
    assert_eq!(loaded.cache.dir, "/var/cache/wikicloud");
    assert_eq!(loaded.api.timeout_seconds, Some(20));
    assert_eq!(loaded.api.batch_size, 500);
}

#[test]
fn test_missing_config_file_is_config_error() {
    let err = WikicloudConfig::from_file("/definitely/not/here/wikicloud.toml").unwrap_err();
    assert!(matches!(err, WikicloudError::Config { .. }));
}

#[test]
fn test_category_name_deserializes_normalized() {
    let name: CategoryName = serde_json::from_str("\"Physics\"").unwrap();
    assert_eq!(name.as_str(), "Category:Physics");

    let err = serde_json::from_str::<CategoryName>("\"  \"");
    assert!(err.is_err());
}
