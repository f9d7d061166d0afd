//! File layering over defaults

use dollarbar_config::{LogLevel, Settings};
use std::path::PathBuf;

fn write_config(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("{name}-{}.toml", std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_file_overrides_defaults() {
    let path = write_config(
        "dollarbar-partial",
        r#"
[app]
log_level = "debug"

[algorithm]
dollar_threshold = 25000000.0

[source]
symbol = "QQQ"
session_close = "18:00:00"
"#,
    );

    let settings = Settings::load_from_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(settings.app.log_level, LogLevel::Debug);
    assert_eq!(settings.algorithm.dollar_threshold, 25_000_000.0);
    assert_eq!(settings.source.symbol, "QQQ");
    assert_eq!(settings.source.session_close.to_string(), "18:00:00");

    // Untouched keys keep their defaults
    assert_eq!(settings.algorithm.bar_interval_secs, 60);
    assert_eq!(settings.source.max_requests_per_window, 200);
    assert!(settings.validate().is_ok());
}

#[test]
fn test_invalid_values_load_but_fail_validation() {
    let path = write_config(
        "dollarbar-invalid",
        r#"
[algorithm]
dollar_threshold = -1.0
"#,
    );

    let settings = Settings::load_from_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert!(settings.validate().is_err());
    assert!(settings.algorithm.aggregator().is_err());
}

#[test]
fn test_missing_file_is_an_error() {
    let path = std::env::temp_dir().join("dollarbar-does-not-exist.toml");
    assert!(Settings::load_from_file(&path).is_err());
}
