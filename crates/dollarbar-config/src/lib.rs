//! Configuration management for dollar bar pipelines
//!
//! Configuration precedence (highest to lowest):
//! 1. Environment variables (`DOLLARBAR_<SECTION>__<KEY>`)
//! 2. Configuration file (`dollarbar.toml`)
//! 3. Default values

mod algorithm;
mod app;
mod source;

// Re-export main types
pub use algorithm::AlgorithmConfig;
pub use app::{AppConfig, LogLevel};
pub use source::SourceConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Semantic validation failures for loaded settings
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    #[error("dollar_threshold must be a positive finite number, got {0}")]
    DollarThreshold(f64),

    #[error("bar_interval_secs must be positive, got {0}")]
    BarInterval(i64),

    #[error("start_date {start} is after end_date {end}")]
    DateRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("session_open {open} must be before session_close {close}")]
    SessionHours {
        open: chrono::NaiveTime,
        close: chrono::NaiveTime,
    },

    #[error("{field} must be positive")]
    ZeroLimit { field: &'static str },
}

/// Root configuration structure containing all configuration categories
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Application-wide settings
    pub app: AppConfig,

    /// Dollar bar aggregation parameters
    pub algorithm: AlgorithmConfig,

    /// Historical bar source parameters
    pub source: SourceConfig,
}

impl Settings {
    /// Load configuration from multiple sources with proper precedence
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&Settings::default())?)
            // Add configuration file if it exists
            .add_source(
                config::File::with_name("dollarbar")
                    .format(config::FileFormat::Toml)
                    .required(false),
            )
            // Keys contain underscores, so sections are split on "__"
            .add_source(
                config::Environment::with_prefix("DOLLARBAR")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load configuration from a specific file path
    pub fn load_from_file(path: &Path) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(config::File::from(path).format(config::FileFormat::Toml));

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Check every section
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.algorithm.validate()?;
        self.source.validate()
    }
}
