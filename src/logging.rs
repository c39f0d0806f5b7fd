//! # Logging
//!
//! Structured logging configuration and initialization.

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Log format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON format (structured logging).
    #[default]
    Json,
    /// Pretty format (human-readable).
    Pretty,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::Json,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Initializes the global tracing subscriber.
///
/// `RUST_LOG` overrides the configured level. Calling this twice is a no-op;
/// the second subscriber fails to install and the error is dropped, which
/// keeps the function safe for use from tests.
pub fn init(config: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };

    drop(result);
}
