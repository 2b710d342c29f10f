//! Logging configuration from environment variables.

use std::env;

/// Logging configuration for a JetBridge process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Log filter directive (trace, debug, info, warn, error, or a full
    /// `EnvFilter` expression)
    pub log_level: String,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,

    /// Whether to include thread ids in each line
    pub thread_ids: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            thread_ids: false,
        }
    }
}

impl LogConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `JETBRIDGE_LOG_LEVEL` or `RUST_LOG`: Log filter (default: info)
    /// - `JETBRIDGE_JSON_LOGS`: Enable JSON logs (default: false)
    /// - `JETBRIDGE_THREAD_IDS`: Include thread ids (default: false)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let flag = |key: &str| {
            lookup(key)
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(false)
        };

        Self {
            log_level: lookup("JETBRIDGE_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or_else(|| "info".to_string()),
            json_logs: flag("JETBRIDGE_JSON_LOGS"),
            thread_ids: flag("JETBRIDGE_THREAD_IDS"),
        }
    }
}
