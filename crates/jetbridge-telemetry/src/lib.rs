//! # JetBridge Telemetry
//!
//! Structured logging setup shared by processes embedding the client or the
//! responder.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use jetbridge_telemetry::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::from_env())?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `JETBRIDGE_LOG_LEVEL` | `info` | Log filter (falls back to `RUST_LOG`) |
//! | `JETBRIDGE_JSON_LOGS` | `false` | JSON formatted output |
//! | `JETBRIDGE_THREAD_IDS` | `false` | Include thread ids |

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod config;
mod logging;

pub use config::LogConfig;
pub use logging::init_logging;

use thiserror::Error;

/// Errors raised while installing telemetry
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid log filter: {0}")]
    InvalidFilter(String),

    #[error("failed to install subscriber: {0}")]
    SubscriberInit(String),
}
