//! Client configuration with validation.

use jetbridge_types::{ChannelConfig, ConfigError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default wait for a reply, in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 1000;

/// Default number of identifier draws before giving up
pub const DEFAULT_MAX_ID_ATTEMPTS: u32 = 8;

/// Correlation client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Timeout used by `request()` and the typed operations
    pub default_timeout_ms: u64,
    /// Identifier draws tried before failing with `AllocatorExhausted`
    pub max_id_attempts: u32,
    /// Channel names and ids
    pub channel: ChannelConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            default_timeout_ms: DEFAULT_TIMEOUT_MS,
            max_id_attempts: DEFAULT_MAX_ID_ATTEMPTS,
            channel: ChannelConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout(
                "default_timeout_ms cannot be 0".into(),
            ));
        }

        if self.max_id_attempts == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_id_attempts cannot be 0".into(),
            ));
        }

        self.channel.validate()
    }

    pub fn default_timeout(&self) -> Duration {
        Duration::from_millis(self.default_timeout_ms)
    }
}
