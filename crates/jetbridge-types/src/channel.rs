//! Channel naming and the identifiers both ends agree on.
//!
//! The host exposes two client data areas: the uplink carries requests to the
//! module and the downlink carries replies back. Both ends map the same names
//! to the same area ids and register the frame as a single data definition.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Name of the area replies are published on.
pub const PUBLIC_DOWNLINK_CHANNEL: &str = "theomessin.jetbridge.downlink";

/// Name of the area requests are written to.
pub const PUBLIC_UPLINK_CHANNEL: &str = "theomessin.jetbridge.uplink";

/// Client data definition describing one frame.
pub const PACKET_DEFINITION: u32 = 5321;

/// Area id mapped to [`PUBLIC_DOWNLINK_CHANNEL`].
pub const PUBLIC_DOWNLINK_AREA: u32 = 5321;

/// Area id mapped to [`PUBLIC_UPLINK_CHANNEL`].
pub const PUBLIC_UPLINK_AREA: u32 = 5322;

/// Data request id the module uses to watch the uplink.
pub const UPLINK_REQUEST: u32 = 5321;

/// Data request id the client uses to watch the downlink.
pub const DOWNLINK_REQUEST: u32 = 5322;

/// Channel identifiers shared by both ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    pub downlink_channel: String,
    pub uplink_channel: String,
    pub packet_definition: u32,
    pub downlink_area: u32,
    pub uplink_area: u32,
    pub uplink_request: u32,
    pub downlink_request: u32,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            downlink_channel: PUBLIC_DOWNLINK_CHANNEL.to_string(),
            uplink_channel: PUBLIC_UPLINK_CHANNEL.to_string(),
            packet_definition: PACKET_DEFINITION,
            downlink_area: PUBLIC_DOWNLINK_AREA,
            uplink_area: PUBLIC_UPLINK_AREA,
            uplink_request: UPLINK_REQUEST,
            downlink_request: DOWNLINK_REQUEST,
        }
    }
}

impl ChannelConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.downlink_channel.is_empty()
            || self.uplink_channel.is_empty()
            || self.downlink_channel == self.uplink_channel
        {
            return Err(ConfigError::InvalidChannelNames);
        }

        if self.downlink_area == self.uplink_area {
            return Err(ConfigError::DuplicateArea(self.uplink_area));
        }

        Ok(())
    }
}
