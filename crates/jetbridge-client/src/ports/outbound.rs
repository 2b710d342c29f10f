//! Outbound Ports (Driven Ports)
//!
//! The uplink is the host-provided area request frames are written to.
//! Writes are fire-and-forget: success means the frame was handed to the
//! host, not that anyone read it.

use async_trait::async_trait;
use jetbridge_types::Frame;
use thiserror::Error;

/// Transport error types
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("channel closed")]
    Closed,
    #[error("send failed: {0}")]
    SendFailed(String),
}

/// Outbound channel collaborator (Driven Port)
#[async_trait]
pub trait Uplink: Send + Sync {
    /// Write one frame's wire bytes to the uplink area.
    ///
    /// Must not wait for a reply. A failure is reported before the caller
    /// starts waiting.
    async fn transmit(&self, frame: &Frame) -> Result<(), TransportError>;
}
