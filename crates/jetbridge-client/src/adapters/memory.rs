//! In-memory uplink.
//!
//! Stands in for the host's uplink area when both ends live in one process:
//! each transmitted frame is copied to wire bytes and queued on an unbounded
//! `tokio::sync::mpsc` channel. The receiving half plays the host module.

use crate::ports::{TransportError, Uplink};
use async_trait::async_trait;
use jetbridge_types::{Frame, FRAME_WIRE_SIZE};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;
use tracing::trace;

/// Wire bytes of one frame as queued by [`MemoryUplink`].
pub type WireFrame = [u8; FRAME_WIRE_SIZE];

/// Uplink backed by an in-process channel
pub struct MemoryUplink {
    sender: mpsc::UnboundedSender<WireFrame>,
    transmitted: AtomicU64,
}

impl MemoryUplink {
    /// Create an uplink and the receiver the module side reads from.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<WireFrame>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (
            Self {
                sender,
                transmitted: AtomicU64::new(0),
            },
            receiver,
        )
    }

    /// Total frames handed to the channel.
    pub fn transmitted(&self) -> u64 {
        self.transmitted.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Uplink for MemoryUplink {
    async fn transmit(&self, frame: &Frame) -> Result<(), TransportError> {
        self.sender
            .send(frame.to_bytes())
            .map_err(|_| TransportError::Closed)?;
        self.transmitted.fetch_add(1, Ordering::Relaxed);
        trace!(frame_id = %frame.id(), "Frame queued on memory uplink");
        Ok(())
    }
}
