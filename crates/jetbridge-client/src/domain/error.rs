//! Client error taxonomy.
//!
//! Every failure is local to the request that hit it. Replies nobody is
//! waiting for are not errors; the inbound handler reports them as
//! [`crate::ports::InboundOutcome::Unmatched`] and drops them.

use crate::ports::TransportError;
use jetbridge_types::{FrameError, FrameId};
use std::time::Duration;
use thiserror::Error;

/// Errors returned to callers of the correlation client
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request {id} timed out after {}ms", .timeout.as_millis())]
    TimedOut { id: FrameId, timeout: Duration },

    #[error("no unique frame id after {attempts} attempts")]
    AllocatorExhausted { attempts: u32 },

    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    #[error("invalid frame: {0}")]
    Frame(#[from] FrameError),

    #[error("completion slot for request {id} was dropped")]
    SlotDropped { id: FrameId },
}

impl ClientError {
    /// Whether the request was sent but no reply arrived in time.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::TimedOut { .. })
    }
}

/// Errors from the pending request table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PendingError {
    #[error("frame id {0} is already pending")]
    DuplicateId(FrameId),
}

/// Outcome of waiting on a completion slot that produced no frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SlotError {
    #[error("timed out")]
    TimedOut,

    #[error("slot dropped before resolution")]
    Dropped,
}
