//! Inbound Ports (Driving Ports)
//!
//! The external dispatcher owns the notification buffer and may reuse it as
//! soon as the callback returns, so events are borrowed views only.

use jetbridge_types::FrameId;

/// A client data notification as delivered by the dispatcher.
#[derive(Debug, Clone, Copy)]
pub struct ClientDataEvent<'a> {
    /// Data request id the notification answers
    pub request_id: u32,
    /// Data definition the bytes are laid out by
    pub define_id: u32,
    /// Raw bytes of the area
    pub data: &'a [u8],
}

impl<'a> ClientDataEvent<'a> {
    pub fn new(request_id: u32, define_id: u32, data: &'a [u8]) -> Self {
        Self {
            request_id,
            define_id,
            data,
        }
    }
}

/// What the inbound handler did with one notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboundOutcome {
    /// Reply handed to the waiting caller
    Delivered(FrameId),
    /// No caller waiting for this id; the frame was dropped
    Unmatched(FrameId),
    /// Notification for another subscription
    Ignored,
    /// Bytes too short to hold a frame
    Malformed,
}

impl InboundOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, InboundOutcome::Delivered(_))
    }
}
