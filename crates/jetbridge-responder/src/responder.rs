//! Request handler for the host side of the bridge.
//!
//! Decodes the opcode and argument of a request frame, runs it against the
//! calculator engine and builds a reply with the same frame id. Unknown
//! opcodes get no reply, so the caller observes a timeout.

use crate::engine::CalculatorEngine;
use crate::error::ResponderError;
use jetbridge_types::{ChannelConfig, Frame, FrameError, FrameView, Opcode, Request};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// Answers request frames from the uplink
pub struct Responder<E: CalculatorEngine> {
    engine: Arc<E>,
    uplink_request: u32,
    packet_definition: u32,
    handled: AtomicU64,
}

impl<E: CalculatorEngine> Responder<E> {
    pub fn new(engine: Arc<E>) -> Self {
        Self::with_channel(engine, &ChannelConfig::default())
    }

    pub fn with_channel(engine: Arc<E>, channel: &ChannelConfig) -> Self {
        Self {
            engine,
            uplink_request: channel.uplink_request,
            packet_definition: channel.packet_definition,
            handled: AtomicU64::new(0),
        }
    }

    pub fn engine(&self) -> &Arc<E> {
        &self.engine
    }

    /// Requests answered so far.
    pub fn handled(&self) -> u64 {
        self.handled.load(Ordering::Relaxed)
    }

    /// Build the reply for `request`.
    ///
    /// `Ok(None)` means the opcode is unknown and nothing should be sent.
    /// Engine failures still produce a reply with a zeroed payload.
    pub fn handle(&self, request: &Frame) -> Result<Option<Frame>, ResponderError> {
        let decoded = match Request::decode(request) {
            Ok(decoded) => decoded,
            Err(FrameError::UnknownOpcode(tag)) => {
                warn!(frame_id = %request.id(), tag, "Unknown opcode, not replying");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let mut reply = Frame::reply_to(request);
        match decoded.opcode {
            Opcode::ExecuteCalculatorCode => {
                if let Err(e) = self.engine.execute(decoded.argument) {
                    warn!(frame_id = %request.id(), error = %e, "Calculator code failed");
                }
            }
            Opcode::GetNamedVariable => match self.engine.evaluate(decoded.argument) {
                Ok(value) => reply.set_value(value),
                Err(e) => {
                    warn!(frame_id = %request.id(), error = %e, "Evaluation failed");
                }
            },
        }

        self.handled.fetch_add(1, Ordering::Relaxed);
        debug!(
            frame_id = %request.id(),
            opcode = %decoded.opcode,
            "Answered request"
        );
        Ok(Some(reply))
    }

    /// Handle a raw uplink notification.
    ///
    /// Notifications for other subscriptions and undecodable frames are
    /// dropped with a log line.
    pub fn on_uplink_data(&self, request_id: u32, define_id: u32, data: &[u8]) -> Option<Frame> {
        if request_id != self.uplink_request || define_id != self.packet_definition {
            return None;
        }

        let request = match FrameView::parse(data) {
            Ok(view) => view.to_frame(),
            Err(e) => {
                warn!(error = %e, "Dropping malformed uplink frame");
                return None;
            }
        };

        match self.handle(&request) {
            Ok(reply) => reply,
            Err(e) => {
                warn!(frame_id = %request.id(), error = %e, "Dropping undecodable request");
                None
            }
        }
    }
}
