//! Correlation client.
//!
//! Turns the fire-and-forget uplink/downlink pair into one-shot calls: each
//! request gets a fresh frame id and a completion slot, goes out on the
//! uplink, and the caller waits until the inbound handler resolves the slot
//! or the timeout removes it.

use crate::domain::config::ClientConfig;
use crate::domain::error::{ClientError, PendingError, SlotError};
use crate::domain::pending::{CompletionSlot, PendingRequestTable};
use crate::handler::InboundHandler;
use crate::ports::Uplink;
use jetbridge_types::{encode_request, ConfigError, Frame, IdAllocator, Opcode};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Result of a typed operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OperationOutput {
    /// The module acknowledged a command
    Acknowledged,
    /// The module returned a value
    Value(f64),
}

impl OperationOutput {
    pub fn value(&self) -> Option<f64> {
        match self {
            OperationOutput::Value(value) => Some(*value),
            OperationOutput::Acknowledged => None,
        }
    }
}

/// Issues requests and waits for their correlated replies
pub struct JetBridgeClient {
    /// Pending request table shared with the inbound handler
    pending: PendingRequestTable,
    /// Outbound channel
    uplink: Arc<dyn Uplink>,
    /// Identifier source
    allocator: &'static IdAllocator,
    config: ClientConfig,
}

impl JetBridgeClient {
    /// Create a client using the process-wide identifier allocator.
    pub fn new(uplink: Arc<dyn Uplink>, config: ClientConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            pending: PendingRequestTable::new(),
            uplink,
            allocator: IdAllocator::global(),
            config,
        })
    }

    /// Replace the identifier allocator.
    pub fn with_allocator(mut self, allocator: &'static IdAllocator) -> Self {
        self.allocator = allocator;
        self
    }

    /// Handler to register with the dispatcher for downlink notifications.
    pub fn inbound_handler(&self) -> InboundHandler {
        InboundHandler::new(self.pending.clone(), &self.config.channel)
    }

    pub fn pending(&self) -> &PendingRequestTable {
        &self.pending
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send `payload` and wait up to `timeout` for the reply.
    ///
    /// Exactly one frame is transmitted per call. A transport failure is
    /// returned before any waiting starts. On timeout the registration is
    /// removed and a reply arriving later is dropped by the inbound handler.
    pub async fn send_request(&self, payload: &[u8], timeout: Duration) -> Result<Frame, ClientError> {
        let (frame, slot) = self.prepare(payload)?;
        let id = frame.id();

        if let Err(e) = self.uplink.transmit(&frame).await {
            // Remove from pending if send fails
            self.pending.remove(id);
            error!(frame_id = %id, error = %e, "Uplink transmit failed");
            return Err(e.into());
        }

        debug!(
            frame_id = %id,
            tag = frame.tag(),
            timeout_ms = timeout.as_millis() as u64,
            "Sent request frame"
        );

        match slot.wait(timeout).await {
            Ok(reply) => Ok(reply),
            Err(SlotError::TimedOut) => Err(ClientError::TimedOut { id, timeout }),
            Err(SlotError::Dropped) => Err(ClientError::SlotDropped { id }),
        }
    }

    /// [`Self::send_request`] with the configured default timeout.
    pub async fn request(&self, payload: &[u8]) -> Result<Frame, ClientError> {
        self.send_request(payload, self.config.default_timeout()).await
    }

    /// Run `opcode` with a text argument and interpret the reply.
    pub async fn execute_operation(
        &self,
        opcode: Opcode,
        argument: &str,
    ) -> Result<OperationOutput, ClientError> {
        let payload = encode_request(opcode, argument)?;
        let reply = self.request(&payload).await?;

        if opcode.returns_value() {
            Ok(OperationOutput::Value(reply.value()))
        } else {
            Ok(OperationOutput::Acknowledged)
        }
    }

    /// Execute calculator code on the host, ignoring any result.
    pub async fn execute_calculator_code(&self, code: &str) -> Result<(), ClientError> {
        self.execute_operation(Opcode::ExecuteCalculatorCode, code)
            .await
            .map(|_| ())
    }

    /// Read a named variable from the host.
    pub async fn get_named_variable(&self, name: &str) -> Result<f64, ClientError> {
        let output = self
            .execute_operation(Opcode::GetNamedVariable, name)
            .await?;
        Ok(output.value().unwrap_or_default())
    }

    /// Build the request frame and register its slot.
    ///
    /// A live duplicate id means the allocator's guarantee was broken; draw
    /// again a bounded number of times, then fail closed.
    fn prepare(&self, payload: &[u8]) -> Result<(Frame, CompletionSlot), ClientError> {
        let attempts = self.config.max_id_attempts;
        for _ in 0..attempts {
            let frame = Frame::with_id(self.allocator.allocate(), payload)?;
            match self.pending.register(frame.id()) {
                Ok(slot) => return Ok((frame, slot)),
                Err(PendingError::DuplicateId(id)) => {
                    warn!(frame_id = %id, "Allocated frame id is already pending");
                }
            }
        }

        error!(attempts, "Frame id allocation exhausted");
        Err(ClientError::AllocatorExhausted { attempts })
    }
}
