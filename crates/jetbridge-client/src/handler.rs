//! Inbound event handler.
//!
//! Entry point the dispatcher calls for every client data notification on
//! the downlink. It copies the frame out of the borrowed event, then hands it
//! to the pending request table. Nothing here waits: the table lookup is a
//! sharded map removal and the hand-off is a one-shot send.

use crate::domain::pending::PendingRequestTable;
use crate::ports::{ClientDataEvent, InboundOutcome};
use jetbridge_types::{ChannelConfig, FrameView};
use tracing::{trace, warn};

/// Routes downlink notifications to waiting callers
#[derive(Clone)]
pub struct InboundHandler {
    pending: PendingRequestTable,
    downlink_request: u32,
    packet_definition: u32,
}

impl InboundHandler {
    pub fn new(pending: PendingRequestTable, channel: &ChannelConfig) -> Self {
        Self {
            pending,
            downlink_request: channel.downlink_request,
            packet_definition: channel.packet_definition,
        }
    }

    /// Handle one notification.
    ///
    /// Events for other data requests or definitions are ignored so the
    /// handler can sit behind a dispatcher shared with other subscriptions.
    pub fn on_frame_received(&self, event: ClientDataEvent<'_>) -> InboundOutcome {
        if event.request_id != self.downlink_request || event.define_id != self.packet_definition {
            trace!(
                request_id = event.request_id,
                define_id = event.define_id,
                "Ignoring notification for another subscription"
            );
            return InboundOutcome::Ignored;
        }

        let frame = match FrameView::parse(event.data) {
            Ok(view) => view.to_frame(),
            Err(e) => {
                warn!(error = %e, "Dropping malformed downlink frame");
                return InboundOutcome::Malformed;
            }
        };

        let id = frame.id();
        if self.pending.resolve(id, frame) {
            InboundOutcome::Delivered(id)
        } else {
            InboundOutcome::Unmatched(id)
        }
    }

    /// The table this handler resolves into.
    pub fn pending(&self) -> &PendingRequestTable {
        &self.pending
    }
}
