//! Ports Layer - collaborator contracts.
//!
//! - `outbound`: the uplink the client writes request frames to
//! - `inbound`: the notification the dispatcher hands to the inbound handler

pub mod inbound;
pub mod outbound;

pub use inbound::{ClientDataEvent, InboundOutcome};
pub use outbound::{TransportError, Uplink};
