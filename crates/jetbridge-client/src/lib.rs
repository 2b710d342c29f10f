//! # JetBridge Client
//!
//! Synchronous-looking calls over an asynchronous, unordered client data
//! channel.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                        JetBridgeClient                        │
//! │  send_request ─▶ allocate id ─▶ register slot ─▶ transmit     │
//! │                                       │              │        │
//! │                        ┌──────────────┴────────┐     ▼        │
//! │      wait(timeout) ◀── │ PendingRequestTable   │   Uplink     │
//! │                        └──────────────▲────────┘              │
//! │                                       │ resolve(id, frame)    │
//! │                              InboundHandler                   │
//! └───────────────────────────────────────▲───────────────────────┘
//!                                         │ on_frame_received
//!                                 external dispatcher
//! ```
//!
//! ## Guarantees
//!
//! - A caller only ever receives the reply carrying its own frame id
//! - Each registration is removed exactly once (reply, timeout or drop)
//! - Replies for unknown or expired ids are dropped without side effects
//! - Transport failures surface before the caller starts waiting
//!
//! ## Usage
//!
//! ```ignore
//! use jetbridge_client::{ClientConfig, JetBridgeClient, MemoryUplink};
//! use std::sync::Arc;
//!
//! let (uplink, module_rx) = MemoryUplink::channel();
//! let client = JetBridgeClient::new(Arc::new(uplink), ClientConfig::default())?;
//! let handler = client.inbound_handler();
//! // dispatcher: handler.on_frame_received(event)
//! let flaps = client.get_named_variable("(L:A32NX_FLAPS_HANDLE_INDEX)").await?;
//! ```

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod adapters;
pub mod client;
pub mod domain;
pub mod handler;
pub mod ports;

// Re-exports for public API
pub use adapters::MemoryUplink;
pub use client::{JetBridgeClient, OperationOutput};
pub use domain::{ClientConfig, ClientError, CompletionSlot, PendingRequestTable, StatsSnapshot};
pub use handler::InboundHandler;
pub use ports::{ClientDataEvent, InboundOutcome, TransportError, Uplink};
