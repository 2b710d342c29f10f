//! # JetBridge Types
//!
//! Wire-level definitions shared by the requesting client and the host
//! module.
//!
//! ## Contents
//!
//! - [`Frame`]: identifier plus 128-byte payload, the only unit the
//!   client data areas carry
//! - [`IdAllocator`]: process-wide identifier source
//! - [`Opcode`] and [`encode_request`] / [`Request`]: the request payload codec
//! - [`ChannelConfig`]: area names and ids both ends map
//!
//! ## Frame Flow
//!
//! ```text
//! client ── Frame{id, [op|arg..]} ──▶ uplink area ──▶ module
//! client ◀── Frame{id, [result..]} ── downlink area ◀── module
//! ```

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod channel;
pub mod error;
pub mod frame;
pub mod id;
pub mod opcode;

pub use channel::ChannelConfig;
pub use error::{ConfigError, FrameError};
pub use frame::{Frame, FrameView, FRAME_ID_SIZE, FRAME_PAYLOAD_SIZE, FRAME_WIRE_SIZE, VALUE_OFFSET};
pub use id::{FrameId, IdAllocator};
pub use opcode::{encode_request, Opcode, Request, MAX_ARGUMENT_LEN};

/// Current protocol version.
pub const PROTOCOL_VERSION: u16 = 1;
