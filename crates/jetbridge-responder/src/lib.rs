//! # JetBridge Responder
//!
//! Host-side counterpart of the correlation client. Reads request frames
//! from the uplink area, runs them against a [`CalculatorEngine`] and
//! produces the reply frame to publish on the downlink area.
//!
//! ## Opcodes
//!
//! | Tag | Opcode | Reply payload |
//! |-----|--------|---------------|
//! | 0 | `ExecuteCalculatorCode` | empty |
//! | 1 | `GetNamedVariable` | `f64` at offset 0 |
//!
//! Any other tag is ignored and gets no reply.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod engine;
pub mod error;
pub mod responder;

pub use engine::{CalculatorEngine, InMemoryEngine};
pub use error::ResponderError;
pub use responder::Responder;
