//! Domain types for the correlation client.
//!
//! Configuration, the error taxonomy, and the pending request table that
//! pairs replies with waiting callers.

pub mod config;
pub mod error;
pub mod pending;

// Re-exports for convenience
pub use config::ClientConfig;
pub use error::{ClientError, PendingError, SlotError};
pub use pending::{CompletionSlot, PendingRequestTable, PendingStats, StatsSnapshot};
