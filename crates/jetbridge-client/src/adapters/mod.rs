//! Adapters Layer - concrete collaborators.

pub mod memory;

pub use memory::MemoryUplink;
