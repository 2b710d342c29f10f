//! Error types for frame construction and decoding

use thiserror::Error;

/// Errors raised while building or decoding frames
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("payload too large: {len} > {max} bytes")]
    PayloadTooLarge { len: usize, max: usize },

    #[error("argument too long: {len} > {max} bytes")]
    ArgumentTooLong { len: usize, max: usize },

    #[error("argument contains an interior NUL byte")]
    InteriorNul,

    #[error("frame truncated: {len} < {expected} bytes")]
    Truncated { len: usize, expected: usize },

    #[error("unknown opcode: {0}")]
    UnknownOpcode(u8),

    #[error("payload text is not valid UTF-8")]
    InvalidUtf8,
}

/// Errors from configuration validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("channel names must be non-empty and distinct")]
    InvalidChannelNames,

    #[error("uplink and downlink areas must differ (both {0})")]
    DuplicateArea(u32),

    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),

    #[error("invalid limit: {0}")]
    InvalidLimit(String),
}
