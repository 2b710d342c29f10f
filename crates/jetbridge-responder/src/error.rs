//! Error types for the responder

use jetbridge_types::FrameError;
use thiserror::Error;

/// Errors that can occur while answering a request
#[derive(Debug, Error)]
pub enum ResponderError {
    #[error("invalid request frame: {0}")]
    Frame(#[from] FrameError),

    #[error("engine error: {0}")]
    Engine(String),

    #[error("unknown variable: {0}")]
    UnknownVariable(String),
}
