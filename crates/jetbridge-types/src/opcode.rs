//! Opcodes and the request payload codec.
//!
//! A request payload is one tag byte followed by a NUL-terminated argument.
//! The tag consumes the first byte of capacity, so an argument may use at
//! most [`MAX_ARGUMENT_LEN`] bytes; at that length the buffer is full and no
//! terminator fits, which decoders accept.

use crate::error::FrameError;
use crate::frame::{Frame, FRAME_PAYLOAD_SIZE};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest argument accepted after the tag byte.
pub const MAX_ARGUMENT_LEN: usize = FRAME_PAYLOAD_SIZE - 1;

/// Remote operation selected by the tag byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Opcode {
    /// Run calculator code; the reply is a bare acknowledgement.
    ExecuteCalculatorCode = 0,
    /// Evaluate a named variable; the reply carries an `f64`.
    GetNamedVariable = 1,
}

impl Opcode {
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Whether the reply carries a value at the fixed result offset.
    pub const fn returns_value(self) -> bool {
        matches!(self, Opcode::GetNamedVariable)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Opcode::ExecuteCalculatorCode => "execute_calculator_code",
            Opcode::GetNamedVariable => "get_named_variable",
        }
    }
}

impl TryFrom<u8> for Opcode {
    type Error = FrameError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(Opcode::ExecuteCalculatorCode),
            1 => Ok(Opcode::GetNamedVariable),
            other => Err(FrameError::UnknownOpcode(other)),
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Build a request payload: tag byte, argument, zero padding.
pub fn encode_request(opcode: Opcode, argument: &str) -> Result<[u8; FRAME_PAYLOAD_SIZE], FrameError> {
    let bytes = argument.as_bytes();
    if bytes.len() > MAX_ARGUMENT_LEN {
        return Err(FrameError::ArgumentTooLong {
            len: bytes.len(),
            max: MAX_ARGUMENT_LEN,
        });
    }
    if bytes.contains(&0) {
        return Err(FrameError::InteriorNul);
    }

    let mut payload = [0u8; FRAME_PAYLOAD_SIZE];
    payload[0] = opcode.as_u8();
    payload[1..=bytes.len()].copy_from_slice(bytes);
    Ok(payload)
}

/// A decoded request payload borrowing its argument from the frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Request<'a> {
    pub opcode: Opcode,
    pub argument: &'a str,
}

impl<'a> Request<'a> {
    /// Split a request frame into opcode and argument.
    pub fn decode(frame: &'a Frame) -> Result<Self, FrameError> {
        let opcode = Opcode::try_from(frame.tag())?;
        let argument = frame.text_from(1)?;
        Ok(Self { opcode, argument })
    }
}
