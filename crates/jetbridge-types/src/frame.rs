//! # Frame
//!
//! The fixed-size unit exchanged over the client data areas.
//!
//! ## Wire Layout
//!
//! ```text
//! ┌────────────┬──────────────────────────────────────────────┐
//! │ id (i32 LE)│ payload (128 bytes)                          │
//! │  4 bytes   │ [0] opcode tag │ [1..] argument or result    │
//! └────────────┴──────────────────────────────────────────────┘
//! ```
//!
//! Payloads shorter than 128 bytes are zero-padded. Longer payloads are
//! rejected, never truncated.

use crate::error::FrameError;
use crate::id::{FrameId, IdAllocator};
use std::fmt;

/// Size of the payload buffer in bytes.
pub const FRAME_PAYLOAD_SIZE: usize = 128;

/// Size of the identifier prefix in bytes.
pub const FRAME_ID_SIZE: usize = 4;

/// Size of a whole frame on the wire.
pub const FRAME_WIRE_SIZE: usize = FRAME_ID_SIZE + FRAME_PAYLOAD_SIZE;

/// Offset of the `f64` result in a reply payload.
pub const VALUE_OFFSET: usize = 0;

/// A single frame: identifier plus fixed payload.
///
/// The identifier is assigned at construction and cannot be changed
/// afterwards; only the payload is mutable.
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    id: FrameId,
    payload: [u8; FRAME_PAYLOAD_SIZE],
}

impl Frame {
    /// Build a frame around `payload` with a fresh identifier from the
    /// process-wide allocator.
    pub fn new(payload: &[u8]) -> Result<Self, FrameError> {
        Self::with_id(IdAllocator::global().allocate(), payload)
    }

    /// Build a frame with an already allocated identifier.
    pub fn with_id(id: FrameId, payload: &[u8]) -> Result<Self, FrameError> {
        if payload.len() > FRAME_PAYLOAD_SIZE {
            return Err(FrameError::PayloadTooLarge {
                len: payload.len(),
                max: FRAME_PAYLOAD_SIZE,
            });
        }
        let mut buffer = [0u8; FRAME_PAYLOAD_SIZE];
        buffer[..payload.len()].copy_from_slice(payload);
        Ok(Self {
            id,
            payload: buffer,
        })
    }

    /// A zeroed frame with the reserved empty identifier.
    pub fn new_empty() -> Self {
        Self {
            id: FrameId::EMPTY,
            payload: [0u8; FRAME_PAYLOAD_SIZE],
        }
    }

    /// A zeroed reply carrying the identifier of `request`.
    pub fn reply_to(request: &Frame) -> Self {
        Self {
            id: request.id,
            payload: [0u8; FRAME_PAYLOAD_SIZE],
        }
    }

    pub fn id(&self) -> FrameId {
        self.id
    }

    pub fn payload(&self) -> &[u8; FRAME_PAYLOAD_SIZE] {
        &self.payload
    }

    pub fn payload_mut(&mut self) -> &mut [u8; FRAME_PAYLOAD_SIZE] {
        &mut self.payload
    }

    /// The opcode tag byte.
    pub fn tag(&self) -> u8 {
        self.payload[0]
    }

    /// Read the `f64` stored at [`VALUE_OFFSET`].
    pub fn value(&self) -> f64 {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&self.payload[VALUE_OFFSET..VALUE_OFFSET + 8]);
        f64::from_le_bytes(bytes)
    }

    /// Store an `f64` at [`VALUE_OFFSET`].
    pub fn set_value(&mut self, value: f64) {
        self.payload[VALUE_OFFSET..VALUE_OFFSET + 8].copy_from_slice(&value.to_le_bytes());
    }

    /// NUL-terminated text starting at `offset`.
    ///
    /// Reads up to the first NUL or the end of the buffer.
    pub fn text_from(&self, offset: usize) -> Result<&str, FrameError> {
        let tail = self.payload.get(offset..).unwrap_or(&[]);
        let end = tail.iter().position(|&b| b == 0).unwrap_or(tail.len());
        std::str::from_utf8(&tail[..end]).map_err(|_| FrameError::InvalidUtf8)
    }

    /// The whole payload read as NUL-terminated text.
    pub fn text(&self) -> Result<&str, FrameError> {
        self.text_from(0)
    }

    /// Encode to wire bytes.
    pub fn to_bytes(&self) -> [u8; FRAME_WIRE_SIZE] {
        let mut bytes = [0u8; FRAME_WIRE_SIZE];
        bytes[..FRAME_ID_SIZE].copy_from_slice(&self.id.to_le_bytes());
        bytes[FRAME_ID_SIZE..].copy_from_slice(&self.payload);
        bytes
    }

    /// Decode an owned frame from wire bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FrameError> {
        FrameView::parse(bytes).map(|view| view.to_frame())
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new_empty()
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let used = self
            .payload
            .iter()
            .rposition(|&b| b != 0)
            .map_or(0, |last| last + 1);
        f.debug_struct("Frame")
            .field("id", &self.id)
            .field("tag", &self.tag())
            .field("payload_used", &used)
            .finish()
    }
}

/// Borrowed, read-only view over received wire bytes.
///
/// The bytes usually belong to a notification buffer the dispatcher reuses
/// once the callback returns, so a view never outlives the callback; call
/// [`FrameView::to_frame`] to keep the frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    bytes: &'a [u8; FRAME_WIRE_SIZE],
}

impl<'a> FrameView<'a> {
    /// Interpret the leading [`FRAME_WIRE_SIZE`] bytes as a frame.
    ///
    /// Trailing bytes beyond the frame are ignored.
    pub fn parse(bytes: &'a [u8]) -> Result<Self, FrameError> {
        let bytes = bytes
            .get(..FRAME_WIRE_SIZE)
            .and_then(|head| <&[u8; FRAME_WIRE_SIZE]>::try_from(head).ok())
            .ok_or(FrameError::Truncated {
                len: bytes.len(),
                expected: FRAME_WIRE_SIZE,
            })?;
        Ok(Self { bytes })
    }

    pub fn id(&self) -> FrameId {
        let mut raw = [0u8; FRAME_ID_SIZE];
        raw.copy_from_slice(&self.bytes[..FRAME_ID_SIZE]);
        FrameId::from_le_bytes(raw)
    }

    pub fn payload(&self) -> &'a [u8] {
        &self.bytes[FRAME_ID_SIZE..]
    }

    /// Copy into an owned frame.
    pub fn to_frame(&self) -> Frame {
        let mut payload = [0u8; FRAME_PAYLOAD_SIZE];
        payload.copy_from_slice(self.payload());
        Frame {
            id: self.id(),
            payload,
        }
    }
}
