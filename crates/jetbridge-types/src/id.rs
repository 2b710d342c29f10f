//! Frame identifiers and their allocation.
//!
//! Every request frame carries a 32-bit identifier that the reply echoes
//! back. Identifiers only need to be unique among requests still awaiting a
//! reply, so the allocator draws a random seed once and then walks a wrapping
//! counter from it: any 2^32 consecutive allocations yield distinct values.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

/// Identifier carried in the first four bytes of every frame.
///
/// Zero is reserved for empty frames and is never handed out by
/// [`IdAllocator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameId(i32);

impl FrameId {
    /// The identifier of a zeroed frame.
    pub const EMPTY: FrameId = FrameId(0);

    /// Wrap a raw wire value.
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// The raw wire value.
    pub const fn as_raw(&self) -> i32 {
        self.0
    }

    /// Whether this is the reserved empty identifier.
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Little-endian wire bytes.
    pub const fn to_le_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }

    /// Decode from little-endian wire bytes.
    pub const fn from_le_bytes(bytes: [u8; 4]) -> Self {
        Self(i32::from_le_bytes(bytes))
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for FrameId {
    fn from(raw: i32) -> Self {
        Self(raw)
    }
}

impl From<FrameId> for i32 {
    fn from(id: FrameId) -> Self {
        id.0
    }
}

lazy_static! {
    static ref GLOBAL_ALLOCATOR: IdAllocator = IdAllocator::new();
}

/// Produces frame identifiers.
///
/// Safe to share between any number of request-issuing call sites. The seed
/// is fixed at construction and the counter is never reset, so two rapid
/// successive calls always diverge.
#[derive(Debug)]
pub struct IdAllocator {
    seed: u32,
    counter: AtomicU32,
    issued: AtomicU64,
}

impl IdAllocator {
    /// Create an allocator with a random seed.
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Create an allocator with a fixed seed.
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            counter: AtomicU32::new(0),
            issued: AtomicU64::new(0),
        }
    }

    /// The process-wide allocator, created on first use.
    pub fn global() -> &'static IdAllocator {
        &GLOBAL_ALLOCATOR
    }

    /// Allocate the next identifier.
    ///
    /// Never returns [`FrameId::EMPTY`]. A step that lands on zero is skipped,
    /// which costs one counter value per 2^32 allocations.
    pub fn allocate(&self) -> FrameId {
        loop {
            let step = self.counter.fetch_add(1, Ordering::Relaxed);
            let raw = self.seed.wrapping_add(step) as i32;
            if raw != 0 {
                self.issued.fetch_add(1, Ordering::Relaxed);
                return FrameId(raw);
            }
        }
    }

    /// Number of identifiers handed out so far.
    pub fn issued(&self) -> u64 {
        self.issued.load(Ordering::Relaxed)
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
