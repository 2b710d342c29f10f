//! Pending Request Table - maps frame ids to waiting callers.
//!
//! Flow:
//! 1. The client allocates a frame id and calls `register()` to get a slot
//! 2. The client transmits the request frame
//! 3. The inbound handler receives the reply and calls `resolve()`
//! 4. The client waits on the slot with a timeout
//!
//! Every entry is removed exactly once: by `resolve()`, by the timeout path,
//! or by dropping the slot. Whichever removes it decides the outcome, so a
//! resolve racing a timeout never delivers twice.

use crate::domain::error::{PendingError, SlotError};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use jetbridge_types::{Frame, FrameId};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};
use tokio::sync::oneshot;
use tracing::{debug, warn};

/// A caller waiting for its reply
struct PendingRequest {
    /// Channel to deliver the reply
    sender: oneshot::Sender<Frame>,
    /// When the request was registered
    created_at: Instant,
}

/// Counters for the pending request table
#[derive(Debug, Default)]
pub struct PendingStats {
    /// Total slots registered
    pub total_registered: AtomicU64,
    /// Total slots resolved with a reply
    pub total_resolved: AtomicU64,
    /// Total slots removed by a timeout
    pub total_timeouts: AtomicU64,
    /// Total replies with no matching slot
    pub total_unmatched: AtomicU64,
    /// Total slots removed without a reply or timeout
    pub total_abandoned: AtomicU64,
}

impl PendingStats {
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            registered: self.total_registered.load(Ordering::Relaxed),
            resolved: self.total_resolved.load(Ordering::Relaxed),
            timeouts: self.total_timeouts.load(Ordering::Relaxed),
            unmatched: self.total_unmatched.load(Ordering::Relaxed),
            abandoned: self.total_abandoned.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`PendingStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub registered: u64,
    pub resolved: u64,
    pub timeouts: u64,
    pub unmatched: u64,
    pub abandoned: u64,
}

struct TableInner {
    pending: DashMap<FrameId, PendingRequest>,
    stats: PendingStats,
}

impl TableInner {
    fn take(&self, id: FrameId) -> Option<PendingRequest> {
        self.pending.remove(&id).map(|(_, request)| request)
    }
}

/// Shared map from frame id to completion slot.
///
/// Cloning is cheap and yields a handle to the same table, so the issuing
/// side and the dispatch side can each hold one.
#[derive(Clone)]
pub struct PendingRequestTable {
    inner: Arc<TableInner>,
}

impl PendingRequestTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            inner: Arc::new(TableInner {
                pending: DashMap::new(),
                stats: PendingStats::default(),
            }),
        }
    }

    /// Register a slot for `id`.
    ///
    /// Fails if `id` is already pending; the allocator makes that practically
    /// unreachable, and the caller treats it as an invariant violation.
    pub fn register(&self, id: FrameId) -> Result<CompletionSlot, PendingError> {
        let (tx, rx) = oneshot::channel();

        match self.inner.pending.entry(id) {
            Entry::Occupied(_) => return Err(PendingError::DuplicateId(id)),
            Entry::Vacant(vacant) => {
                vacant.insert(PendingRequest {
                    sender: tx,
                    created_at: Instant::now(),
                });
            }
        }
        self.inner
            .stats
            .total_registered
            .fetch_add(1, Ordering::Relaxed);

        debug!(frame_id = %id, "Registered pending request");

        Ok(CompletionSlot {
            id,
            receiver: rx,
            table: Arc::downgrade(&self.inner),
            armed: true,
        })
    }

    /// Deliver `frame` to the slot registered for `id`.
    ///
    /// Returns true if a waiting caller received it. Unknown, stale and
    /// duplicate replies return false and `frame` is dropped here.
    pub fn resolve(&self, id: FrameId, frame: Frame) -> bool {
        let Some(pending) = self.inner.take(id) else {
            self.inner
                .stats
                .total_unmatched
                .fetch_add(1, Ordering::Relaxed);
            warn!(frame_id = %id, "Reply for unknown or expired frame id");
            return false;
        };

        let response_time = pending.created_at.elapsed();
        match pending.sender.send(frame) {
            Ok(()) => {
                self.inner
                    .stats
                    .total_resolved
                    .fetch_add(1, Ordering::Relaxed);
                debug!(
                    frame_id = %id,
                    response_time_us = response_time.as_micros() as u64,
                    "Resolved pending request"
                );
                true
            }
            Err(_) => {
                // Waiter went away between our removal and the send
                self.inner
                    .stats
                    .total_abandoned
                    .fetch_add(1, Ordering::Relaxed);
                debug!(frame_id = %id, "Pending request receiver dropped");
                false
            }
        }
    }

    /// Remove the entry for `id` without resolving it.
    ///
    /// A reply arriving afterwards finds nothing and is dropped.
    pub fn remove(&self, id: FrameId) -> bool {
        if self.inner.take(id).is_some() {
            self.inner
                .stats
                .total_abandoned
                .fetch_add(1, Ordering::Relaxed);
            debug!(frame_id = %id, "Removed pending request");
            true
        } else {
            false
        }
    }

    /// Number of callers currently waiting
    pub fn pending_count(&self) -> usize {
        self.inner.pending.len()
    }

    /// Check if a frame id is pending
    pub fn is_pending(&self, id: FrameId) -> bool {
        self.inner.pending.contains_key(&id)
    }

    /// Get statistics
    pub fn stats(&self) -> &PendingStats {
        &self.inner.stats
    }
}

impl Default for PendingRequestTable {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot slot a caller waits on until its reply or timeout.
///
/// Dropping a slot that is still registered removes its entry, so a caller
/// that gives up for any reason never leaves a stale registration behind.
pub struct CompletionSlot {
    id: FrameId,
    receiver: oneshot::Receiver<Frame>,
    table: Weak<TableInner>,
    armed: bool,
}

impl CompletionSlot {
    pub fn id(&self) -> FrameId {
        self.id
    }

    /// Wait up to `timeout` for the reply.
    ///
    /// On timeout the entry is removed. If the removal finds nothing, the
    /// resolver already claimed the entry and is handing over the frame, so
    /// the reply is taken and returned instead of reporting a timeout.
    pub async fn wait(mut self, timeout: Duration) -> Result<Frame, SlotError> {
        let outcome = tokio::time::timeout(timeout, &mut self.receiver).await;
        self.armed = false;

        match outcome {
            Ok(Ok(frame)) => Ok(frame),
            Ok(Err(_)) => Err(SlotError::Dropped),
            Err(_) => {
                let expired = match self.table.upgrade() {
                    Some(table) => {
                        let removed = table.take(self.id).is_some();
                        if removed {
                            table.stats.total_timeouts.fetch_add(1, Ordering::Relaxed);
                        }
                        removed
                    }
                    None => false,
                };

                if expired {
                    warn!(
                        frame_id = %self.id,
                        timeout_ms = timeout.as_millis() as u64,
                        "Pending request timed out"
                    );
                    return Err(SlotError::TimedOut);
                }

                debug!(frame_id = %self.id, "Reply won the race against timeout");
                (&mut self.receiver).await.map_err(|_| SlotError::TimedOut)
            }
        }
    }
}

impl Drop for CompletionSlot {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Some(table) = self.table.upgrade() {
            if table.take(self.id).is_some() {
                table.stats.total_abandoned.fetch_add(1, Ordering::Relaxed);
                debug!(frame_id = %self.id, "Completion slot dropped while pending");
            }
        }
    }
}

impl std::fmt::Debug for CompletionSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionSlot")
            .field("id", &self.id)
            .field("armed", &self.armed)
            .finish()
    }
}
