#![forbid(unsafe_code)]

//! Once-per-frame coalescing of high-frequency updates.
//!
//! Hover events arrive at pointer-polling rate but the tree owner only needs
//! to hear about the placement once per rendered frame. [`FrameCoalescer`]
//! keeps at most one pending update using a "latest wins" strategy:
//!
//! - [`schedule`](FrameCoalescer::schedule) replaces (cancels) any pending,
//!   not-yet-dispatched update and returns a fresh [`FrameHandle`].
//! - [`take_due`](FrameCoalescer::take_due) is called by the host once per
//!   frame and yields the pending update, if any.
//! - [`cancel`](FrameCoalescer::cancel) drops the pending update, e.g. when
//!   the drag ends before the next frame.
//!
//! # Usage
//!
//! ```
//! use treesnap_core::frame::FrameCoalescer;
//!
//! let mut frames = FrameCoalescer::new();
//! frames.schedule("first");
//! frames.schedule("second");
//! frames.schedule("third");
//!
//! // One frame later: only the newest survives.
//! assert_eq!(frames.take_due(), Some("third"));
//! assert_eq!(frames.take_due(), None);
//! assert_eq!(frames.stats().superseded, 2);
//! ```
//!
//! # Invariants
//!
//! 1. At most one update is pending at any time.
//! 2. Every scheduled update is either dispatched, superseded, or cancelled.
//! 3. Handles are never reused within one coalescer.

use serde::{Deserialize, Serialize};

/// Handle of one scheduled (pending) frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameHandle(pub u64);

/// Counters describing what happened to scheduled updates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameStats {
    pub scheduled: u64,
    pub dispatched: u64,
    /// Replaced by a newer update before their frame came.
    pub superseded: u64,
    /// Dropped by an explicit cancel.
    pub cancelled: u64,
}

/// Latest-wins single-slot frame scheduler.
///
/// Not thread-safe; lives on the UI event loop with the drag session.
#[derive(Debug, Clone)]
pub struct FrameCoalescer<T> {
    pending: Option<(FrameHandle, T)>,
    next_handle: u64,
    stats: FrameStats,
}

impl<T> Default for FrameCoalescer<T> {
    fn default() -> Self {
        Self {
            pending: None,
            next_handle: 1,
            stats: FrameStats::default(),
        }
    }
}

impl<T> FrameCoalescer<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `update` for the next frame, superseding any pending one.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub fn schedule(&mut self, update: T) -> FrameHandle {
        let handle = FrameHandle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        if let Some((previous, _)) = self.pending.replace((handle, update)) {
            crate::trace!(superseded = previous.0, handle = handle.0, "frame update superseded");
            self.stats.superseded += 1;
        }
        self.stats.scheduled += 1;
        handle
    }

    /// Take the pending update for the frame being rendered now.
    pub fn take_due(&mut self) -> Option<T> {
        let (_, update) = self.pending.take()?;
        self.stats.dispatched += 1;
        Some(update)
    }

    /// Cancel the pending update. Returns its handle if one was pending.
    pub fn cancel(&mut self) -> Option<FrameHandle> {
        let (handle, _) = self.pending.take()?;
        self.stats.cancelled += 1;
        Some(handle)
    }

    /// Handle of the pending update, if any.
    #[must_use]
    pub fn pending_handle(&self) -> Option<FrameHandle> {
        self.pending.as_ref().map(|(handle, _)| *handle)
    }

    /// Peek at the pending update without dispatching it.
    #[must_use]
    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref().map(|(_, update)| update)
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn stats(&self) -> FrameStats {
        self.stats
    }
}
