#![forbid(unsafe_code)]

//! Ledger entries and the batch accumulator.
//!
//! An [`Entry`] is one undoable step: the operations of a single user
//! gesture, applied and inverted atomically. Entries are created only when
//! the log commits (a direct push or a batch end), mutated only by
//! coalescing, and removed only by pruning or `clear`.
//!
//! [`Batch`] is the transient accumulator behind `begin_batch`/`end_batch`:
//! operations pushed while a batch is open are buffered and committed as one
//! entry, so a drag that emits dozens of micro-updates still costs the user
//! a single undo press.

use std::time::Duration;

use web_time::Instant;

use crate::estimate;
use crate::op::Operation;

/// Identifier for a ledger entry, unique and monotonic within one log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(u64);

impl EntryId {
    #[inline]
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// One undoable step in the ledger.
#[derive(Debug, Clone)]
pub struct Entry {
    pub id: EntryId,
    /// Gesture name surfaced in undo/redo menus, e.g. `"Move 3 elements"`.
    pub label: Option<String>,
    /// Coalescing scope, e.g. `"cell:3:2"` while typing into one table cell.
    pub merge_key: Option<String>,
    /// Commit time. Refreshed when a later push coalesces in, which slides
    /// the merge window forward under a continuous gesture.
    pub timestamp: Instant,
    /// Applied in order for redo, in reverse for undo.
    pub operations: Vec<Operation>,
    /// Heuristic footprint from [`estimate::entry_size`], kept current by
    /// the log.
    pub estimated_bytes: usize,
}

impl Entry {
    pub(crate) fn new(
        id: EntryId,
        label: Option<&str>,
        merge_key: Option<&str>,
        operations: Vec<Operation>,
        now: Instant,
    ) -> Self {
        let mut entry = Self {
            id,
            label: label.map(str::to_owned),
            merge_key: merge_key.map(str::to_owned),
            timestamp: now,
            operations,
            estimated_bytes: 0,
        };
        entry.estimated_bytes = estimate::entry_size(&entry);
        entry
    }

    /// True if a push carrying `label`/`merge_key` at `now` should fold into
    /// this entry rather than open a new one.
    ///
    /// An unspecified label or key matches anything; a specified one must
    /// equal this entry's. The window check is inclusive, and a zero window
    /// disables coalescing entirely.
    #[must_use]
    pub fn should_merge(
        &self,
        label: Option<&str>,
        merge_key: Option<&str>,
        window: Duration,
        now: Instant,
    ) -> bool {
        if window.is_zero() {
            return false;
        }
        if now.duration_since(self.timestamp) > window {
            return false;
        }
        let label_ok = label.is_none_or(|l| self.label.as_deref() == Some(l));
        let key_ok = merge_key.is_none_or(|k| self.merge_key.as_deref() == Some(k));
        label_ok && key_ok
    }

    /// Folds `operations` into this entry: appends them, slides the
    /// timestamp to `now`, and recomputes the size estimate.
    pub(crate) fn absorb(&mut self, operations: Vec<Operation>, now: Instant) {
        self.operations.extend(operations);
        self.timestamp = now;
        self.estimated_bytes = estimate::entry_size(self);
    }
}

/// Transient accumulator for grouping pushes into one entry.
///
/// At most one batch is open per log; opening a second while one is active
/// is ignored.
#[derive(Debug)]
pub(crate) struct Batch {
    pub label: Option<String>,
    pub merge_key: Option<String>,
    pub started_at: Instant,
    pub pending: Vec<Operation>,
}

impl Batch {
    pub fn new(label: Option<&str>, merge_key: Option<&str>, now: Instant) -> Self {
        Self {
            label: label.map(str::to_owned),
            merge_key: merge_key.map(str::to_owned),
            started_at: now,
            pending: Vec::new(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
