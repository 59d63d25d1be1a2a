#![forbid(unsafe_code)]

//! The history log: a linear ledger of entries plus an undo/redo cursor.
//!
//! The log is owned by a document session and passed by reference to
//! whatever records or replays history; there is no global instance, so two
//! open documents never share state. It records mutations the caller has
//! *already applied* to the store and replays them on demand:
//!
//! ```text
//!  entries: [ e0 ][ e1 ][ e2 ][ e3 ][ e4 ]
//!                            ^
//!                            applied = 3
//!           |-- undoable  --||- redoable -|
//! ```
//!
//! `applied` counts committed entries currently in effect. `undo` replays
//! entry `applied - 1` backwards and retreats; `redo` replays entry
//! `applied` forwards and advances. Committing while redoable entries exist
//! discards them first: history is strictly linear, never a tree.
//!
//! # Commit pipeline
//!
//! Every commit (a direct push, or a batch closing) runs the same pipeline:
//! truncate the redo tail, coalesce into the tail entry if the merge window
//! allows it, otherwise append a fresh entry, then let the retention policy
//! trim the ledger if a ceiling was crossed.

use std::time::Duration;

use tracing::{debug, trace};
use web_time::Instant;

use easel_core::ElementStore;

use crate::apply::{self, Direction};
use crate::entry::{Batch, Entry, EntryId};
use crate::op::Operation;
use crate::retention;

/// Tuning knobs for a [`HistoryLog`].
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    /// Entry-count ceiling. Default: 100.
    pub max_entries: usize,
    /// Estimated-memory ceiling in bytes. Default: 50 MiB.
    pub max_memory_bytes: usize,
    /// Fraction of a ceiling at which pruning arms. Default: 0.8.
    pub prune_threshold: f64,
    /// Coalescing window for merging rapid pushes into the tail entry.
    /// Zero disables coalescing. Default: 250 ms.
    pub merge_window: Duration,
    /// Most-recent commits the size-based eviction never removes.
    /// Default: 5.
    pub pinned_recent: usize,
    /// Minimum ledger depth before size-based eviction may run at all.
    /// Default: 10.
    pub size_eviction_floor: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: 100,
            max_memory_bytes: 50 * 1024 * 1024,
            prune_threshold: 0.8,
            merge_window: Duration::from_millis(250),
            pinned_recent: 5,
            size_eviction_floor: 10,
        }
    }
}

impl HistoryConfig {
    /// Configuration with explicit ceilings and default behavior otherwise.
    #[must_use]
    pub fn new(max_entries: usize, max_memory_bytes: usize) -> Self {
        Self {
            max_entries,
            max_memory_bytes,
            ..Self::default()
        }
    }

    /// Configuration that never prunes. Useful for tests and short-lived
    /// tools; an interactive session should keep the ceilings.
    #[must_use]
    pub fn unlimited() -> Self {
        Self {
            max_entries: usize::MAX,
            max_memory_bytes: usize::MAX,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_merge_window(mut self, window: Duration) -> Self {
        self.merge_window = window;
        self
    }

    #[must_use]
    pub fn with_prune_threshold(mut self, threshold: f64) -> Self {
        self.prune_threshold = threshold;
        self
    }
}

/// Snapshot of the ledger's current footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryUsage {
    /// Number of entries currently held.
    pub entries: usize,
    /// Estimated heap footprint of all entries, in bytes.
    pub estimated_bytes: usize,
}

impl MemoryUsage {
    /// Estimated footprint in mebibytes.
    #[must_use]
    pub fn estimated_mb(&self) -> f64 {
        self.estimated_bytes as f64 / (1024.0 * 1024.0)
    }
}

/// Linear undo/redo ledger for one document session.
#[derive(Debug)]
pub struct HistoryLog {
    entries: Vec<Entry>,
    /// Count of entries currently applied to the store. Everything at and
    /// beyond this index is the redo tail.
    applied: usize,
    batch: Option<Batch>,
    config: HistoryConfig,
    next_entry_id: u64,
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new(HistoryConfig::default())
    }
}

impl HistoryLog {
    #[must_use]
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            entries: Vec::new(),
            applied: 0,
            batch: None,
            config,
            next_entry_id: 0,
        }
    }

    // ------------------------------------------------------------------
    // Recording
    // ------------------------------------------------------------------

    /// Records operations the caller has already applied to the store.
    ///
    /// An empty list is a silent no-op. While a batch is open the
    /// operations are buffered into it instead of committing; otherwise
    /// this truncates any redo tail, coalesces into the tail entry when the
    /// merge window allows, or appends a fresh entry.
    pub fn push(
        &mut self,
        operations: Vec<Operation>,
        label: Option<&str>,
        merge_key: Option<&str>,
    ) {
        if operations.is_empty() {
            return;
        }
        if let Some(batch) = self.batch.as_mut() {
            batch.pending.extend(operations);
            trace!(buffered = batch.pending.len(), "buffered operations into open batch");
            return;
        }
        self.commit(operations, label, merge_key, Instant::now());
    }

    /// Records a single operation. See [`HistoryLog::push`].
    pub fn push_one(&mut self, operation: Operation, label: Option<&str>, merge_key: Option<&str>) {
        self.push(vec![operation], label, merge_key);
    }

    fn commit(
        &mut self,
        operations: Vec<Operation>,
        label: Option<&str>,
        merge_key: Option<&str>,
        now: Instant,
    ) {
        if self.entries.len() > self.applied {
            let dropped = self.entries.len() - self.applied;
            self.entries.truncate(self.applied);
            debug!(dropped, "discarded redo tail");
        }

        if let Some(tail) = self.entries.last_mut() {
            if tail.should_merge(label, merge_key, self.config.merge_window, now) {
                tail.absorb(operations, now);
                debug!(
                    entry = tail.id.raw(),
                    operations = tail.operations.len(),
                    bytes = tail.estimated_bytes,
                    "coalesced into tail entry"
                );
                self.check_retention();
                return;
            }
        }

        let id = EntryId::new(self.next_entry_id);
        self.next_entry_id += 1;
        let entry = Entry::new(id, label, merge_key, operations, now);
        debug!(
            entry = id.raw(),
            operations = entry.operations.len(),
            bytes = entry.estimated_bytes,
            ?label,
            "committed history entry"
        );
        self.entries.push(entry);
        self.applied = self.entries.len();
        self.check_retention();
    }

    // ------------------------------------------------------------------
    // Batching
    // ------------------------------------------------------------------

    /// Opens a batch: subsequent pushes buffer into it and commit as one
    /// entry when the batch closes. Ignored if a batch is already open;
    /// nesting is not supported.
    pub fn begin_batch(&mut self, label: Option<&str>, merge_key: Option<&str>) {
        if self.batch.is_some() {
            debug!("begin_batch ignored; a batch is already open");
            return;
        }
        trace!(?label, "opened batch");
        self.batch = Some(Batch::new(label, merge_key, Instant::now()));
    }

    /// Closes the open batch. With `commit` the buffered operations land as
    /// one entry (subject to coalescing); otherwise the buffered record is
    /// discarded. Discarding never reverts live mutations the caller
    /// already made; batching is a recording convenience, not a transaction.
    ///
    /// Returns `true` if an entry was committed or coalesced.
    pub fn end_batch(&mut self, commit: bool) -> bool {
        let Some(batch) = self.batch.take() else {
            return false;
        };
        if !commit {
            debug!(discarded = batch.pending.len(), "batch closed without commit");
            return false;
        }
        if batch.pending.is_empty() {
            debug!("batch closed empty");
            return false;
        }
        debug!(
            operations = batch.pending.len(),
            elapsed_ms = batch.started_at.elapsed().as_millis() as u64,
            label = ?batch.label,
            "batch committed"
        );
        self.commit(
            batch.pending,
            batch.label.as_deref(),
            batch.merge_key.as_deref(),
            Instant::now(),
        );
        true
    }

    /// Runs `mutator` inside a batch labelled `label`, committing on return.
    /// The mutator performs live store mutation and pushes the matching
    /// operations; the whole gesture then costs a single undo press.
    pub fn with_undo<R>(&mut self, label: &str, mutator: impl FnOnce(&mut Self) -> R) -> R {
        self.begin_batch(Some(label), None);
        let result = mutator(self);
        self.end_batch(true);
        result
    }

    #[must_use]
    pub fn batch_active(&self) -> bool {
        self.batch.is_some()
    }

    /// Operations buffered in the open batch, zero when none is open.
    #[must_use]
    pub fn batch_len(&self) -> usize {
        self.batch.as_ref().map_or(0, |batch| batch.pending.len())
    }

    // ------------------------------------------------------------------
    // Replay
    // ------------------------------------------------------------------

    /// Reverts the most recent applied entry against `store`. Returns
    /// `false` at the boundary, leaving everything untouched.
    pub fn undo(&mut self, store: &mut ElementStore) -> bool {
        if self.applied == 0 {
            return false;
        }
        self.applied -= 1;
        let entry = &self.entries[self.applied];
        apply::apply_entry(store, entry, Direction::Undo);
        debug!(entry = entry.id.raw(), label = ?entry.label, "undid entry");
        true
    }

    /// Re-applies the next redoable entry against `store`. Returns `false`
    /// at the boundary, leaving everything untouched.
    pub fn redo(&mut self, store: &mut ElementStore) -> bool {
        if self.applied >= self.entries.len() {
            return false;
        }
        let entry = &self.entries[self.applied];
        apply::apply_entry(store, entry, Direction::Redo);
        debug!(entry = entry.id.raw(), label = ?entry.label, "redid entry");
        self.applied += 1;
        true
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.applied > 0
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.applied < self.entries.len()
    }

    // ------------------------------------------------------------------
    // Maintenance
    // ------------------------------------------------------------------

    /// Drops all entries and any open batch. Live store state is untouched.
    pub fn clear(&mut self) {
        let dropped = self.entries.len();
        self.entries.clear();
        self.applied = 0;
        if self.batch.take().is_some() {
            debug!("discarded open batch on clear");
        }
        if dropped > 0 {
            debug!(dropped, "history cleared");
        }
    }

    /// Runs the retention policy immediately, regardless of thresholds.
    /// Returns the number of entries dropped.
    pub fn prune_history(&mut self) -> usize {
        let pruned = retention::prune(&mut self.entries, &mut self.applied, &self.config);
        if pruned > 0 {
            debug!(pruned, remaining = self.entries.len(), "history pruned on request");
        }
        pruned
    }

    #[must_use]
    pub fn memory_usage(&self) -> MemoryUsage {
        MemoryUsage {
            entries: self.entries.len(),
            estimated_bytes: retention::total_bytes(&self.entries),
        }
    }

    /// Replaces both ceilings and immediately re-checks retention, so a
    /// tightened limit takes effect without waiting for the next push.
    /// `max_memory_mb` floors at zero.
    pub fn set_memory_limits(&mut self, max_entries: usize, max_memory_mb: f64) {
        self.config.max_entries = max_entries;
        self.config.max_memory_bytes = (max_memory_mb * 1024.0 * 1024.0) as usize;
        debug!(
            max_entries,
            max_memory_bytes = self.config.max_memory_bytes,
            "memory limits updated"
        );
        self.check_retention();
    }

    /// Replaces the coalescing window. Zero disables coalescing.
    pub fn set_merge_window(&mut self, window: Duration) {
        debug!(window_ms = window.as_millis() as u64, "merge window updated");
        self.config.merge_window = window;
    }

    fn check_retention(&mut self) {
        if retention::should_prune(&self.entries, &self.config) {
            let pruned = retention::prune(&mut self.entries, &mut self.applied, &self.config);
            if pruned > 0 {
                debug!(pruned, remaining = self.entries.len(), "history pruned");
            }
        }
    }

    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    /// All retained entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Label of the entry the next `undo` would revert.
    #[must_use]
    pub fn next_undo_label(&self) -> Option<&str> {
        self.entries[..self.applied]
            .last()
            .and_then(|entry| entry.label.as_deref())
    }

    /// Label of the entry the next `redo` would re-apply.
    #[must_use]
    pub fn next_redo_label(&self) -> Option<&str> {
        self.entries
            .get(self.applied)
            .and_then(|entry| entry.label.as_deref())
    }

    /// Labels of undoable entries, most recent first. Unlabelled entries
    /// yield `None` so menus keep positional correspondence.
    #[must_use]
    pub fn undo_labels(&self, limit: usize) -> Vec<Option<&str>> {
        self.entries[..self.applied]
            .iter()
            .rev()
            .take(limit)
            .map(|entry| entry.label.as_deref())
            .collect()
    }

    /// Labels of redoable entries, nearest first.
    #[must_use]
    pub fn redo_labels(&self, limit: usize) -> Vec<Option<&str>> {
        self.entries[self.applied..]
            .iter()
            .take(limit)
            .map(|entry| entry.label.as_deref())
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
