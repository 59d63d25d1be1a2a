#![forbid(unsafe_code)]

//! Count- and memory-bounded eviction of ledger entries.
//!
//! Two independent ceilings apply: an entry count and an estimated byte
//! total. Each arms once usage crosses `ceiling * prune_threshold`, and a
//! triggered prune then runs the whole policy:
//!
//! 1. Split entries at the cursor into past (undoable) and future (redoable).
//! 2. Budget 70% of the entry ceiling to the past and 30% to the future.
//! 3. Drop the oldest past entries and the farthest future entries to fit.
//! 4. If estimated bytes still exceed the ceiling and enough depth remains,
//!    evict the largest entries first, never touching the most recent ones.
//!
//! The byte ceiling is soft. When only recent or too-few entries remain the
//! policy leaves usage above the ceiling and logs a warning instead of
//! destroying the undo context a user is most likely to reach for.

use tracing::warn;

use crate::entry::Entry;
use crate::log::HistoryConfig;

/// Share of the entry ceiling reserved for undoable (past) entries.
pub const PAST_SHARE: f64 = 0.70;
/// Share of the entry ceiling reserved for redoable (future) entries.
pub const FUTURE_SHARE: f64 = 0.30;

/// Sum of the stored per-entry size estimates.
#[must_use]
pub fn total_bytes(entries: &[Entry]) -> usize {
    entries.iter().map(|entry| entry.estimated_bytes).sum()
}

/// True once either ceiling has been crossed at its trigger threshold.
#[must_use]
pub fn should_prune(entries: &[Entry], config: &HistoryConfig) -> bool {
    let count_limit = config.max_entries as f64 * config.prune_threshold;
    let byte_limit = config.max_memory_bytes as f64 * config.prune_threshold;
    (entries.len() as f64) > count_limit || (total_bytes(entries) as f64) > byte_limit
}

/// Runs the full retention policy over `entries`, recomputing `applied` (the
/// count of applied entries) to account for removals. Returns how many
/// entries were dropped.
pub fn prune(entries: &mut Vec<Entry>, applied: &mut usize, config: &HistoryConfig) -> usize {
    let before = entries.len();

    // Count quotas. The future trims from the far redo end, the past from
    // the oldest end, so the entries nearest the cursor always survive.
    let past_len = *applied;
    let future_len = entries.len() - past_len;
    let past_quota = share_of(config.max_entries, PAST_SHARE).min(past_len);
    let future_quota = share_of(config.max_entries, FUTURE_SHARE).min(future_len);

    entries.truncate(past_len + future_quota);
    let dropped_past = past_len - past_quota;
    if dropped_past > 0 {
        entries.drain(..dropped_past);
    }
    let mut new_applied = past_quota;

    // Size eviction: largest first, sparing the most recent commits, and
    // only while the ledger is deep enough to spare anything at all.
    let mut remaining_bytes = total_bytes(entries);
    if remaining_bytes > config.max_memory_bytes && entries.len() > config.size_eviction_floor {
        let evictable = entries.len().saturating_sub(config.pinned_recent);
        let mut ranked: Vec<(usize, usize)> = entries[..evictable]
            .iter()
            .enumerate()
            .map(|(index, entry)| (index, entry.estimated_bytes))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        let mut victims: Vec<usize> = Vec::new();
        for (index, size) in ranked {
            if remaining_bytes <= config.max_memory_bytes {
                break;
            }
            victims.push(index);
            remaining_bytes = remaining_bytes.saturating_sub(size);
        }

        victims.sort_unstable();
        for &index in victims.iter().rev() {
            entries.remove(index);
            if index < new_applied {
                new_applied -= 1;
            }
        }
    }

    if remaining_bytes > config.max_memory_bytes {
        warn!(
            estimated_bytes = remaining_bytes,
            ceiling = config.max_memory_bytes,
            entries = entries.len(),
            "history memory stays above its ceiling; the ceiling is soft and \
             recent entries are never evicted"
        );
    }

    *applied = new_applied;
    before - entries.len()
}

fn share_of(ceiling: usize, share: f64) -> usize {
    (ceiling as f64 * share) as usize
}

// ============================================================================
// Tests
// ============================================================================
