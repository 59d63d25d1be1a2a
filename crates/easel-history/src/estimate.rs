#![forbid(unsafe_code)]

//! Memory estimation heuristics for history entries.
//!
//! The retention policy budgets history by bytes, but exact heap accounting
//! is not worth the bookkeeping. These estimators charge flat per-node costs
//! plus per-datum costs for the payloads that actually grow (stroke points,
//! text, table cells, image references). Estimates are deliberately rough
//! upper bounds; the only requirement is that they scale with real usage so
//! eviction targets the right entries.

use crate::entry::Entry;
use crate::op::Operation;
use easel_core::{Element, ElementPayload};

/// Flat cost charged for every element snapshot.
pub const ELEMENT_BASE_BYTES: usize = 112;
/// Cost per freehand stroke point.
pub const POINT_BYTES: usize = 16;
/// Cost per byte of stored text, image reference included.
pub const TEXT_BYTES_PER_CHAR: usize = 2;
/// Flat cost per table cell on top of its text.
pub const TABLE_CELL_BYTES: usize = 40;
/// Flat payload cost for shapes and connectors.
pub const FLAT_PAYLOAD_BYTES: usize = 48;
/// Cost per recorded z-order index on add/remove operations.
pub const INDEX_BYTES: usize = 8;
/// Cost per id in a reorder snapshot.
pub const ORDER_ID_BYTES: usize = 8;
/// Flat cost per ledger entry (ids, labels, timestamp, vec headers).
pub const ENTRY_OVERHEAD_BYTES: usize = 96;

/// Estimated footprint of one element snapshot.
#[must_use]
pub fn element_size(element: &Element) -> usize {
    let payload = match &element.payload {
        ElementPayload::Shape { .. } | ElementPayload::Connector { .. } => FLAT_PAYLOAD_BYTES,
        ElementPayload::Stroke { points } => POINT_BYTES * points.len(),
        ElementPayload::Image { source } => TEXT_BYTES_PER_CHAR * source.len(),
        ElementPayload::Table { cells, .. } => cells
            .iter()
            .map(|cell| TABLE_CELL_BYTES + TEXT_BYTES_PER_CHAR * cell.len())
            .sum(),
        ElementPayload::Text { content } => TEXT_BYTES_PER_CHAR * content.len(),
    };
    ELEMENT_BASE_BYTES + payload
}

/// Estimated footprint of one operation, element snapshots included.
#[must_use]
pub fn operation_size(op: &Operation) -> usize {
    match op {
        Operation::Add { elements, indices } | Operation::Remove { elements, indices } => {
            let elements: usize = elements.iter().map(element_size).sum();
            let indices = indices.as_ref().map_or(0, |idx| INDEX_BYTES * idx.len());
            elements + indices
        }
        Operation::Update { before, after } => before
            .iter()
            .chain(after.iter())
            .map(element_size)
            .sum(),
        Operation::Reorder { before, after } => ORDER_ID_BYTES * (before.len() + after.len()),
    }
}

/// Estimated footprint of a whole ledger entry.
#[must_use]
pub fn entry_size(entry: &Entry) -> usize {
    let labels = entry.label.as_ref().map_or(0, String::len)
        + entry.merge_key.as_ref().map_or(0, String::len);
    let ops: usize = entry.operations.iter().map(operation_size).sum();
    ENTRY_OVERHEAD_BYTES + labels + ops
}

// ============================================================================
// Tests
// ============================================================================
