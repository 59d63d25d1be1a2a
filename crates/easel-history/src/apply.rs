#![forbid(unsafe_code)]

//! Forward and backward replay of operations against the element store.
//!
//! The engine is stateless: operations carry full snapshots, so replay never
//! looks anything up beyond the store being mutated. Redo walks an entry's
//! operations in their committed order; undo walks them in reverse, which
//! correctly inverts a sequence of dependent edits recorded within one step.

use tracing::trace;

use easel_core::{Element, ElementStore};

use crate::entry::Entry;
use crate::op::Operation;

/// Which way an entry is being replayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Undo,
    Redo,
}

/// Replays a single operation against `store`.
pub fn apply_operation(store: &mut ElementStore, op: &Operation, direction: Direction) {
    trace!(op = op.kind(), ?direction, elements = op.element_count(), "apply");
    match (op, direction) {
        (Operation::Add { elements, indices }, Direction::Redo)
        | (Operation::Remove { elements, indices }, Direction::Undo) => {
            insert_all(store, elements, indices.as_deref());
        }
        (Operation::Add { elements, .. }, Direction::Undo)
        | (Operation::Remove { elements, .. }, Direction::Redo) => {
            for element in elements {
                store.remove(element.id);
            }
        }
        (Operation::Update { before, after }, direction) => {
            let snapshots = match direction {
                Direction::Redo => after,
                Direction::Undo => before,
            };
            for snapshot in snapshots {
                store.write(snapshot.clone());
            }
        }
        (Operation::Reorder { before, after }, direction) => {
            let order = match direction {
                Direction::Redo => after,
                Direction::Undo => before,
            };
            store.set_order(order.clone());
        }
    }
}

/// Replays a whole entry: forward order for redo, reverse order for undo.
pub fn apply_entry(store: &mut ElementStore, entry: &Entry, direction: Direction) {
    match direction {
        Direction::Redo => {
            for op in &entry.operations {
                apply_operation(store, op, direction);
            }
        }
        Direction::Undo => {
            for op in entry.operations.iter().rev() {
                apply_operation(store, op, direction);
            }
        }
    }
}

fn insert_all(store: &mut ElementStore, elements: &[Element], indices: Option<&[usize]>) {
    match indices {
        Some(indices) => {
            for (element, &index) in elements.iter().zip(indices) {
                store.insert_at(element.clone(), index);
            }
        }
        None => {
            for element in elements {
                store.insert(element.clone());
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
