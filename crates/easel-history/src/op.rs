#![forbid(unsafe_code)]

//! Undoable operations over the element store.
//!
//! An [`Operation`] is a tagged description of a mutation that has *already
//! been applied* to the live document. It carries full element snapshots
//! rather than diffs, so replaying it in either direction never needs to
//! consult anything but the operation itself and the store.
//!
//! Operations are built through validating constructors ([`Operation::add`],
//! [`Operation::update`], and friends) that reject malformed payloads up
//! front. A malformed operation that slipped into the ledger would corrupt
//! the document on replay, which is far harder to diagnose than an
//! [`OpError`] at record time.

use std::fmt;

use easel_core::{Element, ElementId};

/// Why an operation could not be constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpError {
    /// The operation would describe no mutation at all.
    EmptyOperation,
    /// `indices` was present but its length differs from `elements`.
    IndexCountMismatch { elements: usize, indices: usize },
    /// `before` and `after` snapshot lists have different lengths.
    SnapshotCountMismatch { before: usize, after: usize },
    /// A before/after snapshot pair refers to two different elements.
    IdentityMismatch {
        index: usize,
        before: ElementId,
        after: ElementId,
    },
    /// A reorder's `after` list is not a permutation of its `before` list.
    NotAPermutation,
}

impl fmt::Display for OpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpError::EmptyOperation => write!(f, "operation describes no elements"),
            OpError::IndexCountMismatch { elements, indices } => write!(
                f,
                "index count mismatch: {elements} elements but {indices} indices"
            ),
            OpError::SnapshotCountMismatch { before, after } => write!(
                f,
                "snapshot count mismatch: {before} before vs {after} after"
            ),
            OpError::IdentityMismatch {
                index,
                before,
                after,
            } => write!(
                f,
                "snapshot pair {index} changes identity: {} vs {}",
                before.raw(),
                after.raw()
            ),
            OpError::NotAPermutation => {
                write!(f, "reorder lists are not permutations of each other")
            }
        }
    }
}

impl std::error::Error for OpError {}

/// A single recorded mutation, replayable in both directions.
///
/// Index lists on [`Operation::Add`] and [`Operation::Remove`] are optional:
/// when present they pin each element to a z-order slot, when absent the
/// element goes to the top of the stack on (re)insertion.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Elements that were inserted into the document.
    Add {
        elements: Vec<Element>,
        indices: Option<Vec<usize>>,
    },
    /// Elements that were deleted from the document. `indices` records where
    /// each one sat so undo can put it back in place.
    Remove {
        elements: Vec<Element>,
        indices: Option<Vec<usize>>,
    },
    /// In-place mutation of existing elements, as positional before/after
    /// snapshot pairs.
    Update {
        before: Vec<Element>,
        after: Vec<Element>,
    },
    /// A wholesale z-order change, as full before/after id lists.
    Reorder {
        before: Vec<ElementId>,
        after: Vec<ElementId>,
    },
}

impl Operation {
    /// Records an insertion at the top of the z order.
    pub fn add(elements: Vec<Element>) -> Result<Self, OpError> {
        if elements.is_empty() {
            return Err(OpError::EmptyOperation);
        }
        Ok(Operation::Add {
            elements,
            indices: None,
        })
    }

    /// Records an insertion at specific z-order slots. `indices` must pair
    /// up one-to-one with `elements`.
    pub fn add_at(elements: Vec<Element>, indices: Vec<usize>) -> Result<Self, OpError> {
        if elements.is_empty() {
            return Err(OpError::EmptyOperation);
        }
        if elements.len() != indices.len() {
            return Err(OpError::IndexCountMismatch {
                elements: elements.len(),
                indices: indices.len(),
            });
        }
        Ok(Operation::Add {
            elements,
            indices: Some(indices),
        })
    }

    /// Records a deletion without z-order positions; undo restores the
    /// elements to the top of the stack.
    pub fn remove(elements: Vec<Element>) -> Result<Self, OpError> {
        if elements.is_empty() {
            return Err(OpError::EmptyOperation);
        }
        Ok(Operation::Remove {
            elements,
            indices: None,
        })
    }

    /// Records a deletion along with each element's original z position, so
    /// undo restores them exactly where they were.
    pub fn remove_at(elements: Vec<Element>, indices: Vec<usize>) -> Result<Self, OpError> {
        if elements.is_empty() {
            return Err(OpError::EmptyOperation);
        }
        if elements.len() != indices.len() {
            return Err(OpError::IndexCountMismatch {
                elements: elements.len(),
                indices: indices.len(),
            });
        }
        Ok(Operation::Remove {
            elements,
            indices: Some(indices),
        })
    }

    /// Records an in-place mutation. `before` and `after` pair up
    /// positionally and each pair must refer to the same element.
    pub fn update(before: Vec<Element>, after: Vec<Element>) -> Result<Self, OpError> {
        if before.is_empty() && after.is_empty() {
            return Err(OpError::EmptyOperation);
        }
        if before.len() != after.len() {
            return Err(OpError::SnapshotCountMismatch {
                before: before.len(),
                after: after.len(),
            });
        }
        for (index, (b, a)) in before.iter().zip(after.iter()).enumerate() {
            if b.id != a.id {
                return Err(OpError::IdentityMismatch {
                    index,
                    before: b.id,
                    after: a.id,
                });
            }
        }
        Ok(Operation::Update { before, after })
    }

    /// Records an in-place mutation of a single element.
    pub fn update_one(before: Element, after: Element) -> Result<Self, OpError> {
        Self::update(vec![before], vec![after])
    }

    /// Records a z-order change. `after` must be a permutation of `before`.
    pub fn reorder(before: Vec<ElementId>, after: Vec<ElementId>) -> Result<Self, OpError> {
        if before.is_empty() {
            return Err(OpError::EmptyOperation);
        }
        if before.len() != after.len() {
            return Err(OpError::NotAPermutation);
        }
        let mut b = before.clone();
        let mut a = after.clone();
        b.sort_unstable();
        a.sort_unstable();
        if b != a {
            return Err(OpError::NotAPermutation);
        }
        Ok(Operation::Reorder { before, after })
    }

    /// Short name of the operation kind, for logs and debug output.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Operation::Add { .. } => "add",
            Operation::Remove { .. } => "remove",
            Operation::Update { .. } => "update",
            Operation::Reorder { .. } => "reorder",
        }
    }

    /// Number of elements the operation touches.
    #[must_use]
    pub fn element_count(&self) -> usize {
        match self {
            Operation::Add { elements, .. } | Operation::Remove { elements, .. } => elements.len(),
            Operation::Update { before, .. } => before.len(),
            Operation::Reorder { before, .. } => before.len(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
