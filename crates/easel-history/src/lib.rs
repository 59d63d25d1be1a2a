#![forbid(unsafe_code)]

//! Change history for Easel documents: a bounded, coalescing undo/redo ledger.
//!
//! # Role in Easel
//! `easel-history` is the audit-and-replay layer. The editing surface applies
//! mutations to an `easel_core::ElementStore` and records them here as
//! self-contained operations; this crate replays those records in either
//! direction and keeps the ledger within count and memory budgets.
//!
//! # Primary responsibilities
//! - **Operations** ([`op`]): add/remove/update/reorder records built through
//!   validating constructors, carrying full element snapshots.
//! - **Entries and batching** ([`entry`]): one undoable step per user
//!   gesture, with a merge window that folds rapid micro-edits together.
//! - **Replay** ([`apply`]): forward for redo, reverse for undo.
//! - **Budgets** ([`estimate`], [`retention`]): heuristic sizing and
//!   count/memory-bounded eviction that spares recent work.
//! - **Orchestration** ([`log`]): the [`HistoryLog`] cursor state machine
//!   behind push/undo/redo.
//!
//! # Example
//!
//! ```
//! use easel_core::{Bounds, Element, ElementId, ElementStore, ShapeKind};
//! use easel_history::{HistoryLog, Operation};
//!
//! let mut store = ElementStore::new();
//! let mut log = HistoryLog::default();
//!
//! let shape = Element::shape(
//!     ElementId::new(1),
//!     Bounds::new(10.0, 10.0, 120.0, 80.0),
//!     ShapeKind::Rectangle,
//! );
//! store.insert(shape.clone());
//! log.push_one(Operation::add(vec![shape]).unwrap(), Some("Add shape"), None);
//!
//! assert!(log.undo(&mut store));
//! assert!(store.is_empty());
//! assert!(log.redo(&mut store));
//! assert_eq!(store.len(), 1);
//! ```

pub mod apply;
pub mod entry;
pub mod estimate;
pub mod log;
pub mod op;
pub mod retention;

pub use apply::{Direction, apply_entry, apply_operation};
pub use entry::{Entry, EntryId};
pub use log::{HistoryConfig, HistoryLog, MemoryUsage};
pub use op::{OpError, Operation};
