#![forbid(unsafe_code)]

//! Core: the Easel element model and the live document store.
//!
//! # Role in Easel
//! `easel-core` is the data layer. It owns the element types that appear on a
//! canvas and the [`ElementStore`] that holds the live document as an
//! id-addressed map plus a z-order list.
//!
//! # Primary responsibilities
//! - **Element model**: shapes, connectors, freehand strokes, embedded
//!   images, tables, and text blocks, each with a stable [`ElementId`].
//! - **Geometry**: `f64` canvas points and axis-aligned bounds.
//! - **ElementStore**: the mutable document that history operations replay
//!   against.
//!
//! # How it fits in the system
//! `easel-history` records snapshots of these types in its change ledger and
//! replays them against an `ElementStore` on undo and redo. Nothing in this
//! crate knows about history; the store is a plain collection.

pub mod element;
pub mod geometry;
pub mod store;

pub use element::{Element, ElementId, ElementPayload, ShapeKind};
pub use geometry::{Bounds, Point};
pub use store::ElementStore;
