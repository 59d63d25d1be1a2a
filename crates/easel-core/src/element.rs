#![forbid(unsafe_code)]

//! The Easel element model.
//!
//! Every item on the canvas is an [`Element`]: a stable identity, a bounding
//! box, and a kind-specific [`ElementPayload`]. Elements are plain data and
//! cheap to clone; history entries snapshot them wholesale rather than
//! diffing fields.
//!
//! # Key Components
//!
//! - [`ElementId`]: Stable identity, never reused within a document
//! - [`ElementPayload`]: Shape, connector, stroke, image, table, or text
//! - [`Element`]: Identity + bounds + payload, built via typed constructors

use crate::geometry::{Bounds, Point};

/// Unique identifier for an element within a document.
///
/// Identity is stable across undo and redo: removing an element and restoring
/// it brings back the same id, so references (connector endpoints, selection
/// sets) survive round trips through history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementId(u64);

impl ElementId {
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

/// Geometric primitive drawn by a [`ElementPayload::Shape`] element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
    Diamond,
    Triangle,
}

/// Kind-specific data carried by an element.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementPayload {
    /// A closed geometric shape.
    Shape { kind: ShapeKind },
    /// A connector between two other elements, referenced by id.
    ///
    /// Endpoints are not validated here; a connector may outlive the elements
    /// it joins and render as dangling until the document is repaired.
    Connector { from: ElementId, to: ElementId },
    /// A freehand stroke as a polyline in canvas coordinates.
    Stroke { points: Vec<Point> },
    /// An embedded image, stored by reference (URL or data URI).
    Image { source: String },
    /// A rectangular grid of text cells, stored row-major.
    Table {
        rows: usize,
        cols: usize,
        cells: Vec<String>,
    },
    /// A free-standing text block.
    Text { content: String },
}

/// A single item on the canvas.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Element {
    pub id: ElementId,
    pub bounds: Bounds,
    pub payload: ElementPayload,
}

impl Element {
    #[must_use]
    pub fn shape(id: ElementId, bounds: Bounds, kind: ShapeKind) -> Self {
        Self {
            id,
            bounds,
            payload: ElementPayload::Shape { kind },
        }
    }

    #[must_use]
    pub fn connector(id: ElementId, bounds: Bounds, from: ElementId, to: ElementId) -> Self {
        Self {
            id,
            bounds,
            payload: ElementPayload::Connector { from, to },
        }
    }

    #[must_use]
    pub fn stroke(id: ElementId, bounds: Bounds, points: Vec<Point>) -> Self {
        Self {
            id,
            bounds,
            payload: ElementPayload::Stroke { points },
        }
    }

    #[must_use]
    pub fn image(id: ElementId, bounds: Bounds, source: impl Into<String>) -> Self {
        Self {
            id,
            bounds,
            payload: ElementPayload::Image {
                source: source.into(),
            },
        }
    }

    /// Builds a table element. `cells` is row-major and is resized with empty
    /// strings (or truncated) to exactly `rows * cols` entries.
    #[must_use]
    pub fn table(
        id: ElementId,
        bounds: Bounds,
        rows: usize,
        cols: usize,
        mut cells: Vec<String>,
    ) -> Self {
        cells.resize(rows * cols, String::new());
        Self {
            id,
            bounds,
            payload: ElementPayload::Table { rows, cols, cells },
        }
    }

    #[must_use]
    pub fn text(id: ElementId, bounds: Bounds, content: impl Into<String>) -> Self {
        Self {
            id,
            bounds,
            payload: ElementPayload::Text {
                content: content.into(),
            },
        }
    }

    /// Short name of the payload kind, for logs and debug output.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match &self.payload {
            ElementPayload::Shape { .. } => "shape",
            ElementPayload::Connector { .. } => "connector",
            ElementPayload::Stroke { .. } => "stroke",
            ElementPayload::Image { .. } => "image",
            ElementPayload::Table { .. } => "table",
            ElementPayload::Text { .. } => "text",
        }
    }

    /// Reads a table cell. Returns `None` if this element is not a table or
    /// the coordinates are out of range.
    #[must_use]
    pub fn table_cell(&self, row: usize, col: usize) -> Option<&str> {
        match &self.payload {
            ElementPayload::Table { rows, cols, cells } if row < *rows && col < *cols => {
                cells.get(row * *cols + col).map(String::as_str)
            }
            _ => None,
        }
    }

    /// Writes a table cell. Returns `false` if this element is not a table or
    /// the coordinates are out of range.
    pub fn set_table_cell(&mut self, row: usize, col: usize, value: impl Into<String>) -> bool {
        match &mut self.payload {
            ElementPayload::Table { rows, cols, cells } if row < *rows && col < *cols => {
                cells[row * *cols + col] = value.into();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Bounds {
        Bounds::new(0.0, 0.0, 100.0, 80.0)
    }

    #[test]
    fn table_cells_resized_to_grid() {
        let t = Element::table(ElementId::new(1), bounds(), 2, 3, vec!["a".into()]);
        match &t.payload {
            ElementPayload::Table { cells, .. } => {
                assert_eq!(cells.len(), 6);
                assert_eq!(cells[0], "a");
                assert_eq!(cells[5], "");
            }
            other => panic!("expected table payload, got {other:?}"),
        }
    }

    #[test]
    fn table_cell_round_trip() {
        let mut t = Element::table(ElementId::new(1), bounds(), 2, 2, Vec::new());
        assert!(t.set_table_cell(1, 0, "hello"));
        assert_eq!(t.table_cell(1, 0), Some("hello"));
        assert_eq!(t.table_cell(0, 1), Some(""));
        assert_eq!(t.table_cell(2, 0), None);
        assert!(!t.set_table_cell(0, 5, "x"));
    }

    #[test]
    fn cell_access_on_non_table_is_none() {
        let mut s = Element::shape(ElementId::new(2), bounds(), ShapeKind::Ellipse);
        assert_eq!(s.table_cell(0, 0), None);
        assert!(!s.set_table_cell(0, 0, "x"));
    }

    #[test]
    fn kind_names() {
        let id = ElementId::new(9);
        assert_eq!(Element::shape(id, bounds(), ShapeKind::Diamond).kind(), "shape");
        assert_eq!(Element::text(id, bounds(), "hi").kind(), "text");
        assert_eq!(
            Element::stroke(id, bounds(), vec![Point::new(0.0, 0.0)]).kind(),
            "stroke"
        );
    }

    #[test]
    fn ids_are_stable_and_ordered() {
        let a = ElementId::new(1);
        let b = ElementId::new(2);
        assert!(a < b);
        assert_eq!(a.raw(), 1);
        assert_eq!(a, ElementId::new(1));
    }
}
