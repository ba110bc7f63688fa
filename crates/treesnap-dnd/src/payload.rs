#![forbid(unsafe_code)]

//! What is being dragged, where the pointer is, and what it is over.

use serde::{Deserialize, Serialize};
use treesnap_core::geometry::{Point, Rect, VerticalHalf};
use treesnap_core::host::Row;
use treesnap_core::tree::TreePath;

/// Identity of one tree instance. Payloads whose `tree_id` differs from the
/// session's come from an external source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TreeId(pub u64);

/// Data captured when a drag begins.
#[derive(Debug, Clone, PartialEq)]
pub struct DragPayload<N> {
    pub node: N,
    pub parent_node: Option<N>,
    /// Origin path, `None` for nodes that are not part of any tree yet.
    pub path: Option<TreePath>,
    /// Origin flattened index, `None` when dragged from outside the tree.
    pub tree_index: Option<usize>,
    /// Tree the node was dragged from.
    pub tree_id: TreeId,
    /// MIME-like type string (e.g. `"application/x-tree-node"`).
    pub drag_type: String,
}

impl<N> DragPayload<N> {
    /// Payload for a node dragged from a row of tree `tree_id`.
    pub fn from_row(row: &Row<N>, tree_id: TreeId, drag_type: impl Into<String>) -> Self
    where
        N: Clone,
    {
        Self {
            node: row.node.clone(),
            parent_node: row.parent_node.clone(),
            path: Some(row.path.clone()),
            tree_index: Some(row.tree_index),
            tree_id,
            drag_type: drag_type.into(),
        }
    }

    /// Payload for a node coming from outside any tree.
    pub fn external(node: N, tree_id: TreeId, drag_type: impl Into<String>) -> Self {
        Self {
            node,
            parent_node: None,
            path: None,
            tree_index: None,
            tree_id,
            drag_type: drag_type.into(),
        }
    }

    /// Length of the origin path (0 when there is none).
    #[must_use]
    pub fn origin_depth(&self) -> usize {
        self.path.as_ref().map_or(0, TreePath::len)
    }

    /// Returns true if the payload type matches the given pattern.
    ///
    /// Supports exact match and wildcard prefix (e.g., `"text/*"`).
    #[must_use]
    pub fn matches_type(&self, pattern: &str) -> bool {
        if pattern == "*" || pattern == "*/*" {
            return true;
        }
        match pattern.strip_suffix("/*") {
            Some(prefix) => {
                self.drag_type.starts_with(prefix)
                    && self.drag_type.as_bytes().get(prefix.len()) == Some(&b'/')
            }
            None => self.drag_type == pattern,
        }
    }
}

/// Pointer geometry reported by the drag event source, in client pixels.
///
/// Any field may be missing: event sources drop geometry while the pointer
/// is outside the window or before the first move.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerState {
    /// Current pointer position.
    pub client_offset: Option<Point>,
    /// Pointer position when the drag began.
    pub initial_client_offset: Option<Point>,
    /// Current top-left of the dragged source preview.
    pub source_client_offset: Option<Point>,
}

impl PointerState {
    #[must_use]
    pub fn at(client_offset: Point) -> Self {
        Self {
            client_offset: Some(client_offset),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_initial(mut self, initial: Point) -> Self {
        self.initial_client_offset = Some(initial);
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: Point) -> Self {
        self.source_client_offset = Some(source);
        self
    }

    /// Displacement since the drag began.
    #[must_use]
    pub fn difference_from_initial(&self) -> Option<Point> {
        Some(self.client_offset?.delta_from(self.initial_client_offset?))
    }
}

/// The row a pointer is over.
#[derive(Debug, Clone, Copy)]
pub struct DropTargetContext<'a, N> {
    pub row: &'a Row<N>,
    /// Row rendered immediately above `row`, if any.
    pub prev_row: Option<&'a Row<N>>,
    /// On-screen bounds of the row element, when the host can measure it.
    pub bounds: Option<Rect>,
    /// Whether the pointer is currently over this target.
    pub is_over: bool,
}

impl<'a, N> DropTargetContext<'a, N> {
    /// Target for `rows[index]` with its predecessor as the row above.
    /// `None` if `index` is out of range.
    pub fn at(rows: &'a [Row<N>], index: usize) -> Option<Self> {
        let row = rows.get(index)?;
        let prev_row = index.checked_sub(1).and_then(|above| rows.get(above));
        Some(Self {
            row,
            prev_row,
            bounds: None,
            is_over: true,
        })
    }

    #[must_use]
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = Some(bounds);
        self
    }

    #[must_use]
    pub fn with_over(mut self, is_over: bool) -> Self {
        self.is_over = is_over;
        self
    }

    /// Flattened index a hover at `pointer` targets: the row's own index in
    /// its upper half, the next index in its lower half (middle included).
    /// Falls back to the row's index without live geometry.
    #[must_use]
    pub fn target_index(&self, pointer: Option<Point>) -> usize {
        let half = match (self.bounds, pointer) {
            (Some(bounds), Some(point)) => bounds.vertical_half(point),
            _ => None,
        };
        match half {
            Some(VerticalHalf::Lower) => self.row.tree_index + 1,
            Some(VerticalHalf::Upper) | None => self.row.tree_index,
        }
    }
}
