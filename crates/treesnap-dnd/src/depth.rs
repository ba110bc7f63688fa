#![forbid(unsafe_code)]

//! Target depth from pointer geometry.
//!
//! The depth a drop would nest at is derived from how far the pointer moved
//! horizontally, measured in indentation blocks, and bounded by the row
//! rendered above the drop target: a node can at most become the first child
//! of that row.
//!
//! ```text
//! upper = min(len(above.path) - [above cannot have children], len(target.path))
//! raw   = min(upper, max(0, initial + blocks - 1))
//! depth = max(0, min(raw, max_depth - subtree_height - 1))   // with max_depth
//! ```
//!
//! Everything here is pure.

use treesnap_core::geometry::Rect;

use crate::config::RowDirection;
use crate::payload::PointerState;

/// The row rendered immediately above the drop target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowAbove {
    /// Path length of that row (its depth + 1).
    pub path_len: usize,
    pub can_have_children: bool,
}

/// Where the dragged node came from and how far the pointer moved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOrigin {
    /// Dragged from a row of this tree.
    Internal {
        /// Path length of the node at drag start.
        origin_path_len: usize,
        /// Horizontal pointer displacement since drag start, if known.
        displacement_x: Option<f64>,
    },
    /// Dragged from another tree or from outside any tree.
    External {
        /// Source preview left edge minus drop element left edge, if both
        /// are known.
        left_shift: Option<f64>,
    },
}

impl DragOrigin {
    /// Derive the origin for a hover from raw pointer geometry.
    #[must_use]
    pub fn from_pointer(
        internal: bool,
        origin_path_len: usize,
        pointer: &PointerState,
        bounds: Option<Rect>,
    ) -> Self {
        if internal {
            Self::Internal {
                origin_path_len,
                displacement_x: pointer.difference_from_initial().map(|d| d.x),
            }
        } else {
            let left_shift = match (pointer.source_client_offset, bounds) {
                (Some(source), Some(bounds)) => Some(source.x - bounds.left()),
                _ => None,
            };
            Self::External { left_shift }
        }
    }
}

/// Inputs of [`resolve_depth`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthQuery {
    pub row_above: Option<RowAbove>,
    /// Path length of the hovered row.
    pub hovered_path_len: usize,
    pub origin: DragOrigin,
    pub block_width: f64,
    pub row_direction: RowDirection,
    pub max_depth: Option<usize>,
    /// Depth of the dragged subtree (0 for a leaf).
    pub subtree_height: usize,
}

/// Resolve the target depth for one hover.
#[must_use]
pub fn resolve_depth(query: &DepthQuery) -> usize {
    let upper = depth_upper_bound(query.row_above, query.hovered_path_len);
    let (initial, blocks) = match query.origin {
        DragOrigin::Internal {
            origin_path_len,
            displacement_x,
        } => {
            let shift = displacement_x.unwrap_or(0.0) * query.row_direction.sign();
            (
                i64::try_from(origin_path_len).unwrap_or(i64::MAX),
                blocks_moved(shift, query.block_width),
            )
        }
        DragOrigin::External { left_shift } => {
            let blocks = match left_shift {
                Some(shift) => blocks_moved(shift, query.block_width),
                None => i64::try_from(query.hovered_path_len).unwrap_or(i64::MAX),
            };
            (0, blocks)
        }
    };
    let raw = initial.saturating_add(blocks).saturating_sub(1).max(0);
    let raw = usize::try_from(raw).unwrap_or(0).min(upper);
    clamp_to_max_depth(raw, query.max_depth, query.subtree_height)
}

/// Deepest depth the row above allows. 0 when there is no row above.
#[must_use]
pub fn depth_upper_bound(row_above: Option<RowAbove>, hovered_path_len: usize) -> usize {
    let Some(above) = row_above else {
        return 0;
    };
    let mut bound = above.path_len;
    if !above.can_have_children {
        bound = bound.saturating_sub(1);
    }
    bound.min(hovered_path_len)
}

/// Whole indentation blocks covered by `shift`, rounding halves upward.
///
/// Non-finite shifts and non-positive block widths move nothing. Huge ratios
/// saturate at the `i64` range.
#[must_use]
pub fn blocks_moved(shift: f64, block_width: f64) -> i64 {
    if !(block_width.is_finite() && block_width > 0.0) {
        return 0;
    }
    let blocks = (shift / block_width + 0.5).floor();
    if blocks.is_finite() {
        blocks as i64
    } else {
        0
    }
}

/// Keep a subtree of height `subtree_height` within `max_depth`.
#[must_use]
pub fn clamp_to_max_depth(raw: usize, max_depth: Option<usize>, subtree_height: usize) -> usize {
    let Some(max) = max_depth else {
        return raw;
    };
    let limit = max
        .checked_sub(subtree_height)
        .and_then(|room| room.checked_sub(1))
        .unwrap_or(0);
    raw.min(limit)
}
