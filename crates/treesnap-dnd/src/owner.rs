#![forbid(unsafe_code)]

//! Notifications sent to the tree owner during a drag.

use treesnap_core::tree::TreePath;

use crate::payload::{DragPayload, TreeId};

/// Where the dragged node would land, sent once per frame while hovering.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverPlacement<N> {
    pub node: N,
    /// Origin path of the dragged node (`None` for external nodes).
    pub prev_path: Option<TreePath>,
    /// New parent path when auto-snap picked the placement.
    pub snapped_parent: Option<TreePath>,
    pub minimum_tree_index: usize,
    pub depth: usize,
}

/// Final placement of a completed drop.
#[derive(Debug, Clone, PartialEq)]
pub struct DropResult<N> {
    pub node: N,
    /// Tree the node was dropped into.
    pub tree_id: TreeId,
    pub prev_path: Option<TreePath>,
    /// Origin flattened index, `None` for external nodes.
    pub prev_tree_index: Option<usize>,
    /// Insert at the first position at or after this flattened index.
    pub minimum_tree_index: usize,
    pub depth: usize,
    /// New parent path when the placement came from auto-snap.
    pub snapped_parent: Option<TreePath>,
}

/// Callbacks implemented by whoever owns the tree data.
///
/// The owner applies the actual mutation (e.g. [`TreeData::insert`]) when it
/// receives [`on_drop`](Self::on_drop). During a drag it should expose to the
/// engine a snapshot without the dragged node, and may render a preview from
/// [`on_drag_hover`](Self::on_drag_hover).
///
/// [`TreeData::insert`]: treesnap_core::tree::TreeData::insert
pub trait TreeOwner<N> {
    /// Called once when a drag begins.
    fn on_drag_begin(&mut self, _payload: &DragPayload<N>) {}

    /// Called at most once per frame with the latest hover placement.
    fn on_drag_hover(&mut self, placement: HoverPlacement<N>);

    /// Called when the node is dropped onto this tree.
    fn on_drop(&mut self, result: &DropResult<N>);

    /// Called when the drag ends, dropped or not.
    fn on_drag_end(&mut self, _result: Option<&DropResult<N>>) {}
}
