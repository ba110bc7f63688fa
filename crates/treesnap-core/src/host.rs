#![forbid(unsafe_code)]

//! Host adapter contract.
//!
//! The placement engine never owns tree data. Everything it needs to know
//! about the current tree snapshot goes through [`TreeHost`], and every
//! placement decision the caller wants to veto goes through
//! [`DropValidator`]. Both are consulted on the hover hot path, so
//! implementations should be cheap and must not mutate the tree.
//!
//! # Invariants
//!
//! 1. [`TreeHost::rows`] is ordered consistently with on-screen order and
//!    `rows()[i].tree_index == i`.
//! 2. A row's path ends with its own key, so a root-level row has a path of
//!    length 1.
//! 3. [`TreeHost::simulate_insertion`] is pure: identical requests against an
//!    unchanged [`SnapshotId`] return identical results.
//! 4. [`TreeHost::snapshot_id`] changes whenever the tree data changes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tree::{NodeKey, TreePath};

/// Identity of one immutable tree snapshot.
///
/// Caches keyed by snapshot identity are invalidated by comparing ids; the
/// value itself carries no ordering meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotId(pub u64);

/// One flattened, visible tree row.
#[derive(Debug, Clone, PartialEq)]
pub struct Row<N> {
    pub node: N,
    /// `None` for root-level rows.
    pub parent_node: Option<N>,
    /// Root-to-node keys, including the node's own key.
    pub path: TreePath,
    /// 0-based position in the flattened visible sequence.
    pub tree_index: usize,
}

impl<N> Row<N> {
    /// Nesting depth of the row (`path.len() - 1`, 0 for roots).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// A hypothetical insertion of `node` at `depth`, at or after
/// `minimum_tree_index`.
#[derive(Debug, Clone, Copy)]
pub struct InsertionRequest<'a, N> {
    pub node: &'a N,
    pub depth: usize,
    pub minimum_tree_index: usize,
    /// Whether the parent would be expanded to reveal the inserted node.
    pub expand_parent: bool,
}

/// Where a node would land if it were actually inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedInsertion<N> {
    /// Path of the inserted node, ending with its own key.
    pub path: TreePath,
    /// Parent as it exists in the current snapshot (`None` at root level).
    pub parent_node: Option<N>,
    /// Flattened index the inserted node would occupy.
    pub tree_index: usize,
}

impl<N> SimulatedInsertion<N> {
    /// The parent path (the insertion path without its last element).
    #[must_use]
    pub fn parent_path(&self) -> TreePath {
        self.path.parent()
    }
}

/// Why an insertion could not be simulated or applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertionError {
    /// The only place left to insert is under a node whose children are
    /// computed lazily and therefore cannot be enumerated.
    FunctionalChildren { parent: NodeKey },
    /// No position at the requested depth satisfies the minimum index.
    NoSuitablePosition {
        depth: usize,
        minimum_tree_index: usize,
    },
}

impl fmt::Display for InsertionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FunctionalChildren { parent } => {
                write!(f, "cannot add to lazily computed children of node {parent}")
            }
            Self::NoSuitablePosition {
                depth,
                minimum_tree_index,
            } => write!(
                f,
                "no suitable position to insert at depth {depth} (minimum tree index {minimum_tree_index})"
            ),
        }
    }
}

impl std::error::Error for InsertionError {}

/// Read-only access to the current tree snapshot.
///
/// Implemented by the tree owner. The reference implementation is
/// [`TreeData`](crate::tree::TreeData).
pub trait TreeHost {
    /// Node handle carried through rows, payloads and callbacks. Should be
    /// cheap to clone (an `Arc`, an id, a small struct).
    type Node: Clone + fmt::Debug;

    /// Identity of the snapshot currently exposed by [`rows`](Self::rows).
    fn snapshot_id(&self) -> SnapshotId;

    /// Stable key of a node.
    fn node_key(&self, node: &Self::Node) -> NodeKey;

    /// Current flattened visible rows.
    fn rows(&self) -> &[Row<Self::Node>];

    /// Compute where `request.node` would land without mutating anything.
    fn simulate_insertion(
        &self,
        request: &InsertionRequest<'_, Self::Node>,
    ) -> Result<SimulatedInsertion<Self::Node>, InsertionError>;

    /// Depth of the deepest descendant below `node` (0 for a leaf).
    fn measure_depth(&self, node: &Self::Node) -> usize;

    /// Whether `node` may contain children at all.
    fn can_node_have_children(&self, _node: &Self::Node) -> bool {
        true
    }

    /// Whether `node`'s children are computed on demand (not materialized).
    fn has_functional_children(&self, node: &Self::Node) -> bool;
}

/// Structural context handed to a [`DropValidator`].
///
/// `prev_*` describe the node before the drag (all `None` for nodes coming
/// from outside the tree), `next_*` the hypothetical post-drop position.
#[derive(Debug, Clone, Copy)]
pub struct DropContext<'a, N> {
    pub node: &'a N,
    pub prev_path: Option<&'a TreePath>,
    pub prev_parent: Option<&'a N>,
    pub prev_tree_index: Option<usize>,
    pub next_path: &'a TreePath,
    pub next_parent: Option<&'a N>,
    pub next_tree_index: usize,
}

/// Caller-supplied predicate approving or rejecting a prospective placement.
///
/// Any `Fn(&DropContext<'_, N>) -> bool` is a validator. Panics raised by a
/// validator are not caught by the engine.
pub trait DropValidator<N> {
    fn can_drop(&self, ctx: &DropContext<'_, N>) -> bool;
}

impl<N, F> DropValidator<N> for F
where
    F: Fn(&DropContext<'_, N>) -> bool,
{
    fn can_drop(&self, ctx: &DropContext<'_, N>) -> bool {
        self(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_depth_from_path() {
        let row = Row {
            node: (),
            parent_node: None,
            path: TreePath::from_keys([NodeKey(1), NodeKey(2)]),
            tree_index: 1,
        };
        assert_eq!(row.depth(), 1);
    }

    #[test]
    fn simulated_parent_path_drops_last() {
        let sim: SimulatedInsertion<()> = SimulatedInsertion {
            path: TreePath::from_keys([NodeKey(1), NodeKey(9)]),
            parent_node: None,
            tree_index: 2,
        };
        assert_eq!(sim.parent_path(), TreePath::from_keys([NodeKey(1)]));
    }

    #[test]
    fn closures_are_validators() {
        let node = 7u32;
        let next = TreePath::root();
        let ctx = DropContext {
            node: &node,
            prev_path: None,
            prev_parent: None,
            prev_tree_index: None,
            next_path: &next,
            next_parent: None,
            next_tree_index: 0,
        };
        let only_even = |ctx: &DropContext<'_, u32>| *ctx.node % 2 == 0;
        assert!(!only_even.can_drop(&ctx));
    }

    #[test]
    fn insertion_error_display() {
        let err = InsertionError::NoSuitablePosition {
            depth: 3,
            minimum_tree_index: 9,
        };
        assert_eq!(
            err.to_string(),
            "no suitable position to insert at depth 3 (minimum tree index 9)"
        );
        let err = InsertionError::FunctionalChildren { parent: NodeKey(4) };
        assert!(err.to_string().contains("node 4"));
    }
}
