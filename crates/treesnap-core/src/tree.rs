#![forbid(unsafe_code)]

//! Reference tree model.
//!
//! [`TreeData`] is an immutable snapshot of a forest of [`TreeNode`]s that
//! implements [`TreeHost`]: it flattens visible rows, simulates insertions,
//! and measures subtree depth. Mutating operations return a new snapshot with
//! a fresh [`SnapshotId`], so caches keyed by snapshot never serve results for
//! the wrong data.
//!
//! # Example
//!
//! ```
//! use treesnap_core::tree::{NodeKey, TreeData, TreeNode};
//! use treesnap_core::host::TreeHost;
//!
//! let tree = TreeData::new(vec![
//!     TreeNode::new(1, "src")
//!         .child(TreeNode::new(2, "main.rs"))
//!         .child(TreeNode::new(3, "lib.rs")),
//! ]);
//!
//! let rows = tree.rows();
//! assert_eq!(rows.len(), 3);
//! assert_eq!(rows[1].path.keys(), &[NodeKey(1), NodeKey(2)]);
//! ```
//!
//! # Insertion placement
//!
//! An insertion at depth `d` with minimum index `m` walks the visible rows in
//! order and takes the first slot at depth `d` whose flattened index is at
//! least `m`. When the walk reaches the end of the tree without finding one,
//! the node is appended under the last open ancestor that can hold it.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::host::{InsertionError, InsertionRequest, Row, SimulatedInsertion, SnapshotId, TreeHost};

/// Stable identifier for tree nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeKey(pub u64);

impl NodeKey {
    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NodeKey {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Root-to-node key sequence. Its length is the nesting depth of the
/// position it names; the empty path is the root level.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TreePath(SmallVec<[NodeKey; 8]>);

impl TreePath {
    /// The empty (root-level) path.
    #[must_use]
    pub fn root() -> Self {
        Self(SmallVec::new())
    }

    /// Build a path from keys, root first.
    #[must_use]
    pub fn from_keys(keys: impl IntoIterator<Item = NodeKey>) -> Self {
        Self(keys.into_iter().collect())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn keys(&self) -> &[NodeKey] {
        &self.0
    }

    #[must_use]
    pub fn last(&self) -> Option<NodeKey> {
        self.0.last().copied()
    }

    /// Path with the last element removed (the parent's path).
    #[must_use]
    pub fn parent(&self) -> Self {
        let mut keys = self.0.clone();
        keys.pop();
        Self(keys)
    }

    /// Path extended by one key.
    #[must_use]
    pub fn join(&self, key: NodeKey) -> Self {
        let mut keys = self.0.clone();
        keys.push(key);
        Self(keys)
    }

    /// Whether `self` is `other` or one of its ancestors.
    #[must_use]
    pub fn is_prefix_of(&self, other: &TreePath) -> bool {
        other.0.starts_with(&self.0)
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("/")?;
        for (i, key) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{key}")?;
        }
        Ok(())
    }
}

/// Children of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum Children {
    /// Materialized children (possibly empty).
    Nodes(Vec<Arc<TreeNode>>),
    /// Children produced on demand by the host; they cannot be enumerated
    /// or targeted by a drop.
    Lazy,
}

impl Default for Children {
    fn default() -> Self {
        Self::Nodes(Vec::new())
    }
}

/// A node in the tree hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    key: NodeKey,
    label: String,
    children: Children,
    expanded: bool,
    accepts_children: bool,
}

impl TreeNode {
    /// Create an expanded node with no children.
    #[must_use]
    pub fn new(key: impl Into<NodeKey>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            children: Children::default(),
            expanded: true,
            accepts_children: true,
        }
    }

    /// Add a child node.
    #[must_use]
    pub fn child(mut self, node: TreeNode) -> Self {
        match &mut self.children {
            Children::Nodes(nodes) => nodes.push(Arc::new(node)),
            Children::Lazy => self.children = Children::Nodes(vec![Arc::new(node)]),
        }
        self
    }

    /// Set children from a vec.
    #[must_use]
    pub fn with_children(mut self, nodes: Vec<TreeNode>) -> Self {
        self.children = Children::Nodes(nodes.into_iter().map(Arc::new).collect());
        self
    }

    /// Mark the children as lazily computed.
    #[must_use]
    pub fn with_lazy_children(mut self) -> Self {
        self.children = Children::Lazy;
        self
    }

    /// Set whether this node is expanded.
    #[must_use]
    pub fn with_expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    /// Forbid nesting anything under this node.
    #[must_use]
    pub fn leaf(mut self) -> Self {
        self.accepts_children = false;
        self
    }

    #[must_use]
    pub fn key(&self) -> NodeKey {
        self.key
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn children(&self) -> &Children {
        &self.children
    }

    /// Materialized children, empty for lazy nodes.
    #[must_use]
    pub fn child_nodes(&self) -> &[Arc<TreeNode>] {
        match &self.children {
            Children::Nodes(nodes) => nodes,
            Children::Lazy => &[],
        }
    }

    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    #[must_use]
    pub fn accepts_children(&self) -> bool {
        self.accepts_children
    }

    /// Number of visible descendants (children of collapsed nodes are hidden).
    #[must_use]
    pub fn visible_descendant_count(&self) -> usize {
        if !self.expanded {
            return 0;
        }
        self.child_nodes()
            .iter()
            .map(|child| 1 + child.visible_descendant_count())
            .sum()
    }

    /// Depth of the deepest materialized descendant (0 for a leaf).
    #[must_use]
    pub fn subtree_depth(&self) -> usize {
        self.child_nodes()
            .iter()
            .map(|child| child.subtree_depth() + 1)
            .max()
            .unwrap_or(0)
    }
}

static NEXT_SNAPSHOT: AtomicU64 = AtomicU64::new(1);

fn next_snapshot_id() -> SnapshotId {
    SnapshotId(NEXT_SNAPSHOT.fetch_add(1, Ordering::Relaxed))
}

/// Immutable tree snapshot with precomputed visible rows.
#[derive(Debug, Clone)]
pub struct TreeData {
    roots: Vec<Arc<TreeNode>>,
    rows: Vec<Row<Arc<TreeNode>>>,
    snapshot: SnapshotId,
}

impl TreeData {
    /// Build a snapshot from root nodes.
    #[must_use]
    pub fn new(roots: Vec<TreeNode>) -> Self {
        Self::from_shared(roots.into_iter().map(Arc::new).collect())
    }

    fn from_shared(roots: Vec<Arc<TreeNode>>) -> Self {
        let mut rows = Vec::new();
        for root in &roots {
            flatten(root, None, &TreePath::root(), &mut rows);
        }
        Self {
            roots,
            rows,
            snapshot: next_snapshot_id(),
        }
    }

    /// An empty forest.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_shared(Vec::new())
    }

    #[must_use]
    pub fn roots(&self) -> &[Arc<TreeNode>] {
        &self.roots
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Look up a visible row by node key.
    #[must_use]
    pub fn row_by_key(&self, key: NodeKey) -> Option<&Row<Arc<TreeNode>>> {
        self.rows.iter().find(|row| row.node.key() == key)
    }

    /// Return a new snapshot with `node` inserted at `depth`, at or after
    /// `minimum_tree_index`.
    pub fn insert(
        &self,
        node: TreeNode,
        depth: usize,
        minimum_tree_index: usize,
        expand_parent: bool,
    ) -> Result<(TreeData, SimulatedInsertion<Arc<TreeNode>>), InsertionError> {
        let found = self.locate(depth, minimum_tree_index)?;
        let key = node.key();
        let node = Arc::new(node);
        let mut roots = self.roots.clone();
        insert_along(&mut roots, &found.chain, found.insert_at, node, expand_parent);
        let next = TreeData::from_shared(roots);
        let inserted = next.resolve_inserted(&found.parent_path, key, found.tree_index);
        Ok((next, inserted))
    }

    /// Return a new snapshot without the node at `key` (and its subtree),
    /// together with the removed node. `None` if no node has that key.
    #[must_use]
    pub fn remove(&self, key: NodeKey) -> Option<(TreeData, Arc<TreeNode>)> {
        let mut roots = self.roots.clone();
        let removed = remove_from(&mut roots, key)?;
        Some((TreeData::from_shared(roots), removed))
    }

    fn resolve_inserted(
        &self,
        parent_path: &TreePath,
        key: NodeKey,
        tree_index: usize,
    ) -> SimulatedInsertion<Arc<TreeNode>> {
        let parent_node = parent_path
            .last()
            .and_then(|parent| find_node(&self.roots, parent));
        SimulatedInsertion {
            path: parent_path.join(key),
            parent_node,
            tree_index,
        }
    }

    fn locate(&self, depth: usize, minimum_tree_index: usize) -> Result<Found, InsertionError> {
        let walk = Walk {
            target_depth: depth as i64,
            minimum_tree_index: minimum_tree_index as i64,
        };
        match walk.visit(Level::pseudo_root(&self.roots), -1, -1, true, &TreePath::root())? {
            Visit::Inserted(found) => Ok(found),
            Visit::Skipped { .. } => Err(InsertionError::NoSuitablePosition {
                depth,
                minimum_tree_index,
            }),
        }
    }
}

impl PartialEq for TreeData {
    fn eq(&self, other: &Self) -> bool {
        self.roots == other.roots
    }
}

impl TreeHost for TreeData {
    type Node = Arc<TreeNode>;

    fn snapshot_id(&self) -> SnapshotId {
        self.snapshot
    }

    fn node_key(&self, node: &Self::Node) -> NodeKey {
        node.key()
    }

    fn rows(&self) -> &[Row<Self::Node>] {
        &self.rows
    }

    fn simulate_insertion(
        &self,
        request: &InsertionRequest<'_, Self::Node>,
    ) -> Result<SimulatedInsertion<Self::Node>, InsertionError> {
        let found = self.locate(request.depth, request.minimum_tree_index)?;
        crate::trace!(
            depth = request.depth,
            minimum_tree_index = request.minimum_tree_index,
            tree_index = found.tree_index,
            "simulated insertion"
        );
        Ok(self.resolve_inserted(&found.parent_path, request.node.key(), found.tree_index))
    }

    fn measure_depth(&self, node: &Self::Node) -> usize {
        node.subtree_depth()
    }

    fn can_node_have_children(&self, node: &Self::Node) -> bool {
        node.accepts_children()
    }

    fn has_functional_children(&self, node: &Self::Node) -> bool {
        matches!(node.children(), Children::Lazy)
    }
}

fn flatten(
    node: &Arc<TreeNode>,
    parent: Option<&Arc<TreeNode>>,
    parent_path: &TreePath,
    rows: &mut Vec<Row<Arc<TreeNode>>>,
) {
    let path = parent_path.join(node.key());
    rows.push(Row {
        node: Arc::clone(node),
        parent_node: parent.cloned(),
        path: path.clone(),
        tree_index: rows.len(),
    });
    if node.is_expanded() {
        for child in node.child_nodes() {
            flatten(child, Some(node), &path, rows);
        }
    }
}

fn find_node(nodes: &[Arc<TreeNode>], key: NodeKey) -> Option<Arc<TreeNode>> {
    nodes.iter().find_map(|node| {
        if node.key() == key {
            Some(Arc::clone(node))
        } else {
            find_node(node.child_nodes(), key)
        }
    })
}

fn insert_along(
    nodes: &mut Vec<Arc<TreeNode>>,
    chain: &[usize],
    insert_at: usize,
    node: Arc<TreeNode>,
    expand_parent: bool,
) {
    let Some((&first, rest)) = chain.split_first() else {
        nodes.insert(insert_at.min(nodes.len()), node);
        return;
    };
    let Some(slot) = nodes.get_mut(first) else {
        return;
    };
    let parent = Arc::make_mut(slot);
    if rest.is_empty() && expand_parent {
        parent.expanded = true;
    }
    if let Children::Nodes(children) = &mut parent.children {
        insert_along(children, rest, insert_at, node, expand_parent);
    }
}

fn remove_from(nodes: &mut Vec<Arc<TreeNode>>, key: NodeKey) -> Option<Arc<TreeNode>> {
    if let Some(pos) = nodes.iter().position(|node| node.key() == key) {
        return Some(nodes.remove(pos));
    }
    for slot in nodes.iter_mut() {
        if !contains_key(slot.child_nodes(), key) {
            continue;
        }
        if let Children::Nodes(children) = &mut Arc::make_mut(slot).children {
            return remove_from(children, key);
        }
    }
    None
}

fn contains_key(nodes: &[Arc<TreeNode>], key: NodeKey) -> bool {
    nodes
        .iter()
        .any(|node| node.key() == key || contains_key(node.child_nodes(), key))
}

/// A located insertion slot.
#[derive(Debug)]
struct Found {
    /// Child indices from the root list down to the parent.
    chain: Vec<usize>,
    /// Index within the parent's children.
    insert_at: usize,
    tree_index: usize,
    parent_path: TreePath,
}

enum Visit {
    Skipped { next_index: i64 },
    Inserted(Found),
}

/// One level of the walk: a real node, or the always-open pseudo root whose
/// children are the forest.
struct Level<'a> {
    node: Option<&'a Arc<TreeNode>>,
    children: &'a [Arc<TreeNode>],
    lazy: bool,
    open: bool,
}

impl<'a> Level<'a> {
    fn pseudo_root(roots: &'a [Arc<TreeNode>]) -> Self {
        Self {
            node: None,
            children: roots,
            lazy: false,
            open: true,
        }
    }

    fn of(node: &'a Arc<TreeNode>) -> Self {
        Self {
            node: Some(node),
            children: node.child_nodes(),
            lazy: matches!(node.children(), Children::Lazy),
            open: node.is_expanded(),
        }
    }
}

struct Walk {
    target_depth: i64,
    minimum_tree_index: i64,
}

impl Walk {
    fn visit(
        &self,
        level: Level<'_>,
        current_index: i64,
        current_depth: i64,
        is_last_child: bool,
        parent_path: &TreePath,
    ) -> Result<Visit, InsertionError> {
        let self_path = match level.node {
            Some(node) => parent_path.join(node.key()),
            None => TreePath::root(),
        };

        // Only place left: prepend to this level's children.
        if current_index >= self.minimum_tree_index - 1
            || (is_last_child && level.children.is_empty())
        {
            if let (true, Some(node)) = (level.lazy, level.node) {
                return Err(InsertionError::FunctionalChildren { parent: node.key() });
            }
            return Ok(Visit::Inserted(Found {
                chain: Vec::new(),
                insert_at: 0,
                tree_index: index_from(current_index + 1),
                parent_path: self_path,
            }));
        }

        if level.lazy || !level.open {
            return Ok(Visit::Skipped {
                next_index: current_index + 1,
            });
        }
        let nodes = level.children;
        // At the target depth: pick a slot among this level's children.
        if current_depth >= self.target_depth - 1 {
            let mut child_index = current_index + 1;
            let mut slot = None;
            for (i, child) in nodes.iter().enumerate() {
                if child_index >= self.minimum_tree_index {
                    slot = Some((i, child_index));
                    break;
                }
                child_index += 1 + child.visible_descendant_count() as i64;
            }
            let (insert_at, tree_index) = match slot {
                Some(found) => found,
                None if child_index < self.minimum_tree_index && !is_last_child => {
                    return Ok(Visit::Skipped {
                        next_index: child_index,
                    });
                }
                None => (nodes.len(), child_index),
            };
            return Ok(Visit::Inserted(Found {
                chain: Vec::new(),
                insert_at,
                tree_index: index_from(tree_index),
                parent_path: self_path,
            }));
        }

        // Above the target depth: descend.
        let mut child_index = current_index + 1;
        let last = nodes.len().saturating_sub(1);
        for (i, child) in nodes.iter().enumerate() {
            match self.visit(
                Level::of(child),
                child_index,
                current_depth + 1,
                is_last_child && i == last,
                &self_path,
            )? {
                Visit::Inserted(mut found) => {
                    found.chain.insert(0, i);
                    return Ok(Visit::Inserted(found));
                }
                Visit::Skipped { next_index } => child_index = next_index,
            }
        }
        Ok(Visit::Skipped {
            next_index: child_index,
        })
    }
}

fn index_from(value: i64) -> usize {
    usize::try_from(value).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TreeData {
        // 0: a
        // 1:   b
        // 2:   c
        // 3:     d
        // 4: e
        TreeData::new(vec![
            TreeNode::new(1, "a")
                .child(TreeNode::new(2, "b"))
                .child(TreeNode::new(3, "c").child(TreeNode::new(4, "d"))),
            TreeNode::new(5, "e"),
        ])
    }

    fn new_node() -> Arc<TreeNode> {
        Arc::new(TreeNode::new(99, "new"))
    }

    fn simulate(tree: &TreeData, depth: usize, min: usize) -> SimulatedInsertion<Arc<TreeNode>> {
        let node = new_node();
        tree.simulate_insertion(&InsertionRequest {
            node: &node,
            depth,
            minimum_tree_index: min,
            expand_parent: true,
        })
        .expect("insertion should succeed")
    }

    fn keys(path: &TreePath) -> Vec<u64> {
        path.keys().iter().map(|k| k.0).collect()
    }

    #[test]
    fn rows_are_flattened_depth_first() {
        let tree = sample();
        let rows = tree.rows();
        let order: Vec<u64> = rows.iter().map(|r| r.node.key().0).collect();
        assert_eq!(order, vec![1, 2, 3, 4, 5]);
        assert_eq!(keys(&rows[3].path), vec![1, 3, 4]);
        assert_eq!(rows[3].parent_node.as_ref().map(|p| p.key().0), Some(3));
        assert!(rows[0].parent_node.is_none());
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.tree_index, i);
        }
    }

    #[test]
    fn collapsed_children_are_hidden() {
        let tree = TreeData::new(vec![
            TreeNode::new(1, "a")
                .with_expanded(false)
                .child(TreeNode::new(2, "b")),
            TreeNode::new(3, "c"),
        ]);
        assert_eq!(tree.rows().len(), 2);
        assert_eq!(tree.rows()[1].node.key(), NodeKey(3));
    }

    #[test]
    fn insert_root_level_at_start() {
        let sim = simulate(&sample(), 0, 0);
        assert_eq!(keys(&sim.path), vec![99]);
        assert_eq!(sim.tree_index, 0);
        assert!(sim.parent_node.is_none());
    }

    #[test]
    fn insert_root_level_after_first_subtree() {
        let sim = simulate(&sample(), 0, 1);
        assert_eq!(keys(&sim.path), vec![99]);
        assert_eq!(sim.tree_index, 4);
    }

    #[test]
    fn insert_as_first_child() {
        let sim = simulate(&sample(), 1, 1);
        assert_eq!(keys(&sim.path), vec![1, 99]);
        assert_eq!(sim.tree_index, 1);
        assert_eq!(sim.parent_node.map(|p| p.key().0), Some(1));
    }

    #[test]
    fn insert_between_siblings() {
        let sim = simulate(&sample(), 1, 2);
        assert_eq!(keys(&sim.path), vec![1, 99]);
        assert_eq!(sim.tree_index, 2);
    }

    #[test]
    fn insert_nested_under_grandchild() {
        let sim = simulate(&sample(), 2, 3);
        assert_eq!(keys(&sim.path), vec![1, 3, 99]);
        assert_eq!(sim.tree_index, 3);
    }

    #[test]
    fn insert_at_end_of_tree() {
        let tree = sample();
        let sim = simulate(&tree, 0, tree.rows().len());
        assert_eq!(keys(&sim.path), vec![99]);
        assert_eq!(sim.tree_index, 5);
    }

    #[test]
    fn insert_into_empty_tree() {
        let sim = simulate(&TreeData::empty(), 0, 0);
        assert_eq!(keys(&sim.path), vec![99]);
        assert_eq!(sim.tree_index, 0);
    }

    #[test]
    fn insert_under_leaf_row_at_end() {
        // Last row "e" has no children: nesting under it is the only option.
        let tree = sample();
        let sim = simulate(&tree, 1, 5);
        assert_eq!(keys(&sim.path), vec![5, 99]);
        assert_eq!(sim.tree_index, 5);
    }

    #[test]
    fn lazy_children_cannot_receive_insertions() {
        let tree = TreeData::new(vec![TreeNode::new(1, "lazy").with_lazy_children()]);
        let node = new_node();
        let err = tree
            .simulate_insertion(&InsertionRequest {
                node: &node,
                depth: 1,
                minimum_tree_index: 1,
                expand_parent: true,
            })
            .unwrap_err();
        assert_eq!(err, InsertionError::FunctionalChildren { parent: NodeKey(1) });
    }

    #[test]
    fn measure_depth_counts_levels() {
        let tree = sample();
        let rows = tree.rows();
        assert_eq!(tree.measure_depth(&rows[0].node), 2);
        assert_eq!(tree.measure_depth(&rows[2].node), 1);
        assert_eq!(tree.measure_depth(&rows[1].node), 0);
    }

    #[test]
    fn insert_produces_new_snapshot_matching_simulation() {
        let tree = sample();
        let simulated = simulate(&tree, 2, 3);
        let (next, inserted) = tree
            .insert(TreeNode::new(99, "new"), 2, 3, true)
            .expect("insert");
        assert_ne!(next.snapshot_id(), tree.snapshot_id());
        assert_eq!(inserted.path, simulated.path);
        assert_eq!(inserted.tree_index, simulated.tree_index);
        assert_eq!(next.rows()[inserted.tree_index].node.key(), NodeKey(99));
        assert_eq!(next.rows()[inserted.tree_index].path, inserted.path);
    }

    #[test]
    fn insert_expands_collapsed_parent() {
        let tree = TreeData::new(vec![
            TreeNode::new(1, "a")
                .with_expanded(false)
                .child(TreeNode::new(2, "b")),
        ]);
        let (next, inserted) = tree
            .insert(TreeNode::new(99, "new"), 1, 1, true)
            .expect("insert");
        assert_eq!(inserted.tree_index, 1);
        assert!(next.roots()[0].is_expanded());
        assert_eq!(next.rows().len(), 3);
    }

    #[test]
    fn remove_returns_subtree() {
        let tree = sample();
        let (next, removed) = tree.remove(NodeKey(3)).expect("present");
        assert_eq!(removed.key(), NodeKey(3));
        let order: Vec<u64> = next.rows().iter().map(|r| r.node.key().0).collect();
        assert_eq!(order, vec![1, 2, 5]);
        assert!(tree.remove(NodeKey(42)).is_none());
    }

    #[test]
    fn path_helpers() {
        let path = TreePath::from_keys([NodeKey(1), NodeKey(2)]);
        assert_eq!(path.parent(), TreePath::from_keys([NodeKey(1)]));
        assert_eq!(path.join(NodeKey(3)).len(), 3);
        assert!(TreePath::root().is_prefix_of(&path));
        assert!(path.parent().is_prefix_of(&path));
        assert!(!path.is_prefix_of(&path.parent()));
        assert_eq!(path.to_string(), "/1/2");
        assert_eq!(TreePath::root().to_string(), "/");
    }

    #[test]
    fn path_serializes_as_key_list() {
        let path = TreePath::from_keys([NodeKey(1), NodeKey(2)]);
        let json = serde_json::to_string(&path).expect("serialize");
        assert_eq!(json, "[1,2]");
        let back: TreePath = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, path);
    }
}
