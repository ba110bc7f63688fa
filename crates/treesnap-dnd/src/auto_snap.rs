#![forbid(unsafe_code)]

//! Auto-snap: the nearest placement the validator accepts.
//!
//! When the literal placement under the pointer is rejected, the search
//! walks the ranked [`candidates`](crate::candidates) and simulates each one
//! through the host until the validator approves. The first approval wins.
//! A candidate that cannot be simulated at all counts as rejected.

use serde::{Deserialize, Serialize};
use treesnap_core::host::{
    DropContext, DropValidator, InsertionError, InsertionRequest, SimulatedInsertion, TreeHost,
};
use treesnap_core::tree::TreePath;

use crate::candidates::PlacementCandidate;
use crate::insertion_cache::{InsertionCache, InsertionKey};
use crate::payload::DragPayload;

/// Placement chosen by auto-snap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPlacement {
    /// Path of the new parent (empty at root level).
    pub path: TreePath,
    /// Flattened index the node would occupy.
    pub target_index: usize,
    /// Parent path length; `None` when snapping to root level.
    pub target_depth: Option<usize>,
}

impl ResolvedPlacement {
    fn from_simulation<N>(sim: &SimulatedInsertion<N>) -> Self {
        let path = sim.parent_path();
        let target_depth = (!path.is_empty()).then(|| path.len());
        Self {
            path,
            target_index: sim.tree_index,
            target_depth,
        }
    }

    /// Depth to insert at (0 for root level).
    #[must_use]
    pub fn insertion_depth(&self) -> usize {
        self.target_depth.unwrap_or(0)
    }
}

/// Simulate inserting the dragged node at `candidate`, memoized.
pub fn simulate_candidate<H>(
    host: &H,
    payload: &DragPayload<H::Node>,
    candidate: PlacementCandidate,
    cache: &mut InsertionCache<H::Node>,
) -> Result<SimulatedInsertion<H::Node>, InsertionError>
where
    H: TreeHost + ?Sized,
{
    let key = InsertionKey {
        node: host.node_key(&payload.node),
        depth: candidate.depth,
        minimum_tree_index: candidate.minimum_tree_index,
        expand_parent: true,
    };
    cache.get_or_compute(host.snapshot_id(), key, || {
        host.simulate_insertion(&InsertionRequest {
            node: &payload.node,
            depth: candidate.depth,
            minimum_tree_index: candidate.minimum_tree_index,
            expand_parent: true,
        })
    })
}

/// Ask `validator` about a simulated placement of the dragged node.
pub fn approves<N, V>(validator: &V, payload: &DragPayload<N>, sim: &SimulatedInsertion<N>) -> bool
where
    V: DropValidator<N> + ?Sized,
{
    validator.can_drop(&DropContext {
        node: &payload.node,
        prev_path: payload.path.as_ref(),
        prev_parent: payload.parent_node.as_ref(),
        prev_tree_index: payload.tree_index,
        next_path: &sim.path,
        next_parent: sim.parent_node.as_ref(),
        next_tree_index: sim.tree_index,
    })
}

/// First candidate, in order, whose simulated placement `validator` approves.
///
/// `None` means nothing nearby is acceptable ("cannot drop here").
#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
pub fn auto_snap<H, V>(
    host: &H,
    candidates: &[PlacementCandidate],
    payload: &DragPayload<H::Node>,
    validator: &V,
    cache: &mut InsertionCache<H::Node>,
) -> Option<ResolvedPlacement>
where
    H: TreeHost + ?Sized,
    V: DropValidator<H::Node> + ?Sized,
{
    let _span = treesnap_core::debug_span!("auto_snap", candidates = candidates.len()).entered();

    for (rank, &candidate) in candidates.iter().enumerate() {
        let sim = match simulate_candidate(host, payload, candidate, cache) {
            Ok(sim) => sim,
            Err(err) => {
                treesnap_core::trace!(
                    rank,
                    depth = candidate.depth,
                    minimum_tree_index = candidate.minimum_tree_index,
                    error = %err,
                    "candidate cannot be simulated"
                );
                continue;
            }
        };
        if approves(validator, payload, &sim) {
            let placement = ResolvedPlacement::from_simulation(&sim);
            treesnap_core::debug!(
                rank,
                depth = candidate.depth,
                minimum_tree_index = candidate.minimum_tree_index,
                target_index = placement.target_index,
                "auto-snap placement approved"
            );
            return Some(placement);
        }
        treesnap_core::trace!(
            rank,
            depth = candidate.depth,
            minimum_tree_index = candidate.minimum_tree_index,
            "candidate rejected"
        );
    }
    treesnap_core::debug!("auto-snap found no acceptable placement");
    None
}
