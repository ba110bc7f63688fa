#![forbid(unsafe_code)]

//! Ranked placement candidates for auto-snap.
//!
//! Candidates are produced in priority order and the search stops at the
//! first one the validator approves, so the order below is the behavior:
//!
//! 1. the literal target index at every depth from the target depth up to 0;
//! 2. each row above the target, nearest first, at every depth from one past
//!    that row's depth up to 0;
//! 3. each row below the target, nearest first, likewise.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use treesnap_core::host::Row;

/// One `(depth, minimum_tree_index)` pair to try.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacementCandidate {
    pub depth: usize,
    pub minimum_tree_index: usize,
}

impl PlacementCandidate {
    #[must_use]
    pub const fn new(depth: usize, minimum_tree_index: usize) -> Self {
        Self {
            depth,
            minimum_tree_index,
        }
    }
}

/// Candidate list; small scan windows stay on the stack.
pub type Candidates = SmallVec<[PlacementCandidate; 16]>;

/// Build the ordered candidate list around `(target_depth, target_index)`.
#[must_use]
pub fn build_candidates<N>(
    target_depth: usize,
    target_index: usize,
    rows: &[Row<N>],
    rows_before: usize,
    rows_after: usize,
) -> Candidates {
    let mut out = Candidates::new();
    push_all_depths(&mut out, target_depth, target_index);

    let lowest = target_index.saturating_sub(rows_before);
    for i in (lowest..target_index).rev() {
        match row_before_slot(rows, i) {
            Some(row) => push_all_depths(&mut out, row.path.len(), i),
            None => push_all_depths(&mut out, 0, 0),
        }
    }

    let highest = target_index.saturating_add(rows_after).min(rows.len());
    for i in (target_index + 1)..=highest {
        match row_before_slot(rows, i) {
            Some(row) => push_all_depths(&mut out, row.path.len(), i),
            None => push_all_depths(&mut out, 0, rows.len()),
        }
    }
    out
}

/// The row rendered just above flattened slot `index`.
fn row_before_slot<N>(rows: &[Row<N>], index: usize) -> Option<&Row<N>> {
    index.checked_sub(1).and_then(|above| rows.get(above))
}

fn push_all_depths(out: &mut Candidates, max_depth: usize, minimum_tree_index: usize) {
    out.extend((0..=max_depth).rev().map(|depth| PlacementCandidate {
        depth,
        minimum_tree_index,
    }));
}
