//! Property-based invariant tests for depth resolution and candidate ranking.
//!
//! 1. The resolved depth is deterministic and never exceeds what the row
//!    above allows, even for degenerate block widths and depth limits.
//! 2. With a maximum depth, the dragged subtree always fits under it.
//! 3. Moving further along the row direction never nests shallower.
//! 4. Candidates start with the literal target at every depth down to 0.
//! 5. Scan candidates stay inside the requested window, nearest rows first.

use proptest::prelude::*;
use treesnap_core::host::TreeHost;
use treesnap_core::tree::{TreeData, TreeNode};
use treesnap_dnd::depth::{clamp_to_max_depth, depth_upper_bound};
use treesnap_dnd::{DepthQuery, DragOrigin, RowAbove, RowDirection, build_candidates, resolve_depth};

// ── Strategies ──────────────────────────────────────────────────────────

fn row_above_strategy() -> impl Strategy<Value = Option<RowAbove>> {
    prop::option::of((0usize..8, any::<bool>()).prop_map(|(len, can_have_children)| RowAbove {
        path_len: len + 1,
        can_have_children,
    }))
}

fn origin_strategy() -> impl Strategy<Value = DragOrigin> {
    prop_oneof![
        (1usize..8, prop::option::of(-400.0f64..400.0)).prop_map(
            |(origin_path_len, displacement_x)| DragOrigin::Internal {
                origin_path_len,
                displacement_x,
            }
        ),
        prop::option::of(-100.0f64..600.0)
            .prop_map(|left_shift| DragOrigin::External { left_shift }),
    ]
}

fn direction_strategy() -> impl Strategy<Value = RowDirection> {
    prop_oneof![Just(RowDirection::Ltr), Just(RowDirection::Rtl)]
}

fn query_strategy() -> impl Strategy<Value = DepthQuery> {
    (
        row_above_strategy(),
        1usize..9,
        origin_strategy(),
        4.0f64..64.0,
        direction_strategy(),
        prop::option::of(0usize..8),
        0usize..5,
    )
        .prop_map(
            |(row_above, hovered_path_len, origin, block_width, row_direction, max_depth, subtree_height)| {
                DepthQuery {
                    row_above,
                    hovered_path_len,
                    origin,
                    block_width,
                    row_direction,
                    max_depth,
                    subtree_height,
                }
            },
        )
}

/// A chain of `depth` nested nodes followed by `tail` roots.
fn rows_strategy() -> impl Strategy<Value = TreeData> {
    (0u64..5, 0u64..5).prop_map(|(depth, tail)| {
        let mut chain = None;
        for key in (1..=depth).rev() {
            let node = TreeNode::new(key, format!("n{key}"));
            chain = Some(match chain {
                Some(child) => node.child(child),
                None => node,
            });
        }
        let mut roots: Vec<TreeNode> = chain.into_iter().collect();
        roots.extend((0..tail).map(|i| TreeNode::new(100 + i, format!("r{i}"))));
        TreeData::new(roots)
    })
}

// ═════════════════════════════════════════════════════════════════════════
// Depth resolution
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn resolving_twice_gives_same_depth(query in query_strategy()) {
        prop_assert_eq!(resolve_depth(&query), resolve_depth(&query));
    }

    #[test]
    fn degenerate_widths_and_limits_stay_in_bounds(
        query in query_strategy(),
        block_width in prop_oneof![Just(1e-300), Just(f64::MIN_POSITIVE), 1e-12f64..1.0],
        shift in -1e6f64..1e6,
        origin_path_len in prop_oneof![1usize..8, Just(usize::MAX)],
        max_depth in prop::option::of(prop_oneof![0usize..8, Just(usize::MAX)]),
    ) {
        let internal = DepthQuery {
            origin: DragOrigin::Internal { origin_path_len, displacement_x: Some(shift) },
            block_width,
            max_depth,
            ..query
        };
        let external = DepthQuery {
            origin: DragOrigin::External { left_shift: Some(shift) },
            ..internal
        };
        let upper = depth_upper_bound(query.row_above, query.hovered_path_len);
        prop_assert!(resolve_depth(&internal) <= upper);
        prop_assert!(resolve_depth(&external) <= upper);
        if max_depth == Some(usize::MAX) {
            let unlimited = DepthQuery { max_depth: None, ..external };
            prop_assert_eq!(resolve_depth(&external), resolve_depth(&unlimited));
        }
    }

    #[test]
    fn depth_never_exceeds_row_above(query in query_strategy()) {
        let unclamped = DepthQuery { max_depth: None, ..query };
        let depth = resolve_depth(&unclamped);
        prop_assert!(depth <= depth_upper_bound(query.row_above, query.hovered_path_len));
        prop_assert_eq!(depth, resolve_depth(&unclamped));
    }

    #[test]
    fn max_depth_leaves_room_for_subtree(query in query_strategy(), max in 0usize..8) {
        let limited = DepthQuery { max_depth: Some(max), ..query };
        let depth = resolve_depth(&limited);
        let limit = (max as i64 - query.subtree_height as i64 - 1).max(0) as usize;
        prop_assert!(depth <= limit);
        let unclamped_depth = resolve_depth(&DepthQuery { max_depth: None, ..query });
        prop_assert!(depth <= unclamped_depth);
    }

    #[test]
    fn clamping_is_idempotent(raw in 0usize..16, max in prop::option::of(0usize..8), height in 0usize..5) {
        let once = clamp_to_max_depth(raw, max, height);
        prop_assert_eq!(clamp_to_max_depth(once, max, height), once);
        prop_assert!(once <= raw);
    }

    #[test]
    fn moving_along_row_direction_never_nests_shallower(
        query in query_strategy(),
        origin_path_len in 1usize..8,
        start in -200.0f64..200.0,
        extra in 0.0f64..200.0,
    ) {
        let along = |dx: f64| DepthQuery {
            origin: DragOrigin::Internal {
                origin_path_len,
                displacement_x: Some(dx * query.row_direction.sign()),
            },
            ..query
        };
        prop_assert!(resolve_depth(&along(start)) <= resolve_depth(&along(start + extra)));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// Candidates
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn candidates_start_with_literal_target(
        tree in rows_strategy(),
        depth in 0usize..6,
        index_seed in any::<prop::sample::Index>(),
        before in 0usize..4,
        after in 0usize..4,
    ) {
        let rows = tree.rows();
        let target_index = index_seed.index(rows.len() + 1);
        let candidates = build_candidates(depth, target_index, rows, before, after);

        prop_assert!(candidates.len() > depth);
        for (offset, candidate) in candidates.iter().take(depth + 1).enumerate() {
            prop_assert_eq!(candidate.depth, depth - offset);
            prop_assert_eq!(candidate.minimum_tree_index, target_index);
        }
    }

    #[test]
    fn scan_candidates_stay_in_window(
        tree in rows_strategy(),
        depth in 0usize..6,
        index_seed in any::<prop::sample::Index>(),
        before in 0usize..4,
        after in 0usize..4,
    ) {
        let rows = tree.rows();
        let target_index = index_seed.index(rows.len() + 1);
        let candidates = build_candidates(depth, target_index, rows, before, after);
        let scanned = &candidates[depth + 1..];

        let lowest = target_index.saturating_sub(before);
        let highest = (target_index + after).min(rows.len());
        let mut seen_after = false;
        let mut last_before = target_index;
        for candidate in scanned {
            let index = candidate.minimum_tree_index;
            prop_assert!(index != target_index);
            prop_assert!(index >= lowest && index <= highest);
            if index < target_index {
                // Rows above come first, nearest first.
                prop_assert!(!seen_after);
                prop_assert!(index <= last_before);
                last_before = index;
            } else {
                seen_after = true;
            }
            // One past the depth of the row above the slot.
            let bound = index.checked_sub(1).map_or(0, |above| rows[above].path.len());
            prop_assert!(candidate.depth <= bound);
        }
    }
}
