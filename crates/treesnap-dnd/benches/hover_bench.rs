//! Benchmarks for the hover hot path.
//!
//! Run with: cargo bench -p treesnap-dnd

use std::hint::black_box;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use treesnap_core::geometry::{Point, Rect};
use treesnap_core::host::{DropContext, DropValidator, TreeHost};
use treesnap_core::tree::{TreeData, TreeNode};
use treesnap_dnd::{
    DndConfig, DragPayload, DragSession, DropResult, DropTargetContext, HoverPlacement,
    InsertionCache, PointerState, TreeId, TreeOwner, auto_snap, build_candidates,
};

const ROW_HEIGHT: f64 = 24.0;

fn tree(roots: u64, children: u64) -> TreeData {
    let mut key = 0u64;
    let mut next = || {
        key += 1;
        key
    };
    let nodes = (0..roots)
        .map(|_| {
            let root = next();
            let kids = (0..children)
                .map(|_| {
                    let k = next();
                    TreeNode::new(k, format!("leaf {k}"))
                })
                .collect();
            TreeNode::new(root, format!("folder {root}")).with_children(kids)
        })
        .collect();
    TreeData::new(nodes)
}

fn dragged() -> DragPayload<Arc<TreeNode>> {
    DragPayload::external(Arc::new(TreeNode::new(u64::MAX, "dragged")), TreeId(2), "node")
}

struct Sink;

impl TreeOwner<Arc<TreeNode>> for Sink {
    fn on_drag_hover(&mut self, placement: HoverPlacement<Arc<TreeNode>>) {
        black_box(placement);
    }

    fn on_drop(&mut self, result: &DropResult<Arc<TreeNode>>) {
        black_box(result);
    }
}

// ============================================================================
// Auto-snap search
// ============================================================================

fn bench_auto_snap(c: &mut Criterion) {
    let mut group = c.benchmark_group("dnd/auto_snap");
    let roots_only = |ctx: &DropContext<'_, Arc<TreeNode>>| ctx.next_parent.is_none();

    for (roots, children) in [(10, 10), (50, 50), (100, 200)] {
        let tree = tree(roots, children);
        let payload = dragged();
        let target_index = tree.rows().len() / 2;
        let candidates = build_candidates(1, target_index, tree.rows(), 3, 3);
        let size = format!("{}rows", tree.rows().len());

        group.bench_with_input(BenchmarkId::new("cold", &size), &(), |b, _| {
            b.iter(|| {
                let mut cache = InsertionCache::new(256);
                black_box(auto_snap(
                    &tree,
                    &candidates,
                    &payload,
                    &roots_only,
                    &mut cache,
                ))
            })
        });

        let mut cache = InsertionCache::new(256);
        group.bench_with_input(BenchmarkId::new("memoized", &size), &(), |b, _| {
            b.iter(|| {
                black_box(auto_snap(
                    &tree,
                    &candidates,
                    &payload,
                    &roots_only,
                    &mut cache,
                ))
            })
        });
    }

    group.finish();
}

// ============================================================================
// Session hover + frame flush
// ============================================================================

fn bench_session_hover(c: &mut Criterion) {
    let mut group = c.benchmark_group("dnd/session_hover");
    let roots_only = |ctx: &DropContext<'_, Arc<TreeNode>>| ctx.next_parent.is_none();
    let validator: &dyn DropValidator<Arc<TreeNode>> = &roots_only;

    for auto_snap_enabled in [false, true] {
        let tree = tree(50, 50);
        let config = DndConfig::default()
            .with_accepted_type("*")
            .with_auto_snap(auto_snap_enabled)
            .with_auto_snap_rows(2, 2);
        let mut session = DragSession::new(TreeId(1), config).expect("valid config");
        let mut owner = Sink;
        session.begin(dragged(), &mut owner);

        let index = tree.rows().len() / 2;
        let top = index as f64 * ROW_HEIGHT;
        let target = DropTargetContext::at(tree.rows(), index)
            .expect("row exists")
            .with_bounds(Rect::new(0.0, top, 400.0, ROW_HEIGHT));
        let upper = PointerState::at(Point::new(10.0, top + 2.0));
        let lower = PointerState::at(Point::new(10.0, top + ROW_HEIGHT - 2.0));
        let label = if auto_snap_enabled { "auto_snap" } else { "literal" };

        group.bench_function(label, |b| {
            let mut flip = false;
            b.iter(|| {
                flip = !flip;
                let pointer = if flip { &upper } else { &lower };
                black_box(session.hover(&tree, &target, pointer, Some(validator)));
                black_box(session.flush_frame(&mut owner));
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_auto_snap, bench_session_hover);

criterion_main!(benches);
