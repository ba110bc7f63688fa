#![forbid(unsafe_code)]

//! Drag lifecycle state machine.
//!
//! ```text
//! Idle -> Dragging -> Hovering* -> Dropped ---end---> Idle
//!              \           \-----> Cancelled --end--> Idle
//!               \----------------> Cancelled
//! ```
//!
//! A [`DragSession`] owns everything that lives for exactly one gesture: the
//! payload, the last auto-snap result, the last hover pointer offset, the
//! pending frame update, and the insertion memo. Tree data, validator and
//! owner are passed into each call; the session never stores them.
//!
//! Every lifecycle step returns a [`DragTransition`]. Misuse (hovering while
//! idle, beginning twice) is not an error but an explicit `Noop` effect with
//! a reason, so hosts can log transitions without special-casing.

use std::fmt;

use serde::{Deserialize, Serialize};
use treesnap_core::frame::{FrameCoalescer, FrameHandle, FrameStats};
use treesnap_core::geometry::Point;
use treesnap_core::host::{DropContext, DropValidator, TreeHost};
use treesnap_core::tree::{NodeKey, TreePath};

use crate::auto_snap::{ResolvedPlacement, approves, auto_snap, simulate_candidate};
use crate::candidates::{PlacementCandidate, build_candidates};
use crate::config::{DndConfig, DndConfigError};
use crate::depth::{DepthQuery, DragOrigin, RowAbove, resolve_depth};
use crate::insertion_cache::{CacheStats, InsertionCache};
use crate::owner::{DropResult, HoverPlacement, TreeOwner};
use crate::payload::{DragPayload, DropTargetContext, PointerState, TreeId};

/// Lifecycle phase of a drag session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragPhase {
    #[default]
    Idle,
    /// Drag began, no hover computed yet.
    Dragging,
    /// At least one hover placement was scheduled.
    Hovering,
    /// Dropped onto this tree; waiting for the drag to end.
    Dropped,
    /// Cancelled; the owner has already been told.
    Cancelled,
}

impl DragPhase {
    /// Whether hover, can-drop and drop events are processed.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Dragging | Self::Hovering)
    }
}

/// Why a lifecycle event was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragNoopReason {
    IdleWithoutActiveDrag,
    DragAlreadyInProgress,
    TypeNotAccepted,
}

/// Why a hover did not schedule a new placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoverSkipReason {
    /// The event source reported no (finite) pointer position.
    MissingPointer,
    /// Same row and depth, pointer moved no more than the hover epsilon.
    PointerSettled,
    /// Hovering the dragged node itself at its own depth.
    OwnPosition,
}

/// Effect emitted by one lifecycle step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum DragEffect {
    Began {
        external: bool,
        origin_tree_index: Option<usize>,
    },
    HoverScheduled {
        handle: FrameHandle,
        depth: usize,
        minimum_tree_index: usize,
        snapped: bool,
    },
    HoverSkipped {
        reason: HoverSkipReason,
    },
    Dropped {
        depth: usize,
        minimum_tree_index: usize,
        snapped: bool,
    },
    Ended {
        dropped: bool,
    },
    Cancelled {
        pending_frame_cancelled: bool,
    },
    Noop {
        reason: DragNoopReason,
    },
}

/// One state-machine transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragTransition {
    pub transition_id: u64,
    pub from: DragPhase,
    pub to: DragPhase,
    pub effect: DragEffect,
}

/// Errors constructing a [`DragSession`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragSessionError {
    InvalidConfig(Vec<DndConfigError>),
}

impl fmt::Display for DragSessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig(errors) => {
                write!(f, "invalid drag-and-drop config")?;
                for (i, err) in errors.iter().enumerate() {
                    let sep = if i == 0 { ": " } else { "; " };
                    write!(f, "{sep}{err}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for DragSessionError {}

/// Per-tree drag session.
#[derive(Debug, Clone)]
pub struct DragSession<N> {
    tree_id: TreeId,
    config: DndConfig,
    phase: DragPhase,
    payload: Option<DragPayload<N>>,
    last_placement: Option<ResolvedPlacement>,
    last_can_drop: bool,
    last_hover_offset: Option<Point>,
    last_hover_target: Option<(NodeKey, usize)>,
    frames: FrameCoalescer<HoverPlacement<N>>,
    cache: InsertionCache<N>,
    drop_result: Option<DropResult<N>>,
    transition_counter: u64,
}

impl<N: Clone> DragSession<N> {
    /// Create an idle session for tree `tree_id`.
    pub fn new(tree_id: TreeId, config: DndConfig) -> Result<Self, DragSessionError> {
        config.validate().map_err(DragSessionError::InvalidConfig)?;
        let cache = InsertionCache::new(config.memo_capacity);
        Ok(Self {
            tree_id,
            config,
            phase: DragPhase::Idle,
            payload: None,
            last_placement: None,
            last_can_drop: false,
            last_hover_offset: None,
            last_hover_target: None,
            frames: FrameCoalescer::new(),
            cache,
            drop_result: None,
            transition_counter: 0,
        })
    }

    #[must_use]
    pub const fn phase(&self) -> DragPhase {
        self.phase
    }

    #[must_use]
    pub const fn tree_id(&self) -> TreeId {
        self.tree_id
    }

    #[must_use]
    pub fn config(&self) -> &DndConfig {
        &self.config
    }

    /// Payload of the drag in progress.
    #[must_use]
    pub fn payload(&self) -> Option<&DragPayload<N>> {
        self.payload.as_ref()
    }

    /// Last placement found by auto-snap in this gesture.
    #[must_use]
    pub fn last_placement(&self) -> Option<&ResolvedPlacement> {
        self.last_placement.as_ref()
    }

    /// Result of the most recent [`can_drop`](Self::can_drop).
    #[must_use]
    pub const fn last_can_drop(&self) -> bool {
        self.last_can_drop
    }

    /// Drop result of this gesture, until the drag ends.
    #[must_use]
    pub fn drop_result(&self) -> Option<&DropResult<N>> {
        self.drop_result.as_ref()
    }

    /// Handle of the hover update waiting for the next frame.
    #[must_use]
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.frames.pending_handle()
    }

    #[must_use]
    pub fn frame_stats(&self) -> FrameStats {
        self.frames.stats()
    }

    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Start a drag with `payload`.
    pub fn begin<O>(&mut self, payload: DragPayload<N>, owner: &mut O) -> DragTransition
    where
        O: TreeOwner<N> + ?Sized,
    {
        let from = self.phase;
        if matches!(
            from,
            DragPhase::Dragging | DragPhase::Hovering | DragPhase::Dropped
        ) {
            return self.record(
                from,
                DragEffect::Noop {
                    reason: DragNoopReason::DragAlreadyInProgress,
                },
            );
        }

        self.frames.cancel();
        self.reset_gesture();
        self.drop_result = None;
        owner.on_drag_begin(&payload);
        let effect = DragEffect::Began {
            external: payload.tree_id != self.tree_id,
            origin_tree_index: payload.tree_index,
        };
        self.payload = Some(payload);
        self.phase = DragPhase::Dragging;
        self.record(from, effect)
    }

    /// Process one hover over `target` and schedule the resulting placement
    /// for the next frame.
    pub fn hover<H>(
        &mut self,
        host: &H,
        target: &DropTargetContext<'_, N>,
        pointer: &PointerState,
        validator: Option<&dyn DropValidator<N>>,
    ) -> DragTransition
    where
        H: TreeHost<Node = N> + ?Sized,
    {
        let from = self.phase;
        let _span =
            treesnap_core::debug_span!("dnd_hover", row = target.row.tree_index).entered();
        let effect = self.hover_effect(host, target, pointer, validator);
        self.record(from, effect)
    }

    fn hover_effect<H>(
        &mut self,
        host: &H,
        target: &DropTargetContext<'_, N>,
        pointer: &PointerState,
        validator: Option<&dyn DropValidator<N>>,
    ) -> DragEffect
    where
        H: TreeHost<Node = N> + ?Sized,
    {
        if let Err(reason) = self.check_active() {
            return DragEffect::Noop { reason };
        }
        let Some(payload) = self.payload.as_ref() else {
            return DragEffect::Noop {
                reason: DragNoopReason::IdleWithoutActiveDrag,
            };
        };
        let Some(client) = pointer.client_offset.filter(|p| p.is_finite()) else {
            return DragEffect::HoverSkipped {
                reason: HoverSkipReason::MissingPointer,
            };
        };

        let depth = target_depth(&self.config, self.tree_id, host, payload, target, pointer);
        let hovered = host.node_key(&target.row.node);
        let own_position =
            hovered == host.node_key(&payload.node) && depth == target.row.depth();
        let settled = self.last_hover_target == Some((hovered, depth))
            && self
                .last_hover_offset
                .is_some_and(|last| !client.moved_beyond(last, self.config.hover_epsilon));
        self.last_hover_offset = Some(client);
        self.last_hover_target = Some((hovered, depth));
        if own_position {
            return DragEffect::HoverSkipped {
                reason: HoverSkipReason::OwnPosition,
            };
        }
        if settled {
            return DragEffect::HoverSkipped {
                reason: HoverSkipReason::PointerSettled,
            };
        }

        let target_index = target.target_index(Some(client));
        if self.config.auto_snap_enabled
            && let Some(validator) = validator
        {
            let candidates = build_candidates(
                depth,
                target_index,
                host.rows(),
                self.config.auto_snap_rows_before,
                self.config.auto_snap_rows_after,
            );
            self.last_placement = auto_snap(host, &candidates, payload, validator, &mut self.cache);
        }

        let (depth, minimum_tree_index, snapped_parent) = match &self.last_placement {
            Some(placement) => (
                placement.insertion_depth(),
                placement.target_index,
                Some(placement.path.clone()),
            ),
            None => (depth, target_index, None),
        };
        let snapped = snapped_parent.is_some();
        let handle = self.frames.schedule(HoverPlacement {
            node: payload.node.clone(),
            prev_path: payload.path.clone(),
            snapped_parent,
            minimum_tree_index,
            depth,
        });
        self.phase = DragPhase::Hovering;
        DragEffect::HoverScheduled {
            handle,
            depth,
            minimum_tree_index,
            snapped,
        }
    }

    /// Whether dropping on `target` right now would be accepted.
    ///
    /// With auto-snap enabled this also refreshes the remembered placement
    /// that [`drop`](Self::drop) will use.
    pub fn can_drop<H>(
        &mut self,
        host: &H,
        target: &DropTargetContext<'_, N>,
        pointer: &PointerState,
        validator: Option<&dyn DropValidator<N>>,
    ) -> bool
    where
        H: TreeHost<Node = N> + ?Sized,
    {
        let result = self.evaluate_can_drop(host, target, pointer, validator);
        self.last_can_drop = result;
        result
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn evaluate_can_drop<H>(
        &mut self,
        host: &H,
        target: &DropTargetContext<'_, N>,
        pointer: &PointerState,
        validator: Option<&dyn DropValidator<N>>,
    ) -> bool
    where
        H: TreeHost<Node = N> + ?Sized,
    {
        if !target.is_over || self.check_active().is_err() {
            return false;
        }
        let Some(payload) = self.payload.as_ref() else {
            return false;
        };

        let depth = target_depth(&self.config, self.tree_id, host, payload, target, pointer);
        // Nothing can be nested into children the host computes on demand.
        if let Some(above) = target.prev_row
            && depth >= above.path.len()
            && host.has_functional_children(&above.node)
        {
            treesnap_core::debug!(depth, "drop refused: row above has functional children");
            return false;
        }

        let target_index = target.row.tree_index;
        if self.config.auto_snap_enabled {
            let candidates = build_candidates(
                depth,
                target_index,
                host.rows(),
                self.config.auto_snap_rows_before,
                self.config.auto_snap_rows_after,
            );
            let accept_all = |_: &DropContext<'_, N>| true;
            let validator: &dyn DropValidator<N> = validator.unwrap_or(&accept_all);
            self.last_placement = auto_snap(host, &candidates, payload, validator, &mut self.cache);
            return self.last_placement.is_some();
        }

        let Some(validator) = validator else {
            return true;
        };
        let candidate = PlacementCandidate::new(depth, target_index);
        match simulate_candidate(host, payload, candidate, &mut self.cache) {
            Ok(sim) => approves(validator, payload, &sim),
            Err(err) => {
                treesnap_core::debug!(error = %err, "drop refused: insertion cannot be simulated");
                false
            }
        }
    }

    /// Drop onto `target`, emitting the final placement to `owner`.
    pub fn drop<H, O>(
        &mut self,
        host: &H,
        target: &DropTargetContext<'_, N>,
        pointer: &PointerState,
        owner: &mut O,
    ) -> DragTransition
    where
        H: TreeHost<Node = N> + ?Sized,
        O: TreeOwner<N> + ?Sized,
    {
        let from = self.phase;
        if let Err(reason) = self.check_active() {
            return self.record(from, DragEffect::Noop { reason });
        }
        let Some(payload) = self.payload.as_ref() else {
            return self.record(
                from,
                DragEffect::Noop {
                    reason: DragNoopReason::IdleWithoutActiveDrag,
                },
            );
        };

        let (depth, minimum_tree_index, snapped_parent) = match &self.last_placement {
            Some(placement) => (
                placement.insertion_depth(),
                placement.target_index,
                Some(placement.path.clone()),
            ),
            None => (
                target_depth(&self.config, self.tree_id, host, payload, target, pointer),
                target.target_index(pointer.client_offset),
                None,
            ),
        };
        let result = self.drop_result_for(payload, depth, minimum_tree_index, snapped_parent);
        self.finish_drop(from, result, owner)
    }

    /// Drop onto the placeholder an empty tree renders: always root level,
    /// first position.
    pub fn drop_on_placeholder<O>(&mut self, owner: &mut O) -> DragTransition
    where
        O: TreeOwner<N> + ?Sized,
    {
        let from = self.phase;
        if let Err(reason) = self.check_active() {
            return self.record(from, DragEffect::Noop { reason });
        }
        let Some(payload) = self.payload.as_ref() else {
            return self.record(
                from,
                DragEffect::Noop {
                    reason: DragNoopReason::IdleWithoutActiveDrag,
                },
            );
        };
        let result = self.drop_result_for(payload, 0, 0, None);
        self.finish_drop(from, result, owner)
    }

    /// Dispatch the pending hover placement, if any. Call once per frame.
    ///
    /// Returns whether the owner was notified.
    pub fn flush_frame<O>(&mut self, owner: &mut O) -> bool
    where
        O: TreeOwner<N> + ?Sized,
    {
        if !self.phase.is_active() {
            return false;
        }
        match self.frames.take_due() {
            Some(placement) => {
                owner.on_drag_hover(placement);
                true
            }
            None => false,
        }
    }

    /// End the drag. The owner receives the drop result, if there was one.
    pub fn end<O>(&mut self, owner: &mut O) -> DragTransition
    where
        O: TreeOwner<N> + ?Sized,
    {
        let from = self.phase;
        let effect = match from {
            DragPhase::Idle => DragEffect::Noop {
                reason: DragNoopReason::IdleWithoutActiveDrag,
            },
            DragPhase::Cancelled => DragEffect::Ended { dropped: false },
            DragPhase::Dragging | DragPhase::Hovering | DragPhase::Dropped => {
                self.frames.cancel();
                self.reset_gesture();
                let result = self.drop_result.take();
                owner.on_drag_end(result.as_ref());
                DragEffect::Ended {
                    dropped: result.is_some(),
                }
            }
        };
        if !matches!(effect, DragEffect::Noop { .. }) {
            self.phase = DragPhase::Idle;
        }
        self.record(from, effect)
    }

    /// Abort the drag without dropping.
    pub fn cancel<O>(&mut self, owner: &mut O) -> DragTransition
    where
        O: TreeOwner<N> + ?Sized,
    {
        let from = self.phase;
        if let Err(reason) = self.check_active() {
            return self.record(from, DragEffect::Noop { reason });
        }
        let pending_frame_cancelled = self.frames.cancel().is_some();
        self.reset_gesture();
        self.drop_result = None;
        owner.on_drag_end(None);
        self.phase = DragPhase::Cancelled;
        self.record(
            from,
            DragEffect::Cancelled {
                pending_frame_cancelled,
            },
        )
    }

    fn check_active(&self) -> Result<(), DragNoopReason> {
        if !self.phase.is_active() {
            return Err(DragNoopReason::IdleWithoutActiveDrag);
        }
        match &self.payload {
            Some(payload) if payload.matches_type(&self.config.accepted_type) => Ok(()),
            Some(_) => Err(DragNoopReason::TypeNotAccepted),
            None => Err(DragNoopReason::IdleWithoutActiveDrag),
        }
    }

    fn drop_result_for(
        &self,
        payload: &DragPayload<N>,
        depth: usize,
        minimum_tree_index: usize,
        snapped_parent: Option<TreePath>,
    ) -> DropResult<N> {
        DropResult {
            node: payload.node.clone(),
            tree_id: self.tree_id,
            prev_path: payload.path.clone(),
            prev_tree_index: payload.tree_index,
            minimum_tree_index,
            depth,
            snapped_parent,
        }
    }

    fn finish_drop<O>(
        &mut self,
        from: DragPhase,
        result: DropResult<N>,
        owner: &mut O,
    ) -> DragTransition
    where
        O: TreeOwner<N> + ?Sized,
    {
        owner.on_drop(&result);
        let effect = DragEffect::Dropped {
            depth: result.depth,
            minimum_tree_index: result.minimum_tree_index,
            snapped: result.snapped_parent.is_some(),
        };
        self.drop_result = Some(result);
        self.phase = DragPhase::Dropped;
        self.record(from, effect)
    }

    fn reset_gesture(&mut self) {
        self.payload = None;
        self.last_placement = None;
        self.last_can_drop = false;
        self.last_hover_offset = None;
        self.last_hover_target = None;
        self.cache.clear();
    }

    fn record(&mut self, from: DragPhase, effect: DragEffect) -> DragTransition {
        self.transition_counter = self.transition_counter.saturating_add(1);
        let transition = DragTransition {
            transition_id: self.transition_counter,
            from,
            to: self.phase,
            effect,
        };
        treesnap_core::trace!(
            transition_id = transition.transition_id,
            from = ?transition.from,
            to = ?transition.to,
            effect = ?transition.effect,
            "drag transition"
        );
        transition
    }
}

/// Depth the dragged node would nest at when dropped on `target`.
fn target_depth<H>(
    config: &DndConfig,
    tree_id: TreeId,
    host: &H,
    payload: &DragPayload<H::Node>,
    target: &DropTargetContext<'_, H::Node>,
    pointer: &PointerState,
) -> usize
where
    H: TreeHost + ?Sized,
{
    let row_above = target.prev_row.map(|row| RowAbove {
        path_len: row.path.len(),
        can_have_children: host.can_node_have_children(&row.node),
    });
    let origin = DragOrigin::from_pointer(
        payload.tree_id == tree_id,
        payload.origin_depth(),
        pointer,
        target.bounds,
    );
    let subtree_height = match config.max_depth {
        Some(_) => host.measure_depth(&payload.node),
        None => 0,
    };
    resolve_depth(&DepthQuery {
        row_above,
        hovered_path_len: target.row.path.len(),
        origin,
        block_width: config.block_width,
        row_direction: config.row_direction,
        max_depth: config.max_depth,
        subtree_height,
    })
}
