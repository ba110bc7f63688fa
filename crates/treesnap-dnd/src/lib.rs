#![forbid(unsafe_code)]

//! Drag-and-drop placement resolution for flattened trees.
//!
//! Given a hovered row and pointer geometry, the engine answers where a
//! dragged node would land: the depth it would nest at, the flattened index
//! it would be inserted at or after, and (with auto-snap) the nearest
//! placement a caller-supplied validator accepts. [`DragSession`] ties the
//! pieces into a begin / hover / can-drop / drop / end lifecycle with
//! once-per-frame hover notifications.

pub mod auto_snap;
pub mod candidates;
pub mod config;
pub mod depth;
pub mod insertion_cache;
pub mod owner;
pub mod payload;
pub mod session;

pub use auto_snap::{ResolvedPlacement, auto_snap};
pub use candidates::{Candidates, PlacementCandidate, build_candidates};
pub use config::{DndConfig, DndConfigError, DndConfigParse, RowDirection};
pub use depth::{DepthQuery, DragOrigin, RowAbove, resolve_depth};
pub use insertion_cache::{CacheStats, InsertionCache, InsertionKey};
pub use owner::{DropResult, HoverPlacement, TreeOwner};
pub use payload::{DragPayload, DropTargetContext, PointerState, TreeId};
pub use session::{
    DragEffect, DragNoopReason, DragPhase, DragSession, DragSessionError, DragTransition,
    HoverSkipReason,
};
