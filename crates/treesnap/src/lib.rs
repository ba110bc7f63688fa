#![forbid(unsafe_code)]

//! treesnap public facade crate.
//!
//! Re-exports the placement engine ([`treesnap_dnd`]) together with the host
//! contracts and reference tree model ([`treesnap_core`]), plus a prelude.
//!
//! ```
//! use std::sync::Arc;
//! use treesnap::prelude::*;
//!
//! struct Owner(Vec<HoverPlacement<Arc<TreeNode>>>);
//!
//! impl TreeOwner<Arc<TreeNode>> for Owner {
//!     fn on_drag_hover(&mut self, placement: HoverPlacement<Arc<TreeNode>>) {
//!         self.0.push(placement);
//!     }
//!     fn on_drop(&mut self, _result: &DropResult<Arc<TreeNode>>) {}
//! }
//!
//! let tree = TreeData::new(vec![
//!     TreeNode::new(1, "docs").child(TreeNode::new(2, "a.md")),
//! ]);
//! let mut owner = Owner(Vec::new());
//! let mut session = DragSession::new(TreeId(1), DndConfig::default().with_accepted_type("*"))?;
//!
//! let node = Arc::new(TreeNode::new(3, "b.md"));
//! session.begin(DragPayload::external(node, TreeId(2), "file"), &mut owner);
//!
//! let target = DropTargetContext::at(tree.rows(), 1)
//!     .expect("row exists")
//!     .with_bounds(Rect::new(0.0, 20.0, 300.0, 20.0));
//! let pointer = PointerState::at(Point::new(10.0, 35.0));
//! session.hover(&tree, &target, &pointer, None);
//! session.flush_frame(&mut owner);
//!
//! assert_eq!(owner.0[0].minimum_tree_index, 2);
//! # Ok::<(), treesnap::Error>(())
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use treesnap_core::frame::{FrameCoalescer, FrameHandle, FrameStats};
pub use treesnap_core::geometry::{Point, Rect, VerticalHalf};
pub use treesnap_core::host::{
    DropContext, DropValidator, InsertionError, InsertionRequest, Row, SimulatedInsertion,
    SnapshotId, TreeHost,
};
pub use treesnap_core::tree::{Children, NodeKey, TreeData, TreeNode, TreePath};

#[cfg(feature = "tracing-json")]
pub use treesnap_core::logging::init_json_subscriber;

// --- Engine re-exports -----------------------------------------------------

pub use treesnap_dnd::{
    CacheStats, DndConfig, DndConfigError, DragEffect, DragNoopReason, DragPayload, DragPhase,
    DragSession, DragSessionError, DragTransition, DropResult, DropTargetContext,
    HoverPlacement, HoverSkipReason, PlacementCandidate, PointerState, ResolvedPlacement,
    RowDirection, TreeId, TreeOwner,
};

pub use treesnap_core as core;
pub use treesnap_dnd as dnd;

// --- Errors ---------------------------------------------------------------

/// Top-level error type for treesnap hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A session could not be created.
    Session(DragSessionError),
    /// Applying a drop to the reference tree failed.
    Insertion(InsertionError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Session(err) => write!(f, "{err}"),
            Self::Insertion(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Session(err) => Some(err),
            Self::Insertion(err) => Some(err),
        }
    }
}

impl From<DragSessionError> for Error {
    fn from(err: DragSessionError) -> Self {
        Self::Session(err)
    }
}

impl From<InsertionError> for Error {
    fn from(err: InsertionError) -> Self {
        Self::Insertion(err)
    }
}

/// Standard result type for treesnap APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        DndConfig, DragPayload, DragPhase, DragSession, DropContext, DropResult,
        DropTargetContext, DropValidator, Error, HoverPlacement, NodeKey, Point, PointerState,
        Rect, Result, Row, TreeData, TreeHost, TreeId, TreeNode, TreeOwner, TreePath,
    };
}
