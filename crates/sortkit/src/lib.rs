#![forbid(unsafe_code)]

//! SortKit public facade crate.
//!
//! Re-exports the reorder engine from `sortkit-core` and the drag-and-drop
//! plumbing from `sortkit-dnd`, plus a prelude for day-to-day usage.
//!
//! ```
//! use sortkit::prelude::*;
//!
//! let ids = vec![1u32, 2, 3, 4];
//! let next = reorder(&ids, &4, &2, Edge::Before, |id, _| *id);
//! assert_eq!(next, [1, 4, 2, 3]);
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use sortkit_core::config::{MAX_DRAG_THRESHOLD, SortableConfig};
pub use sortkit_core::edge::{Axis, Edge};
pub use sortkit_core::error::{ConfigError, KeyError, ParseEdgeError};
pub use sortkit_core::key::{ensure_unique, keys, position_by_key};
pub use sortkit_core::payload::DropPayload;
pub use sortkit_core::reorder::{
    IndexPolicy, Move, Reorderer, plan_move, plan_move_with, reorder, reorder_in_place,
    reorder_with,
};

// --- Drag-and-drop re-exports ----------------------------------------------

pub use sortkit_dnd::event::DropEvent;
pub use sortkit_dnd::monitor::{DropMonitor, ListenerId, MonitorSubscription};
pub use sortkit_dnd::session::{DragController, DragSession, DropIndicator, ReleaseOutcome};
pub use sortkit_dnd::sortable::Sortable;
pub use sortkit_dnd::target::{ListGeometry, ListHit, Position};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for SortKit callers.
#[derive(Debug)]
pub enum Error {
    /// Configuration could not be loaded or failed validation.
    Config(ConfigError),
    /// A sequence violated key uniqueness.
    Key(KeyError),
    /// An edge name could not be parsed.
    Edge(ParseEdgeError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Key(err) => write!(f, "{err}"),
            Self::Edge(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Key(err) => Some(err),
            Self::Edge(err) => Some(err),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<KeyError> for Error {
    fn from(err: KeyError) -> Self {
        Self::Key(err)
    }
}

impl From<ParseEdgeError> for Error {
    fn from(err: ParseEdgeError) -> Self {
        Self::Edge(err)
    }
}

/// Standard result type for SortKit APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        DragController, DropEvent, DropMonitor, DropPayload, Edge, Error, IndexPolicy, ListGeometry,
        Move, Position, Result, Sortable, SortableConfig, reorder,
    };

    pub use crate::{core, dnd};
}

pub use sortkit_core as core;
pub use sortkit_dnd as dnd;
