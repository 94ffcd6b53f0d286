#![forbid(unsafe_code)]

//! Core: the list reorder engine and the types it speaks.
//!
//! # Role in SortKit
//! `sortkit-core` is the pure layer. It turns a `(sequence, moved,
//! destination, edge, key)` tuple into a new sequence and holds no state
//! between calls. Drag tracking and event fan-out live in `sortkit-dnd`.
//!
//! # Primary responsibilities
//! - **reorder**: plan and apply a single relocation, with a configurable
//!   [`IndexPolicy`](reorder::IndexPolicy).
//! - **edge**: `Before`/`After` hints and closest-edge detection.
//! - **key**: key lookup and uniqueness checks.
//! - **payload**: the [`DropPayload`](payload::DropPayload) envelope.
//! - **config**: [`SortableConfig`](config::SortableConfig), optionally loaded
//!   from TOML/JSON.

pub mod config;
pub mod edge;
pub mod error;
pub mod key;
pub mod logging;
pub mod payload;
pub mod reorder;

pub use config::SortableConfig;
pub use edge::{Axis, Edge};
pub use error::{ConfigError, KeyError, ParseEdgeError};
pub use payload::DropPayload;
pub use reorder::{IndexPolicy, Move, Reorderer, plan_move, reorder, reorder_in_place, reorder_with};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
