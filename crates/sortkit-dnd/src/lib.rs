#![forbid(unsafe_code)]

//! Drag-and-drop plumbing around the SortKit reorder engine.
//!
//! # Role in SortKit
//! `sortkit-dnd` connects pointer input to `sortkit-core`. A
//! [`DragController`](session::DragController) turns presses and motion into a
//! [`DropEvent`](event::DropEvent), a [`DropMonitor`](monitor::DropMonitor)
//! fans it out, and a [`Sortable`](sortable::Sortable) applies it to the
//! sequence it owns.
//!
//! # Lifecycle
//! Every listener registration is a
//! [`MonitorSubscription`](monitor::MonitorSubscription) handle; dropping it
//! detaches the listener, so a list that goes away can never receive a stale
//! drop.

pub mod event;
pub mod monitor;
pub mod session;
pub mod sortable;
pub mod target;

pub use event::DropEvent;
pub use monitor::{DropMonitor, ListenerId, MonitorSubscription};
pub use session::{DragController, DragSession, DropIndicator, ReleaseOutcome};
pub use sortable::Sortable;
pub use target::{ListGeometry, ListHit, Position};
