#![forbid(unsafe_code)]

//! Drag sessions: from press to drop over a sortable list.
//!
//! [`DragSession`] is the bare state machine. [`DragController`] feeds it
//! pointer input through a [`ListGeometry`] and publishes the finished drop
//! on a [`DropMonitor`].
//!
//! # State Machine
//!
//! ```text
//!   Idle ──press──▶ Pressed ──motion ≥ threshold──▶ Dragging ──release──▶ Idle
//!     ▲                │                               │    (drop dispatched)
//!     └────release─────┘                               └──cancel──▶ Idle
//! ```
//!
//! # Invariants
//!
//! 1. A release only produces a drop if a drag actually started.
//! 2. No drop indicator is shown where a drop would leave the order
//!    unchanged: over the dragged item itself or on the edge it already
//!    touches.
//! 3. After `cancel()` the controller is idle and dispatches nothing.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Fallback |
//! |---------|-------|----------|
//! | Press outside the list | No item under pointer | Press ignored |
//! | Release outside the list | No hover target | Drop dispatched with no targets |
//! | Item list shorter than geometry | Stale layout | Hover past the end is ignored |

use sortkit_core::config::SortableConfig;
use sortkit_core::edge::Edge;
use sortkit_core::payload::DropPayload;
use sortkit_core::reorder::IndexPolicy;

use crate::event::DropEvent;
use crate::monitor::DropMonitor;
use crate::target::{ListGeometry, ListHit, Position};

// ---------------------------------------------------------------------------
// DropIndicator
// ---------------------------------------------------------------------------

/// Where the drop line should be drawn: on `edge` of item `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DropIndicator {
    pub index: usize,
    pub edge: Edge,
}

impl From<ListHit> for DropIndicator {
    fn from(hit: ListHit) -> Self {
        Self {
            index: hit.index,
            edge: hit.edge,
        }
    }
}

// ---------------------------------------------------------------------------
// DragSession
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum Phase<T> {
    Idle,
    Dragging {
        source: T,
        source_index: usize,
        over: Option<DropIndicator>,
    },
}

/// State of a single drag over one list.
#[derive(Debug, Clone)]
pub struct DragSession<T> {
    phase: Phase<T>,
    policy: IndexPolicy,
}

impl<T> Default for DragSession<T> {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            policy: IndexPolicy::default(),
        }
    }
}

impl<T> DragSession<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Session whose indicator follows `policy`, matching the list it drags over.
    #[must_use]
    pub fn with_policy(policy: IndexPolicy) -> Self {
        Self {
            phase: Phase::Idle,
            policy,
        }
    }

    #[must_use]
    pub const fn policy(&self) -> IndexPolicy {
        self.policy
    }

    /// Begin dragging `source`, currently displayed at `source_index`.
    ///
    /// Replaces any drag in progress.
    pub fn start(&mut self, source: T, source_index: usize) {
        self.phase = Phase::Dragging {
            source,
            source_index,
            over: None,
        };
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging { .. })
    }

    /// The dragged item, if a drag is active.
    #[must_use]
    pub fn source(&self) -> Option<&T> {
        match &self.phase {
            Phase::Dragging { source, .. } => Some(source),
            Phase::Idle => None,
        }
    }

    /// Display index of the dragged item, if a drag is active.
    #[must_use]
    pub fn source_index(&self) -> Option<usize> {
        match &self.phase {
            Phase::Dragging { source_index, .. } => Some(*source_index),
            Phase::Idle => None,
        }
    }

    /// Pointer is over item `index`, nearest to `edge`. Ignored when idle.
    pub fn hover(&mut self, index: usize, edge: Edge) {
        if let Phase::Dragging { over, .. } = &mut self.phase {
            *over = Some(DropIndicator { index, edge });
        }
    }

    /// Pointer left every item.
    pub fn leave(&mut self) {
        if let Phase::Dragging { over, .. } = &mut self.phase {
            *over = None;
        }
    }

    /// Indicator to draw, hidden wherever dropping would not move the source.
    #[must_use]
    pub fn indicator(&self) -> Option<DropIndicator> {
        match &self.phase {
            Phase::Dragging {
                source_index,
                over: Some(over),
                ..
            } if self.policy.moves(*source_index, over.index, over.edge) => Some(*over),
            _ => None,
        }
    }

    /// End the drag, returning to idle.
    ///
    /// Yields a drop onto the hovered item of `items`, or a drop with no
    /// targets if nothing valid was hovered. `None` if no drag was active.
    pub fn finish(&mut self, items: &[T]) -> Option<DropEvent<T>>
    where
        T: Clone,
    {
        let Phase::Dragging { source, over, .. } = std::mem::replace(&mut self.phase, Phase::Idle)
        else {
            return None;
        };
        let target = over.and_then(|ind| {
            items
                .get(ind.index)
                .map(|item| DropPayload::with_edge(item.clone(), ind.edge))
        });
        Some(match target {
            Some(dest) => DropEvent::new(source, dest),
            None => DropEvent::outside(source),
        })
    }

    /// Abort the drag. Returns whether one was active.
    pub fn cancel(&mut self) -> bool {
        let was = self.is_dragging();
        self.phase = Phase::Idle;
        was
    }
}

// ---------------------------------------------------------------------------
// DragController
// ---------------------------------------------------------------------------

/// Result of releasing the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Nothing was pressed.
    Idle,
    /// Pressed and released without reaching the drag threshold.
    Click { index: usize },
    /// A drag completed and was dispatched to `notified` listeners.
    Dropped { notified: usize, on_target: bool },
}

/// Drives a [`DragSession`] from pointer input over one list.
pub struct DragController<T> {
    geometry: ListGeometry,
    drag_threshold: u16,
    press: Option<(Position, usize)>,
    session: DragSession<T>,
    monitor: DropMonitor<T>,
}

impl<T> std::fmt::Debug for DragController<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragController")
            .field("geometry_len", &self.geometry.len())
            .field("drag_threshold", &self.drag_threshold)
            .field("pressed", &self.press.is_some())
            .field("dragging", &self.session.is_dragging())
            .finish()
    }
}

impl<T: Clone> DragController<T> {
    /// Controller publishing drops on `monitor`, with the default threshold.
    #[must_use]
    pub fn new(geometry: ListGeometry, monitor: DropMonitor<T>) -> Self {
        Self {
            geometry,
            drag_threshold: SortableConfig::default().drag_threshold,
            press: None,
            session: DragSession::new(),
            monitor,
        }
    }

    /// Take the drag threshold and index policy from `config`.
    #[must_use]
    pub fn with_config(mut self, config: &SortableConfig) -> Self {
        self.drag_threshold = config.drag_threshold;
        self.session.policy = config.index_policy;
        self
    }

    /// Replace the layout, e.g. after a resize or a reorder re-render.
    pub fn set_geometry(&mut self, geometry: ListGeometry) {
        self.geometry = geometry;
    }

    #[must_use]
    pub fn geometry(&self) -> &ListGeometry {
        &self.geometry
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_dragging()
    }

    #[must_use]
    pub fn indicator(&self) -> Option<DropIndicator> {
        self.session.indicator()
    }

    /// Pointer pressed at `pos`. Returns the pressed item index, if any.
    pub fn press(&mut self, pos: Position) -> Option<usize> {
        self.session.cancel();
        self.press = self
            .geometry
            .hit_position(pos)
            .map(|hit| (pos, hit.index));
        self.press.map(|(_, index)| index)
    }

    /// Pointer moved to `pos` with the button held.
    ///
    /// Starts the drag once the pointer has travelled `drag_threshold`
    /// cells from the press, then tracks the hovered item.
    pub fn motion(&mut self, pos: Position, items: &[T]) -> Option<DropIndicator> {
        if !self.session.is_dragging() {
            let (start, index) = self.press?;
            if start.manhattan_distance(pos) < u32::from(self.drag_threshold) {
                return None;
            }
            let source = items.get(index)?.clone();
            tracing::debug!(source_index = index, "drag: started");
            self.session.start(source, index);
        }

        self.track(pos, items);
        self.session.indicator()
    }

    /// Pointer released at `pos`; completes a drag and dispatches the drop.
    pub fn release(&mut self, pos: Position, items: &[T]) -> ReleaseOutcome {
        let Some((_, index)) = self.press.take() else {
            return ReleaseOutcome::Idle;
        };
        if !self.session.is_dragging() {
            return ReleaseOutcome::Click { index };
        }

        self.track(pos, items);

        let Some(event) = self.session.finish(items) else {
            return ReleaseOutcome::Idle;
        };
        let on_target = event.destination().is_some();
        let notified = self.monitor.dispatch(&event);
        tracing::debug!(on_target, notified, "drag: dropped");
        ReleaseOutcome::Dropped {
            notified,
            on_target,
        }
    }

    fn track(&mut self, pos: Position, items: &[T]) {
        let Some(source_index) = self.session.source_index() else {
            return;
        };
        match self.geometry.hit_toward(pos, source_index) {
            Some(hit) if hit.index < items.len() => self.session.hover(hit.index, hit.edge),
            _ => self.session.leave(),
        }
    }

    /// Abort any press or drag (e.g. Escape or focus loss).
    pub fn cancel(&mut self) -> bool {
        let pressed = self.press.take().is_some();
        let dragging = self.session.cancel();
        if dragging {
            tracing::debug!("drag: cancelled");
        }
        pressed || dragging
    }
}
