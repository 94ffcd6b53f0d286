#![forbid(unsafe_code)]

//! Completed drop events.

use sortkit_core::edge::Edge;
use sortkit_core::payload::DropPayload;

/// A drag gesture that ended over zero or more drop targets.
///
/// `targets` is ordered innermost first; the destination of a sortable list
/// is the innermost target.
#[derive(Debug, Clone, PartialEq)]
pub struct DropEvent<T> {
    /// The dragged item.
    pub source: T,
    /// Drop targets under the pointer, innermost first.
    pub targets: Vec<DropPayload<T>>,
}

impl<T> DropEvent<T> {
    /// Drop onto a single target.
    #[must_use]
    pub fn new(source: T, destination: DropPayload<T>) -> Self {
        Self {
            source,
            targets: vec![destination],
        }
    }

    /// Drop onto `destination` on the given edge.
    #[must_use]
    pub fn onto(source: T, destination: T, edge: Edge) -> Self {
        Self::new(source, DropPayload::with_edge(destination, edge))
    }

    /// Drop that landed outside every target.
    #[must_use]
    pub fn outside(source: T) -> Self {
        Self {
            source,
            targets: Vec::new(),
        }
    }

    /// The innermost drop target, if any.
    #[must_use]
    pub fn destination(&self) -> Option<&DropPayload<T>> {
        self.targets.first()
    }
}
