#![forbid(unsafe_code)]

//! Drop payload envelope.
//!
//! Drop targets describe themselves with the item they represent plus the
//! edge nearest the pointer. [`DropPayload`] pairs the two explicitly so the
//! domain item never has to carry drag metadata itself.

use crate::edge::Edge;

/// A domain item together with drag-specific metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DropPayload<T> {
    /// The item the drop target represents.
    pub item: T,
    /// Closest edge reported by the target, if it reported one.
    pub edge: Option<Edge>,
}

impl<T> DropPayload<T> {
    /// Payload with no edge hint.
    #[must_use]
    pub const fn new(item: T) -> Self {
        Self { item, edge: None }
    }

    /// Payload with an explicit edge hint.
    #[must_use]
    pub const fn with_edge(item: T, edge: Edge) -> Self {
        Self {
            item,
            edge: Some(edge),
        }
    }

    /// Payload whose edge is the one closest to `offset` within an item of
    /// `extent` cells.
    #[must_use]
    pub const fn closest_to(item: T, offset: u16, extent: u16) -> Self {
        Self::with_edge(item, Edge::closest(offset, extent))
    }

    /// The edge hint, falling back to `default` when none was reported.
    #[must_use]
    pub fn edge_or(&self, default: Edge) -> Edge {
        self.edge.unwrap_or(default)
    }

    /// The edge hint, falling back to [`Edge::default`] (`After`).
    #[must_use]
    pub fn resolved_edge(&self) -> Edge {
        self.edge_or(Edge::default())
    }

    /// Split into item and edge.
    #[must_use]
    pub fn into_parts(self) -> (T, Option<Edge>) {
        (self.item, self.edge)
    }

    /// Transform the item, keeping the edge.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> DropPayload<U> {
        DropPayload {
            item: f(self.item),
            edge: self.edge,
        }
    }
}

impl<T> From<T> for DropPayload<T> {
    fn from(item: T) -> Self {
        Self::new(item)
    }
}
