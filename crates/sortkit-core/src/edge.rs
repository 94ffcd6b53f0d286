#![forbid(unsafe_code)]

//! Edge hints: which side of a drop target the dragged item lands on.
//!
//! A drop target reports the edge closest to the pointer. Vertical lists
//! speak in `top`/`bottom`, horizontal lists in `left`/`right`; both collapse
//! to [`Edge::Before`] and [`Edge::After`] here because the reorder engine
//! only cares about sequence order.
//!
//! # Defaults
//!
//! A payload without an edge is treated as [`Edge::After`] (a "bottom" drop).

use std::fmt;
use std::str::FromStr;

use crate::error::ParseEdgeError;

// ---------------------------------------------------------------------------
// Axis
// ---------------------------------------------------------------------------

/// Layout direction of a sortable list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum Axis {
    /// Items stacked top to bottom.
    #[default]
    Vertical,
    /// Items laid out left to right.
    Horizontal,
}

impl Axis {
    /// Edge names used by drop targets on this axis, as `(before, after)`.
    #[must_use]
    pub const fn edge_names(self) -> (&'static str, &'static str) {
        match self {
            Self::Vertical => ("top", "bottom"),
            Self::Horizontal => ("left", "right"),
        }
    }
}

// ---------------------------------------------------------------------------
// Edge
// ---------------------------------------------------------------------------

/// Side of the destination item the moved item should land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum Edge {
    /// Immediately before the destination (`top` / `left`).
    Before,
    /// Immediately after the destination (`bottom` / `right`).
    #[default]
    After,
}

impl Edge {
    /// Returns the opposite edge.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Before => Self::After,
            Self::After => Self::Before,
        }
    }

    /// Offset added to the destination index when inserting.
    #[must_use]
    pub const fn insertion_offset(self) -> usize {
        match self {
            Self::Before => 0,
            Self::After => 1,
        }
    }

    /// Edge closest to `offset` within an item spanning `extent` cells.
    ///
    /// The first half of the item (rounded down) maps to `Before`, the rest
    /// to `After`. Offsets past the end clamp to `After`. Items narrower than
    /// two cells have no meaningful halves and report `After`; callers that
    /// know the direction of travel should resolve those themselves.
    #[must_use]
    pub const fn closest(offset: u16, extent: u16) -> Self {
        if extent == 0 {
            return Self::After;
        }
        if offset < extent / 2 {
            Self::Before
        } else {
            Self::After
        }
    }

    /// Edge name as reported by a drop target on `axis`.
    #[must_use]
    pub const fn name_on(self, axis: Axis) -> &'static str {
        let (before, after) = axis.edge_names();
        match self {
            Self::Before => before,
            Self::After => after,
        }
    }

    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Edge {
    type Err = ParseEdgeError;

    /// Accepts the canonical names plus the per-axis names drop targets
    /// report, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "before" | "top" | "left" => Ok(Self::Before),
            "after" | "bottom" | "right" => Ok(Self::After),
            _ => Err(ParseEdgeError::new(s)),
        }
    }
}
