#![forbid(unsafe_code)]

//! List geometry: maps pointer positions onto `(index, edge)` drop targets.
//!
//! Each item occupies `extent` cells along the list's [`Axis`], starting at
//! `origin`. The first half of an item maps to [`Edge::Before`], the second
//! half to [`Edge::After`]. Single-cell items have no halves; during a drag
//! [`ListGeometry::hit_toward`] resolves them by direction of travel.
//!
//! Offsets are summed in `u64`, so any number of `u16` extents fits.

use sortkit_core::edge::{Axis, Edge};

/// A 2D cell position (0-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: u16,
    pub y: u16,
}

impl Position {
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another position.
    #[must_use]
    pub fn manhattan_distance(self, other: Self) -> u32 {
        u32::from(self.x.abs_diff(other.x)) + u32::from(self.y.abs_diff(other.y))
    }

    /// Coordinate along `axis`.
    #[must_use]
    pub const fn along(self, axis: Axis) -> u16 {
        match axis {
            Axis::Vertical => self.y,
            Axis::Horizontal => self.x,
        }
    }
}

impl From<(u16, u16)> for Position {
    fn from((x, y): (u16, u16)) -> Self {
        Self { x, y }
    }
}

/// A resolved drop target within a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListHit {
    pub index: usize,
    pub edge: Edge,
}

/// Item extents of a laid-out list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListGeometry {
    axis: Axis,
    origin: u16,
    extents: Vec<u16>,
}

impl ListGeometry {
    /// Geometry with per-item extents.
    #[must_use]
    pub fn new(axis: Axis, origin: u16, extents: Vec<u16>) -> Self {
        Self {
            axis,
            origin,
            extents,
        }
    }

    /// Geometry of `count` items of equal `extent`.
    #[must_use]
    pub fn uniform(axis: Axis, origin: u16, extent: u16, count: usize) -> Self {
        Self::new(axis, origin, vec![extent; count])
    }

    #[must_use]
    pub const fn axis(&self) -> Axis {
        self.axis
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.extents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extents.is_empty()
    }

    /// Total cells covered by all items.
    #[must_use]
    pub fn total_extent(&self) -> u64 {
        self.extents.iter().map(|&e| u64::from(e)).sum()
    }

    /// Extent of item `index`.
    #[must_use]
    pub fn extent(&self, index: usize) -> Option<u16> {
        self.extents.get(index).copied()
    }

    /// Start offset (absolute) and extent of item `index`.
    #[must_use]
    pub fn span(&self, index: usize) -> Option<(u64, u16)> {
        let extent = *self.extents.get(index)?;
        let start: u64 = self.extents[..index].iter().map(|&e| u64::from(e)).sum();
        Some((u64::from(self.origin) + start, extent))
    }

    /// Resolve an offset along the axis to the item under it.
    ///
    /// Offsets before `origin` or past the last item miss. Zero-extent items
    /// are never hit.
    #[must_use]
    pub fn hit(&self, offset: u16) -> Option<ListHit> {
        let rel = u64::from(offset.checked_sub(self.origin)?);
        let mut start = 0u64;
        for (index, &extent) in self.extents.iter().enumerate() {
            let end = start + u64::from(extent);
            if rel < end {
                // rel - start < extent <= u16::MAX
                let within = (rel - start) as u16;
                return Some(ListHit {
                    index,
                    edge: Edge::closest(within, extent),
                });
            }
            start = end;
        }
        None
    }

    /// Resolve a pointer position using the coordinate along the axis.
    #[must_use]
    pub fn hit_position(&self, pos: Position) -> Option<ListHit> {
        self.hit(pos.along(self.axis))
    }

    /// Like [`hit_position`](Self::hit_position), for a drag that started at
    /// item `source_index`.
    ///
    /// A single-cell item cannot be split into halves, so its edge faces the
    /// source: `Before` when the item lies before the source, `After`
    /// otherwise. Dragging over one-cell rows can then reach either end.
    #[must_use]
    pub fn hit_toward(&self, pos: Position, source_index: usize) -> Option<ListHit> {
        let mut hit = self.hit_position(pos)?;
        if self.extent(hit.index) == Some(1) {
            hit.edge = if hit.index < source_index {
                Edge::Before
            } else {
                Edge::After
            };
        }
        Some(hit)
    }
}
