#![forbid(unsafe_code)]

//! List reorder engine.
//!
//! Relocates one item of a sequence next to a destination item, on the side
//! given by an [`Edge`]. Every other item keeps its relative order.
//!
//! # Resolution
//!
//! - The moved item is located by value (`PartialEq`), first match.
//! - The destination is located by key: the first item whose key equals the
//!   destination's key, with the destination keyed at index 0.
//!
//! # Invariants
//!
//! 1. The output is a permutation of the input; at most one item moves.
//! 2. A moved item that is absent, or a destination key that matches nothing,
//!    leaves the sequence unchanged. Neither is an error.
//! 3. A move onto itself leaves the sequence unchanged.
//! 4. The insertion index is clamped to the post-removal length, so a move
//!    can never grow the sequence or index past its end.
//!
//! # Index policy
//!
//! The destination index is measured in the input sequence but the
//! insertion happens after the moved item was removed. [`IndexPolicy`]
//! decides whether that index is translated into the shortened sequence
//! ([`IndexPolicy::Adjusted`], the default) or used as-is
//! ([`IndexPolicy::Legacy`]). They differ only for forward moves:
//!
//! ```
//! use sortkit_core::edge::Edge;
//! use sortkit_core::reorder::{IndexPolicy, reorder_with};
//!
//! let items = ['a', 'b', 'c'];
//! let key = |c: &char, _: usize| *c;
//! assert_eq!(
//!     reorder_with(IndexPolicy::Adjusted, &items, &'a', &'c', Edge::Before, key),
//!     vec!['b', 'a', 'c'],
//! );
//! assert_eq!(
//!     reorder_with(IndexPolicy::Legacy, &items, &'a', &'c', Edge::Before, key),
//!     vec!['b', 'c', 'a'],
//! );
//! ```

use crate::edge::Edge;
use crate::key::position_by_key;

// ---------------------------------------------------------------------------
// IndexPolicy
// ---------------------------------------------------------------------------

/// How the destination index is mapped onto the post-removal sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum IndexPolicy {
    /// Shift the destination index down by one when the moved item came
    /// before it, so the item lands exactly on the requested edge.
    #[default]
    Adjusted,
    /// Apply the pre-removal destination index unchanged. Forward moves land
    /// one slot further than the edge suggests (then clamp at the end).
    Legacy,
}

impl IndexPolicy {
    /// Final index of the item at `from` when dropped on `edge` of the item
    /// at `dest`, before clamping to the end of the sequence.
    ///
    /// Both indices refer to the sequence before the move.
    #[must_use]
    pub const fn insertion_index(self, from: usize, dest: usize, edge: Edge) -> usize {
        let anchor = match self {
            Self::Adjusted if from < dest => dest - 1,
            Self::Adjusted | Self::Legacy => dest,
        };
        anchor + edge.insertion_offset()
    }

    /// Whether dropping the item at `from` on `edge` of the item at `dest`
    /// changes the order. Both indices must be in range.
    ///
    /// Clamping never turns a move into a no-op: an unclamped index past the
    /// end implies `dest > from`, so the clamped index is still past `from`.
    #[must_use]
    pub const fn moves(self, from: usize, dest: usize, edge: Edge) -> bool {
        from != dest && self.insertion_index(from, dest, edge) != from
    }
}

// ---------------------------------------------------------------------------
// Move
// ---------------------------------------------------------------------------

/// A planned relocation: the item at `from` ends up at `to`.
///
/// Both indices refer to the same sequence length; `to` is the final index
/// of the moved item in the reordered sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: usize,
    pub to: usize,
}

impl Move {
    /// True when the item moves towards the end of the sequence.
    #[must_use]
    pub const fn is_forward(self) -> bool {
        self.to > self.from
    }

    /// Apply the move to `items` in place.
    ///
    /// Out-of-range moves are ignored.
    pub fn apply<T>(self, items: &mut Vec<T>) {
        let len = items.len();
        if self.from >= len || self.to >= len || self.from == self.to {
            return;
        }
        let item = items.remove(self.from);
        items.insert(self.to, item);
    }
}

// ---------------------------------------------------------------------------
// Planning
// ---------------------------------------------------------------------------

/// Plan a move under `policy`.
///
/// Returns `None` when the sequence would not change: moved item absent,
/// destination key unresolved, moved onto itself, or already in place.
pub fn plan_move_with<T, K, F>(
    policy: IndexPolicy,
    items: &[T],
    moved: &T,
    destination: &T,
    edge: Edge,
    key: F,
) -> Option<Move>
where
    T: PartialEq,
    F: Fn(&T, usize) -> K,
    K: PartialEq,
{
    let Some(from) = items.iter().position(|item| item == moved) else {
        #[cfg(feature = "tracing")]
        tracing::trace!(len = items.len(), "reorder: moved item not in sequence");
        return None;
    };
    let Some(dest) = position_by_key(items, destination, key) else {
        #[cfg(feature = "tracing")]
        tracing::trace!(len = items.len(), "reorder: destination key not resolved");
        return None;
    };
    if from == dest {
        return None;
    }

    // Post-removal length is items.len() - 1; inserting at that index appends.
    let to = policy
        .insertion_index(from, dest, edge)
        .min(items.len() - 1);

    if to == from {
        return None;
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(from, to, dest, ?edge, ?policy, "reorder: planned move");

    Some(Move { from, to })
}

/// Plan a move under the default [`IndexPolicy`].
pub fn plan_move<T, K, F>(
    items: &[T],
    moved: &T,
    destination: &T,
    edge: Edge,
    key: F,
) -> Option<Move>
where
    T: PartialEq,
    F: Fn(&T, usize) -> K,
    K: PartialEq,
{
    plan_move_with(IndexPolicy::default(), items, moved, destination, edge, key)
}

// ---------------------------------------------------------------------------
// Reordering
// ---------------------------------------------------------------------------

/// Reorder under `policy`, returning a new sequence.
///
/// `items` is never modified. Unresolvable input yields a copy of `items`.
pub fn reorder_with<T, K, F>(
    policy: IndexPolicy,
    items: &[T],
    moved: &T,
    destination: &T,
    edge: Edge,
    key: F,
) -> Vec<T>
where
    T: Clone + PartialEq,
    F: Fn(&T, usize) -> K,
    K: PartialEq,
{
    let mut out = items.to_vec();
    if let Some(mv) = plan_move_with(policy, items, moved, destination, edge, key) {
        mv.apply(&mut out);
    }
    out
}

/// Reorder under the default [`IndexPolicy`], returning a new sequence.
///
/// ```
/// use sortkit_core::edge::Edge;
/// use sortkit_core::reorder::reorder;
///
/// let items = ["a", "b", "c"];
/// let key = |s: &&str, _: usize| s.to_string();
/// assert_eq!(reorder(&items, &"c", &"a", Edge::After, key), ["a", "c", "b"]);
/// assert_eq!(reorder(&items, &"c", &"a", Edge::Before, key), ["c", "a", "b"]);
/// ```
pub fn reorder<T, K, F>(items: &[T], moved: &T, destination: &T, edge: Edge, key: F) -> Vec<T>
where
    T: Clone + PartialEq,
    F: Fn(&T, usize) -> K,
    K: PartialEq,
{
    reorder_with(IndexPolicy::default(), items, moved, destination, edge, key)
}

/// Reorder a caller-owned vector in place under the default policy.
///
/// Returns the applied move, or `None` if nothing changed.
pub fn reorder_in_place<T, K, F>(
    items: &mut Vec<T>,
    moved: &T,
    destination: &T,
    edge: Edge,
    key: F,
) -> Option<Move>
where
    T: PartialEq,
    F: Fn(&T, usize) -> K,
    K: PartialEq,
{
    Reorderer::default().reorder_in_place(items, moved, destination, edge, key)
}

// ---------------------------------------------------------------------------
// Reorderer
// ---------------------------------------------------------------------------

/// A reorder engine bound to one [`IndexPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reorderer {
    policy: IndexPolicy,
}

impl Reorderer {
    #[must_use]
    pub const fn new(policy: IndexPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub const fn policy(&self) -> IndexPolicy {
        self.policy
    }

    /// See [`plan_move_with`].
    pub fn plan<T, K, F>(
        &self,
        items: &[T],
        moved: &T,
        destination: &T,
        edge: Edge,
        key: F,
    ) -> Option<Move>
    where
        T: PartialEq,
        F: Fn(&T, usize) -> K,
        K: PartialEq,
    {
        plan_move_with(self.policy, items, moved, destination, edge, key)
    }

    /// See [`reorder_with`].
    pub fn reorder<T, K, F>(
        &self,
        items: &[T],
        moved: &T,
        destination: &T,
        edge: Edge,
        key: F,
    ) -> Vec<T>
    where
        T: Clone + PartialEq,
        F: Fn(&T, usize) -> K,
        K: PartialEq,
    {
        reorder_with(self.policy, items, moved, destination, edge, key)
    }

    /// Apply the planned move to `items`, returning it.
    pub fn reorder_in_place<T, K, F>(
        &self,
        items: &mut Vec<T>,
        moved: &T,
        destination: &T,
        edge: Edge,
        key: F,
    ) -> Option<Move>
    where
        T: PartialEq,
        F: Fn(&T, usize) -> K,
        K: PartialEq,
    {
        let mv = self.plan(items, moved, destination, edge, key)?;
        mv.apply(items);
        Some(mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(c: &char, _idx: usize) -> char {
        *c
    }

    fn abc() -> Vec<char> {
        vec!['a', 'b', 'c']
    }

    fn both(f: impl Fn(IndexPolicy)) {
        f(IndexPolicy::Adjusted);
        f(IndexPolicy::Legacy);
    }

    #[test]
    fn backward_after_lands_after_destination() {
        both(|p| {
            assert_eq!(reorder_with(p, &abc(), &'c', &'a', Edge::After, ident), ['a', 'c', 'b']);
        });
    }

    #[test]
    fn backward_before_lands_before_destination() {
        both(|p| {
            assert_eq!(reorder_with(p, &abc(), &'c', &'a', Edge::Before, ident), ['c', 'a', 'b']);
        });
    }

    #[test]
    fn move_past_last_clamps_to_end() {
        both(|p| {
            assert_eq!(reorder_with(p, &abc(), &'a', &'c', Edge::After, ident), ['b', 'c', 'a']);
        });
    }

    #[test]
    fn forward_before_adjusted_lands_before_destination() {
        let out = reorder_with(IndexPolicy::Adjusted, &abc(), &'a', &'c', Edge::Before, ident);
        assert_eq!(out, ['b', 'a', 'c']);
    }

    #[test]
    fn forward_before_legacy_overshoots_by_one() {
        let out = reorder_with(IndexPolicy::Legacy, &abc(), &'a', &'c', Edge::Before, ident);
        assert_eq!(out, ['b', 'c', 'a']);
    }

    #[test]
    fn forward_after_adjacent_adjusted_and_legacy_differ() {
        let items = vec!['a', 'b', 'c', 'd'];
        assert_eq!(
            reorder_with(IndexPolicy::Adjusted, &items, &'a', &'b', Edge::After, ident),
            ['b', 'a', 'c', 'd']
        );
        assert_eq!(
            reorder_with(IndexPolicy::Legacy, &items, &'a', &'b', Edge::After, ident),
            ['b', 'c', 'a', 'd']
        );
    }

    #[test]
    fn move_onto_itself_is_noop() {
        both(|p| {
            for edge in [Edge::Before, Edge::After] {
                for m in abc() {
                    assert_eq!(reorder_with(p, &abc(), &m, &m, edge, ident), abc());
                }
            }
        });
    }

    #[test]
    fn missing_moved_item_is_noop() {
        both(|p| {
            assert_eq!(reorder_with(p, &abc(), &'x', &'a', Edge::After, ident), abc());
        });
    }

    #[test]
    fn missing_destination_key_is_noop() {
        #[derive(Debug, Clone, PartialEq)]
        struct Row {
            id: u32,
        }
        let key = |r: &Row, _: usize| format!("id:{}", r.id);
        let items = vec![Row { id: 1 }, Row { id: 2 }];
        let out = reorder(&items, &Row { id: 1 }, &Row { id: 9 }, Edge::After, key);
        assert_eq!(out, items);
    }

    #[test]
    fn empty_sequence_is_noop() {
        let items: Vec<char> = Vec::new();
        assert!(reorder(&items, &'a', &'a', Edge::After, ident).is_empty());
    }

    #[test]
    fn single_item_is_noop() {
        assert_eq!(reorder(&['a'], &'a', &'a', Edge::After, ident), ['a']);
    }

    #[test]
    fn already_in_place_plans_nothing() {
        // 'a' is already right before 'b'.
        assert_eq!(plan_move(&abc(), &'a', &'b', Edge::Before, ident), None);
        // 'b' is already right after 'a'.
        assert_eq!(plan_move(&abc(), &'b', &'a', Edge::After, ident), None);
    }

    #[test]
    fn plan_reports_final_index() {
        let mv = plan_move(&abc(), &'c', &'a', Edge::Before, ident).unwrap();
        assert_eq!(mv, Move { from: 2, to: 0 });
        assert!(!mv.is_forward());

        let mv = plan_move(&abc(), &'a', &'c', Edge::After, ident).unwrap();
        assert_eq!(mv, Move { from: 0, to: 2 });
        assert!(mv.is_forward());
    }

    #[test]
    fn reorder_does_not_touch_input() {
        let items = abc();
        let out = reorder(&items, &'c', &'a', Edge::Before, ident);
        assert_eq!(items, abc());
        assert_ne!(out, items);
    }

    #[test]
    fn adjusted_reapplication_is_stable() {
        for (m, d) in [('a', 'c'), ('c', 'a'), ('a', 'b'), ('b', 'c')] {
            for edge in [Edge::Before, Edge::After] {
                let once = reorder(&abc(), &m, &d, edge, ident);
                let twice = reorder(&once, &m, &d, edge, ident);
                assert_eq!(once, twice, "m={m} d={d} edge={edge}");
            }
        }
    }

    #[test]
    fn legacy_reapplication_stable_for_backward_after() {
        let p = IndexPolicy::Legacy;
        let once = reorder_with(p, &abc(), &'c', &'a', Edge::After, ident);
        let twice = reorder_with(p, &once, &'c', &'a', Edge::After, ident);
        assert_eq!(once, ['a', 'c', 'b']);
        assert_eq!(twice, once);
    }

    #[test]
    fn legacy_reapplication_drifts_for_backward_before() {
        let p = IndexPolicy::Legacy;
        let once = reorder_with(p, &abc(), &'c', &'a', Edge::Before, ident);
        assert_eq!(once, ['c', 'a', 'b']);
        // Second pass is a forward move from 0 past 'a' at 1.
        let twice = reorder_with(p, &once, &'c', &'a', Edge::Before, ident);
        assert_eq!(twice, ['a', 'c', 'b']);
    }

    #[test]
    fn duplicate_values_move_first_occurrence() {
        let items = vec!['a', 'b', 'a', 'c'];
        let key = |c: &char, idx: usize| (*c, idx);
        // Destination keyed at index 0 → only ('a', 0) matches 'a'.
        let out = reorder(&items, &'c', &'a', Edge::After, key);
        assert_eq!(out, ['a', 'c', 'b', 'a']);
    }

    #[test]
    fn in_place_matches_copying_variant() {
        let mut items = vec!['a', 'b', 'c', 'd', 'e'];
        let expected = reorder(&items, &'b', &'e', Edge::Before, ident);
        let mv = reorder_in_place(&mut items, &'b', &'e', Edge::Before, ident);
        assert_eq!(items, expected);
        assert_eq!(mv, Some(Move { from: 1, to: 3 }));
    }

    #[test]
    fn in_place_noop_returns_none_and_keeps_vec() {
        let mut items = abc();
        assert_eq!(reorder_in_place(&mut items, &'z', &'a', Edge::After, ident), None);
        assert_eq!(items, abc());
    }

    #[test]
    fn reorderer_uses_its_policy() {
        let legacy = Reorderer::new(IndexPolicy::Legacy);
        assert_eq!(legacy.policy(), IndexPolicy::Legacy);
        assert_eq!(legacy.reorder(&abc(), &'a', &'c', Edge::Before, ident), ['b', 'c', 'a']);
        assert_eq!(
            Reorderer::default().reorder(&abc(), &'a', &'c', Edge::Before, ident),
            ['b', 'a', 'c']
        );
    }

    #[test]
    fn move_apply_ignores_out_of_range() {
        let mut items = abc();
        Move { from: 5, to: 0 }.apply(&mut items);
        Move { from: 0, to: 3 }.apply(&mut items);
        assert_eq!(items, abc());
    }

    #[test]
    fn drops_next_to_self_do_not_move() {
        // Source at index 1: after its upper neighbour or before its lower one.
        assert!(!IndexPolicy::Adjusted.moves(1, 0, Edge::After));
        assert!(!IndexPolicy::Adjusted.moves(1, 2, Edge::Before));
        assert!(!IndexPolicy::Adjusted.moves(1, 1, Edge::After));
        assert!(IndexPolicy::Adjusted.moves(1, 0, Edge::Before));
        assert!(IndexPolicy::Adjusted.moves(1, 2, Edge::After));
        // Legacy overshoots forward Before drops, so that one does move.
        assert!(!IndexPolicy::Legacy.moves(1, 0, Edge::After));
        assert!(IndexPolicy::Legacy.moves(1, 2, Edge::Before));
    }

    #[test]
    fn moves_matches_plan() {
        let items = ['a', 'b', 'c', 'd'];
        for policy in [IndexPolicy::Adjusted, IndexPolicy::Legacy] {
            for (from, moved) in items.iter().enumerate() {
                for (dest, destination) in items.iter().enumerate() {
                    for edge in [Edge::Before, Edge::After] {
                        let planned = plan_move_with(policy, &items, moved, destination, edge, ident);
                        assert_eq!(
                            policy.moves(from, dest, edge),
                            planned.is_some(),
                            "{policy:?} {from}->{dest} {edge}"
                        );
                    }
                }
            }
        }
    }
}
