#![no_main]

use libfuzzer_sys::fuzz_target;
use sortkit_core::edge::Edge;
use sortkit_core::reorder::{IndexPolicy, Move, plan_move_with, reorder_with};

fuzz_target!(|data: &[u8]| {
    // Header: moved pick, destination pick, flags. Remaining bytes are items,
    // possibly with duplicate keys.
    if data.len() < 3 {
        return;
    }
    let (moved_pick, dest_pick, flags) = (data[0], data[1], data[2]);
    let items: Vec<u8> = data[3..].iter().take(256).copied().collect();

    let edge = if flags & 1 == 0 { Edge::Before } else { Edge::After };
    let policy = if flags & 2 == 0 {
        IndexPolicy::Adjusted
    } else {
        IndexPolicy::Legacy
    };
    // Picks past the end select values that may be missing.
    let pick = |p: u8| items.get(usize::from(p)).copied().unwrap_or(p);
    let (moved, dest) = (pick(moved_pick), pick(dest_pick));
    // Key on the high nibble so distinct items can share a key.
    let key = |x: &u8, _idx: usize| *x >> 4;

    let out = reorder_with(policy, &items, &moved, &dest, edge, key);

    // Post-conditions that must always hold:
    assert_eq!(out.len(), items.len(), "length changed");
    let mut a = items.clone();
    let mut b = out.clone();
    a.sort_unstable();
    b.sort_unstable();
    assert_eq!(a, b, "not a permutation");

    match plan_move_with(policy, &items, &moved, &dest, edge, key) {
        None => assert_eq!(out, items, "no plan but order changed"),
        Some(mv @ Move { from, to }) => {
            assert_ne!(from, to, "planned a no-op move");
            assert!(from < items.len() && to < items.len(), "move out of range");
            let mut applied = items.clone();
            mv.apply(&mut applied);
            assert_eq!(applied, out, "plan disagrees with reorder");
        }
    }
});
