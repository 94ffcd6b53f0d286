#![forbid(unsafe_code)]

//! Key extraction for sortable sequences.
//!
//! A key extractor is any `Fn(&T, usize) -> K`. Keys identify items
//! independently of their value, which lets a drop target carry a synthetic
//! copy of the destination item and still be resolved against the live list.
//!
//! Destination payloads have no meaningful position, so they are always keyed
//! at index 0. Extractors that depend on the index therefore only work when
//! the destination item is the first element; prefer extractors that read an
//! id from the item itself.

use std::fmt::Debug;
use std::hash::Hash;

use ahash::AHashMap;

use crate::error::KeyError;

/// Index of the first item whose key equals `target`'s key (keyed at index 0).
pub fn position_by_key<T, K, F>(items: &[T], target: &T, key: F) -> Option<usize>
where
    F: Fn(&T, usize) -> K,
    K: PartialEq,
{
    let wanted = key(target, 0);
    items
        .iter()
        .enumerate()
        .position(|(idx, item)| key(item, idx) == wanted)
}

/// Keys for every item, in order.
pub fn keys<T, K, F>(items: &[T], key: F) -> Vec<K>
where
    F: Fn(&T, usize) -> K,
{
    items
        .iter()
        .enumerate()
        .map(|(idx, item)| key(item, idx))
        .collect()
}

/// Verify that no two items share a key.
///
/// Reports the first collision found scanning front to back.
pub fn ensure_unique<T, K, F>(items: &[T], key: F) -> Result<(), KeyError>
where
    F: Fn(&T, usize) -> K,
    K: Eq + Hash + Debug,
{
    let mut seen: AHashMap<K, usize> = AHashMap::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        let k = key(item, idx);
        if let Some(&first) = seen.get(&k) {
            return Err(KeyError::Duplicate {
                key: format!("{k:?}"),
                first,
                second: idx,
            });
        }
        seen.insert(k, idx);
    }
    Ok(())
}
