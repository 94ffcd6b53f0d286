#![forbid(unsafe_code)]

//! Sortable list controller.
//!
//! [`Sortable`] holds the latest displayed sequence, the key extractor, and
//! the reorder settings. Each drop event is resolved against the sequence
//! the controller holds at that moment, so back-to-back drops never work
//! from a stale copy.
//!
//! # Change notifications
//!
//! Every reorder that moves an item queues a snapshot of the new sequence,
//! in the order the reorders were applied. One thread at a time drains the
//! queue through the `on_change` callback, without internal locks held. A
//! drop handled while the callback runs (from the callback itself or from
//! another thread) is delivered by that same drain once the callback
//! returns, so the callback never runs concurrently with itself and never
//! misses a reorder.
//!
//! # Usage
//!
//! ```
//! use sortkit_core::edge::Edge;
//! use sortkit_dnd::event::DropEvent;
//! use sortkit_dnd::monitor::DropMonitor;
//! use sortkit_dnd::sortable::Sortable;
//!
//! let monitor = DropMonitor::new();
//! let list = Sortable::new(vec!["todo", "doing", "done"], |s: &&str, _| s.to_string());
//! let subscription = list.attach(&monitor);
//!
//! monitor.dispatch(&DropEvent::onto("done", "todo", Edge::Before));
//! assert_eq!(list.items(), ["done", "todo", "doing"]);
//!
//! drop(subscription);
//! monitor.dispatch(&DropEvent::onto("done", "doing", Edge::After));
//! assert_eq!(list.items(), ["done", "todo", "doing"]);
//! ```

use std::collections::VecDeque;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use sortkit_core::config::SortableConfig;
use sortkit_core::edge::Edge;
use sortkit_core::error::KeyError;
use sortkit_core::key::{ensure_unique, keys};
use sortkit_core::reorder::{IndexPolicy, Move, Reorderer};

use crate::event::DropEvent;
use crate::monitor::{DropMonitor, MonitorSubscription};

type ChangeCallback<T> = Box<dyn FnMut(&[T]) + Send>;

struct State<T> {
    items: Vec<T>,
    reorderer: Reorderer,
    default_edge: Edge,
}

struct Notifier<T> {
    callback: Option<ChangeCallback<T>>,
    /// Snapshots not yet delivered, oldest first.
    pending: VecDeque<Vec<T>>,
    /// A thread is draining `pending`; the callback is checked out.
    draining: bool,
}

impl<T> Notifier<T> {
    fn wants_snapshots(&self) -> bool {
        self.draining || self.callback.is_some()
    }
}

struct Shared<T, F> {
    state: Mutex<State<T>>,
    notifier: Mutex<Notifier<T>>,
    key: F,
}

/// Puts the checked-out callback back, even if it panicked.
struct Drain<'a, T> {
    notifier: &'a Mutex<Notifier<T>>,
    callback: Option<ChangeCallback<T>>,
}

impl<T> Drop for Drain<'_, T> {
    fn drop(&mut self) {
        // Still holding the callback means the drain unwound mid-delivery.
        let Some(callback) = self.callback.take() else {
            return;
        };
        let mut notifier = lock(self.notifier);
        // A callback installed while this one was running wins.
        if notifier.callback.is_none() {
            notifier.callback = Some(callback);
        }
        notifier.draining = false;
    }
}

fn lock<R>(m: &Mutex<R>) -> MutexGuard<'_, R> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A reorderable sequence driven by drop events.
///
/// Cloning yields another handle to the same sequence.
pub struct Sortable<T, F> {
    shared: Arc<Shared<T, F>>,
}

impl<T, F> Clone for Sortable<T, F> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T, F> std::fmt::Debug for Sortable<T, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = lock(&self.shared.state);
        f.debug_struct("Sortable")
            .field("len", &state.items.len())
            .field("policy", &state.reorderer.policy())
            .field("default_edge", &state.default_edge)
            .finish()
    }
}

impl<T, F, K> Sortable<T, F>
where
    T: Clone + PartialEq,
    F: Fn(&T, usize) -> K,
    K: PartialEq,
{
    /// Wrap `items` with the default config.
    #[must_use]
    pub fn new(items: Vec<T>, key: F) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State {
                    items,
                    reorderer: Reorderer::default(),
                    default_edge: Edge::default(),
                }),
                notifier: Mutex::new(Notifier {
                    callback: None,
                    pending: VecDeque::new(),
                    draining: false,
                }),
                key,
            }),
        }
    }

    /// Like [`new`](Self::new), but rejects sequences with duplicate keys.
    pub fn try_new(items: Vec<T>, key: F) -> Result<Self, KeyError>
    where
        K: Eq + Hash + Debug,
    {
        ensure_unique(&items, &key)?;
        Ok(Self::new(items, key))
    }

    /// Apply the index policy and default edge from `config`.
    #[must_use]
    pub fn with_config(self, config: &SortableConfig) -> Self {
        {
            let mut state = lock(&self.shared.state);
            state.reorderer = config.reorderer();
            state.default_edge = config.default_edge;
        }
        self
    }

    /// Set the callback invoked with the new sequence after every effective
    /// reorder. Replaces any previous callback.
    ///
    /// The callback runs without internal locks held, so it may read the
    /// controller or handle further drops. Those drops are reported by
    /// further calls once the current one returns, never by a nested call.
    #[must_use]
    pub fn on_change(self, callback: impl FnMut(&[T]) + Send + 'static) -> Self {
        lock(&self.shared.notifier).callback = Some(Box::new(callback));
        self
    }

    /// Index policy in effect.
    #[must_use]
    pub fn policy(&self) -> IndexPolicy {
        lock(&self.shared.state).reorderer.policy()
    }

    /// Snapshot of the current sequence.
    #[must_use]
    pub fn items(&self) -> Vec<T> {
        lock(&self.shared.state).items.clone()
    }

    /// Replace the sequence, e.g. after the owner refetched it.
    pub fn set_items(&self, items: Vec<T>) {
        lock(&self.shared.state).items = items;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.shared.state).items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys of the current sequence, in display order.
    #[must_use]
    pub fn keys(&self) -> Vec<K> {
        keys(&lock(&self.shared.state).items, &self.shared.key)
    }

    /// Call `f(key, item, index)` for each item in display order.
    ///
    /// The sequence is locked while `f` runs; `f` must not call back into
    /// this controller.
    pub fn render<R>(&self, mut f: impl FnMut(&K, &T, usize) -> R) -> Vec<R> {
        let state = lock(&self.shared.state);
        state
            .items
            .iter()
            .enumerate()
            .map(|(idx, item)| f(&(self.shared.key)(item, idx), item, idx))
            .collect()
    }

    /// Resolve `event` against the current sequence.
    ///
    /// Returns the applied move, or `None` when the event had no
    /// destination or did not change the order.
    pub fn handle_drop(&self, event: &DropEvent<T>) -> Option<Move> {
        let Some(destination) = event.destination() else {
            tracing::trace!("sortable: drop outside any target ignored");
            return None;
        };

        let mv = {
            let mut state = lock(&self.shared.state);
            let edge = destination.edge_or(state.default_edge);
            let reorderer = state.reorderer;
            let Some(mv) = reorderer.reorder_in_place(
                &mut state.items,
                &event.source,
                &destination.item,
                edge,
                &self.shared.key,
            ) else {
                tracing::trace!(?edge, "sortable: drop left order unchanged");
                return None;
            };
            tracing::debug!(from = mv.from, to = mv.to, ?edge, "sortable: item moved");
            // Queued under the state lock so snapshots keep reorder order.
            let mut notifier = lock(&self.shared.notifier);
            if notifier.wants_snapshots() {
                notifier.pending.push_back(state.items.clone());
            }
            mv
        };

        self.drain_notifications();
        Some(mv)
    }

    /// Deliver queued snapshots unless another call is already doing so.
    fn drain_notifications(&self) {
        let mut drain = {
            let mut notifier = lock(&self.shared.notifier);
            if notifier.draining || notifier.pending.is_empty() {
                return;
            }
            let Some(callback) = notifier.callback.take() else {
                notifier.pending.clear();
                return;
            };
            notifier.draining = true;
            Drain {
                notifier: &self.shared.notifier,
                callback: Some(callback),
            }
        };

        loop {
            let items = {
                let mut notifier = lock(&self.shared.notifier);
                match notifier.pending.pop_front() {
                    Some(items) => items,
                    None => {
                        // Release under the same lock that saw the queue empty.
                        if notifier.callback.is_none() {
                            notifier.callback = drain.callback.take();
                        }
                        drain.callback = None;
                        notifier.draining = false;
                        return;
                    }
                }
            };
            if let Some(callback) = drain.callback.as_mut() {
                callback(&items);
            }
        }
    }
}

impl<T, F, K> Sortable<T, F>
where
    T: Clone + PartialEq + Send + 'static,
    F: Fn(&T, usize) -> K + Send + Sync + 'static,
    K: PartialEq,
{
    /// Subscribe this controller to `monitor`. Drop the handle to detach.
    #[must_use = "dropping the subscription detaches the list immediately"]
    pub fn attach(&self, monitor: &DropMonitor<T>) -> MonitorSubscription<T> {
        let list = self.clone();
        monitor.subscribe(move |event| {
            list.handle_drop(event);
        })
    }
}
