#![forbid(unsafe_code)]

//! Drop monitor: fans completed drop events out to subscribed listeners.
//!
//! A [`DropMonitor`] is an ordinary value owned by whoever composes the UI.
//! Cloning it yields another handle to the same listener set.
//!
//! [`subscribe`](DropMonitor::subscribe) returns a [`MonitorSubscription`].
//! The listener stays registered exactly as long as that handle lives; it is
//! removed when the handle is dropped, whether the owner is torn down
//! normally, returns early, or unwinds.
//!
//! # Dispatch semantics
//!
//! 1. Listeners are called in subscription order.
//! 2. A listener removed during a dispatch is not called later in that
//!    dispatch.
//! 3. A listener added during a dispatch is first called on the next one.
//! 4. Dispatching from inside a listener, on the dispatching thread, is
//!    ignored and returns 0.
//! 5. A dispatch from another thread while one is in flight is queued and
//!    delivered by the in-flight dispatch before it returns. Events are
//!    never dropped and listeners never run concurrently.
//! 6. No lock is held while a listener runs, so listeners may freely
//!    subscribe and unsubscribe.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::thread::{self, ThreadId};

use crate::event::DropEvent;

/// Identifier of a registered listener, unique per monitor.
pub type ListenerId = u64;

type Listener<T> = Box<dyn FnMut(&DropEvent<T>) + Send>;

struct Registry<T> {
    next_id: ListenerId,
    listeners: Vec<(ListenerId, Listener<T>)>,
    /// Thread currently delivering events, if any.
    dispatcher: Option<ThreadId>,
    /// Events from other threads waiting for the current dispatcher.
    queued: VecDeque<DropEvent<T>>,
    /// Listeners currently checked out by an in-flight dispatch.
    in_flight: Vec<ListenerId>,
    /// Removals requested for checked-out listeners.
    removed: Vec<ListenerId>,
}

impl<T> Registry<T> {
    fn new() -> Self {
        Self {
            next_id: 1,
            listeners: Vec::new(),
            dispatcher: None,
            queued: VecDeque::new(),
            in_flight: Vec::new(),
            removed: Vec::new(),
        }
    }

    fn remove(&mut self, id: ListenerId) -> bool {
        if let Some(pos) = self.listeners.iter().position(|(lid, _)| *lid == id) {
            self.listeners.remove(pos);
            return true;
        }
        if self.in_flight.contains(&id) && !self.removed.contains(&id) {
            self.removed.push(id);
            return true;
        }
        false
    }
}

fn lock<R>(m: &Mutex<R>) -> MutexGuard<'_, R> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

// ---------------------------------------------------------------------------
// DropMonitor
// ---------------------------------------------------------------------------

/// Shared registry of drop listeners.
pub struct DropMonitor<T> {
    registry: Arc<Mutex<Registry<T>>>,
}

impl<T> Clone for DropMonitor<T> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<T> Default for DropMonitor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for DropMonitor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DropMonitor")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl<T> DropMonitor<T> {
    /// Create a monitor with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry::new())),
        }
    }

    /// Register `listener`; it stays registered while the returned handle lives.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, listener: F) -> MonitorSubscription<T>
    where
        F: FnMut(&DropEvent<T>) + Send + 'static,
    {
        let mut reg = lock(&self.registry);
        let id = reg.next_id;
        reg.next_id += 1;
        reg.listeners.push((id, Box::new(listener)));
        tracing::debug!(listener_id = id, "drop monitor: subscribed");
        MonitorSubscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        let reg = lock(&self.registry);
        reg.listeners.len() + reg.in_flight.len() - reg.removed.len()
    }

    /// Deliver `event` to every listener, returning how many were called.
    ///
    /// If another thread is dispatching, `event` is queued for that thread to
    /// deliver before its dispatch returns, and this call returns 0.
    pub fn dispatch(&self, event: &DropEvent<T>) -> usize
    where
        T: Clone,
    {
        let me = thread::current().id();
        {
            let mut reg = lock(&self.registry);
            let current = reg.dispatcher;
            match current {
                Some(owner) if owner == me => {
                    tracing::warn!("drop monitor: nested dispatch ignored");
                    return 0;
                }
                Some(_) => {
                    reg.queued.push_back(event.clone());
                    tracing::debug!(
                        queued = reg.queued.len(),
                        "drop monitor: dispatch queued behind another thread"
                    );
                    return 0;
                }
                None => reg.dispatcher = Some(me),
            }
        }
        let _owner = DispatcherGuard {
            registry: &self.registry,
            thread: me,
        };

        let notified = self.deliver(event);
        loop {
            let next = {
                let mut reg = lock(&self.registry);
                let next = reg.queued.pop_front();
                if next.is_none() {
                    // Hand off under the same lock that saw the queue empty.
                    reg.dispatcher = None;
                }
                next
            };
            match next {
                Some(queued) => {
                    self.deliver(&queued);
                }
                None => return notified,
            }
        }
    }

    /// One pass over the listeners. The caller must own the dispatch.
    fn deliver(&self, event: &DropEvent<T>) -> usize {
        let taken = {
            let mut reg = lock(&self.registry);
            let taken = std::mem::take(&mut reg.listeners);
            reg.in_flight = taken.iter().map(|(id, _)| *id).collect();
            taken
        };

        let mut guard = DispatchGuard {
            registry: &self.registry,
            taken,
        };

        let mut notified = 0;
        for (id, listener) in guard.taken.iter_mut() {
            if lock(&self.registry).removed.contains(id) {
                continue;
            }
            listener(event);
            notified += 1;
        }
        drop(guard);

        tracing::debug!(
            notified,
            has_destination = event.destination().is_some(),
            "drop monitor: dispatched"
        );
        notified
    }
}

/// Releases dispatch ownership if the owning thread unwinds.
struct DispatcherGuard<'a, T> {
    registry: &'a Mutex<Registry<T>>,
    thread: ThreadId,
}

impl<T> Drop for DispatcherGuard<'_, T> {
    fn drop(&mut self) {
        let mut reg = lock(self.registry);
        // Ownership may already have passed to another thread.
        if reg.dispatcher == Some(self.thread) {
            reg.dispatcher = None;
        }
    }
}

/// Returns checked-out listeners to the registry, even if a listener panics.
struct DispatchGuard<'a, T> {
    registry: &'a Mutex<Registry<T>>,
    taken: Vec<(ListenerId, Listener<T>)>,
}

impl<T> Drop for DispatchGuard<'_, T> {
    fn drop(&mut self) {
        let mut reg = lock(self.registry);
        let removed = std::mem::take(&mut reg.removed);
        let mut restored = std::mem::take(&mut self.taken);
        restored.retain(|(id, _)| !removed.contains(id));
        // Listeners added mid-dispatch go after the existing ones.
        restored.append(&mut reg.listeners);
        reg.listeners = restored;
        reg.in_flight.clear();
    }
}

// ---------------------------------------------------------------------------
// MonitorSubscription
// ---------------------------------------------------------------------------

/// Scoped registration of a drop listener.
///
/// Dropping the handle unsubscribes. The handle does not keep the monitor
/// alive; once every [`DropMonitor`] clone is gone it becomes inert.
pub struct MonitorSubscription<T> {
    id: ListenerId,
    registry: Weak<Mutex<Registry<T>>>,
}

impl<T> std::fmt::Debug for MonitorSubscription<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonitorSubscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

impl<T> MonitorSubscription<T> {
    /// Identifier of the registered listener.
    #[must_use]
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// True while the monitor is alive and still holds this listener.
    #[must_use]
    pub fn is_active(&self) -> bool {
        let Some(registry) = self.registry.upgrade() else {
            return false;
        };
        let reg = lock(&registry);
        let registered = reg.listeners.iter().any(|(id, _)| *id == self.id);
        let in_flight = reg.in_flight.contains(&self.id) && !reg.removed.contains(&self.id);
        registered || in_flight
    }

    /// Unsubscribe now. Equivalent to dropping the handle.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl<T> Drop for MonitorSubscription<T> {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        if lock(&registry).remove(self.id) {
            tracing::debug!(listener_id = self.id, "drop monitor: unsubscribed");
        }
    }
}
