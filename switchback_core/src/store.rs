// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Committed-state holder with change notification.
//!
//! One [`Store`] holds one navigator's current [`NavigationState`] snapshot.
//! Reads clone the `Rc`; writes re-check the structural invariants, swap the
//! snapshot, and notify watchers. The watcher list is snapshotted before
//! notifying, so watchers registered or dropped during notification only
//! affect future commits.

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

use switchback_routers::NavigationState;

type WatcherList<P> = RefCell<Vec<Rc<WatcherEntry<P>>>>;

struct WatcherEntry<P> {
    id: u64,
    callback: Box<dyn Fn(&Rc<NavigationState<P>>)>,
}

/// Holds one navigator's committed state and notifies watchers on change.
pub struct Store<P> {
    state: RefCell<Rc<NavigationState<P>>>,
    watchers: Rc<WatcherList<P>>,
    next_id: Cell<u64>,
}

impl<P> Store<P> {
    /// Creates a store with an initial committed state.
    ///
    /// # Panics
    ///
    /// Panics if the initial state violates the structural invariants
    /// (index out of bounds, duplicate route keys).
    #[must_use]
    pub fn new(initial: Rc<NavigationState<P>>) -> Self {
        initial.check_integrity();
        Self {
            state: RefCell::new(initial),
            watchers: Rc::new(RefCell::new(Vec::new())),
            next_id: Cell::new(0),
        }
    }

    /// Returns the current committed snapshot.
    #[must_use]
    pub fn get(&self) -> Rc<NavigationState<P>> {
        self.state.borrow().clone()
    }

    /// Commits a new snapshot and notifies watchers.
    ///
    /// # Panics
    ///
    /// Panics if the new state violates the structural invariants. Failing
    /// fast here keeps a corrupt node from poisoning every later dispatch.
    pub fn set(&self, next: Rc<NavigationState<P>>) {
        next.check_integrity();
        *self.state.borrow_mut() = next.clone();
        // Snapshot first: watchers may subscribe or unsubscribe while we
        // iterate, and may re-enter `set`.
        let snapshot: Vec<Rc<WatcherEntry<P>>> = self.watchers.borrow().iter().cloned().collect();
        for watcher in snapshot {
            (watcher.callback)(&next);
        }
    }

    /// Registers a change watcher; dropping the guard unregisters it.
    #[must_use]
    pub fn watch(&self, callback: impl Fn(&Rc<NavigationState<P>>) + 'static) -> WatchGuard<P> {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.watchers.borrow_mut().push(Rc::new(WatcherEntry {
            id,
            callback: Box::new(callback),
        }));
        WatchGuard {
            watchers: Rc::downgrade(&self.watchers),
            id,
        }
    }
}

impl<P> fmt::Debug for Store<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("watchers", &self.watchers.borrow().len())
            .finish_non_exhaustive()
    }
}

/// Unsubscribes its watcher from the [`Store`] on drop.
pub struct WatchGuard<P> {
    watchers: Weak<WatcherList<P>>,
    id: u64,
}

impl<P> Drop for WatchGuard<P> {
    fn drop(&mut self) {
        if let Some(watchers) = self.watchers.upgrade() {
            watchers.borrow_mut().retain(|entry| entry.id != self.id);
        }
    }
}

impl<P> fmt::Debug for WatchGuard<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchGuard").field("id", &self.id).finish()
    }
}
