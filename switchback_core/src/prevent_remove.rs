// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Prevent-remove coordination: a route-level veto over its own removal.
//!
//! Before a transition that would remove routes is committed, every removed
//! route is asked — its registered before-remove hook first (a nested
//! navigator checking its own subtree), then this navigator's cancelable
//! `before_remove` event. Any veto blocks the whole transition; partial
//! removal is not supported. Nothing has been committed when the check runs,
//! so a block leaves all state untouched.

use alloc::rc::Rc;
use core::cell::RefCell;

use hashbrown::{HashMap, HashSet};
use switchback_routers::{Key, NavigationAction, Route};

use crate::emitter::{EventEmitter, EventType};

/// A registered veto over the removal of one route.
///
/// Returns `true` to block the removal.
pub(crate) type BeforeRemoveHook<P> = Rc<dyn Fn(&NavigationAction<P>) -> bool>;

pub(crate) type BeforeRemoveHooks<P> = RefCell<HashMap<Key, BeforeRemoveHook<P>>>;

/// Returns whether the transition from `current` to `next` is blocked.
pub(crate) fn should_prevent_remove<P: Clone>(
    emitter: &EventEmitter<P>,
    hooks: &BeforeRemoveHooks<P>,
    current: &[Route<P>],
    next: &[Route<P>],
    action: &NavigationAction<P>,
) -> bool {
    let surviving: HashSet<&Key> = next.iter().map(|route| &route.key).collect();
    // Topmost removed route first, matching the order screens would unwind.
    for route in current.iter().rev() {
        if surviving.contains(&route.key) {
            continue;
        }
        // Clone the hook out so a re-entrant registration cannot observe a
        // held borrow.
        let hook = hooks.borrow().get(&route.key).cloned();
        if let Some(hook) = hook
            && hook(action)
        {
            return true;
        }
        if emitter.emit(
            EventType::BeforeRemove,
            Some(route.key.clone()),
            Some(action.clone()),
            None,
            true,
        ) {
            return true;
        }
    }
    false
}
