// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Action dispatch: local resolution, then bubbling up, then down.
//!
//! ## Algorithm
//!
//! `dispatch` enters at some navigator with a fresh [`VisitedNavigators`]
//! set; the set is then threaded by mutable reference through every hop, so
//! each navigator attempts resolution at most once per dispatch. At each
//! navigator:
//!
//! 1. Bail out (`false`) if this navigator was already visited; otherwise
//!    mark it visited.
//! 2. If the action is undirected or addressed to this navigator, ask the
//!    router. A targeted action the router declines still counts as handled
//!    here, with the current state as the result — it must not escape to
//!    other navigators.
//! 3. A changed candidate is offered to the prevent-remove hooks before
//!    commit; a veto cancels the transition but reports the dispatch as
//!    handled (a blocked removal is a final outcome, which back-button
//!    handlers rely on to not fall through to system default behavior).
//! 4. After a commit, if the action is focus-changing, the parent chain
//!    refocuses the hosting route, all the way to the root.
//! 5. Unhandled actions are delegated to the parent, then — when targeted
//!    or when legacy child bubbling is on — to children in reverse mount
//!    order (the most recently mounted child is the most likely intended
//!    recipient, e.g. a modal above a tab bar).
//!
//! Everything is synchronous; a listener that dispatches re-entrantly gets
//! a fresh visited set and cannot corrupt the in-flight one.

use alloc::rc::Rc;

use hashbrown::HashSet;
use switchback_routers::{Key, NavigationAction, NavigationState};

use crate::emitter::EventType;
use crate::navigator::Navigator;
use crate::prevent_remove::should_prevent_remove;

/// Navigator keys that already attempted to resolve the in-flight action.
///
/// Shared by mutable reference across one dispatch call tree; this is what
/// keeps bubbling finite in cyclic parent/child traversal.
#[derive(Debug, Default)]
pub struct VisitedNavigators {
    visited: HashSet<Key>,
}

impl VisitedNavigators {
    /// Creates an empty set, as every top-level dispatch does.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn contains(&self, key: &Key) -> bool {
        self.visited.contains(key)
    }

    pub(crate) fn insert(&mut self, key: Key) {
        self.visited.insert(key);
    }

    /// How many navigators have attempted the action so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.visited.len()
    }

    /// Whether no navigator has attempted the action yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }
}

impl<P: Clone + 'static> Navigator<P> {
    /// Dispatches an action into the tree, starting at this navigator.
    ///
    /// Returns whether any navigator handled it. Unhandled actions are not
    /// errors; a warning is logged and `false` returned so callers (e.g. a
    /// hardware back-button handler) can fall back.
    pub fn dispatch(&self, action: NavigationAction<P>) -> bool {
        let mut visited = VisitedNavigators::new();
        let handled = self.on_action(&action, &mut visited);
        if !handled {
            log::warn!(
                "navigation action `{}` was not handled by any navigator",
                action.kind.label(),
            );
        }
        handled
    }

    /// One resolution attempt at this navigator, bubbling as needed.
    ///
    /// This is the re-entrant entry point: nested navigators call each
    /// other with the shared `visited` set. A listener dispatching from
    /// inside a callback must use [`Navigator::dispatch`] (or a fresh set)
    /// instead of reusing the caller's.
    pub fn on_action(
        &self,
        action: &NavigationAction<P>,
        visited: &mut VisitedNavigators,
    ) -> bool {
        if self.pending_route_names_state.borrow().is_some() {
            log::warn!(
                "dispatching `{}` while restored state is still waiting for a route-names \
                 change; the two state updates may race",
                action.kind.label(),
            );
        }

        let state = self.store.get();

        // Actions bubble both up and down, so they can come back to a
        // navigator that already declined them.
        if visited.contains(&state.key) {
            return false;
        }
        visited.insert(state.key.clone());

        if action.target.is_none() || action.target.as_ref() == Some(&state.key) {
            let result = {
                // Read the configuration at call time: route names may have
                // changed since this navigator was mounted.
                let config = self.config.borrow();
                self.router.state_for_action(&state, action, &config)
            };
            // A targeted action the router declined resolves to the current
            // state: handled as a no-op rather than bubbled onward.
            let result = match result {
                None if action.target.as_ref() == Some(&state.key) => Some(state.clone()),
                other => other,
            };

            if let Some(next) = result {
                let unchanged = Rc::ptr_eq(&next, &state);
                self.notify_dispatch(action, unchanged);

                if !unchanged {
                    if should_prevent_remove(
                        &self.emitter,
                        &self.before_remove,
                        &state.routes,
                        &next.routes,
                        action,
                    ) {
                        // Blocked removal: nothing is committed, but the
                        // user's intent has been fully answered.
                        return true;
                    }
                    self.commit(&next, &state);
                }

                if self.router.should_change_focus(action)
                    && let Some(parent) = self.parent_nav()
                    && let Some(route_key) = self.route_key()
                {
                    parent.on_route_focus(route_key);
                }
                return true;
            }
        }

        if let Some(parent) = self.parent_nav()
            && parent.on_action(action, visited)
        {
            return true;
        }

        if action.target.is_some() || self.legacy_child_bubbling() {
            let children = self.child_navigators();
            for child in children.iter().rev() {
                if child.on_action(action, visited) {
                    return true;
                }
            }
        }

        false
    }

    /// Refocuses the route hosting a descendant navigator, chaining upward
    /// so every ancestor's active index keeps the navigated-to leaf visible.
    pub(crate) fn on_route_focus(&self, route_key: &Key) {
        let state = self.store.get();
        let next = self.router.state_for_route_focus(&state, route_key);
        if !Rc::ptr_eq(&next, &state) {
            self.commit(&next, &state);
        }
        if let Some(parent) = self.parent_nav()
            && let Some(own_route) = self.route_key()
        {
            parent.on_route_focus(own_route);
        }
    }

    /// Commits a candidate state and emits the resulting notifications:
    /// the `state` event, `blur`/`focus` for a focus change, and the root
    /// render hook with the composed tree snapshot.
    pub(crate) fn commit(
        &self,
        next: &Rc<NavigationState<P>>,
        previous: &Rc<NavigationState<P>>,
    ) {
        self.store.set(next.clone());
        self.emitter
            .emit(EventType::State, None, None, Some(next.clone()), false);

        let previous_focus = previous.routes.get(previous.index).map(|r| r.key.clone());
        let next_focus = next.routes.get(next.index).map(|r| r.key.clone());
        if previous_focus != next_focus {
            if let Some(blurred) = previous_focus {
                self.emitter
                    .emit(EventType::Blur, Some(blurred), None, None, false);
            }
            if let Some(focused) = next_focus {
                self.emitter
                    .emit(EventType::Focus, Some(focused), None, None, false);
            }
        }

        let root = self.root_nav();
        let callback = root.on_state_change.borrow().clone();
        if let Some(callback) = callback {
            callback(&root.subtree_state());
        }
    }

    fn notify_dispatch(&self, action: &NavigationAction<P>, unchanged: bool) {
        let root = self.root_nav();
        let callback = root.on_dispatch.borrow().clone();
        if let Some(callback) = callback {
            callback(action, unchanged);
        }
    }
}
