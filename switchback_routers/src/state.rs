// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immutable navigation state trees and their restore-input form.
//!
//! ## Overview
//!
//! A [`NavigationState`] is one navigator's node in the navigation tree:
//! an ordered list of [`Route`]s, the focused index, and router-specific
//! metadata. Routes may carry a nested state, forming the tree recursively.
//!
//! Nodes are immutable. Routers build new nodes (structurally sharing
//! untouched subtrees behind `Rc`) and callers compare results by identity
//! with [`Rc::ptr_eq`] to tell "changed" from "no-op".
//!
//! [`PartialState`] is the loosely-shaped input form used for restore and
//! `RESET`: keys and indices are optional, and routers repair whatever does
//! not match the current configuration during rehydration.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashSet;

use crate::key::Key;

/// The navigator kind that produced a state node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NavigatorKind {
    /// Push/pop ordering; one route visible at a time, history retained.
    Stack,
    /// One route per configured name; switching focus, no push/pop.
    Tabs,
    /// Tabs plus an open/closed drawer tracked in history.
    Drawer,
}

impl NavigatorKind {
    /// Returns the kind as a short lowercase label, used in generated keys.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stack => "stack",
            Self::Tabs => "tab",
            Self::Drawer => "drawer",
        }
    }
}

/// One entry in a navigator's visit history.
///
/// Tab and drawer routers use the history to decide where `GO_BACK` lands;
/// stack routers leave it empty (the route order *is* the history).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HistoryEntry {
    /// A visited route, identified by its key.
    Route {
        /// Key of the visited route.
        key: Key,
    },
    /// The open drawer (drawer navigators only).
    Drawer,
}

/// A child navigator's state as stored on its hosting route.
#[derive(Clone, Debug)]
pub enum NestedState<P> {
    /// Committed state of a mounted child navigator.
    Hydrated(Rc<NavigationState<P>>),
    /// Restored state that no child navigator has adopted yet; the child's
    /// router rehydrates it on mount.
    Stale(PartialState<P>),
}

/// One route inside a navigator.
#[derive(Clone, Debug)]
pub struct Route<P> {
    /// Unique within the parent's `routes`.
    pub key: Key,
    /// Route name from the navigator's configured route-name set.
    pub name: String,
    /// Opaque application data attached to this route.
    pub params: Option<P>,
    /// Nested navigator state, forming the tree recursively.
    pub state: Option<NestedState<P>>,
}

impl<P> Route<P> {
    /// Creates a route with a freshly generated key and no params.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            key: Key::with_name(&name),
            name,
            params: None,
            state: None,
        }
    }

    /// Attaches params to the route.
    #[must_use]
    pub fn with_params(mut self, params: P) -> Self {
        self.params = Some(params);
        self
    }
}

/// One navigator's immutable state node.
///
/// Invariants, checked by [`NavigationState::check_integrity`] when a node
/// is committed:
///
/// - `index < routes.len()`
/// - `routes[i].key` are pairwise distinct
#[derive(Clone, Debug)]
pub struct NavigationState<P> {
    /// Unique identifier for this navigator instance.
    pub key: Key,
    /// Position of the currently focused route.
    pub index: usize,
    /// The configured route-name set this state was produced against.
    pub route_names: Vec<String>,
    /// Ordered routes; insertion order is meaningful (stack order, tab order).
    pub routes: Vec<Route<P>>,
    /// The navigator kind that produced this node.
    pub kind: NavigatorKind,
    /// Route names changed since this node was produced; it must be passed
    /// through the router again before use.
    pub stale: bool,
    /// Visit history used by tab and drawer back behavior; empty for stacks.
    pub history: Vec<HistoryEntry>,
}

impl<P> NavigationState<P> {
    /// Returns the currently focused route.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds, which committed states never are.
    #[must_use]
    pub fn focused_route(&self) -> &Route<P> {
        &self.routes[self.index]
    }

    /// Returns the position of the route with the given key, if present.
    #[must_use]
    pub fn route_index(&self, key: &Key) -> Option<usize> {
        self.routes.iter().position(|route| route.key == *key)
    }

    /// Fails fast if this node violates the structural invariants.
    ///
    /// A state that reaches commit with an out-of-range index or duplicate
    /// route keys would corrupt every subsequent transition, so this panics
    /// instead of warning.
    pub fn check_integrity(&self) {
        assert!(
            self.index < self.routes.len(),
            "navigator `{}`: index {} is out of bounds for {} route(s)",
            self.key,
            self.index,
            self.routes.len(),
        );
        let mut seen = HashSet::with_capacity(self.routes.len());
        for route in &self.routes {
            assert!(
                seen.insert(&route.key),
                "navigator `{}`: duplicate route key `{}`",
                self.key,
                route.key,
            );
        }
    }
}

/// Restore-input form of a route: everything optional except the name.
#[derive(Clone, Debug, PartialEq)]
pub struct PartialRoute<P> {
    /// Key to keep; a fresh one is generated when absent.
    pub key: Option<Key>,
    /// Route name; routes with unconfigured names are dropped on rehydrate.
    pub name: String,
    /// Params to keep.
    pub params: Option<P>,
    /// Nested navigator state, still in its partial form.
    pub state: Option<PartialState<P>>,
}

impl<P> PartialRoute<P> {
    /// Creates a partial route with only a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            key: None,
            name: name.into(),
            params: None,
            state: None,
        }
    }

    /// Attaches params.
    #[must_use]
    pub fn with_params(mut self, params: P) -> Self {
        self.params = Some(params);
        self
    }

    /// Attaches a nested partial state.
    #[must_use]
    pub fn with_state(mut self, state: PartialState<P>) -> Self {
        self.state = Some(state);
        self
    }
}

/// Restore-input form of a navigation state.
///
/// Produced by a persistence layer or a `RESET` action, consumed by
/// [`Router::rehydrate`](crate::router::Router::rehydrate), which repairs it
/// against the current configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct PartialState<P> {
    /// Focused position; clamped (or derived) during rehydration.
    pub index: Option<usize>,
    /// Routes in order; unconfigured names are dropped during rehydration.
    pub routes: Vec<PartialRoute<P>>,
}

impl<P> PartialState<P> {
    /// Creates a partial state from routes, leaving the index to the router.
    #[must_use]
    pub fn with_routes(routes: Vec<PartialRoute<P>>) -> Self {
        Self {
            index: None,
            routes,
        }
    }

    /// Sets the focused position.
    #[must_use]
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}

impl<P> Default for PartialState<P> {
    fn default() -> Self {
        Self {
            index: None,
            routes: Vec::new(),
        }
    }
}

impl<P: Clone> From<&NavigationState<P>> for PartialState<P> {
    /// Demotes a committed state to its partial form, e.g. for persistence.
    fn from(state: &NavigationState<P>) -> Self {
        Self {
            index: Some(state.index),
            routes: state
                .routes
                .iter()
                .map(|route| PartialRoute {
                    key: Some(route.key.clone()),
                    name: route.name.clone(),
                    params: route.params.clone(),
                    state: match &route.state {
                        Some(NestedState::Hydrated(nested)) => Some(Self::from(&**nested)),
                        Some(NestedState::Stale(partial)) => Some(partial.clone()),
                        None => None,
                    },
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    fn two_route_state() -> NavigationState<u32> {
        NavigationState {
            key: Key::with_name("stack"),
            index: 1,
            route_names: vec!["Home".into(), "Profile".into()],
            routes: vec![Route::new("Home"), Route::new("Profile").with_params(7)],
            kind: NavigatorKind::Stack,
            stale: false,
            history: Vec::new(),
        }
    }

    #[test]
    fn focused_route_follows_index() {
        let state = two_route_state();
        assert_eq!(state.focused_route().name, "Profile");
        assert_eq!(state.focused_route().params, Some(7));
    }

    #[test]
    fn route_index_finds_by_key() {
        let state = two_route_state();
        let key = state.routes[0].key.clone();
        assert_eq!(state.route_index(&key), Some(0));
        assert_eq!(state.route_index(&Key::with_name("Home")), None);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn integrity_rejects_out_of_range_index() {
        let mut state = two_route_state();
        state.index = 2;
        state.check_integrity();
    }

    #[test]
    #[should_panic(expected = "duplicate route key")]
    fn integrity_rejects_duplicate_keys() {
        let mut state = two_route_state();
        let key = state.routes[0].key.clone();
        state.routes[1].key = key;
        state.check_integrity();
    }

    #[test]
    fn partial_round_trips_nested_state() {
        let child = two_route_state();
        let mut parent = two_route_state();
        parent.routes[0].state = Some(NestedState::Hydrated(Rc::new(child)));

        let partial = PartialState::from(&parent);
        assert_eq!(partial.index, Some(1));
        assert_eq!(partial.routes.len(), 2);
        let nested = partial.routes[0].state.as_ref().expect("nested state kept");
        assert_eq!(nested.routes.len(), 2);
        assert_eq!(nested.routes[1].params, Some(7));
    }
}
