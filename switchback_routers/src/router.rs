// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The router contract and its shared configuration.
//!
//! ## Overview
//!
//! A [`Router`] is a set of pure state-transition functions for one
//! navigator kind. Dispatch logic depends only on this trait, never on a
//! concrete kind, so navigator kinds are swappable.
//!
//! ## The `state_for_action` contract
//!
//! - `None` means "not handled here"; the dispatcher will bubble the action
//!   to other navigators.
//! - `Some(state)` where the returned `Rc` is the *same allocation* as the
//!   input means "handled, nothing changed". Callers distinguish this from a
//!   real transition with [`Rc::ptr_eq`], never deep equality.
//! - `Some(next)` otherwise is a candidate transition; the dispatcher may
//!   still veto it (prevent-remove) before committing.
//!
//! Routers are pure: they read the state and configuration they are handed
//! and allocate a new node for any change. They never touch a store, an
//! emitter, or another navigator.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::action::{ActionKind, NavigationAction};
use crate::key::Key;
use crate::state::{NavigationState, NavigatorKind, PartialState, Route};

/// Configuration a router resolves against.
///
/// The dispatcher reads this at call time (not captured at closure-creation
/// time), so a router always sees the latest route-name set even when route
/// names change after mount.
#[derive(Clone, Debug)]
pub struct RouterConfig<P> {
    /// The configured route names, in declaration order.
    pub route_names: Vec<String>,
    /// Which route is focused initially; first route when unset.
    pub initial_route_name: Option<String>,
    /// Params a route starts with when created without any.
    pub initial_params: HashMap<String, P>,
}

impl<P> RouterConfig<P> {
    /// Creates a configuration from route names.
    #[must_use]
    pub fn new<I, S>(route_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            route_names: route_names.into_iter().map(Into::into).collect(),
            initial_route_name: None,
            initial_params: HashMap::new(),
        }
    }

    /// Sets the initially focused route.
    #[must_use]
    pub fn with_initial_route(mut self, name: impl Into<String>) -> Self {
        self.initial_route_name = Some(name.into());
        self
    }

    /// Sets the params a route of the given name starts with.
    #[must_use]
    pub fn with_initial_params(mut self, name: impl Into<String>, params: P) -> Self {
        self.initial_params.insert(name.into(), params);
        self
    }

    /// Returns whether the given route name is configured.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.route_names.iter().any(|n| n == name)
    }

    /// Returns the position of the initial route.
    ///
    /// Falls back to the first route (with a warning) when
    /// `initial_route_name` is not among the configured names.
    #[must_use]
    pub fn initial_index(&self) -> usize {
        match &self.initial_route_name {
            Some(name) => match self.route_names.iter().position(|n| n == name) {
                Some(index) => index,
                None => {
                    log::warn!(
                        "initial route `{name}` is not among the configured route names; \
                         falling back to the first route"
                    );
                    0
                }
            },
            None => 0,
        }
    }

    /// Returns the configured initial params for a route name.
    #[must_use]
    pub fn params_for(&self, name: &str) -> Option<&P> {
        self.initial_params.get(name)
    }
}

impl<P> Default for RouterConfig<P> {
    fn default() -> Self {
        Self {
            route_names: Vec::new(),
            initial_route_name: None,
            initial_params: HashMap::new(),
        }
    }
}

/// Pure state-transition functions for one navigator kind.
pub trait Router<P: Clone> {
    /// The navigator kind this router produces states for.
    fn kind(&self) -> NavigatorKind;

    /// Builds the first state for a freshly mounted navigator.
    fn initial_state(&self, config: &RouterConfig<P>) -> NavigationState<P>;

    /// Repairs restored (or reset) partial state against the current
    /// configuration: unknown route names are dropped, the index is clamped
    /// or re-derived, and missing keys are freshly generated.
    fn rehydrate(&self, partial: PartialState<P>, config: &RouterConfig<P>) -> NavigationState<P>;

    /// Carries existing state over to a changed route-name set.
    fn state_for_route_names_change(
        &self,
        state: &Rc<NavigationState<P>>,
        config: &RouterConfig<P>,
    ) -> Rc<NavigationState<P>>;

    /// Focuses the route with the given key, e.g. because a descendant
    /// navigator inside it just handled a focus-changing action.
    ///
    /// Returns the input `Rc` unchanged when the route is absent or already
    /// focused.
    fn state_for_route_focus(
        &self,
        state: &Rc<NavigationState<P>>,
        route_key: &Key,
    ) -> Rc<NavigationState<P>>;

    /// Resolves an action against the current state. See the module docs
    /// for the `None` / identity / changed contract.
    fn state_for_action(
        &self,
        state: &Rc<NavigationState<P>>,
        action: &NavigationAction<P>,
        config: &RouterConfig<P>,
    ) -> Option<Rc<NavigationState<P>>>;

    /// Whether handling this action should also shift ancestor focus chains
    /// (true for `NAVIGATE`-like actions, false for e.g. `SET_PARAMS`).
    fn should_change_focus(&self, action: &NavigationAction<P>) -> bool {
        matches!(action.kind, ActionKind::Navigate { .. })
    }
}

/// Creates a route with a fresh key, falling back to configured initial
/// params when the action carries none.
pub(crate) fn fresh_route<P: Clone>(
    name: &str,
    params: Option<P>,
    config: &RouterConfig<P>,
) -> Route<P> {
    Route {
        key: Key::with_name(name),
        name: String::from(name),
        params: params.or_else(|| config.params_for(name).cloned()),
        state: None,
    }
}

/// Handles the action kinds shared by every router: `SET_PARAMS` and
/// `RESET`. Concrete routers fall through to this after their own kinds.
pub(crate) fn common_state_for_action<P: Clone, R: Router<P> + ?Sized>(
    router: &R,
    state: &Rc<NavigationState<P>>,
    action: &NavigationAction<P>,
    config: &RouterConfig<P>,
) -> Option<Rc<NavigationState<P>>> {
    match &action.kind {
        ActionKind::SetParams { params } => {
            let index = match &action.source {
                Some(source) => state.route_index(source)?,
                None => state.index,
            };
            let mut next = (**state).clone();
            next.routes[index].params = Some(params.clone());
            Some(Rc::new(next))
        }
        ActionKind::Reset { state: partial } => {
            if partial.routes.is_empty()
                || partial.routes.iter().any(|route| !config.contains(&route.name))
            {
                return None;
            }
            Some(Rc::new(router.rehydrate(partial.clone(), config)))
        }
        _ => None,
    }
}
