// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stack router: push/pop ordering over an ordered route list.
//!
//! ## Behavior
//!
//! - `NAVIGATE` pops back to the most recent route with the given name, or
//!   pushes a fresh one when absent.
//! - `PUSH` always adds a fresh route, even when one with the same name
//!   already exists.
//! - `POP` removes routes ending at the source route when the action is
//!   addressed to this navigator and carries a source; otherwise at the
//!   focused route. Routes stacked above the anchor survive.
//! - `POP_TO` pops back to the named route; when absent, the focused route
//!   is replaced by a fresh route of that name.
//! - `GO_BACK` is `POP` by one, unhandled at the bottom of the stack so the
//!   action can bubble to an ancestor navigator.

use alloc::rc::Rc;
use alloc::vec;
use alloc::vec::Vec;

use crate::action::{ActionKind, NavigationAction};
use crate::key::Key;
use crate::router::{Router, RouterConfig, common_state_for_action, fresh_route};
use crate::state::{NavigationState, NavigatorKind, NestedState, PartialState, Route};

/// Router for stack navigators.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StackRouter;

impl StackRouter {
    fn initial_route<P: Clone>(config: &RouterConfig<P>) -> Route<P> {
        assert!(
            !config.route_names.is_empty(),
            "a stack navigator needs at least one configured route name"
        );
        let name = &config.route_names[config.initial_index()];
        fresh_route(name, None, config)
    }
}

impl<P: Clone> Router<P> for StackRouter {
    fn kind(&self) -> NavigatorKind {
        NavigatorKind::Stack
    }

    fn initial_state(&self, config: &RouterConfig<P>) -> NavigationState<P> {
        NavigationState {
            key: Key::with_name(NavigatorKind::Stack.as_str()),
            index: 0,
            route_names: config.route_names.clone(),
            routes: vec![Self::initial_route(config)],
            kind: NavigatorKind::Stack,
            stale: false,
            history: Vec::new(),
        }
    }

    fn rehydrate(&self, partial: PartialState<P>, config: &RouterConfig<P>) -> NavigationState<P> {
        let mut routes: Vec<Route<P>> = partial
            .routes
            .into_iter()
            .filter(|route| config.contains(&route.name))
            .map(|route| Route {
                key: route.key.unwrap_or_else(|| Key::with_name(&route.name)),
                params: route.params.or_else(|| config.params_for(&route.name).cloned()),
                state: route.state.map(NestedState::Stale),
                name: route.name,
            })
            .collect();
        if routes.is_empty() {
            routes.push(Self::initial_route(config));
        }
        let index = partial.index.unwrap_or(routes.len() - 1).min(routes.len() - 1);
        NavigationState {
            key: Key::with_name(NavigatorKind::Stack.as_str()),
            index,
            route_names: config.route_names.clone(),
            routes,
            kind: NavigatorKind::Stack,
            stale: false,
            history: Vec::new(),
        }
    }

    fn state_for_route_names_change(
        &self,
        state: &Rc<NavigationState<P>>,
        config: &RouterConfig<P>,
    ) -> Rc<NavigationState<P>> {
        let mut routes: Vec<Route<P>> = state
            .routes
            .iter()
            .filter(|route| config.contains(&route.name))
            .cloned()
            .collect();
        if routes.is_empty() {
            routes.push(Self::initial_route(config));
        }
        let mut next = (**state).clone();
        next.index = state.index.min(routes.len() - 1);
        next.routes = routes;
        next.route_names = config.route_names.clone();
        next.stale = false;
        Rc::new(next)
    }

    fn state_for_route_focus(
        &self,
        state: &Rc<NavigationState<P>>,
        route_key: &Key,
    ) -> Rc<NavigationState<P>> {
        let Some(index) = state.route_index(route_key) else {
            return state.clone();
        };
        if index == state.index {
            return state.clone();
        }
        // Focusing a route below the top pops everything stacked above it.
        let mut next = (**state).clone();
        next.routes.truncate(index + 1);
        next.index = index;
        Rc::new(next)
    }

    fn state_for_action(
        &self,
        state: &Rc<NavigationState<P>>,
        action: &NavigationAction<P>,
        config: &RouterConfig<P>,
    ) -> Option<Rc<NavigationState<P>>> {
        match &action.kind {
            ActionKind::Navigate { name, params } => {
                if !config.contains(name) {
                    return None;
                }
                if let Some(index) = state.routes.iter().rposition(|route| route.name == *name) {
                    if index == state.index
                        && index == state.routes.len() - 1
                        && params.is_none()
                    {
                        // Already there and nothing to apply.
                        return Some(state.clone());
                    }
                    let mut next = (**state).clone();
                    next.routes.truncate(index + 1);
                    if let Some(params) = params {
                        next.routes[index].params = Some(params.clone());
                    }
                    next.index = index;
                    return Some(Rc::new(next));
                }
                let mut next = (**state).clone();
                next.routes.push(fresh_route(name, params.clone(), config));
                next.index = next.routes.len() - 1;
                Some(Rc::new(next))
            }
            ActionKind::Push { name, params } => {
                if !config.contains(name) {
                    return None;
                }
                let mut next = (**state).clone();
                next.routes.push(fresh_route(name, params.clone(), config));
                next.index = next.routes.len() - 1;
                Some(Rc::new(next))
            }
            ActionKind::Pop { count } => {
                if *count == 0 {
                    // Removing zero routes: handled, nothing to do.
                    return Some(state.clone());
                }
                let anchor = match &action.source {
                    Some(source) if action.target.as_ref() == Some(&state.key) => {
                        state.route_index(source)?
                    }
                    _ => state.index,
                };
                if anchor == 0 {
                    return None;
                }
                // Keep at least the bottom route; routes stacked above the
                // anchor survive the pop.
                let prefix = anchor.saturating_sub(*count) + 1;
                let mut routes = state.routes[..prefix].to_vec();
                routes.extend_from_slice(&state.routes[anchor + 1..]);
                let mut next = (**state).clone();
                next.index = routes.len() - 1;
                next.routes = routes;
                Some(Rc::new(next))
            }
            ActionKind::PopToTop => {
                let count = state.routes.len().saturating_sub(1);
                let pop = NavigationAction {
                    kind: ActionKind::Pop { count },
                    target: action.target.clone(),
                    source: None,
                };
                self.state_for_action(state, &pop, config)
            }
            ActionKind::PopTo { name, params } => {
                if !config.contains(name) {
                    return None;
                }
                if let Some(index) = state.routes.iter().rposition(|route| route.name == *name) {
                    if index == state.index
                        && index == state.routes.len() - 1
                        && params.is_none()
                    {
                        return Some(state.clone());
                    }
                    let mut next = (**state).clone();
                    next.routes.truncate(index + 1);
                    if let Some(params) = params {
                        next.routes[index].params = Some(params.clone());
                    }
                    next.index = index;
                    return Some(Rc::new(next));
                }
                // No such route on the stack: the focused route gives way to
                // a fresh one with the requested name.
                let mut routes = state.routes[..state.index].to_vec();
                routes.push(fresh_route(name, params.clone(), config));
                let mut next = (**state).clone();
                next.index = routes.len() - 1;
                next.routes = routes;
                Some(Rc::new(next))
            }
            ActionKind::Replace { name, params } => {
                if !config.contains(name) {
                    return None;
                }
                let index = match &action.source {
                    Some(source) => state.route_index(source)?,
                    None => state.index,
                };
                let mut next = (**state).clone();
                next.routes[index] = fresh_route(name, params.clone(), config);
                Some(Rc::new(next))
            }
            ActionKind::GoBack => {
                if state.index == 0 {
                    return None;
                }
                let pop = NavigationAction {
                    kind: ActionKind::Pop { count: 1 },
                    target: action.target.clone(),
                    source: action.source.clone(),
                };
                self.state_for_action(state, &pop, config)
            }
            _ => common_state_for_action(self, state, action, config),
        }
    }
}
