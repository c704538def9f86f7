// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tab router: one route per configured name, focus switching, and
//! history-driven back behavior.
//!
//! Tabs never push or pop. Every configured route name is materialized as a
//! route up front; actions only move focus and update params. The state's
//! `history` records focus order so `GO_BACK` can walk it (or follow one of
//! the other [`BackBehavior`] policies).

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::action::{ActionKind, NavigationAction};
use crate::key::Key;
use crate::router::{Router, RouterConfig, common_state_for_action, fresh_route};
use crate::state::{HistoryEntry, NavigationState, NavigatorKind, NestedState, PartialState, Route};

/// How `GO_BACK` selects the previous tab.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum BackBehavior {
    /// Return to the previously focused tab, following the visit history.
    #[default]
    History,
    /// Return to the tab before the focused one in declaration order.
    Order,
    /// Return to the configured initial tab.
    InitialRoute,
    /// Return to the first tab.
    FirstRoute,
    /// `GO_BACK` is never handled here; it bubbles to an ancestor.
    None,
}

/// Router for tab navigators.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TabRouter {
    /// How `GO_BACK` selects the previous tab.
    pub back_behavior: BackBehavior,
}

impl TabRouter {
    /// Creates a tab router with the given back behavior.
    #[must_use]
    pub fn new(back_behavior: BackBehavior) -> Self {
        Self { back_behavior }
    }
}

fn assert_configured<P>(config: &RouterConfig<P>) {
    assert!(
        !config.route_names.is_empty(),
        "a tab navigator needs at least one configured route name"
    );
}

/// Moves the entry for `key` to the end of the history, adding it if absent.
pub(crate) fn history_with_focus(history: &[HistoryEntry], key: Key) -> Vec<HistoryEntry> {
    let mut out: Vec<HistoryEntry> = history
        .iter()
        .filter(|entry| !matches!(entry, HistoryEntry::Route { key: k } if *k == key))
        .cloned()
        .collect();
    out.push(HistoryEntry::Route { key });
    out
}

/// Refocuses `index`, recording the move in the history.
pub(crate) fn focus_tab<P: Clone>(state: &NavigationState<P>, index: usize) -> NavigationState<P> {
    let mut next = state.clone();
    next.index = index;
    next.history = history_with_focus(&state.history, state.routes[index].key.clone());
    next
}

impl<P: Clone> Router<P> for TabRouter {
    fn kind(&self) -> NavigatorKind {
        NavigatorKind::Tabs
    }

    fn initial_state(&self, config: &RouterConfig<P>) -> NavigationState<P> {
        assert_configured(config);
        let routes: Vec<Route<P>> = config
            .route_names
            .iter()
            .map(|name| fresh_route(name, None, config))
            .collect();
        let index = config.initial_index();
        let history = vec![HistoryEntry::Route {
            key: routes[index].key.clone(),
        }];
        NavigationState {
            key: Key::with_name(NavigatorKind::Tabs.as_str()),
            index,
            route_names: config.route_names.clone(),
            routes,
            kind: NavigatorKind::Tabs,
            stale: false,
            history,
        }
    }

    fn rehydrate(&self, partial: PartialState<P>, config: &RouterConfig<P>) -> NavigationState<P> {
        assert_configured(config);
        // The focused entry of the partial decides which tab to focus, by
        // name, since positions shift as unknown routes are dropped.
        let focused_name: Option<String> = (!partial.routes.is_empty())
            .then(|| {
                let at = partial.index.unwrap_or(0).min(partial.routes.len() - 1);
                partial.routes[at].name.clone()
            });
        let mut pool = partial.routes;
        let routes: Vec<Route<P>> = config
            .route_names
            .iter()
            .map(|name| {
                if let Some(at) = pool.iter().position(|route| route.name == *name) {
                    let restored = pool.swap_remove(at);
                    Route {
                        key: restored.key.unwrap_or_else(|| Key::with_name(name)),
                        params: restored
                            .params
                            .or_else(|| config.params_for(name).cloned()),
                        state: restored.state.map(NestedState::Stale),
                        name: restored.name,
                    }
                } else {
                    fresh_route(name, None, config)
                }
            })
            .collect();
        let index = focused_name
            .and_then(|name| routes.iter().position(|route| route.name == name))
            .unwrap_or_else(|| config.initial_index());
        let history = vec![HistoryEntry::Route {
            key: routes[index].key.clone(),
        }];
        NavigationState {
            key: Key::with_name(NavigatorKind::Tabs.as_str()),
            index,
            route_names: config.route_names.clone(),
            routes,
            kind: NavigatorKind::Tabs,
            stale: false,
            history,
        }
    }

    fn state_for_route_names_change(
        &self,
        state: &Rc<NavigationState<P>>,
        config: &RouterConfig<P>,
    ) -> Rc<NavigationState<P>> {
        assert_configured(config);
        let routes: Vec<Route<P>> = config
            .route_names
            .iter()
            .map(|name| {
                state
                    .routes
                    .iter()
                    .find(|route| route.name == *name)
                    .cloned()
                    .unwrap_or_else(|| fresh_route(name, None, config))
            })
            .collect();
        let focused_name = &state.focused_route().name;
        let index = routes
            .iter()
            .position(|route| &route.name == focused_name)
            .unwrap_or_else(|| config.initial_index());
        let mut next = (**state).clone();
        next.history = vec![HistoryEntry::Route {
            key: routes[index].key.clone(),
        }];
        next.route_names = config.route_names.clone();
        next.routes = routes;
        next.index = index;
        next.stale = false;
        Rc::new(next)
    }

    fn state_for_route_focus(
        &self,
        state: &Rc<NavigationState<P>>,
        route_key: &Key,
    ) -> Rc<NavigationState<P>> {
        match state.route_index(route_key) {
            Some(index) if index != state.index => Rc::new(focus_tab(state, index)),
            _ => state.clone(),
        }
    }

    fn state_for_action(
        &self,
        state: &Rc<NavigationState<P>>,
        action: &NavigationAction<P>,
        config: &RouterConfig<P>,
    ) -> Option<Rc<NavigationState<P>>> {
        match &action.kind {
            ActionKind::JumpTo { name, params } | ActionKind::Navigate { name, params } => {
                let index = state.routes.iter().position(|route| route.name == *name)?;
                if index == state.index && params.is_none() {
                    return Some(state.clone());
                }
                let mut next = focus_tab(state, index);
                if let Some(params) = params {
                    next.routes[index].params = Some(params.clone());
                }
                Some(Rc::new(next))
            }
            ActionKind::GoBack => match self.back_behavior {
                BackBehavior::History => {
                    if state.history.len() < 2 {
                        return None;
                    }
                    let mut history = state.history.clone();
                    history.pop();
                    let key = history.iter().rev().find_map(|entry| match entry {
                        HistoryEntry::Route { key } => Some(key.clone()),
                        HistoryEntry::Drawer => None,
                    })?;
                    let index = state.route_index(&key)?;
                    let mut next = (**state).clone();
                    next.index = index;
                    next.history = history;
                    Some(Rc::new(next))
                }
                BackBehavior::Order => {
                    (state.index > 0).then(|| Rc::new(focus_tab(state, state.index - 1)))
                }
                BackBehavior::InitialRoute => {
                    let index = config.initial_index().min(state.routes.len() - 1);
                    (index != state.index).then(|| Rc::new(focus_tab(state, index)))
                }
                BackBehavior::FirstRoute => {
                    (state.index > 0).then(|| Rc::new(focus_tab(state, 0)))
                }
                BackBehavior::None => None,
            },
            _ => common_state_for_action(self, state, action, config),
        }
    }

    fn should_change_focus(&self, action: &NavigationAction<P>) -> bool {
        matches!(
            action.kind,
            ActionKind::Navigate { .. } | ActionKind::JumpTo { .. }
        )
    }
}
