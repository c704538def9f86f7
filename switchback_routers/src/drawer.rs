// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawer router: tab behavior plus an open/closed drawer.
//!
//! The drawer's open state lives in the navigation state's `history` as a
//! [`HistoryEntry::Drawer`] entry, so opening and closing are ordinary
//! immutable transitions and `GO_BACK` can close an open drawer before
//! falling back to tab back behavior.

use alloc::rc::Rc;

use crate::action::{ActionKind, NavigationAction};
use crate::key::Key;
use crate::router::{Router, RouterConfig, common_state_for_action};
use crate::state::{HistoryEntry, NavigationState, NavigatorKind, PartialState};
use crate::tabs::{BackBehavior, TabRouter};

/// Router for drawer navigators.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DrawerRouter {
    /// How `GO_BACK` selects the previous tab once the drawer is closed.
    pub back_behavior: BackBehavior,
}

impl DrawerRouter {
    /// Creates a drawer router with the given back behavior.
    #[must_use]
    pub fn new(back_behavior: BackBehavior) -> Self {
        Self { back_behavior }
    }

    /// Returns whether the drawer is open in the given state.
    #[must_use]
    pub fn is_open<P>(state: &NavigationState<P>) -> bool {
        state
            .history
            .iter()
            .any(|entry| matches!(entry, HistoryEntry::Drawer))
    }

    fn tabs(&self) -> TabRouter {
        TabRouter::new(self.back_behavior)
    }

    fn opened<P: Clone>(state: &Rc<NavigationState<P>>) -> Rc<NavigationState<P>> {
        let mut next = (**state).clone();
        next.history.push(HistoryEntry::Drawer);
        Rc::new(next)
    }

    fn closed<P: Clone>(state: &Rc<NavigationState<P>>) -> Rc<NavigationState<P>> {
        let mut next = (**state).clone();
        next.history
            .retain(|entry| !matches!(entry, HistoryEntry::Drawer));
        Rc::new(next)
    }
}

impl<P: Clone> Router<P> for DrawerRouter {
    fn kind(&self) -> NavigatorKind {
        NavigatorKind::Drawer
    }

    fn initial_state(&self, config: &RouterConfig<P>) -> NavigationState<P> {
        let mut state = self.tabs().initial_state(config);
        state.key = Key::with_name(NavigatorKind::Drawer.as_str());
        state.kind = NavigatorKind::Drawer;
        state
    }

    fn rehydrate(&self, partial: PartialState<P>, config: &RouterConfig<P>) -> NavigationState<P> {
        // The drawer comes back closed; only tab focus survives a restore.
        let mut state = self.tabs().rehydrate(partial, config);
        state.key = Key::with_name(NavigatorKind::Drawer.as_str());
        state.kind = NavigatorKind::Drawer;
        state
    }

    fn state_for_route_names_change(
        &self,
        state: &Rc<NavigationState<P>>,
        config: &RouterConfig<P>,
    ) -> Rc<NavigationState<P>> {
        self.tabs().state_for_route_names_change(state, config)
    }

    fn state_for_route_focus(
        &self,
        state: &Rc<NavigationState<P>>,
        route_key: &Key,
    ) -> Rc<NavigationState<P>> {
        self.tabs().state_for_route_focus(state, route_key)
    }

    fn state_for_action(
        &self,
        state: &Rc<NavigationState<P>>,
        action: &NavigationAction<P>,
        config: &RouterConfig<P>,
    ) -> Option<Rc<NavigationState<P>>> {
        match &action.kind {
            ActionKind::OpenDrawer => {
                if Self::is_open(&**state) {
                    return Some(state.clone());
                }
                Some(Self::opened(state))
            }
            ActionKind::CloseDrawer => {
                if Self::is_open(&**state) {
                    return Some(Self::closed(state));
                }
                Some(state.clone())
            }
            ActionKind::ToggleDrawer => {
                if Self::is_open(&**state) {
                    Some(Self::closed(state))
                } else {
                    Some(Self::opened(state))
                }
            }
            ActionKind::GoBack => {
                if Self::is_open(&**state) {
                    return Some(Self::closed(state));
                }
                self.tabs().state_for_action(state, action, config)
            }
            ActionKind::JumpTo { .. } | ActionKind::Navigate { .. } => {
                self.tabs().state_for_action(state, action, config)
            }
            _ => common_state_for_action(self, state, action, config),
        }
    }

    fn should_change_focus(&self, action: &NavigationAction<P>) -> bool {
        self.tabs().should_change_focus(action)
    }
}
