// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation actions and their addressing envelope.
//!
//! An action is a discriminated payload ([`ActionKind`]) plus optional
//! addressing: `target` names the navigator that must handle it (suppressing
//! bubbling past that navigator), `source` names the route it originated
//! from (used for relative resolution, e.g. "pop starting at this route").

use alloc::string::String;

use crate::key::Key;
use crate::state::PartialState;

/// The discriminated payload of a navigation action.
///
/// The common kinds (`Navigate`, `GoBack`, `SetParams`, `Reset`) are
/// understood by every router; the rest are router-defined and ignored by
/// kinds that do not recognize them (the action then bubbles).
#[derive(Clone, Debug, PartialEq)]
pub enum ActionKind<P> {
    /// Focus the named route, popping back to it or adding it as needed.
    Navigate {
        /// Route name to focus.
        name: String,
        /// Params to apply to the focused route.
        params: Option<P>,
    },
    /// Return to the previous route.
    GoBack,
    /// Replace the params of the source route (or the focused one).
    SetParams {
        /// The new params payload.
        params: P,
    },
    /// Replace the navigator's entire state with a rehydrated partial state.
    Reset {
        /// The replacement state, repaired against current configuration.
        state: PartialState<P>,
    },
    /// Stack: push a fresh route even if one with the same name exists.
    Push {
        /// Route name to push.
        name: String,
        /// Params for the new route.
        params: Option<P>,
    },
    /// Stack: remove routes, starting at the source route when given.
    Pop {
        /// How many routes to remove.
        count: usize,
    },
    /// Stack: pop back to the named route, adding it if absent.
    PopTo {
        /// Route name to pop back to.
        name: String,
        /// Params to apply to that route.
        params: Option<P>,
    },
    /// Stack: pop everything above the first route.
    PopToTop,
    /// Stack: replace a route in place with a fresh one.
    Replace {
        /// Route name for the replacement.
        name: String,
        /// Params for the replacement.
        params: Option<P>,
    },
    /// Tabs/drawer: focus the named tab.
    JumpTo {
        /// Route name of the tab.
        name: String,
        /// Params to apply to that tab's route.
        params: Option<P>,
    },
    /// Drawer: open the drawer.
    OpenDrawer,
    /// Drawer: close the drawer.
    CloseDrawer,
    /// Drawer: toggle the drawer.
    ToggleDrawer,
}

impl<P> ActionKind<P> {
    /// Returns the conventional uppercase label for this kind, for logs.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Navigate { .. } => "NAVIGATE",
            Self::GoBack => "GO_BACK",
            Self::SetParams { .. } => "SET_PARAMS",
            Self::Reset { .. } => "RESET",
            Self::Push { .. } => "PUSH",
            Self::Pop { .. } => "POP",
            Self::PopTo { .. } => "POP_TO",
            Self::PopToTop => "POP_TO_TOP",
            Self::Replace { .. } => "REPLACE",
            Self::JumpTo { .. } => "JUMP_TO",
            Self::OpenDrawer => "OPEN_DRAWER",
            Self::CloseDrawer => "CLOSE_DRAWER",
            Self::ToggleDrawer => "TOGGLE_DRAWER",
        }
    }
}

/// A navigation action: payload plus optional addressing.
#[derive(Clone, Debug, PartialEq)]
pub struct NavigationAction<P> {
    /// What to do.
    pub kind: ActionKind<P>,
    /// Navigator key this action is addressed to. When set, only that
    /// navigator may handle the action, and it does not bubble past it.
    pub target: Option<Key>,
    /// Route key the action originated from, for relative resolution.
    pub source: Option<Key>,
}

impl<P> NavigationAction<P> {
    /// Wraps a kind with no addressing.
    #[must_use]
    pub fn new(kind: ActionKind<P>) -> Self {
        Self {
            kind,
            target: None,
            source: None,
        }
    }

    /// `NAVIGATE` to a route name.
    #[must_use]
    pub fn navigate(name: impl Into<String>) -> Self {
        Self::new(ActionKind::Navigate {
            name: name.into(),
            params: None,
        })
    }

    /// `NAVIGATE` to a route name with params.
    #[must_use]
    pub fn navigate_with(name: impl Into<String>, params: P) -> Self {
        Self::new(ActionKind::Navigate {
            name: name.into(),
            params: Some(params),
        })
    }

    /// `GO_BACK`.
    #[must_use]
    pub fn go_back() -> Self {
        Self::new(ActionKind::GoBack)
    }

    /// `SET_PARAMS` for the source route (or the focused one).
    #[must_use]
    pub fn set_params(params: P) -> Self {
        Self::new(ActionKind::SetParams { params })
    }

    /// `RESET` to a partial state.
    #[must_use]
    pub fn reset(state: PartialState<P>) -> Self {
        Self::new(ActionKind::Reset { state })
    }

    /// Stack `PUSH`.
    #[must_use]
    pub fn push(name: impl Into<String>) -> Self {
        Self::new(ActionKind::Push {
            name: name.into(),
            params: None,
        })
    }

    /// Stack `PUSH` with params.
    #[must_use]
    pub fn push_with(name: impl Into<String>, params: P) -> Self {
        Self::new(ActionKind::Push {
            name: name.into(),
            params: Some(params),
        })
    }

    /// Stack `POP`.
    #[must_use]
    pub fn pop(count: usize) -> Self {
        Self::new(ActionKind::Pop { count })
    }

    /// Stack `POP_TO` a route name.
    #[must_use]
    pub fn pop_to(name: impl Into<String>) -> Self {
        Self::new(ActionKind::PopTo {
            name: name.into(),
            params: None,
        })
    }

    /// Stack `POP_TO_TOP`.
    #[must_use]
    pub fn pop_to_top() -> Self {
        Self::new(ActionKind::PopToTop)
    }

    /// Stack `REPLACE`.
    #[must_use]
    pub fn replace(name: impl Into<String>) -> Self {
        Self::new(ActionKind::Replace {
            name: name.into(),
            params: None,
        })
    }

    /// Tab `JUMP_TO`.
    #[must_use]
    pub fn jump_to(name: impl Into<String>) -> Self {
        Self::new(ActionKind::JumpTo {
            name: name.into(),
            params: None,
        })
    }

    /// Tab `JUMP_TO` with params.
    #[must_use]
    pub fn jump_to_with(name: impl Into<String>, params: P) -> Self {
        Self::new(ActionKind::JumpTo {
            name: name.into(),
            params: Some(params),
        })
    }

    /// Drawer `OPEN_DRAWER`.
    #[must_use]
    pub fn open_drawer() -> Self {
        Self::new(ActionKind::OpenDrawer)
    }

    /// Drawer `CLOSE_DRAWER`.
    #[must_use]
    pub fn close_drawer() -> Self {
        Self::new(ActionKind::CloseDrawer)
    }

    /// Drawer `TOGGLE_DRAWER`.
    #[must_use]
    pub fn toggle_drawer() -> Self {
        Self::new(ActionKind::ToggleDrawer)
    }

    /// Addresses the action to a specific navigator.
    #[must_use]
    pub fn with_target(mut self, target: Key) -> Self {
        self.target = Some(target);
        self
    }

    /// Records the route the action originated from.
    #[must_use]
    pub fn with_source(mut self, source: Key) -> Self {
        self.source = Some(source);
        self
    }
}
