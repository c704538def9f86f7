// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=switchback_routers --heading-base-level=0

//! Switchback Routers: pure state-transition functions for navigation trees.
//!
//! ## Overview
//!
//! This crate defines the navigation data model — [`Key`], [`Route`],
//! [`NavigationState`], [`PartialState`], [`NavigationAction`] — and the
//! [`Router`] trait: for a given navigator kind, a set of pure functions that
//! map `(state, action, config)` to the next state, or signal "not handled
//! here" so the action can bubble to another navigator.
//!
//! Routers never perform the bubbling themselves.
//! Feed them to a dispatcher (for example `switchback_core`), which resolves
//! where in the navigator tree an action lands and commits the result.
//!
//! ## State is immutable
//!
//! A [`NavigationState`] is never mutated in place. Every transition builds a
//! new node behind an [`Rc`](alloc::rc::Rc), structurally sharing untouched
//! subtrees. Identity carries meaning: a router that returns the *same* `Rc`
//! it was given is saying "handled, nothing to do", while `None` means "not
//! handled here". Callers must distinguish the two with [`Rc::ptr_eq`](alloc::rc::Rc::ptr_eq),
//! never with deep equality.
//!
//! ## Routers
//!
//! - [`StackRouter`](stack::StackRouter): push/pop ordering, `NAVIGATE` pops
//!   back to an existing route or pushes a fresh one.
//! - [`TabRouter`](tabs::TabRouter): one route per configured name, focus
//!   switching, history-based back behavior.
//! - [`DrawerRouter`](drawer::DrawerRouter): tab behavior plus an open/closed
//!   drawer tracked in the state's history.
//!
//! All three defer `RESET` and `SET_PARAMS` to shared base behavior, so the
//! common actions work uniformly across navigator kinds.
//!
//! ## Minimal usage
//!
//! ```
//! use std::rc::Rc;
//!
//! use switchback_routers::{NavigationAction, Router, RouterConfig, StackRouter};
//!
//! let router = StackRouter;
//! let config: RouterConfig<()> = RouterConfig::new(["Home", "Profile"]);
//!
//! let state = Rc::new(router.initial_state(&config));
//! assert_eq!(state.routes.len(), 1);
//! assert_eq!(state.routes[0].name, "Home");
//!
//! let next = router
//!     .state_for_action(&state, &NavigationAction::navigate("Profile"), &config)
//!     .expect("navigate to a configured route is handled");
//! assert_eq!(next.routes.len(), 2);
//! assert_eq!(next.index, 1);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod action;
pub mod drawer;
pub mod key;
pub mod router;
pub mod stack;
pub mod state;
pub mod tabs;

pub use action::{ActionKind, NavigationAction};
pub use drawer::DrawerRouter;
pub use key::Key;
pub use router::{Router, RouterConfig};
pub use stack::StackRouter;
pub use state::{
    HistoryEntry, NavigationState, NavigatorKind, NestedState, PartialRoute, PartialState, Route,
};
pub use tabs::{BackBehavior, TabRouter};
