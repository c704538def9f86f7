// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=switchback_core --heading-base-level=0

//! Switchback Core: the navigation engine.
//!
//! ## Overview
//!
//! This crate hosts a tree of [`Navigator`] instances, each owning one
//! immutable state node from `switchback_routers`, and routes navigation
//! actions through that tree until exactly one navigator handles each
//! action.
//!
//! An action enters at some navigator (often the focused leaf) and is
//! resolved in three steps:
//!
//! 1. **Local**: the navigator's router computes a candidate next state.
//!    A candidate that would remove routes is first offered to the
//!    prevent-remove hooks; any veto cancels the whole transition (and the
//!    dispatch still reports handled, since a blocked removal is a final
//!    outcome).
//! 2. **Up**: an unhandled action is delegated to the parent chain,
//!    root-ward.
//! 3. **Down**: still unhandled, and either addressed to a specific
//!    navigator or with legacy child bubbling enabled, the action is offered
//!    to child navigators, most recently mounted first.
//!
//! A [`VisitedNavigators`] set is threaded by mutable reference through the
//! entire call tree, so each navigator attempts resolution at most once per
//! dispatch — the invariant that keeps bubbling finite. Re-entrant
//! dispatches (a listener dispatching from inside an event callback) get a
//! fresh set and cannot corrupt the outer one.
//!
//! ## Pieces
//!
//! - [`Store`]: one navigator's committed state snapshot with change
//!   watchers.
//! - [`EventEmitter`]: per-navigator pub/sub (`focus`, `blur`, `state`,
//!   `before_remove`, custom), snapshotting listeners per emission.
//! - [`Navigator`]: wiring — router, store, emitter, parent/child handles,
//!   before-remove hooks — plus the dispatch algorithm itself.
//!
//! ## Minimal usage
//!
//! ```
//! use switchback_core::Navigator;
//! use switchback_routers::{NavigationAction, RouterConfig, StackRouter};
//!
//! let nav = Navigator::<()>::root(
//!     Box::new(StackRouter),
//!     RouterConfig::new(["Home", "Details"]),
//! );
//!
//! assert!(nav.dispatch(NavigationAction::navigate("Details")));
//! assert_eq!(nav.state().focused_route().name, "Details");
//!
//! assert!(nav.dispatch(NavigationAction::go_back()));
//! assert_eq!(nav.state().focused_route().name, "Home");
//! ```
//!
//! ## Threading model
//!
//! Everything is single-threaded and synchronous: dispatch, router
//! computation, and listener invocation happen within one call stack.
//! Handles are reference-counted (`Rc`) and intentionally `!Send`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod dispatcher;
pub mod emitter;
pub mod navigator;
pub mod store;

mod prevent_remove;

pub use dispatcher::VisitedNavigators;
pub use emitter::{EventArg, EventEmitter, EventType, Subscription};
pub use navigator::Navigator;
pub use store::{Store, WatchGuard};
