// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cancelable navigation with before-remove vetoes.
//!
//! An editor screen with unsaved changes blocks its own removal; the
//! dispatch still reports handled, so e.g. a hardware back-button handler
//! does not fall through to system default behavior.
//!
//! Run:
//! - `cargo run -p switchback_demos --example prevent_remove`

use std::cell::Cell;
use std::rc::Rc;

use switchback_core::{EventType, Navigator};
use switchback_routers::{NavigationAction, RouterConfig, StackRouter};

fn main() {
    let nav = Navigator::<u32>::root(
        Box::new(StackRouter),
        RouterConfig::new(["Documents", "Editor"]),
    );
    nav.dispatch(NavigationAction::navigate("Editor"));
    let editor_key = nav.state().focused_route().key.clone();

    let dirty = Rc::new(Cell::new(true));

    // The editor vetoes removal while it has unsaved changes.
    let dirty_in_hook = dirty.clone();
    nav.set_before_remove(editor_key.clone(), move |action| {
        let blocked = dirty_in_hook.get();
        if blocked {
            println!("  [editor] blocked `{}`: unsaved changes", action.kind.label());
        }
        blocked
    });

    // It also hears about every attempt, vetoed or not.
    let _sub = nav.on(EventType::BeforeRemove, Some(editor_key), |arg| {
        if let Some(action) = arg.action() {
            println!("  [editor] before-remove event for `{}`", action.kind.label());
        }
    });

    println!("== Prevent remove ==");
    println!("go back with unsaved changes:");
    let handled = nav.dispatch(NavigationAction::go_back());
    println!(
        "  handled: {handled}, still on: {}",
        nav.state().focused_route().name
    );

    println!("save, then go back:");
    dirty.set(false);
    let handled = nav.dispatch(NavigationAction::go_back());
    println!(
        "  handled: {handled}, now on: {}",
        nav.state().focused_route().name
    );
}
