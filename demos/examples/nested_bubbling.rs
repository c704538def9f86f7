// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nested navigators and action bubbling.
//!
//! Builds tabs hosting a stack, dispatches at the leaf, and shows how an
//! action unhandled by the leaf bubbles to the ancestor that can resolve
//! it — while focus propagation keeps every ancestor pointed at the
//! navigated-to leaf.
//!
//! Run:
//! - `cargo run -p switchback_demos --example nested_bubbling`

use switchback_core::Navigator;
use switchback_routers::{NavigationAction, RouterConfig, StackRouter, TabRouter};

fn main() {
    let tabs = Navigator::<u32>::root(
        Box::new(TabRouter::default()),
        RouterConfig::new(["Feed", "Search", "Account"]),
    );
    let feed_tab = tabs.state().routes[0].key.clone();
    let stack = Navigator::nested(
        &tabs,
        &feed_tab,
        Box::new(StackRouter),
        RouterConfig::new(["Posts", "Post"]),
    );

    tabs.set_on_state_change(|composed| {
        println!("  [tree] focused tab index: {}", composed.index);
    });

    println!("== Bubbling ==");

    // Handled by the leaf stack itself.
    println!("dispatch navigate Post at the stack:");
    stack.dispatch(NavigationAction::navigate_with("Post", 7));
    println!("  stack now shows: {}", stack.state().focused_route().name);

    // The stack has no `Search` route; the action bubbles up to the tabs.
    println!("dispatch navigate Search at the stack:");
    stack.dispatch(NavigationAction::navigate("Search"));
    println!(
        "  tabs now focused on: {}",
        tabs.state().focused_route().name
    );

    // The stack can still pop locally; once it reaches its bottom route,
    // GO_BACK bubbles and the tabs' history returns to the previous tab.
    println!("dispatch go back at the stack (pops locally):");
    stack.dispatch(NavigationAction::go_back());
    println!("  stack now shows: {}", stack.state().focused_route().name);

    println!("dispatch go back at the stack again (bubbles to the tabs):");
    stack.dispatch(NavigationAction::go_back());
    println!(
        "  tabs now focused on: {}",
        tabs.state().focused_route().name
    );

    // Unknown everywhere: dispatch reports unhandled.
    let handled = stack.dispatch(NavigationAction::navigate("Nowhere"));
    println!("navigate Nowhere handled: {handled}");
}
