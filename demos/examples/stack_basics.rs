// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stack basics.
//!
//! This minimal example mounts a single stack navigator, navigates forward
//! and back, and prints the committed route list after each dispatch.
//!
//! Run:
//! - `cargo run -p switchback_demos --example stack_basics`

use switchback_core::Navigator;
use switchback_routers::{NavigationAction, RouterConfig, StackRouter};

fn print_routes(label: &str, nav: &std::rc::Rc<Navigator<u32>>) {
    let state = nav.state();
    let names: Vec<&str> = state.routes.iter().map(|r| r.name.as_str()).collect();
    println!("  {label}: {names:?} (focused: {})", state.focused_route().name);
}

fn main() {
    let nav = Navigator::<u32>::root(
        Box::new(StackRouter),
        RouterConfig::new(["Home", "Feed", "Article"]),
    );

    println!("== Stack navigation ==");
    print_routes("initial", &nav);

    nav.dispatch(NavigationAction::navigate("Feed"));
    print_routes("navigate Feed", &nav);

    nav.dispatch(NavigationAction::navigate_with("Article", 42));
    print_routes("navigate Article(42)", &nav);

    // Navigating to a name already on the stack pops back to it.
    nav.dispatch(NavigationAction::navigate("Home"));
    print_routes("navigate Home", &nav);

    nav.dispatch(NavigationAction::push("Feed"));
    nav.dispatch(NavigationAction::push("Feed"));
    print_routes("push Feed twice", &nav);

    nav.dispatch(NavigationAction::pop_to_top());
    print_routes("pop to top", &nav);

    let handled = nav.dispatch(NavigationAction::go_back());
    println!("  go back at the bottom handled: {handled}");
}
