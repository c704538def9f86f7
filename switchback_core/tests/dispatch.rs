// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for action dispatch through a navigator tree: single handling,
//! bubbling order, prevent-remove, focus propagation, and re-entrancy.

mod common;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use common::{Params, commit_counter};
use switchback_core::{EventType, Navigator, VisitedNavigators};
use switchback_routers::{
    Key, NavigationAction, NavigationState, NavigatorKind, PartialState, Router, RouterConfig,
    StackRouter, TabRouter,
};

/// Root tabs hosting a stack under the focused tab, hosting another stack:
/// three navigators deep, with every hosting route already focused.
fn three_level_tree() -> (
    Rc<Navigator<Params>>,
    Rc<Navigator<Params>>,
    Rc<Navigator<Params>>,
) {
    let root = Navigator::<Params>::root(
        Box::new(TabRouter::default()),
        RouterConfig::new(["Main", "Extra"]),
    );
    let main_key = root.state().routes[0].key.clone();
    let mid = Navigator::nested(
        &root,
        &main_key,
        Box::new(StackRouter),
        RouterConfig::new(["Feed"]),
    );
    let feed_key = mid.state().routes[0].key.clone();
    let leaf = Navigator::nested(
        &mid,
        &feed_key,
        Box::new(StackRouter),
        RouterConfig::new(["Leaf", "LeafB"]),
    );
    (root, mid, leaf)
}

#[test]
fn undirected_action_is_handled_exactly_once() {
    let (root, mid, leaf) = three_level_tree();
    let (root_commits, _a) = commit_counter(&root);
    let (mid_commits, _b) = commit_counter(&mid);
    let (leaf_commits, _c) = commit_counter(&leaf);

    let mut visited = VisitedNavigators::new();
    assert!(leaf.on_action(&NavigationAction::navigate("LeafB"), &mut visited));

    assert_eq!(leaf_commits.get(), 1, "the leaf applies the transition");
    assert_eq!(mid_commits.get(), 0, "ancestors only refocus, which is a no-op here");
    assert_eq!(root_commits.get(), 0);
    assert_eq!(leaf.state().focused_route().name, "LeafB");
}

#[test]
fn targeted_noop_is_handled_without_bubbling() {
    let (root, mid, leaf) = three_level_tree();
    let (root_commits, _a) = commit_counter(&root);
    let (mid_commits, _b) = commit_counter(&mid);
    let (leaf_commits, _c) = commit_counter(&leaf);

    // SET_PARAMS whose source is unknown to `mid`: its router declines, but
    // the target pins the action there, so it resolves as a handled no-op.
    let action = NavigationAction::set_params(1)
        .with_target(mid.key())
        .with_source(Key::with_name("nowhere"));
    assert!(mid.dispatch(action));

    assert_eq!(root_commits.get(), 0);
    assert_eq!(mid_commits.get(), 0);
    assert_eq!(leaf_commits.get(), 0);
}

#[test]
fn unhandled_action_reports_false_and_commits_nothing() {
    let (root, _mid, leaf) = three_level_tree();
    let (root_commits, _a) = commit_counter(&root);

    assert!(!leaf.dispatch(NavigationAction::navigate("Nowhere")));
    assert_eq!(root_commits.get(), 0);
}

#[test]
fn bubbling_tries_ancestors_before_children() {
    // Root tabs can jump to `RootOnly`; a sibling child could *also* handle
    // the name by pushing it. The ancestor chain must win, so the sibling
    // never sees the action.
    let root = Navigator::<Params>::root(
        Box::new(TabRouter::default()),
        RouterConfig::new(["Main", "Extra", "RootOnly"]),
    );
    root.set_legacy_child_bubbling(true);

    let main_key = root.state().routes[0].key.clone();
    let mid = Navigator::nested(
        &root,
        &main_key,
        Box::new(StackRouter),
        RouterConfig::new(["Feed"]),
    );
    let feed_key = mid.state().routes[0].key.clone();
    let leaf = Navigator::nested(
        &mid,
        &feed_key,
        Box::new(StackRouter),
        RouterConfig::new(["Leaf"]),
    );

    let extra_key = root.state().routes[1].key.clone();
    let sibling = Navigator::nested(
        &root,
        &extra_key,
        Box::new(StackRouter),
        RouterConfig::new(["Other", "RootOnly"]),
    );

    assert!(leaf.dispatch(NavigationAction::navigate("RootOnly")));

    assert_eq!(root.state().index, 2, "the grandparent handled the action");
    assert_eq!(
        sibling.state().routes.len(),
        1,
        "the sibling child must not also handle it"
    );
}

/// Stack router wrapper that records when it is asked to resolve an action.
struct RecordingRouter {
    name: &'static str,
    log: Rc<RefCell<Vec<&'static str>>>,
}

impl Router<Params> for RecordingRouter {
    fn kind(&self) -> NavigatorKind {
        <StackRouter as Router<Params>>::kind(&StackRouter)
    }

    fn initial_state(&self, config: &RouterConfig<Params>) -> NavigationState<Params> {
        <StackRouter as Router<Params>>::initial_state(&StackRouter, config)
    }

    fn rehydrate(
        &self,
        partial: PartialState<Params>,
        config: &RouterConfig<Params>,
    ) -> NavigationState<Params> {
        <StackRouter as Router<Params>>::rehydrate(&StackRouter, partial, config)
    }

    fn state_for_route_names_change(
        &self,
        state: &Rc<NavigationState<Params>>,
        config: &RouterConfig<Params>,
    ) -> Rc<NavigationState<Params>> {
        <StackRouter as Router<Params>>::state_for_route_names_change(&StackRouter, state, config)
    }

    fn state_for_route_focus(
        &self,
        state: &Rc<NavigationState<Params>>,
        route_key: &Key,
    ) -> Rc<NavigationState<Params>> {
        <StackRouter as Router<Params>>::state_for_route_focus(&StackRouter, state, route_key)
    }

    fn state_for_action(
        &self,
        state: &Rc<NavigationState<Params>>,
        action: &NavigationAction<Params>,
        config: &RouterConfig<Params>,
    ) -> Option<Rc<NavigationState<Params>>> {
        self.log.borrow_mut().push(self.name);
        <StackRouter as Router<Params>>::state_for_action(&StackRouter, state, action, config)
    }

    fn should_change_focus(&self, action: &NavigationAction<Params>) -> bool {
        <StackRouter as Router<Params>>::should_change_focus(&StackRouter, action)
    }
}

#[test]
fn children_are_tried_in_reverse_mount_order() {
    let log: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));
    let root = Navigator::<Params>::root(
        Box::new(TabRouter::default()),
        RouterConfig::new(["T1", "T2", "T3"]),
    );
    root.set_legacy_child_bubbling(true);

    // Mount order A, B, C; only A can handle the dispatched name.
    let configs = [
        ("A", 0_usize, RouterConfig::new(["AHome", "OnlyA"])),
        ("B", 1, RouterConfig::new(["BHome"])),
        ("C", 2, RouterConfig::new(["CHome"])),
    ];
    let mut children = Vec::new();
    for (name, tab, config) in configs {
        let route_key = root.state().routes[tab].key.clone();
        let router = RecordingRouter {
            name,
            log: log.clone(),
        };
        children.push(Navigator::nested(&root, &route_key, Box::new(router), config));
    }

    assert!(root.dispatch(NavigationAction::navigate("OnlyA")));

    assert_eq!(
        *log.borrow(),
        vec!["C", "B", "A"],
        "most recently mounted child is asked first"
    );
    assert_eq!(children[0].state().focused_route().name, "OnlyA");
    assert_eq!(children[1].state().routes.len(), 1);
    assert_eq!(children[2].state().routes.len(), 1);
}

#[test]
fn prevent_remove_blocks_the_commit_but_reports_handled() {
    let nav = Navigator::<Params>::root(
        Box::new(StackRouter),
        RouterConfig::new(["Home", "Draft"]),
    );
    assert!(nav.navigate("Draft"));
    let draft_key = nav.state().focused_route().key.clone();

    nav.set_before_remove(draft_key.clone(), |_| true);
    let (commits, _guard) = commit_counter(&nav);

    assert!(nav.go_back(), "a blocked removal still reports handled");
    assert_eq!(commits.get(), 0);
    assert_eq!(nav.state().routes.len(), 2, "the draft route survived");

    nav.clear_before_remove(&draft_key);
    assert!(nav.go_back());
    assert_eq!(nav.state().routes.len(), 1);
}

#[test]
fn before_remove_event_listener_can_block() {
    let nav = Navigator::<Params>::root(
        Box::new(StackRouter),
        RouterConfig::new(["Home", "Draft"]),
    );
    assert!(nav.navigate("Draft"));
    let draft_key = nav.state().focused_route().key.clone();

    let blocked = Rc::new(Cell::new(true));
    let blocked_in_listener = blocked.clone();
    let _veto = nav.on(EventType::BeforeRemove, Some(draft_key), move |arg| {
        if blocked_in_listener.get() {
            arg.prevent_default();
        }
    });

    assert!(nav.go_back());
    assert_eq!(nav.state().routes.len(), 2);

    blocked.set(false);
    assert!(nav.go_back());
    assert_eq!(nav.state().routes.len(), 1);
}

#[test]
fn nested_navigator_vetoes_removal_of_its_hosting_route() {
    let root = Navigator::<Params>::root(
        Box::new(StackRouter),
        RouterConfig::new(["Main", "Sub"]),
    );
    assert!(root.navigate("Sub"));
    let sub_key = root.state().focused_route().key.clone();

    let child = Navigator::nested(
        &root,
        &sub_key,
        Box::new(StackRouter),
        RouterConfig::new(["Inner", "Draft"]),
    );
    assert!(child.navigate("Draft"));
    let draft_key = child.state().focused_route().key.clone();
    child.set_before_remove(draft_key, |_| true);

    // Popping `Sub` would drop the child's draft; the child's hook answers.
    assert!(root.go_back());
    assert_eq!(root.state().routes.len(), 2, "hosting route survived");
}

#[test]
fn focus_propagates_through_every_ancestor() {
    let root = Navigator::<Params>::root(
        Box::new(TabRouter::default()),
        RouterConfig::new(["Left", "Right"]),
    );
    let right_key = root.state().routes[1].key.clone();
    let mid = Navigator::nested(
        &root,
        &right_key,
        Box::new(TabRouter::default()),
        RouterConfig::new(["First", "Second"]),
    );
    let second_key = mid.state().routes[1].key.clone();
    let leaf = Navigator::nested(
        &mid,
        &second_key,
        Box::new(StackRouter),
        RouterConfig::new(["Leaf", "Detail"]),
    );

    assert_eq!(root.state().index, 0);
    assert_eq!(mid.state().index, 0);

    assert!(leaf.navigate("Detail"));

    assert_eq!(leaf.state().focused_route().name, "Detail");
    assert_eq!(mid.state().index, 1, "mid refocused onto the hosting tab");
    assert_eq!(root.state().index, 1, "root refocused, all in one dispatch");
}

#[test]
fn set_params_does_not_shift_ancestor_focus() {
    let root = Navigator::<Params>::root(
        Box::new(TabRouter::default()),
        RouterConfig::new(["Left", "Right"]),
    );
    let right_key = root.state().routes[1].key.clone();
    let child = Navigator::nested(
        &root,
        &right_key,
        Box::new(StackRouter),
        RouterConfig::new(["Inner"]),
    );

    assert!(child.set_params(9));
    assert_eq!(child.state().focused_route().params, Some(9));
    assert_eq!(root.state().index, 0, "SET_PARAMS is not focus-changing");
}

#[test]
fn identity_noop_emits_no_state_event() {
    use switchback_routers::DrawerRouter;

    let nav = Navigator::<Params>::root(
        Box::new(DrawerRouter::default()),
        RouterConfig::new(["Feed", "Account"]),
    );
    let state_events = Rc::new(Cell::new(0));
    let counter = state_events.clone();
    let _sub = nav.on(EventType::State, None, move |_| {
        counter.set(counter.get() + 1);
    });

    let noop_seen = Rc::new(Cell::new(false));
    let noop_flag = noop_seen.clone();
    nav.set_on_dispatch(move |_, unchanged| {
        if unchanged {
            noop_flag.set(true);
        }
    });

    assert!(nav.dispatch(NavigationAction::open_drawer()));
    assert_eq!(state_events.get(), 1);

    // Opening an open drawer: handled, identical state, no event.
    assert!(nav.dispatch(NavigationAction::open_drawer()));
    assert_eq!(state_events.get(), 1);
    assert!(noop_seen.get(), "the dispatch observer still sees the no-op");
}

#[test]
fn commit_emits_blur_then_focus_for_the_focus_change() {
    let nav = Navigator::<Params>::root(
        Box::new(StackRouter),
        RouterConfig::new(["Home", "Detail"]),
    );
    let home_key = nav.state().focused_route().key.clone();

    let log: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));
    let blur_log = log.clone();
    let _blur = nav.on(EventType::Blur, Some(home_key), move |_| {
        blur_log.borrow_mut().push("blur home");
    });
    let focus_log = log.clone();
    let _focus = nav.on(EventType::Focus, None, move |_| {
        focus_log.borrow_mut().push("focus");
    });

    assert!(nav.navigate("Detail"));
    assert_eq!(*log.borrow(), vec!["blur home", "focus"]);
}

#[test]
fn reentrant_dispatch_from_a_listener_is_isolated() {
    let nav = Navigator::<Params>::root(
        Box::new(StackRouter),
        RouterConfig::new(["Home", "Detail", "Extra"]),
    );

    let fired = Rc::new(Cell::new(false));
    let fired_in_listener = fired.clone();
    let nav_in_listener = nav.clone();
    let _sub = nav.on(EventType::State, None, move |_| {
        if !fired_in_listener.get() {
            fired_in_listener.set(true);
            // A nested dispatch gets its own fresh visited set.
            assert!(nav_in_listener.dispatch(NavigationAction::push("Extra")));
        }
    });

    assert!(nav.dispatch(NavigationAction::navigate("Detail")));

    let names: Vec<String> = nav
        .state()
        .routes
        .iter()
        .map(|route| route.name.clone())
        .collect();
    assert_eq!(names, ["Home", "Detail", "Extra"]);
}

#[test]
fn visited_set_prevents_a_second_attempt() {
    let (_root, _mid, leaf) = three_level_tree();

    let mut visited = VisitedNavigators::new();
    assert!(leaf.on_action(&NavigationAction::navigate("LeafB"), &mut visited));
    assert_eq!(visited.len(), 1, "handled locally; no bubbling needed");

    // Reusing the set: the leaf was already visited, so it declines
    // immediately without consulting its router or bubbling further.
    assert!(!leaf.on_action(&NavigationAction::navigate("LeafB"), &mut visited));
    assert_eq!(visited.len(), 1, "an already-visited navigator adds nothing");

    // An undirected action the leaf cannot handle walks the whole chain,
    // visiting each ancestor exactly once.
    let mut visited = VisitedNavigators::new();
    assert!(!leaf.on_action(&NavigationAction::navigate("Nowhere"), &mut visited));
    assert_eq!(visited.len(), 3, "leaf, mid, and root each attempted once");
}
