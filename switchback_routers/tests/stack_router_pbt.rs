// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property-based tests for router state invariants.
//!
//! Every committed navigation state must keep `index` in bounds and route
//! keys pairwise distinct, no matter which action sequence produced it.

use std::rc::Rc;

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use switchback_routers::{
    BackBehavior, DrawerRouter, NavigationAction, Router, RouterConfig, StackRouter, TabRouter,
};

const NAMES: [&str; 4] = ["A", "B", "C", "D"];

fn keys_distinct(state: &switchback_routers::NavigationState<()>) -> Result<(), TestCaseError> {
    for (i, a) in state.routes.iter().enumerate() {
        for b in &state.routes[i + 1..] {
            prop_assert_ne!(&a.key, &b.key, "route keys must be pairwise distinct");
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn stack_invariants_hold_under_random_actions(
        ops in prop::collection::vec((0u8..5, 0usize..4, 1usize..4), 0..48),
    ) {
        let config: RouterConfig<()> = RouterConfig::new(NAMES);
        let router = StackRouter;
        let mut state = Rc::new(router.initial_state(&config));

        for (op, name, count) in ops {
            let action: NavigationAction<()> = match op {
                0 => NavigationAction::navigate(NAMES[name]),
                1 => NavigationAction::push(NAMES[name]),
                2 => NavigationAction::pop(count),
                3 => NavigationAction::replace(NAMES[name]),
                _ => NavigationAction::go_back(),
            };
            if let Some(next) = router.state_for_action(&state, &action, &config) {
                next.check_integrity();
                prop_assert!(next.index < next.routes.len());
                keys_distinct(&next)?;
                state = next;
            }
        }
    }

    #[test]
    fn tab_history_always_resolves_under_random_actions(
        ops in prop::collection::vec((0u8..3, 0usize..4), 0..48),
    ) {
        let config: RouterConfig<()> = RouterConfig::new(NAMES);
        let router = TabRouter::new(BackBehavior::History);
        let mut state = Rc::new(router.initial_state(&config));

        for (op, name) in ops {
            let action: NavigationAction<()> = match op {
                0 => NavigationAction::jump_to(NAMES[name]),
                1 => NavigationAction::navigate(NAMES[name]),
                _ => NavigationAction::go_back(),
            };
            if let Some(next) = router.state_for_action(&state, &action, &config) {
                next.check_integrity();
                prop_assert_eq!(next.routes.len(), NAMES.len(), "tabs never add or drop routes");
                keys_distinct(&next)?;
                state = next;
            }
        }
    }

    #[test]
    fn drawer_open_state_is_consistent_under_random_actions(
        ops in prop::collection::vec((0u8..5, 0usize..4), 0..48),
    ) {
        let config: RouterConfig<()> = RouterConfig::new(NAMES);
        let router = DrawerRouter::default();
        let mut state = Rc::new(router.initial_state(&config));

        for (op, name) in ops {
            let action: NavigationAction<()> = match op {
                0 => NavigationAction::jump_to(NAMES[name]),
                1 => NavigationAction::open_drawer(),
                2 => NavigationAction::close_drawer(),
                3 => NavigationAction::toggle_drawer(),
                _ => NavigationAction::go_back(),
            };
            if let Some(next) = router.state_for_action(&state, &action, &config) {
                next.check_integrity();
                keys_distinct(&next)?;
                // At most one drawer entry ever lives in the history.
                let drawer_entries = next
                    .history
                    .iter()
                    .filter(|e| matches!(e, switchback_routers::HistoryEntry::Drawer))
                    .count();
                prop_assert!(drawer_entries <= 1);
                state = next;
            }
        }
    }
}
