// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `switchback_routers` + `switchback_core` dispatch paths.

use std::rc::Rc;

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use switchback_core::Navigator;
use switchback_routers::{
    NavigationAction, Router, RouterConfig, StackRouter, TabRouter,
};

type Params = u32;

fn bench_stack_router(c: &mut Criterion) {
    let config: RouterConfig<Params> = RouterConfig::new(["Home", "Feed", "Detail"]);
    let router = StackRouter;
    let state = Rc::new(router.initial_state(&config));

    c.bench_function("stack_router/navigate_push", |b| {
        let action = NavigationAction::navigate("Detail");
        b.iter(|| {
            black_box(router.state_for_action(black_box(&state), &action, &config));
        });
    });

    let deep = {
        let mut current = state.clone();
        for name in ["Feed", "Detail", "Feed", "Detail"] {
            current = router
                .state_for_action(&current, &NavigationAction::push(name), &config)
                .expect("push is handled");
        }
        current
    };
    c.bench_function("stack_router/pop_from_depth_5", |b| {
        let action = NavigationAction::pop(1);
        b.iter(|| {
            black_box(router.state_for_action(black_box(&deep), &action, &config));
        });
    });
}

fn bench_dispatch(c: &mut Criterion) {
    c.bench_function("dispatch/navigate_and_back", |b| {
        b.iter_batched(
            || {
                Navigator::<Params>::root(
                    Box::new(StackRouter),
                    RouterConfig::new(["Home", "Detail"]),
                )
            },
            |nav| {
                assert!(nav.dispatch(NavigationAction::navigate("Detail")));
                assert!(nav.dispatch(NavigationAction::go_back()));
            },
            BatchSize::SmallInput,
        );
    });

    c.bench_function("dispatch/nested_focus_propagation", |b| {
        b.iter_batched(
            || {
                let root = Navigator::<Params>::root(
                    Box::new(TabRouter::default()),
                    RouterConfig::new(["Left", "Right"]),
                );
                let right = root.state().routes[1].key.clone();
                let mid = Navigator::nested(
                    &root,
                    &right,
                    Box::new(TabRouter::default()),
                    RouterConfig::new(["First", "Second"]),
                );
                let second = mid.state().routes[1].key.clone();
                let leaf = Navigator::nested(
                    &mid,
                    &second,
                    Box::new(StackRouter),
                    RouterConfig::new(["Leaf", "Detail"]),
                );
                (root, mid, leaf)
            },
            |(root, _mid, leaf)| {
                assert!(leaf.dispatch(NavigationAction::navigate("Detail")));
                assert_eq!(root.state().index, 1);
            },
            BatchSize::SmallInput,
        );
    });

    c.bench_function("dispatch/unhandled_bubbles_everywhere", |b| {
        b.iter_batched(
            || {
                let root = Navigator::<Params>::root(
                    Box::new(TabRouter::default()),
                    RouterConfig::new(["Left", "Right"]),
                );
                let left = root.state().routes[0].key.clone();
                let leaf = Navigator::nested(
                    &root,
                    &left,
                    Box::new(StackRouter),
                    RouterConfig::new(["Leaf"]),
                );
                (root, leaf)
            },
            |(_root, leaf)| {
                assert!(!leaf.dispatch(NavigationAction::navigate("Nowhere")));
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_stack_router, bench_dispatch);
criterion_main!(benches);
