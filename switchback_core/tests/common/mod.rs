// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the `switchback_core` integration tests.

use std::cell::Cell;
use std::rc::Rc;

use switchback_core::{Navigator, WatchGuard};

/// Route params used across the tests.
pub type Params = u32;

/// Counts commits on a navigator's store.
#[allow(dead_code, reason = "not every test binary uses every shared helper")]
pub fn commit_counter(nav: &Rc<Navigator<Params>>) -> (Rc<Cell<usize>>, WatchGuard<Params>) {
    let count = Rc::new(Cell::new(0));
    let count_in_watcher = count.clone();
    let guard = nav.store().watch(move |_| {
        count_in_watcher.set(count_in_watcher.get() + 1);
    });
    (count, guard)
}
