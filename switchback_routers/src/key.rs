// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Opaque keys identifying navigator instances and routes.

use alloc::format;
use alloc::sync::Arc;
use core::borrow::Borrow;
use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};

/// Process-wide counter backing [`Key::with_name`].
static NEXT_KEY_ID: AtomicU64 = AtomicU64::new(0);

/// Opaque unique identifier for a navigator instance or a route.
///
/// Keys are cheap to clone (shared string) and are compared by value.
/// Fresh keys come from [`Key::with_name`], which appends a process-wide
/// monotonic counter to a human-readable prefix, so generated keys are
/// unique within a process and readable in logs and test failures.
/// Keys arriving in restored state are wrapped verbatim with
/// [`Key::from_raw`].
///
/// # Example
///
/// ```
/// use switchback_routers::Key;
///
/// let a = Key::with_name("Home");
/// let b = Key::with_name("Home");
/// assert_ne!(a, b);
/// assert!(a.as_str().starts_with("Home-"));
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(Arc<str>);

impl Key {
    /// Generates a fresh key with the given name prefix.
    #[must_use]
    pub fn with_name(name: &str) -> Self {
        let id = NEXT_KEY_ID.fetch_add(1, Ordering::Relaxed);
        Self(Arc::from(format!("{name}-{id}").as_str()))
    }

    /// Wraps an existing identifier verbatim.
    ///
    /// Used when adopting keys from restored state; uniqueness is the
    /// restorer's responsibility and is re-checked when state is committed.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        Self(Arc::from(raw))
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({})", self.0)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}
