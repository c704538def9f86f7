// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-navigator event emitter.
//!
//! ## Overview
//!
//! Each navigator owns one [`EventEmitter`]. Listeners subscribe to an
//! [`EventType`], optionally scoped to a single route (the usual case for
//! screen-level `focus`/`blur`/`before_remove` listeners), and receive an
//! [`EventArg`] they can inspect and — for cancelable events — veto with
//! [`EventArg::prevent_default`].
//!
//! ## Emission semantics
//!
//! The listener list is snapshotted at emission start: listeners subscribed
//! or dropped during an emission only affect future emissions. Listeners run
//! synchronously, in registration order. A listener may dispatch navigation
//! actions re-entrantly; the emitter holds no borrow across listener calls.

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

use smallvec::SmallVec;
use switchback_routers::{Key, NavigationAction, NavigationState};

/// The kind of a navigation event.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventType {
    /// A route came into focus.
    Focus,
    /// A route lost focus.
    Blur,
    /// The navigator committed a new state.
    State,
    /// A route is about to be removed; cancelable.
    BeforeRemove,
    /// An application-defined event.
    Custom(String),
}

/// The payload handed to event listeners.
pub struct EventArg<P> {
    event: EventType,
    target: Option<Key>,
    action: Option<NavigationAction<P>>,
    state: Option<Rc<NavigationState<P>>>,
    can_prevent_default: bool,
    default_prevented: bool,
}

impl<P> EventArg<P> {
    /// The event kind being emitted.
    #[must_use]
    pub fn event(&self) -> &EventType {
        &self.event
    }

    /// The route this event is addressed to, if any.
    #[must_use]
    pub fn target(&self) -> Option<&Key> {
        self.target.as_ref()
    }

    /// The action that triggered the event (`before_remove` carries one).
    #[must_use]
    pub fn action(&self) -> Option<&NavigationAction<P>> {
        self.action.as_ref()
    }

    /// The committed state (`state` events carry one).
    #[must_use]
    pub fn state(&self) -> Option<&Rc<NavigationState<P>>> {
        self.state.as_ref()
    }

    /// Whether this event can be canceled.
    #[must_use]
    pub fn can_prevent_default(&self) -> bool {
        self.can_prevent_default
    }

    /// Whether a listener has canceled this event.
    #[must_use]
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Cancels the event. No-op (with a warning) for non-cancelable events.
    pub fn prevent_default(&mut self) {
        if self.can_prevent_default {
            self.default_prevented = true;
        } else {
            log::warn!(
                "`prevent_default` called on a non-cancelable `{:?}` event",
                self.event,
            );
        }
    }
}

impl<P> fmt::Debug for EventArg<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventArg")
            .field("event", &self.event)
            .field("target", &self.target)
            .field("default_prevented", &self.default_prevented)
            .finish_non_exhaustive()
    }
}

type Listener<P> = Box<dyn Fn(&mut EventArg<P>)>;
type ListenerList<P> = RefCell<Vec<Rc<ListenerEntry<P>>>>;

struct ListenerEntry<P> {
    id: u64,
    event: EventType,
    target: Option<Key>,
    /// One-shot listeners are retired after their first invocation.
    once: bool,
    callback: Listener<P>,
}

/// Per-navigator publish/subscribe for navigation events.
pub struct EventEmitter<P> {
    listeners: Rc<ListenerList<P>>,
    next_id: Cell<u64>,
}

impl<P> EventEmitter<P> {
    /// Creates an emitter with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self {
            listeners: Rc::new(RefCell::new(Vec::new())),
            next_id: Cell::new(0),
        }
    }

    /// Subscribes to an event, optionally scoped to one route.
    ///
    /// A scoped listener sees events addressed to its route, plus broadcast
    /// emissions with no target; an unscoped listener sees every event of
    /// its type on this navigator. Dropping the returned [`Subscription`]
    /// unsubscribes.
    #[must_use]
    pub fn subscribe(
        &self,
        event: EventType,
        target: Option<Key>,
        callback: impl Fn(&mut EventArg<P>) + 'static,
    ) -> Subscription<P> {
        self.push_listener(event, target, false, Box::new(callback))
    }

    /// Subscribes a one-shot listener: it runs for the first matching event
    /// and is then retired automatically.
    #[must_use]
    pub fn subscribe_once(
        &self,
        event: EventType,
        target: Option<Key>,
        callback: impl Fn(&mut EventArg<P>) + 'static,
    ) -> Subscription<P> {
        self.push_listener(event, target, true, Box::new(callback))
    }

    fn push_listener(
        &self,
        event: EventType,
        target: Option<Key>,
        once: bool,
        callback: Listener<P>,
    ) -> Subscription<P> {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push(Rc::new(ListenerEntry {
            id,
            event,
            target,
            once,
            callback,
        }));
        Subscription {
            listeners: Rc::downgrade(&self.listeners),
            id,
        }
    }

    /// Emits an event and returns whether a listener canceled it.
    ///
    /// When `target` is set, only listeners scoped to that route (plus
    /// unscoped listeners) are invoked; otherwise every listener of the
    /// event type runs.
    pub fn emit(
        &self,
        event: EventType,
        target: Option<Key>,
        action: Option<NavigationAction<P>>,
        state: Option<Rc<NavigationState<P>>>,
        can_prevent_default: bool,
    ) -> bool {
        let snapshot: SmallVec<[Rc<ListenerEntry<P>>; 8]> =
            self.listeners.borrow().iter().cloned().collect();
        let mut arg = EventArg {
            event,
            target,
            action,
            state,
            can_prevent_default,
            default_prevented: false,
        };
        let mut retired: SmallVec<[u64; 4]> = SmallVec::new();
        for entry in snapshot {
            if entry.event != arg.event {
                continue;
            }
            let scoped_out = match (&entry.target, &arg.target) {
                (Some(scope), Some(target)) => scope != target,
                (Some(_), None) | (None, _) => false,
            };
            if scoped_out {
                continue;
            }
            (entry.callback)(&mut arg);
            if entry.once {
                retired.push(entry.id);
            }
        }
        if !retired.is_empty() {
            self.listeners
                .borrow_mut()
                .retain(|entry| !retired.contains(&entry.id));
        }
        arg.default_prevented
    }

    /// Number of live subscriptions, for diagnostics.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl<P> Default for EventEmitter<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> fmt::Debug for EventEmitter<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventEmitter")
            .field("listeners", &self.listeners.borrow().len())
            .finish_non_exhaustive()
    }
}

/// Unsubscribes its listener from the [`EventEmitter`] on drop.
pub struct Subscription<P> {
    listeners: Weak<ListenerList<P>>,
    id: u64,
}

impl<P> Drop for Subscription<P> {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.borrow_mut().retain(|entry| entry.id != self.id);
        }
    }
}

impl<P> fmt::Debug for Subscription<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use core::cell::RefCell;

    use super::*;

    type Log = Rc<RefCell<Vec<&'static str>>>;

    #[test]
    fn listeners_run_in_registration_order() {
        let emitter: EventEmitter<()> = EventEmitter::new();
        let log: Log = Rc::new(RefCell::new(Vec::new()));

        let first_log = log.clone();
        let _a = emitter.subscribe(EventType::State, None, move |_| {
            first_log.borrow_mut().push("first");
        });
        let second_log = log.clone();
        let _b = emitter.subscribe(EventType::State, None, move |_| {
            second_log.borrow_mut().push("second");
        });

        emitter.emit(EventType::State, None, None, None, false);
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn scoped_listeners_only_see_their_route() {
        let emitter: EventEmitter<()> = EventEmitter::new();
        let here = Key::with_name("Here");
        let elsewhere = Key::with_name("Elsewhere");
        let log: Log = Rc::new(RefCell::new(Vec::new()));

        let scoped_log = log.clone();
        let _scoped = emitter.subscribe(EventType::Focus, Some(here.clone()), move |_| {
            scoped_log.borrow_mut().push("scoped");
        });
        let global_log = log.clone();
        let _global = emitter.subscribe(EventType::Focus, None, move |_| {
            global_log.borrow_mut().push("global");
        });

        emitter.emit(EventType::Focus, Some(elsewhere), None, None, false);
        assert_eq!(*log.borrow(), vec!["global"]);

        emitter.emit(EventType::Focus, Some(here), None, None, false);
        assert_eq!(*log.borrow(), vec!["global", "scoped", "global"]);
    }

    #[test]
    fn unsubscribe_is_drop() {
        let emitter: EventEmitter<()> = EventEmitter::new();
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let sub_log = log.clone();
        let sub = emitter.subscribe(EventType::State, None, move |_| {
            sub_log.borrow_mut().push("fired");
        });
        assert_eq!(emitter.listener_count(), 1);

        drop(sub);
        assert_eq!(emitter.listener_count(), 0);
        emitter.emit(EventType::State, None, None, None, false);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn one_shot_listener_fires_exactly_once() {
        let emitter: EventEmitter<()> = EventEmitter::new();
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let once_log = log.clone();
        let _once = emitter.subscribe_once(EventType::Focus, None, move |_| {
            once_log.borrow_mut().push("once");
        });

        emitter.emit(EventType::Blur, None, None, None, false);
        assert!(log.borrow().is_empty(), "non-matching events do not retire it");

        emitter.emit(EventType::Focus, None, None, None, false);
        emitter.emit(EventType::Focus, None, None, None, false);
        assert_eq!(*log.borrow(), vec!["once"]);
        assert_eq!(emitter.listener_count(), 0);
    }

    #[test]
    fn custom_events_are_keyed_by_name() {
        use alloc::string::String;

        let emitter: EventEmitter<()> = EventEmitter::new();
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let tab_log = log.clone();
        let _tab = emitter.subscribe(
            EventType::Custom(String::from("tabPress")),
            None,
            move |_| {
                tab_log.borrow_mut().push("tabPress");
            },
        );

        emitter.emit(
            EventType::Custom(String::from("tabLongPress")),
            None,
            None,
            None,
            false,
        );
        assert!(log.borrow().is_empty(), "a different custom name does not match");

        emitter.emit(
            EventType::Custom(String::from("tabPress")),
            None,
            None,
            None,
            false,
        );
        assert_eq!(*log.borrow(), vec!["tabPress"]);
    }

    #[test]
    fn prevent_default_requires_cancelable() {
        let emitter: EventEmitter<()> = EventEmitter::new();
        let _veto = emitter.subscribe(EventType::BeforeRemove, None, |arg| {
            arg.prevent_default();
        });
        assert!(emitter.emit(EventType::BeforeRemove, None, None, None, true));
        assert!(!emitter.emit(EventType::BeforeRemove, None, None, None, false));
    }

    #[test]
    fn listeners_added_during_emission_wait_for_the_next_one() {
        let emitter: Rc<EventEmitter<()>> = Rc::new(EventEmitter::new());
        let log: Log = Rc::new(RefCell::new(Vec::new()));

        let emitter_in_listener = emitter.clone();
        let log_in_listener = log.clone();
        let slot: Rc<RefCell<Vec<Subscription<()>>>> = Rc::new(RefCell::new(Vec::new()));
        let slot_in_listener = slot.clone();
        let _outer = emitter.subscribe(EventType::State, None, move |_| {
            log_in_listener.borrow_mut().push("outer");
            let inner_log = log_in_listener.clone();
            let inner = emitter_in_listener.subscribe(EventType::State, None, move |_| {
                inner_log.borrow_mut().push("inner");
            });
            slot_in_listener.borrow_mut().push(inner);
        });

        emitter.emit(EventType::State, None, None, None, false);
        assert_eq!(*log.borrow(), vec!["outer"], "listener added mid-pass must not fire");

        emitter.emit(EventType::State, None, None, None, false);
        assert_eq!(*log.borrow(), vec!["outer", "outer", "inner"]);
    }
}
