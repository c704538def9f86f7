// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigator instances and their parent/child wiring.
//!
//! ## Overview
//!
//! A [`Navigator`] owns one node of the navigation tree: a router, the
//! committed state for that node (in a [`Store`]), an [`EventEmitter`], and
//! the explicit hook bundle that connects it to its parent and children —
//! a `Weak` handle to the parent and a registry of `Weak` child handles in
//! mount order. There is no ambient context: bubbling reads these handles
//! at call time, so republished configuration and late-mounted children are
//! always observed.
//!
//! The dispatch algorithm itself lives in [`crate::dispatcher`].
//!
//! ## Mounting
//!
//! - [`Navigator::root`] starts a tree from a router's initial state.
//! - [`Navigator::restored`] starts a tree from persisted partial state,
//!   repaired against the current configuration.
//! - [`Navigator::nested`] mounts a child under one of the parent's routes;
//!   restored state stashed on that route (from a tree-level restore) is
//!   adopted automatically, and the child registers a before-remove hook
//!   with the parent so removing the hosting route asks the child's routes
//!   first.

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

use hashbrown::HashMap;
use smallvec::SmallVec;
use switchback_routers::{
    Key, NavigationAction, NavigationState, NavigatorKind, NestedState, PartialState, Router,
    RouterConfig,
};

use crate::emitter::{EventArg, EventEmitter, EventType, Subscription};
use crate::prevent_remove::{BeforeRemoveHooks, should_prevent_remove};
use crate::store::Store;

/// One navigator in the tree. See the [module docs](self) for an overview.
pub struct Navigator<P: Clone + 'static> {
    /// Handle to the `Rc` this navigator lives in, set at mount; used to
    /// hand out owned handles from `&self` methods.
    self_weak: Weak<Self>,
    pub(crate) router: Box<dyn Router<P>>,
    pub(crate) config: RefCell<RouterConfig<P>>,
    pub(crate) store: Store<P>,
    pub(crate) emitter: EventEmitter<P>,
    /// Key of the parent route hosting this navigator; `None` at the root.
    route_key: Option<Key>,
    parent: Option<Weak<Self>>,
    children: RefCell<Vec<Weak<Self>>>,
    pub(crate) before_remove: BeforeRemoveHooks<P>,
    /// Restored state queued for the next route-names change; dispatching
    /// while this is set is a race worth warning about.
    pub(crate) pending_route_names_state: RefCell<Option<PartialState<P>>>,
    legacy_child_bubbling: Cell<bool>,
    pub(crate) on_state_change: RefCell<Option<Rc<dyn Fn(&Rc<NavigationState<P>>)>>>,
    pub(crate) on_dispatch: RefCell<Option<Rc<dyn Fn(&NavigationAction<P>, bool)>>>,
}

impl<P: Clone + 'static> Navigator<P> {
    /// Mounts a root navigator with the router's initial state.
    #[must_use]
    pub fn root(router: Box<dyn Router<P>>, config: RouterConfig<P>) -> Rc<Self> {
        Self::mount(router, config, None, None, None, false)
    }

    /// Mounts a root navigator from persisted state.
    ///
    /// The router validates the restored tree against the configuration,
    /// dropping routes whose names are no longer configured and repairing
    /// the index and missing keys.
    #[must_use]
    pub fn restored(
        router: Box<dyn Router<P>>,
        config: RouterConfig<P>,
        restore: PartialState<P>,
    ) -> Rc<Self> {
        Self::mount(
            router,
            config,
            Some(NestedState::Stale(restore)),
            None,
            None,
            false,
        )
    }

    /// Mounts a child navigator under one of the parent's routes.
    ///
    /// Restored state stashed on that route is adopted; otherwise the
    /// router's initial state is used. The child inherits the parent's
    /// legacy child-bubbling setting.
    #[must_use]
    pub fn nested(
        parent: &Rc<Self>,
        route_key: &Key,
        router: Box<dyn Router<P>>,
        config: RouterConfig<P>,
    ) -> Rc<Self> {
        let parent_state = parent.store.get();
        let hosting = parent_state
            .routes
            .iter()
            .find(|route| route.key == *route_key);
        if hosting.is_none() {
            log::warn!(
                "mounting a navigator under route `{route_key}`, which is not in the \
                 parent's current state"
            );
        }
        let restore = hosting.and_then(|route| route.state.clone());
        let nav = Self::mount(
            router,
            config,
            restore,
            Some(route_key.clone()),
            Some(Rc::downgrade(parent)),
            parent.legacy_child_bubbling.get(),
        );
        parent.register_child(&nav);
        nav
    }

    fn mount(
        router: Box<dyn Router<P>>,
        config: RouterConfig<P>,
        restore: Option<NestedState<P>>,
        route_key: Option<Key>,
        parent: Option<Weak<Self>>,
        legacy_child_bubbling: bool,
    ) -> Rc<Self> {
        let initial = match restore {
            Some(NestedState::Hydrated(state)) => state,
            Some(NestedState::Stale(partial)) => Rc::new(router.rehydrate(partial, &config)),
            None => Rc::new(router.initial_state(&config)),
        };
        Rc::new_cyclic(|self_weak| Self {
            self_weak: self_weak.clone(),
            router,
            config: RefCell::new(config),
            store: Store::new(initial),
            emitter: EventEmitter::new(),
            route_key,
            parent,
            children: RefCell::new(Vec::new()),
            before_remove: RefCell::new(HashMap::new()),
            pending_route_names_state: RefCell::new(None),
            legacy_child_bubbling: Cell::new(legacy_child_bubbling),
            on_state_change: RefCell::new(None),
            on_dispatch: RefCell::new(None),
        })
    }

    /// Owned handle to this navigator.
    fn rc(&self) -> Rc<Self> {
        self.self_weak
            .upgrade()
            .expect("a live navigator always has a live Rc")
    }

    fn register_child(&self, child: &Rc<Self>) {
        {
            let mut children = self.children.borrow_mut();
            children.retain(|weak| weak.upgrade().is_some());
            if let Some(route_key) = &child.route_key
                && children
                    .iter()
                    .filter_map(Weak::upgrade)
                    .any(|existing| existing.route_key.as_ref() == Some(route_key))
            {
                log::warn!(
                    "route `{route_key}` already hosts a navigator; actions will resolve \
                     against the most recently mounted one"
                );
            }
            children.push(Rc::downgrade(child));
        }
        // Removing the hosting route removes the child's whole subtree, so
        // the child answers for all of its routes.
        if let Some(route_key) = &child.route_key {
            let weak = Rc::downgrade(child);
            self.before_remove.borrow_mut().insert(
                route_key.clone(),
                Rc::new(move |action| {
                    weak.upgrade()
                        .is_some_and(|child| child.any_route_blocked(action))
                }),
            );
        }
    }

    /// Detaches this navigator from its parent's registries.
    pub fn unmount(&self) {
        let Some(parent) = self.parent_nav() else {
            return;
        };
        parent.children.borrow_mut().retain(|weak| {
            weak.upgrade()
                .is_some_and(|sibling| !core::ptr::eq(Rc::as_ptr(&sibling), self))
        });
        if let Some(route_key) = &self.route_key {
            parent.before_remove.borrow_mut().remove(route_key);
        }
    }

    pub(crate) fn any_route_blocked(&self, action: &NavigationAction<P>) -> bool {
        let state = self.store.get();
        should_prevent_remove(&self.emitter, &self.before_remove, &state.routes, &[], action)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// The committed state snapshot of this navigator alone.
    ///
    /// Child navigator states are grafted in by [`Navigator::root_state`].
    #[must_use]
    pub fn state(&self) -> Rc<NavigationState<P>> {
        self.store.get()
    }

    /// This navigator's state key.
    #[must_use]
    pub fn key(&self) -> Key {
        self.store.get().key.clone()
    }

    /// The navigator kind of the configured router.
    #[must_use]
    pub fn kind(&self) -> NavigatorKind {
        self.router.kind()
    }

    /// Key of the parent route hosting this navigator; `None` at the root.
    #[must_use]
    pub fn route_key(&self) -> Option<&Key> {
        self.route_key.as_ref()
    }

    /// The store holding this navigator's committed state.
    #[must_use]
    pub fn store(&self) -> &Store<P> {
        &self.store
    }

    /// The event emitter for this navigator.
    #[must_use]
    pub fn emitter(&self) -> &EventEmitter<P> {
        &self.emitter
    }

    pub(crate) fn parent_nav(&self) -> Option<Rc<Self>> {
        self.parent.as_ref().and_then(Weak::upgrade)
    }

    /// Walks to the root of the navigator tree.
    #[must_use]
    pub fn root_nav(&self) -> Rc<Self> {
        let mut current = self.rc();
        while let Some(parent) = current.parent_nav() {
            current = parent;
        }
        current
    }

    /// Live child navigators, in mount order, pruning dropped ones.
    pub(crate) fn child_navigators(&self) -> SmallVec<[Rc<Self>; 4]> {
        let mut out = SmallVec::new();
        self.children.borrow_mut().retain(|weak| {
            weak.upgrade().is_some_and(|child| {
                out.push(child);
                true
            })
        });
        out
    }

    // -------------------------------------------------------------------------
    // Tree snapshots
    // -------------------------------------------------------------------------

    /// Composes the full tree snapshot from the root down.
    ///
    /// This is what render and persistence hooks receive: each mounted
    /// child's committed state grafted into its hosting route.
    #[must_use]
    pub fn root_state(&self) -> Rc<NavigationState<P>> {
        self.root_nav().subtree_state()
    }

    /// Composes the snapshot of this navigator's subtree.
    #[must_use]
    pub fn subtree_state(&self) -> Rc<NavigationState<P>> {
        let base = self.store.get();
        let children = self.child_navigators();
        if children.is_empty() {
            return base;
        }
        let mut composed = (*base).clone();
        for child in &children {
            if let Some(route_key) = &child.route_key
                && let Some(route) = composed.routes.iter_mut().find(|r| r.key == *route_key)
            {
                route.state = Some(NestedState::Hydrated(child.subtree_state()));
            }
        }
        Rc::new(composed)
    }

    // -------------------------------------------------------------------------
    // Configuration
    // -------------------------------------------------------------------------

    /// Replaces the configured route-name set and carries state over.
    ///
    /// When a partial state was queued with
    /// [`Navigator::schedule_state_for_route_names_change`], it is consumed
    /// here instead (the deep-link pattern: the restore target only exists
    /// once the new route names are in place).
    pub fn set_route_names<I, S>(&self, route_names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        {
            let mut config = self.config.borrow_mut();
            config.route_names = route_names.into_iter().map(Into::into).collect();
        }
        let pending = self.pending_route_names_state.borrow_mut().take();
        let previous = self.store.get();
        let next = {
            let config = self.config.borrow();
            match pending {
                Some(partial) => Rc::new(self.router.rehydrate(partial, &config)),
                None => self.router.state_for_route_names_change(&previous, &config),
            }
        };
        if !Rc::ptr_eq(&next, &previous) {
            self.commit(&next, &previous);
        }
    }

    /// Queues restored state to be applied by the next route-names change.
    pub fn schedule_state_for_route_names_change(&self, state: PartialState<P>) {
        *self.pending_route_names_state.borrow_mut() = Some(state);
    }

    /// Enables offering undirected, locally-unhandled actions to child
    /// navigators. Off by default; actions addressed with a `target` are
    /// always offered to children. Inherited by navigators nested later.
    pub fn set_legacy_child_bubbling(&self, enabled: bool) {
        self.legacy_child_bubbling.set(enabled);
    }

    pub(crate) fn legacy_child_bubbling(&self) -> bool {
        self.legacy_child_bubbling.get()
    }

    // -------------------------------------------------------------------------
    // Observers
    // -------------------------------------------------------------------------

    /// Installs the render-notification hook, invoked with the composed
    /// tree snapshot after every commit anywhere in the tree.
    ///
    /// Meaningful on the root navigator; commits in descendants walk up and
    /// notify the root's hook.
    pub fn set_on_state_change(&self, callback: impl Fn(&Rc<NavigationState<P>>) + 'static) {
        *self.on_state_change.borrow_mut() = Some(Rc::new(callback));
    }

    /// Installs a dispatch observer, invoked with every action a navigator
    /// in this tree resolves and whether it was a no-op. Meaningful on the
    /// root navigator.
    pub fn set_on_dispatch(&self, callback: impl Fn(&NavigationAction<P>, bool) + 'static) {
        *self.on_dispatch.borrow_mut() = Some(Rc::new(callback));
    }

    /// Subscribes to an event on this navigator, optionally scoped to one
    /// route. Dropping the returned guard unsubscribes.
    #[must_use]
    pub fn on(
        &self,
        event: EventType,
        target: Option<Key>,
        callback: impl Fn(&mut EventArg<P>) + 'static,
    ) -> Subscription<P> {
        self.emitter.subscribe(event, target, callback)
    }

    /// Registers a veto over the removal of one route; returning `true`
    /// from the hook blocks any transition that would remove it.
    ///
    /// At most one hook per route key: re-registration replaces. Nested
    /// navigators install their own hook on their hosting route, which this
    /// replaces as well.
    pub fn set_before_remove(
        &self,
        route_key: Key,
        hook: impl Fn(&NavigationAction<P>) -> bool + 'static,
    ) {
        self.before_remove
            .borrow_mut()
            .insert(route_key, Rc::new(hook));
    }

    /// Removes the before-remove hook for a route, if any.
    pub fn clear_before_remove(&self, route_key: &Key) {
        self.before_remove.borrow_mut().remove(route_key);
    }

    // -------------------------------------------------------------------------
    // Action sugar
    // -------------------------------------------------------------------------

    /// Dispatches `NAVIGATE` to a route name.
    pub fn navigate(&self, name: &str) -> bool {
        self.dispatch(NavigationAction::navigate(name))
    }

    /// Dispatches `NAVIGATE` with params.
    pub fn navigate_with(&self, name: &str, params: P) -> bool {
        self.dispatch(NavigationAction::navigate_with(name, params))
    }

    /// Dispatches `GO_BACK`.
    pub fn go_back(&self) -> bool {
        self.dispatch(NavigationAction::go_back())
    }

    /// Dispatches `SET_PARAMS` for the currently focused route.
    pub fn set_params(&self, params: P) -> bool {
        let source = self.store.get().focused_route().key.clone();
        self.dispatch(NavigationAction::set_params(params).with_source(source))
    }

    /// Dispatches `RESET`, addressed to this navigator.
    pub fn reset(&self, state: PartialState<P>) -> bool {
        let target = self.key();
        self.dispatch(NavigationAction::reset(state).with_target(target))
    }
}

impl<P: Clone + 'static> fmt::Debug for Navigator<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigator")
            .field("key", &self.store.get().key)
            .field("kind", &self.router.kind())
            .field("children", &self.children.borrow().len())
            .finish_non_exhaustive()
    }
}
