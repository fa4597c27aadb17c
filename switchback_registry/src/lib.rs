// Copyright 2025 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Switchback Registry: keyed lookup and deferred dispatch for engine
//! instances.
//!
//! A navigation engine is scoped to a visual region, and a region may not
//! exist yet when someone wants to send it an instruction — a deep link
//! targeting a tab that has not mounted, for example. [`Registry`] decouples
//! "send this action to region R" from "region R has finished mounting":
//!
//! - [`Registry::register`] associates a caller-chosen string key with a
//!   **non-owning** reference to an instance, and immediately drains any
//!   actions queued for that key, in FIFO order, each exactly once.
//! - [`Registry::lookup`] returns the instance if it is still alive,
//!   opportunistically evicting entries whose owner has been dropped.
//! - [`Registry::perform`] runs an action now if the instance exists, and
//!   queues it otherwise.
//!
//! The registry holds [`Weak`] references only: a region's engine is kept
//! alive by its owning region, never by the registry. It provides lookup and
//! dispatch, never shared mutable state — each engine remains exclusively
//! owned by its region.
//!
//! The registry is generic over the instance type; for a mutable engine,
//! register an `Rc<RefCell<...>>`:
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use switchback_registry::Registry;
//!
//! struct Engine {
//!     depth: usize,
//! }
//!
//! let mut registry = Registry::new();
//!
//! // The "profile" region has not mounted yet: the action is queued.
//! registry.perform("profile", |engine: &RefCell<Engine>| {
//!     engine.borrow_mut().depth += 1;
//! });
//!
//! // Mounting the region registers its engine and drains the queue.
//! let engine = Rc::new(RefCell::new(Engine { depth: 0 }));
//! registry.register("profile", &engine);
//! assert_eq!(engine.borrow().depth, 1);
//!
//! // From now on actions run immediately.
//! registry.perform("profile", |engine: &RefCell<Engine>| {
//!     engine.borrow_mut().depth += 1;
//! });
//! assert_eq!(engine.borrow().depth, 2);
//! ```
//!
//! Key uniqueness is the caller's responsibility; registering a key again
//! replaces the previous reference.
//!
//! ## `no_std` support
//!
//! This crate is `no_std` and uses `alloc`. The `std` feature (default) is
//! only forwarded for dependants that prefer building with the standard
//! library.

#![no_std]

extern crate alloc;

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use log::debug;

/// An action deferred until its key's instance is registered.
type DeferredAction<T> = Box<dyn FnOnce(&T)>;

/// Keyed weak-reference lookup with a deferred-action queue per key.
///
/// See the [crate docs](crate) for the full contract and an example.
pub struct Registry<T> {
    instances: HashMap<String, Weak<T>>,
    pending: HashMap<String, Vec<DeferredAction<T>>>,
}

impl<T: 'static> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Registry<T> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            instances: HashMap::new(),
            pending: HashMap::new(),
        }
    }

    /// Associates `key` with a non-owning reference to `instance`, then
    /// drains and runs any actions queued for the key, oldest first.
    ///
    /// An existing association for the key is replaced.
    pub fn register(&mut self, key: impl Into<String>, instance: &Rc<T>) {
        let key = key.into();
        self.instances.insert(key.clone(), Rc::downgrade(instance));
        if let Some(actions) = self.pending.remove(&key) {
            debug!("running {} deferred action(s) for {key:?}", actions.len());
            for action in actions {
                action(instance);
            }
        }
    }

    /// Returns the instance registered under `key`, if it is still alive.
    ///
    /// An entry whose owner has been dropped is evicted on the way out.
    pub fn lookup(&mut self, key: &str) -> Option<Rc<T>> {
        match self.instances.get(key) {
            Some(weak) => match weak.upgrade() {
                Some(instance) => Some(instance),
                None => {
                    debug!("evicting dead registry entry {key:?}");
                    self.instances.remove(key);
                    None
                }
            },
            None => None,
        }
    }

    /// Runs `action` against the instance under `key` now, or queues it to
    /// run when the key is registered.
    ///
    /// Queued actions run in the order they were enqueued, each exactly
    /// once.
    pub fn perform(&mut self, key: impl Into<String>, action: impl FnOnce(&T) + 'static) {
        let key = key.into();
        if let Some(instance) = self.lookup(&key) {
            action(&instance);
        } else {
            debug!("queueing action for unregistered key {key:?}");
            self.pending.entry(key).or_default().push(Box::new(action));
        }
    }

    /// Removes the instance and any queued actions for `key`.
    pub fn unregister(&mut self, key: &str) {
        self.instances.remove(key);
        self.pending.remove(key);
    }

    /// Removes every instance and every queued action.
    pub fn clear(&mut self) {
        self.instances.clear();
        self.pending.clear();
    }

    /// Returns the number of actions currently queued for `key`.
    #[must_use]
    pub fn pending_actions(&self, key: &str) -> usize {
        self.pending.get(key).map_or(0, Vec::len)
    }
}

impl<T> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("instances", &self.instances.keys())
            .field(
                "pending",
                &self
                    .pending
                    .iter()
                    .map(|(key, actions)| (key, actions.len()))
                    .collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    #[test]
    fn lookup_of_unknown_key_is_none() {
        let mut registry = Registry::<u32>::new();
        assert!(registry.lookup("nope").is_none());
    }

    #[test]
    fn register_then_lookup_round_trips() {
        let mut registry = Registry::new();
        let instance = Rc::new(5_u32);
        registry.register("main", &instance);
        assert_eq!(registry.lookup("main").as_deref(), Some(&5));
    }

    #[test]
    fn dead_entries_are_evicted_on_lookup() {
        let mut registry = Registry::new();
        let instance = Rc::new(5_u32);
        registry.register("main", &instance);
        drop(instance);
        assert!(registry.lookup("main").is_none());
        // A second lookup hits the already-evicted path.
        assert!(registry.lookup("main").is_none());
    }

    #[test]
    fn registry_does_not_keep_instances_alive() {
        let mut registry = Registry::new();
        let instance = Rc::new(Cell::new(0_u32));
        registry.register("main", &instance);
        assert_eq!(Rc::strong_count(&instance), 1);
    }

    #[test]
    fn unregister_drops_instance_and_queue() {
        let mut registry = Registry::new();
        registry.perform("main", |_: &u32| {});
        assert_eq!(registry.pending_actions("main"), 1);
        registry.unregister("main");
        assert_eq!(registry.pending_actions("main"), 0);
        // Registering afterwards runs nothing.
        let instance = Rc::new(1_u32);
        registry.register("main", &instance);
    }

    #[test]
    fn clear_empties_everything() {
        let mut registry = Registry::new();
        let instance = Rc::new(1_u32);
        registry.register("a", &instance);
        registry.perform("b", |_: &u32| {});
        registry.clear();
        assert!(registry.lookup("a").is_none());
        assert_eq!(registry.pending_actions("b"), 0);
    }
}
