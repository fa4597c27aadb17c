// Copyright 2025 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for deferred dispatch through the `switchback_registry` queue.

use std::cell::RefCell;
use std::rc::Rc;

use switchback_registry::Registry;

#[derive(Default)]
struct Engine {
    log: RefCell<Vec<&'static str>>,
}

impl Engine {
    fn record(&self, entry: &'static str) {
        self.log.borrow_mut().push(entry);
    }
}

#[test]
fn perform_before_register_queues_and_drains_in_fifo_order() {
    let mut registry = Registry::new();

    registry.perform("tab.profile", |engine: &Engine| engine.record("first"));
    registry.perform("tab.profile", |engine: &Engine| engine.record("second"));
    registry.perform("tab.profile", |engine: &Engine| engine.record("third"));
    assert_eq!(registry.pending_actions("tab.profile"), 3);

    let engine = Rc::new(Engine::default());
    registry.register("tab.profile", &engine);

    assert_eq!(*engine.log.borrow(), vec!["first", "second", "third"]);
    assert_eq!(registry.pending_actions("tab.profile"), 0);
}

#[test]
fn drained_actions_never_run_twice() {
    let mut registry = Registry::new();
    registry.perform("k", |engine: &Engine| engine.record("queued"));

    let engine = Rc::new(Engine::default());
    registry.register("k", &engine);
    assert_eq!(engine.log.borrow().len(), 1);

    // Re-registering the same key must not replay the drained queue.
    registry.register("k", &engine);
    assert_eq!(engine.log.borrow().len(), 1);
}

#[test]
fn perform_after_register_runs_immediately() {
    let mut registry = Registry::new();
    let engine = Rc::new(Engine::default());
    registry.register("k", &engine);

    registry.perform("k", |engine: &Engine| engine.record("now"));
    assert_eq!(*engine.log.borrow(), vec!["now"]);
    assert_eq!(registry.pending_actions("k"), 0);
}

#[test]
fn perform_against_dropped_instance_requeues_for_the_next_owner() {
    let mut registry = Registry::new();
    let engine = Rc::new(Engine::default());
    registry.register("k", &engine);
    drop(engine);

    // The weak reference is dead: the action waits for a new registration.
    registry.perform("k", |engine: &Engine| engine.record("later"));
    assert_eq!(registry.pending_actions("k"), 1);

    let replacement = Rc::new(Engine::default());
    registry.register("k", &replacement);
    assert_eq!(*replacement.log.borrow(), vec!["later"]);
}

#[test]
fn keys_are_independent() {
    let mut registry = Registry::new();
    registry.perform("a", |engine: &Engine| engine.record("for a"));

    let engine_b = Rc::new(Engine::default());
    registry.register("b", &engine_b);
    assert!(engine_b.log.borrow().is_empty());
    assert_eq!(registry.pending_actions("a"), 1);
}
