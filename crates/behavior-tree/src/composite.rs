//! Composite behavior nodes.
//!
//! Composite nodes control the execution flow of multiple child behaviors.
//! This module provides the fundamental building blocks for creating complex
//! decision trees: [`Sequence`] (AND logic), [`Selector`] (OR logic) and
//! [`Parallel`] (threshold logic).
//!
//! Sequence and Selector keep no cursor between ticks: every tick re-enters
//! the children from the first one, so guard conditions placed in front of a
//! running action are re-checked each tick.

use crate::{Behavior, Node, Status};

/// Executes child behaviors in sequence until one fails.
///
/// # Semantics
///
/// A `Sequence` node evaluates its children from left to right:
/// - If a child returns `Failure`, the sequence **stops immediately** and returns `Failure`
/// - If a child returns `Running`, the sequence **stops immediately** and returns `Running`
/// - If a child returns `Success`, the sequence **continues** to the next child
/// - If all children return `Success`, the sequence returns `Success`
///
/// This is analogous to a short-circuited logical AND (&&) operation.
pub struct Sequence<C> {
    children: Vec<Node<C>>,
}

impl<C> Sequence<C> {
    /// Creates a new sequence with the given child behaviors.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty. Use [`crate::builder::sequence`] to get
    /// an empty sequence collapsed into a constant leaf instead.
    pub fn new(children: Vec<Node<C>>) -> Self {
        assert!(
            !children.is_empty(),
            "Sequence must have at least one child"
        );
        Self { children }
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Always `false`; a sequence cannot be constructed empty.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<C> Behavior<C> for Sequence<C> {
    fn tick(&mut self, ctx: &mut C) -> Status {
        for child in &mut self.children {
            match child.tick(ctx) {
                Status::Success => continue,
                other => return other,
            }
        }
        Status::Success
    }
}

/// Executes child behaviors in sequence until one succeeds.
///
/// # Semantics
///
/// A `Selector` node evaluates its children from left to right:
/// - If a child returns `Success`, the selector **stops immediately** and returns `Success`
/// - If a child returns `Running`, the selector **stops immediately** and returns `Running`
/// - If a child returns `Failure`, the selector **continues** to the next child
/// - If all children return `Failure`, the selector returns `Failure`
///
/// This is analogous to a short-circuited logical OR (||) operation.
pub struct Selector<C> {
    children: Vec<Node<C>>,
}

impl<C> Selector<C> {
    /// Creates a new selector with the given child behaviors.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty. Use [`crate::builder::selector`] to get
    /// an empty selector collapsed into a constant leaf instead.
    pub fn new(children: Vec<Node<C>>) -> Self {
        assert!(
            !children.is_empty(),
            "Selector must have at least one child"
        );
        Self { children }
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Always `false`; a selector cannot be constructed empty.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<C> Behavior<C> for Selector<C> {
    fn tick(&mut self, ctx: &mut C) -> Status {
        for child in &mut self.children {
            match child.tick(ctx) {
                Status::Failure => continue,
                other => return other,
            }
        }
        Status::Failure
    }
}

/// How many children of a [`Parallel`] node must succeed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParallelPolicy {
    /// Every child must succeed.
    #[default]
    RequireAll,
    /// One successful child is enough.
    RequireAny,
    /// At least this many children must succeed (clamped to the child count).
    RequireCount(usize),
}

impl ParallelPolicy {
    /// Number of successes needed out of `children` children.
    pub fn required(self, children: usize) -> usize {
        match self {
            ParallelPolicy::RequireAll => children,
            ParallelPolicy::RequireAny => children.min(1),
            ParallelPolicy::RequireCount(count) => count.min(children),
        }
    }
}

/// Ticks every child on every tick and aggregates the results.
///
/// # Semantics
///
/// With `required = policy.required(children)`:
/// - `successes >= required` returns `Success`
/// - otherwise, if the running children could still reach the threshold,
///   returns `Running`
/// - otherwise returns `Failure`
///
/// Children are never skipped, whatever their siblings returned.
pub struct Parallel<C> {
    children: Vec<Node<C>>,
    policy: ParallelPolicy,
}

impl<C> Parallel<C> {
    /// Creates a new parallel node.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty.
    pub fn new(children: Vec<Node<C>>, policy: ParallelPolicy) -> Self {
        assert!(
            !children.is_empty(),
            "Parallel must have at least one child"
        );
        Self { children, policy }
    }

    /// The aggregation policy.
    pub fn policy(&self) -> ParallelPolicy {
        self.policy
    }
}

impl<C> Behavior<C> for Parallel<C> {
    fn tick(&mut self, ctx: &mut C) -> Status {
        let mut successes = 0;
        let mut running = 0;
        for child in &mut self.children {
            match child.tick(ctx) {
                Status::Success => successes += 1,
                Status::Running => running += 1,
                Status::Failure => {}
            }
        }

        let required = self.policy.required(self.children.len());
        if successes >= required {
            Status::Success
        } else if successes + running >= required {
            Status::Running
        } else {
            Status::Failure
        }
    }
}
