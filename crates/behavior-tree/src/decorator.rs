//! Decorator behavior nodes.
//!
//! Decorators wrap a single child behavior and modify its result or execution.
//! This module provides [`Inverter`] (NOT logic), [`ConstantResult`] (result
//! override) and [`CompleteOnce`] (one-shot latch).

use crate::{Behavior, Node, Status};

/// Inverts the result of its child behavior.
///
/// # Semantics
///
/// - If the child returns `Success`, the inverter returns `Failure`
/// - If the child returns `Failure`, the inverter returns `Success`
/// - `Running` passes through unchanged
///
/// This is analogous to a logical NOT (!) operation.
pub struct Inverter<C> {
    child: Node<C>,
}

impl<C> Inverter<C> {
    /// Creates a new inverter that wraps the given child behavior.
    pub fn new(child: Node<C>) -> Self {
        Self { child }
    }
}

impl<C> Behavior<C> for Inverter<C> {
    fn tick(&mut self, ctx: &mut C) -> Status {
        self.child.tick(ctx).invert()
    }
}

/// Returns a fixed result once its child finishes.
///
/// # Semantics
///
/// - The child is ticked every time
/// - If the child returns `Running`, returns `Running`
/// - Otherwise returns the configured result, whatever the child returned
///
/// Useful for optional behaviors that shouldn't break a sequence, or for
/// side-effect-only branches in a selector.
pub struct ConstantResult<C> {
    child: Node<C>,
    result: Status,
}

impl<C> ConstantResult<C> {
    /// Creates a new result override around the given child behavior.
    pub fn new(child: Node<C>, result: Status) -> Self {
        Self { child, result }
    }
}

impl<C> Behavior<C> for ConstantResult<C> {
    fn tick(&mut self, ctx: &mut C) -> Status {
        match self.child.tick(ctx) {
            Status::Running => Status::Running,
            _ => self.result,
        }
    }
}

/// Runs its child until the first terminal result, then latches.
///
/// # Semantics
///
/// - Until the child first returns `Success` or `Failure`, its status is
///   passed through
/// - Afterwards the child is never ticked again and the configured result is
///   returned
pub struct CompleteOnce<C> {
    child: Node<C>,
    result: Status,
    completed: bool,
}

impl<C> CompleteOnce<C> {
    /// Creates a new one-shot latch around the given child behavior.
    pub fn new(child: Node<C>, result: Status) -> Self {
        Self {
            child,
            result,
            completed: false,
        }
    }

    /// Returns `true` once the child has finished.
    pub fn is_completed(&self) -> bool {
        self.completed
    }
}

impl<C> Behavior<C> for CompleteOnce<C> {
    fn tick(&mut self, ctx: &mut C) -> Status {
        if self.completed {
            return self.result;
        }

        let status = self.child.tick(ctx);
        if status.is_terminal() {
            self.completed = true;
        }
        status
    }
}
