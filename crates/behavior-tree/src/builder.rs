//! Collapsing constructors for behavior trees.
//!
//! These helpers build composite and decorator nodes the way a tree compiler
//! wants them: constant children are folded away and degenerate composites
//! are replaced by their only child or by a constant leaf. Use them instead
//! of the raw constructors whenever the children come from data.
//!
//! | Helper | Empty | One child | Elided children | Stops after |
//! |--------|-------|-----------|-----------------|-------------|
//! | [`sequence`] | `AlwaysSuccess` | child | always-success | always-failure |
//! | [`selector`] | `AlwaysFailure` | child | always-failure | always-success |
//! | [`parallel`] | `AlwaysSuccess` | child | none | - |
//! | [`random`] | `AlwaysFailure` | child | none | - |

use crate::{
    AlwaysFailure, AlwaysSuccess, Behavior, CompleteOnce, ConstantResult, Inverter, Node, Parallel,
    ParallelPolicy, RandomMode, RandomPolicy, RandomSelector, Selector, Sequence, Status,
    TickContext,
};

/// The shared always-succeeding leaf.
#[inline]
pub fn success<C: 'static>() -> Node<C> {
    Box::new(AlwaysSuccess)
}

/// The shared always-failing leaf.
#[inline]
pub fn failure<C: 'static>() -> Node<C> {
    Box::new(AlwaysFailure)
}

/// Returns `true` if `node` is known to always produce `status`.
#[inline]
pub fn is_constant<C>(node: &dyn Behavior<C>, status: Status) -> bool {
    node.constant() == Some(status)
}

/// Creates a sequence node, collapsing it where possible.
///
/// Children statically known to succeed are dropped. A child statically known
/// to fail ends the list, since nothing after it can run.
pub fn sequence<C: 'static>(children: impl IntoIterator<Item = Node<C>>) -> Node<C> {
    let mut kept = Vec::new();
    for child in children {
        match child.constant() {
            Some(Status::Success) => continue,
            Some(Status::Failure) => {
                kept.push(child);
                break;
            }
            _ => kept.push(child),
        }
    }

    match kept.len() {
        0 => success(),
        1 => kept.remove(0),
        _ => Box::new(Sequence::new(kept)),
    }
}

/// Creates a selector node, collapsing it where possible.
///
/// Children statically known to fail are dropped. A child statically known
/// to succeed ends the list, since nothing after it can run.
pub fn selector<C: 'static>(children: impl IntoIterator<Item = Node<C>>) -> Node<C> {
    let mut kept = Vec::new();
    for child in children {
        match child.constant() {
            Some(Status::Failure) => continue,
            Some(Status::Success) => {
                kept.push(child);
                break;
            }
            _ => kept.push(child),
        }
    }

    match kept.len() {
        0 => failure(),
        1 => kept.remove(0),
        _ => Box::new(Selector::new(kept)),
    }
}

/// Creates a parallel node; empty collapses to success, one child to itself.
pub fn parallel<C: 'static>(
    children: impl IntoIterator<Item = Node<C>>,
    policy: ParallelPolicy,
) -> Node<C> {
    let mut children: Vec<_> = children.into_iter().collect();
    match children.len() {
        0 => success(),
        1 => children.remove(0),
        _ => Box::new(Parallel::new(children, policy)),
    }
}

/// Creates a random selector; empty collapses to failure, one child to itself.
pub fn random<C: TickContext + 'static>(
    children: impl IntoIterator<Item = Node<C>>,
    cooldown: f32,
    mode: RandomMode,
    policy: RandomPolicy,
) -> Node<C> {
    let mut children: Vec<_> = children.into_iter().collect();
    match children.len() {
        0 => failure(),
        1 => children.remove(0),
        _ => Box::new(RandomSelector::new(children, cooldown, mode, policy)),
    }
}

/// Creates an inverter node. Constant children are inverted in place.
pub fn inverter<C: 'static>(child: Node<C>) -> Node<C> {
    match child.constant() {
        Some(Status::Success) => failure(),
        Some(Status::Failure) => success(),
        _ => Box::new(Inverter::new(child)),
    }
}

/// Creates a result override. A constant child is replaced by the result.
pub fn constant_result<C: 'static>(child: Node<C>, result: Status) -> Node<C> {
    match (child.constant(), result) {
        (Some(_), Status::Success) => success(),
        (Some(_), Status::Failure) => failure(),
        _ => Box::new(ConstantResult::new(child, result)),
    }
}

/// Creates a one-shot latch. A constant child equal to the latched result
/// needs no wrapper.
pub fn complete_once<C: 'static>(child: Node<C>, result: Status) -> Node<C> {
    if child.constant() == Some(result) {
        return child;
    }
    Box::new(CompleteOnce::new(child, result))
}
