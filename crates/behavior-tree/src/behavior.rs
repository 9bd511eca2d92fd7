//! Core behavior trait.
//!
//! This module defines the [`Behavior`] trait, which is the fundamental
//! abstraction for all behavior tree nodes. The trait is generic over a
//! context type `C`, allowing nodes to access game state and make decisions.

use crate::Status;

/// Boxed node, the unit the tree is assembled from.
pub type Node<C> = Box<dyn Behavior<C>>;

/// A behavior tree node that can be evaluated against a context.
pub trait Behavior<C>: Send + Sync {
    /// Evaluate this behavior node against the given context.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Mutable reference to the context/blackboard. Nodes read
    ///   world state through it and write their decisions into it.
    ///
    /// Nodes may keep small amounts of state between ticks (timers, a
    /// retained selection), which is why evaluation takes `&mut self`.
    ///
    /// # Returns
    ///
    /// - `Status::Success` if the behavior succeeded
    /// - `Status::Failure` if the behavior failed
    /// - `Status::Running` if the behavior needs more ticks
    fn tick(&mut self, ctx: &mut C) -> Status;

    /// The result this node always produces, if it is known without ticking.
    ///
    /// Only stateless constant leaves return `Some`. Tree builders use this
    /// to drop unreachable or redundant children.
    fn constant(&self) -> Option<Status> {
        None
    }

    /// Short node name for logs and diagnostics.
    fn name(&self) -> &'static str {
        short_type_name(std::any::type_name::<Self>())
    }
}

/// Blanket implementation for boxed behaviors.
///
/// This allows `Box<dyn Behavior<C>>` to also implement `Behavior<C>`,
/// enabling dynamic dispatch and heterogeneous collections of nodes.
impl<C> Behavior<C> for Box<dyn Behavior<C>> {
    #[inline]
    fn tick(&mut self, ctx: &mut C) -> Status {
        (**self).tick(ctx)
    }

    #[inline]
    fn constant(&self) -> Option<Status> {
        (**self).constant()
    }

    #[inline]
    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Strips the module path and generic arguments from a type name.
fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_names() {
        assert_eq!(short_type_name("a::b::Sequence<c::Context>"), "Sequence");
        assert_eq!(short_type_name("Wait"), "Wait");
    }
}
