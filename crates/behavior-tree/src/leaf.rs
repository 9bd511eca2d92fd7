//! Constant leaves.
//!
//! [`AlwaysSuccess`] and [`AlwaysFailure`] are zero-sized and stateless, so a
//! boxed instance does not allocate and every occurrence in a tree is the same
//! value. Builders recognize them through [`Behavior::constant`].

use crate::{Behavior, Status};

/// Leaf that always succeeds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlwaysSuccess;

impl<C> Behavior<C> for AlwaysSuccess {
    #[inline]
    fn tick(&mut self, _ctx: &mut C) -> Status {
        Status::Success
    }

    fn constant(&self) -> Option<Status> {
        Some(Status::Success)
    }

    fn name(&self) -> &'static str {
        "AlwaysSuccess"
    }
}

/// Leaf that always fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlwaysFailure;

impl<C> Behavior<C> for AlwaysFailure {
    #[inline]
    fn tick(&mut self, _ctx: &mut C) -> Status {
        Status::Failure
    }

    fn constant(&self) -> Option<Status> {
        Some(Status::Failure)
    }

    fn name(&self) -> &'static str {
        "AlwaysFailure"
    }
}
