//! Lightweight behavior tree library for tick-based real-time games.
//!
//! This library provides a small behavior tree implementation designed for
//! simulations that evaluate every agent's tree once per frame.
//!
//! - **Tri-state results**: Actions may report `Running` and are re-entered next tick
//! - **Node-local state**: Timers and retained selections live in the node (`&mut self`)
//! - **Compile-time collapsing**: [`builder`] folds constant children and
//!   degenerate composites so the runtime graph stays minimal
//! - **Context-owned randomness**: Random composites draw from the context's
//!   own source (see [`TickContext`]), never from global state
//!
//! # Architecture
//!
//! - [`Behavior`]: Core trait for all nodes
//! - [`Status`]: Success, Failure or Running
//! - Constant leaves: [`AlwaysSuccess`], [`AlwaysFailure`]
//! - Composite nodes: [`Sequence`], [`Selector`], [`Parallel`], [`RandomSelector`]
//! - Decorator nodes: [`Inverter`], [`ConstantResult`], [`CompleteOnce`]

pub mod behavior;
pub mod builder;
pub mod composite;
pub mod context;
pub mod decorator;
pub mod leaf;
pub mod random;
pub mod status;

// Re-export core types for ergonomic API
pub use behavior::{Behavior, Node};
pub use composite::{Parallel, ParallelPolicy, Selector, Sequence};
pub use context::TickContext;
pub use decorator::{CompleteOnce, ConstantResult, Inverter};
pub use leaf::{AlwaysFailure, AlwaysSuccess};
pub use random::{RandomMode, RandomPolicy, RandomSelector};
pub use status::Status;
