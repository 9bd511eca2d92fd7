//! Behavior-tree AI for combat ships.
//!
//! Each ship gets a [`ShipAi`]: a [`Context`] (clock, target, caches and
//! controls) plus a tree compiled from data by the [`TreeBuilder`]. The
//! owner ticks every ship once per simulation step and applies the resulting
//! [`ShipControls`].
//!
//! # Architecture
//!
//! - [`world`]: Ship handles, loadouts and the [`Scene`] query trait
//! - [`context`]: Per-ship evaluation state
//! - [`nodes`]: Leaf catalog
//! - [`definition`]: Data model of trees, deserialized from RON
//! - [`compiler`]: Requirement gating, sub-tree resolution and collapsing
//! - [`loaders`]: RON and TOML content loaders

pub mod agent;
pub mod compiler;
pub mod context;
pub mod controls;
pub mod definition;
pub mod loaders;
pub mod localization;
pub mod nodes;
pub mod rng;
pub mod settings;
pub mod weapons;
pub mod world;

pub use agent::ShipAi;
pub use compiler::TreeBuilder;
pub use context::{Context, ShipMessage, ThreatAnalyzer, ThreatInfo};
pub use controls::ShipControls;
pub use definition::{NodeDefinition, NodeKind, Requirement, TreeDefinition, TreeIssue, TreeLibrary};
pub use loaders::{ContentError, LoadResult, SettingsLoader, TreeLoader};
pub use localization::{IdentityLocalization, Localization, TableLocalization};
pub use nodes::ShipNode;
pub use settings::{AiLevel, AiSettings};
pub use weapons::WeaponList;
pub use world::{Scene, ShipId, ShipSpec, ShipState, ShipStatus};
