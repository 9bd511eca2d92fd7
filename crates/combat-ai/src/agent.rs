//! Per-ship driver pairing a context with its compiled tree.

use std::sync::Arc;

use behavior_tree::{Behavior, Status};

use crate::compiler::TreeBuilder;
use crate::context::{Context, ShipMessage};
use crate::controls::ShipControls;
use crate::definition::{TreeDefinition, TreeLibrary};
use crate::localization::Localization;
use crate::nodes::ShipNode;
use crate::settings::AiSettings;
use crate::world::{Scene, ShipId, ShipSpec};

/// AI of one ship.
///
/// Each call to [`ShipAi::tick`] advances the context clock, clears the
/// previous tick's commands and evaluates the tree once.
pub struct ShipAi {
    context: Context,
    root: ShipNode,
    last_status: Option<Status>,
}

impl ShipAi {
    pub fn new(context: Context, root: ShipNode) -> Self {
        Self {
            context,
            root,
            last_status: None,
        }
    }

    /// Compiles `tree` for `ship` and sets up its context.
    ///
    /// # Arguments
    ///
    /// * `ship` - Ship to control
    /// * `spec` - Its loadout
    /// * `scene` - Shared scene
    /// * `tree` - Root tree; `SubTree` nodes resolve against `library`
    /// * `library` - Named trees, if any
    /// * `settings` - Level, drone leash and seed
    /// * `localization` - Message text lookup
    pub fn compile(
        ship: ShipId,
        spec: &ShipSpec,
        scene: Arc<dyn Scene>,
        tree: &TreeDefinition,
        library: Option<&TreeLibrary>,
        settings: &AiSettings,
        localization: &dyn Localization,
    ) -> Self {
        let mut builder = TreeBuilder::new(ship, spec, settings).with_localization(localization);
        if let Some(library) = library {
            builder = builder.with_library(library);
        }
        let root = builder.build_tree(tree);
        tracing::debug!("Ship {} AI compiled, root {}", ship, root.name());

        let context = Context::new(ship, spec, scene).with_seed(settings.seed);
        Self::new(context, root)
    }

    /// Runs one tick of `delta_time` seconds.
    pub fn tick(&mut self, delta_time: f32) -> Status {
        self.context.update(delta_time);
        self.context.controls_mut().begin_tick();

        let status = self.root.tick(&mut self.context);
        if self.last_status != Some(status) {
            tracing::trace!(
                "Ship {} tree status {:?} -> {:?}",
                self.context.ship_id(),
                self.last_status,
                status
            );
        }
        self.last_status = Some(status);
        status
    }

    pub fn ship_id(&self) -> ShipId {
        self.context.ship_id()
    }

    pub fn controls(&self) -> &ShipControls {
        self.context.controls()
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    pub fn last_status(&self) -> Option<Status> {
        self.last_status
    }

    pub fn take_messages(&mut self) -> Vec<ShipMessage> {
        self.context.take_messages()
    }
}
