//! Tree compiler.
//!
//! [`TreeBuilder`] turns [`NodeDefinition`]s into runtime nodes for one ship.
//! Compilation never fails: a missing node, an unmet requirement, an unknown
//! sub-tree or a sub-tree cycle all compile to an always-failing leaf.
//! Composites are assembled with the collapsing constructors from
//! [`behavior_tree::builder`], so constant branches disappear from the
//! compiled graph.

use behavior_tree::{ParallelPolicy, RandomMode, builder};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::definition::{NodeDefinition, NodeKind, TreeDefinition, TreeLibrary};
use crate::localization::{IdentityLocalization, Localization};
use crate::nodes::*;
use crate::rng::{STREAM_BUILD, make_rng};
use crate::settings::AiSettings;
use crate::world::{ShipId, ShipSpec};

/// Compiles tree definitions for one ship.
///
/// The builder is bound to the ship's loadout and the AI settings; both are
/// used to evaluate requirements and to specialize leaves.
pub struct TreeBuilder<'a> {
    ship: ShipId,
    spec: &'a ShipSpec,
    settings: &'a AiSettings,
    localization: &'a dyn Localization,
    library: Option<&'a TreeLibrary>,
    parallel_policy: ParallelPolicy,
    rng: Option<ChaCha8Rng>,
    subtrees: Vec<String>,
}

impl<'a> TreeBuilder<'a> {
    /// Creates a builder without a sub-tree library and with identity
    /// localization.
    pub fn new(ship: ShipId, spec: &'a ShipSpec, settings: &'a AiSettings) -> Self {
        Self {
            ship,
            spec,
            settings,
            localization: &IdentityLocalization,
            library: None,
            parallel_policy: ParallelPolicy::default(),
            rng: None,
            subtrees: Vec::new(),
        }
    }

    /// Resolves `SubTree` nodes against `library` (builder pattern).
    pub fn with_library(mut self, library: &'a TreeLibrary) -> Self {
        self.library = Some(library);
        self
    }

    /// Localizes `ShowMessage` texts with `localization` (builder pattern).
    pub fn with_localization(mut self, localization: &'a dyn Localization) -> Self {
        self.localization = localization;
        self
    }

    /// Compiles a whole tree with its parallel policy.
    pub fn build_tree(&mut self, tree: &TreeDefinition) -> ShipNode {
        let saved = std::mem::replace(&mut self.parallel_policy, tree.parallel_policy);
        let node = self.build(tree.root.as_ref());
        self.parallel_policy = saved;
        node
    }

    /// Compiles the library tree named `name`.
    pub fn build_named(&mut self, name: &str) -> ShipNode {
        self.build_subtree(name)
    }

    /// Compiles one node.
    ///
    /// # Returns
    ///
    /// An always-failing leaf for `None` or an unmet requirement, otherwise
    /// the compiled (and possibly collapsed) node.
    pub fn build(&mut self, node: Option<&NodeDefinition>) -> ShipNode {
        let Some(node) = node else {
            return builder::failure();
        };

        if !node.requirement.is_met(self.spec, self.settings) {
            tracing::debug!(
                "Ship {} pruned {} node: requirement {:?} not met",
                self.ship,
                node.kind.name(),
                node.requirement
            );
            return builder::failure();
        }

        if node.kind.parameters().iter().any(|value| !value.is_finite()) {
            tracing::warn!(
                "Ship {}: {} node has a non-finite parameter {:?}",
                self.ship,
                node.kind.name(),
                node.kind.parameters()
            );
            return builder::failure();
        }

        let compiled = self.create(&node.kind);
        if compiled.name() != node.kind.name() {
            tracing::trace!("{} compiled to {}", node.kind.name(), compiled.name());
        }
        compiled
    }

    fn create(&mut self, kind: &NodeKind) -> ShipNode {
        let spec = self.spec;
        let settings = self.settings;

        match kind {
            NodeKind::Undefined => builder::success(),

            // ===== Structure =====
            NodeKind::SubTree { tree } => self.build_subtree(tree),
            NodeKind::Selector { nodes } => {
                builder::selector(nodes.iter().map(|node| self.build(Some(node))))
            }
            NodeKind::Sequence { nodes } => {
                builder::sequence(nodes.iter().map(|node| self.build(Some(node))))
            }
            NodeKind::Parallel { nodes, policy } => {
                let policy = policy.unwrap_or(self.parallel_policy);
                builder::parallel(nodes.iter().map(|node| self.build(Some(node))), policy)
            }
            NodeKind::RandomSelector {
                nodes,
                cooldown,
                policy,
            } => builder::random(
                nodes.iter().map(|node| self.build(Some(node))),
                *cooldown,
                RandomMode::Selector,
                policy.clone(),
            ),
            NodeKind::RandomExecutor {
                nodes,
                cooldown,
                policy,
            } => builder::random(
                nodes.iter().map(|node| self.build(Some(node))),
                *cooldown,
                RandomMode::Executor,
                policy.clone(),
            ),
            NodeKind::Inverter { node } => builder::inverter(self.build(node.as_deref())),
            NodeKind::ConstantResult { node, result } => {
                builder::constant_result(self.build(node.as_deref()), *result)
            }
            NodeKind::CompleteOnce { node, result } => {
                builder::complete_once(self.build(node.as_deref()), *result)
            }

            // ===== Targeting =====
            NodeKind::FindEnemy {
                min_cooldown,
                max_cooldown,
                in_attack_range,
                ignore_drones,
            } => {
                let node =
                    FindEnemy::new(*min_cooldown, *max_cooldown, *in_attack_range, *ignore_drones);
                if settings.drone_range > 0.0 {
                    Box::new(node.with_drone_range(settings.drone_range))
                } else {
                    Box::new(node)
                }
            }
            NodeKind::TargetMothership => Box::new(TargetMothership),
            NodeKind::LookForSecondaryTargets { cooldown } => {
                Box::new(LookForSecondaryTargets::new(*cooldown))
            }
            NodeKind::LookForThreats { cooldown } => {
                Box::new(LookForThreats::new(*cooldown, settings.threat_analyzer()))
            }

            // ===== Movement =====
            NodeKind::MoveToAttackRange {
                min_max_lerp,
                multiplier,
            } => Box::new(MoveToAttackRange::new(*min_max_lerp, *multiplier)),
            NodeKind::MaintainAttackRange {
                min_max_lerp,
                tolerance,
            } => Box::new(MaintainAttackRange::new(*min_max_lerp, *tolerance)),
            NodeKind::IsWithinAttackRange { min_max_lerp } => {
                Box::new(IsWithinAttackRange::new(*min_max_lerp))
            }
            NodeKind::Chase => Box::new(Chase),
            NodeKind::Stop => Box::new(Stop),
            NodeKind::LookAtTarget => Box::new(LookAtTarget),
            NodeKind::SustainAim => Box::new(SustainAim),
            NodeKind::FlyAroundMothership {
                min_distance,
                max_distance,
            } => Box::new(FlyAroundMothership::new(
                self.random_range(*min_distance, *max_distance),
            )),
            NodeKind::AvoidThreats => Box::new(AvoidThreats),
            NodeKind::HaveIncomingThreat { time_to_collision } => {
                Box::new(HaveIncomingThreat::new(*time_to_collision))
            }

            // ===== Combat =====
            NodeKind::Attack => Box::new(Attack::new(settings.level)),
            NodeKind::SelectWeapon { weapon_type } => SelectWeapon::create(spec, *weapon_type),
            NodeKind::ChargeWeapons => ChargeWeapons::create(spec),
            NodeKind::TrackControllableAmmo => TrackControllableAmmo::create(spec),
            NodeKind::UseRecoil => UseRecoil::create(spec),
            NodeKind::Ram { use_ship_systems } => Box::new(Ram::new(spec, *use_ship_systems)),
            NodeKind::DetonateShip { in_attack_range } => {
                Box::new(DetonateShip::new(*in_attack_range))
            }

            // ===== Energy and devices =====
            NodeKind::HaveEnoughEnergy { fail_if_less } => {
                Box::new(HaveEnoughEnergy::new(*fail_if_less))
            }
            NodeKind::RechargeEnergy {
                fail_if_less,
                restore_until,
            } => Box::new(RechargeEnergy::new(*fail_if_less, *restore_until)),
            NodeKind::ActivateDevice { device_class } => {
                ActivateDevice::create(spec, *device_class)
            }
            NodeKind::DefendWithFrontalShield => DefendWithFrontalShield::create(spec),
            NodeKind::SpawnDrones => SpawnDrones::create(spec),

            // ===== Ship and mothership state =====
            NodeKind::IsLowOnHp { min_value } => Box::new(IsLowOnHp::new(*min_value)),
            NodeKind::IsControlledByPlayer => Box::new(IsControlledByPlayer),
            NodeKind::MothershipRetreated => Box::new(MothershipRetreated),
            NodeKind::MothershipDestroyed => Box::new(MothershipDestroyed),
            NodeKind::MothershipLowHp { min_value } => Box::new(MothershipLowHp::new(*min_value)),
            NodeKind::GoBerserk => Box::new(GoBerserk),
            NodeKind::Vanish => Box::new(Vanish),

            // ===== Utility =====
            NodeKind::Wait {
                cooldown,
                reset_if_interrupted,
            } => Box::new(Wait::new(*cooldown, *reset_if_interrupted)),
            NodeKind::ShowMessage { text, color } => Box::new(ShowMessage::new(
                self.localization.localize(text),
                color.clone(),
            )),
            NodeKind::DebugLog { text } => Box::new(DebugLog::new(text.clone())),
        }
    }

    fn build_subtree(&mut self, name: &str) -> ShipNode {
        let Some(tree) = self.library.and_then(|library| library.get(name)) else {
            tracing::warn!("Ship {}: unknown sub-tree '{}'", self.ship, name);
            return builder::failure();
        };

        if self.subtrees.iter().any(|open| open == name) {
            tracing::warn!(
                "Ship {}: sub-tree cycle {} -> {}",
                self.ship,
                self.subtrees.join(" -> "),
                name
            );
            return builder::failure();
        }

        self.subtrees.push(name.to_owned());
        let node = self.build_tree(tree);
        self.subtrees.pop();
        node
    }

    /// Build-time roll in `[min, max]`; `min` for an empty or non-finite range.
    fn random_range(&mut self, min: f32, max: f32) -> f32 {
        if !min.is_finite() || !max.is_finite() || max <= min {
            return min;
        }
        let (seed, ship) = (self.settings.seed, self.ship);
        self.rng
            .get_or_insert_with(|| make_rng(seed, ship, STREAM_BUILD))
            .gen_range(min..=max)
    }
}
