//! Data model of behavior tree definitions.
//!
//! Definitions are plain data, usually loaded from RON. The
//! [`crate::compiler::TreeBuilder`] turns them into runtime nodes.
//!
//! # Example
//!
//! ```ron
//! (
//!     root: Some((
//!         kind: Selector(nodes: [
//!             (kind: Sequence(nodes: [
//!                 (kind: FindEnemy(min_cooldown: 1.0, max_cooldown: 3.0)),
//!                 (kind: MoveToAttackRange(min_max_lerp: 0.5)),
//!                 (kind: Attack),
//!             ])),
//!             (kind: Wait(cooldown: 1.0)),
//!         ]),
//!     )),
//! )
//! ```

mod library;
mod requirement;

use behavior_tree::{ParallelPolicy, RandomPolicy, Status};

use crate::world::{DeviceClass, WeaponType};

pub use library::{TreeIssue, TreeLibrary};
pub use requirement::Requirement;

/// A complete tree.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TreeDefinition {
    /// Policy for parallel nodes that do not set their own.
    #[serde(default)]
    pub parallel_policy: ParallelPolicy,
    #[serde(default)]
    pub root: Option<NodeDefinition>,
}

impl TreeDefinition {
    pub fn new(root: NodeDefinition) -> Self {
        Self {
            parallel_policy: ParallelPolicy::default(),
            root: Some(root),
        }
    }
}

/// One node: its kind and the requirement gating it.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NodeDefinition {
    #[serde(default)]
    pub requirement: Requirement,
    pub kind: NodeKind,
}

impl NodeDefinition {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            requirement: Requirement::Always,
            kind,
        }
    }

    pub fn with_requirement(mut self, requirement: Requirement) -> Self {
        self.requirement = requirement;
        self
    }

    pub fn selector(nodes: Vec<NodeDefinition>) -> Self {
        Self::new(NodeKind::Selector { nodes })
    }

    pub fn sequence(nodes: Vec<NodeDefinition>) -> Self {
        Self::new(NodeKind::Sequence { nodes })
    }

    pub fn parallel(nodes: Vec<NodeDefinition>) -> Self {
        Self::new(NodeKind::Parallel {
            nodes,
            policy: None,
        })
    }
}

impl From<NodeKind> for NodeDefinition {
    fn from(kind: NodeKind) -> Self {
        Self::new(kind)
    }
}

/// Every node kind a definition may name.
///
/// Fields with defaults may be omitted in RON.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, strum::IntoStaticStr)]
pub enum NodeKind {
    /// Placeholder; compiles to an always-succeeding leaf.
    Undefined,

    // ===== Structure =====
    SubTree {
        tree: String,
    },
    Selector {
        nodes: Vec<NodeDefinition>,
    },
    Sequence {
        nodes: Vec<NodeDefinition>,
    },
    Parallel {
        nodes: Vec<NodeDefinition>,
        #[serde(default)]
        policy: Option<ParallelPolicy>,
    },
    RandomSelector {
        nodes: Vec<NodeDefinition>,
        cooldown: f32,
        #[serde(default)]
        policy: RandomPolicy,
    },
    /// Like `RandomSelector`, but a running child is never interrupted.
    RandomExecutor {
        nodes: Vec<NodeDefinition>,
        cooldown: f32,
        #[serde(default)]
        policy: RandomPolicy,
    },
    Inverter {
        node: Option<Box<NodeDefinition>>,
    },
    ConstantResult {
        node: Option<Box<NodeDefinition>>,
        result: Status,
    },
    CompleteOnce {
        node: Option<Box<NodeDefinition>>,
        #[serde(default = "success")]
        result: Status,
    },

    // ===== Targeting =====
    FindEnemy {
        min_cooldown: f32,
        max_cooldown: f32,
        #[serde(default)]
        in_attack_range: bool,
        #[serde(default)]
        ignore_drones: bool,
    },
    TargetMothership,
    LookForSecondaryTargets {
        cooldown: f32,
    },
    LookForThreats {
        cooldown: f32,
    },

    // ===== Movement =====
    MoveToAttackRange {
        #[serde(default)]
        min_max_lerp: f32,
        #[serde(default)]
        multiplier: f32,
    },
    MaintainAttackRange {
        #[serde(default)]
        min_max_lerp: f32,
        #[serde(default = "default_tolerance")]
        tolerance: f32,
    },
    IsWithinAttackRange {
        #[serde(default)]
        min_max_lerp: f32,
    },
    Chase,
    Stop,
    LookAtTarget,
    SustainAim,
    FlyAroundMothership {
        min_distance: f32,
        max_distance: f32,
    },
    AvoidThreats,
    HaveIncomingThreat {
        time_to_collision: f32,
    },

    // ===== Combat =====
    Attack,
    SelectWeapon {
        weapon_type: WeaponType,
    },
    ChargeWeapons,
    TrackControllableAmmo,
    UseRecoil,
    Ram {
        #[serde(default)]
        use_ship_systems: bool,
    },
    DetonateShip {
        #[serde(default)]
        in_attack_range: bool,
    },

    // ===== Energy and devices =====
    HaveEnoughEnergy {
        fail_if_less: f32,
    },
    RechargeEnergy {
        fail_if_less: f32,
        restore_until: f32,
    },
    ActivateDevice {
        device_class: DeviceClass,
    },
    DefendWithFrontalShield,
    SpawnDrones,

    // ===== Ship and mothership state =====
    IsLowOnHp {
        min_value: f32,
    },
    IsControlledByPlayer,
    MothershipRetreated,
    MothershipDestroyed,
    MothershipLowHp {
        min_value: f32,
    },
    GoBerserk,
    Vanish,

    // ===== Utility =====
    Wait {
        cooldown: f32,
        #[serde(default)]
        reset_if_interrupted: bool,
    },
    ShowMessage {
        text: String,
        #[serde(default)]
        color: Option<String>,
    },
    DebugLog {
        text: String,
    },
}

impl NodeKind {
    /// Variant name, for logs.
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Direct child definitions of structural kinds.
    pub fn children(&self) -> Vec<&NodeDefinition> {
        match self {
            NodeKind::Selector { nodes }
            | NodeKind::Sequence { nodes }
            | NodeKind::Parallel { nodes, .. }
            | NodeKind::RandomSelector { nodes, .. }
            | NodeKind::RandomExecutor { nodes, .. } => nodes.iter().collect(),
            NodeKind::Inverter { node }
            | NodeKind::ConstantResult { node, .. }
            | NodeKind::CompleteOnce { node, .. } => node.iter().map(AsRef::as_ref).collect(),
            _ => Vec::new(),
        }
    }

    /// Numeric parameters of this node, children excluded.
    pub fn parameters(&self) -> Vec<f32> {
        match self {
            NodeKind::RandomSelector { cooldown, .. }
            | NodeKind::RandomExecutor { cooldown, .. }
            | NodeKind::LookForSecondaryTargets { cooldown }
            | NodeKind::LookForThreats { cooldown }
            | NodeKind::Wait { cooldown, .. } => vec![*cooldown],
            NodeKind::FindEnemy {
                min_cooldown,
                max_cooldown,
                ..
            } => vec![*min_cooldown, *max_cooldown],
            NodeKind::MoveToAttackRange {
                min_max_lerp,
                multiplier,
            } => vec![*min_max_lerp, *multiplier],
            NodeKind::MaintainAttackRange {
                min_max_lerp,
                tolerance,
            } => vec![*min_max_lerp, *tolerance],
            NodeKind::IsWithinAttackRange { min_max_lerp } => vec![*min_max_lerp],
            NodeKind::FlyAroundMothership {
                min_distance,
                max_distance,
            } => vec![*min_distance, *max_distance],
            NodeKind::HaveIncomingThreat { time_to_collision } => vec![*time_to_collision],
            NodeKind::HaveEnoughEnergy { fail_if_less } => vec![*fail_if_less],
            NodeKind::RechargeEnergy {
                fail_if_less,
                restore_until,
            } => vec![*fail_if_less, *restore_until],
            NodeKind::IsLowOnHp { min_value } | NodeKind::MothershipLowHp { min_value } => {
                vec![*min_value]
            }
            _ => Vec::new(),
        }
    }
}

fn success() -> Status {
    Status::Success
}

fn default_tolerance() -> f32 {
    0.1
}
