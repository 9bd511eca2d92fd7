//! Compile-time predicates gating node inclusion.

use crate::settings::{AiLevel, AiSettings};
use crate::world::{DeviceClass, ShipSpec, UnitClass, WeaponType};

/// Predicate over a ship's loadout and the AI settings.
///
/// Checked once while the tree is compiled; a node whose requirement fails is
/// replaced by an always-failing leaf.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Requirement {
    #[default]
    Always,
    All(Vec<Requirement>),
    Any(Vec<Requirement>),
    /// None of the listed requirements holds.
    None(Vec<Requirement>),
    Not(Box<Requirement>),
    /// Inclusive level range.
    AiLevel {
        #[serde(default = "lowest_level")]
        min: AiLevel,
        #[serde(default = "highest_level")]
        max: AiLevel,
    },
    HasWeapons,
    HasWeaponType(WeaponType),
    HasDevice(DeviceClass),
    HasDroneBays,
    IsDrone,
    IsShip,
}

fn lowest_level() -> AiLevel {
    AiLevel::Easy
}

fn highest_level() -> AiLevel {
    AiLevel::Expert
}

impl Requirement {
    pub fn is_met(&self, spec: &ShipSpec, settings: &AiSettings) -> bool {
        match self {
            Requirement::Always => true,
            Requirement::All(items) => items.iter().all(|item| item.is_met(spec, settings)),
            Requirement::Any(items) => items.iter().any(|item| item.is_met(spec, settings)),
            Requirement::None(items) => !items.iter().any(|item| item.is_met(spec, settings)),
            Requirement::Not(item) => !item.is_met(spec, settings),
            Requirement::AiLevel { min, max } => (*min..=*max).contains(&settings.level),
            Requirement::HasWeapons => !spec.weapons.is_empty(),
            Requirement::HasWeaponType(kind) => spec.has_weapon_type(*kind),
            Requirement::HasDevice(class) => spec.has_device(*class),
            Requirement::HasDroneBays => spec.drone_bays > 0,
            Requirement::IsDrone => spec.class == UnitClass::Drone,
            Requirement::IsShip => spec.class == UnitClass::Ship,
        }
    }
}
