//! Ship handles, dynamic ship state and static loadout.

use std::fmt;

use super::Vector2;

/// Handle to a ship in the scene registry.
///
/// The handle does not keep the ship alive; the scene owns ship lifetime and
/// callers check [`super::Scene::is_active`] before acting on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct ShipId(pub u32);

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ship#{}", self.0)
    }
}

/// Handle to a non-ship unit (projectile, mine, debris).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct UnitId(pub u32);

/// Unit classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub enum UnitClass {
    #[default]
    Ship,
    /// Launched from a mothership's drone bay; `ShipState::owner` is set.
    Drone,
}

/// Lifecycle status of a ship as seen by the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ShipStatus {
    Active,
    Retreated,
    Destroyed,
}

/// Snapshot of a ship's dynamic state.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShipState {
    pub id: ShipId,
    pub class: UnitClass,
    /// Mothership of a drone.
    pub owner: Option<ShipId>,
    pub position: Vector2,
    pub velocity: Vector2,
    /// Heading in degrees.
    pub rotation: f32,
    pub radius: f32,
    /// Hull points as a ratio of maximum, `0.0..=1.0`.
    pub hp: f32,
    /// Energy as a ratio of maximum, `0.0..=1.0`.
    pub energy: f32,
    pub player_controlled: bool,
}

impl ShipState {
    /// A full-health, full-energy ship at `position`.
    pub fn new(id: ShipId, position: Vector2) -> Self {
        Self {
            id,
            class: UnitClass::Ship,
            owner: None,
            position,
            velocity: Vector2::ZERO,
            rotation: 0.0,
            radius: 1.0,
            hp: 1.0,
            energy: 1.0,
            player_controlled: false,
        }
    }

    /// A drone launched by `owner`.
    pub fn drone(id: ShipId, owner: ShipId, position: Vector2) -> Self {
        Self {
            class: UnitClass::Drone,
            owner: Some(owner),
            radius: 0.5,
            ..Self::new(id, position)
        }
    }

    #[inline]
    pub fn is_drone(&self) -> bool {
        self.class == UnitClass::Drone
    }

    /// Distance between hulls (center distance minus the other's radius).
    pub fn gap_to(&self, other: &ShipState) -> f32 {
        (self.position.distance(other.position) - other.radius).max(0.0)
    }
}

/// Snapshot of a non-ship unit that may threaten a ship.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UnitState {
    pub id: UnitId,
    pub position: Vector2,
    pub velocity: Vector2,
    pub radius: f32,
}

/// Weapon families, used for selection filters and requirement checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, strum::Display)]
pub enum WeaponType {
    Projectile,
    Homing,
    /// Remotely steered ammunition.
    Controllable,
    Beam,
    /// Must be held to charge before release.
    Charged,
}

/// One weapon slot of a ship.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Weapon {
    pub slot: usize,
    pub kind: WeaponType,
    pub range: f32,
    /// Zero for instant-hit weapons.
    #[serde(default)]
    pub projectile_speed: f32,
    /// Full firing arc in degrees; 360 for turrets.
    #[serde(default)]
    pub firing_arc: f32,
    /// Knock-back applied to the firing ship.
    #[serde(default)]
    pub recoil: f32,
}

impl Weapon {
    pub fn new(slot: usize, kind: WeaponType, range: f32) -> Self {
        Self {
            slot,
            kind,
            range,
            projectile_speed: 0.0,
            firing_arc: 0.0,
            recoil: 0.0,
        }
    }
}

/// Activatable ship systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, strum::Display)]
pub enum DeviceClass {
    Accelerator,
    Decoy,
    Cloaking,
    FrontalShield,
    EnergyShield,
    RepairBot,
    Teleporter,
    PointDefense,
}

/// One device slot of a ship.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Device {
    pub slot: usize,
    pub class: DeviceClass,
}

/// Static ship configuration the tree is compiled against.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShipSpec {
    #[serde(default)]
    pub class: UnitClass,
    #[serde(default)]
    pub weapons: Vec<Weapon>,
    #[serde(default)]
    pub devices: Vec<Device>,
    #[serde(default)]
    pub drone_bays: u32,
}

impl ShipSpec {
    /// Slots of all devices of `class`.
    pub fn device_slots(&self, class: DeviceClass) -> Vec<usize> {
        self.devices
            .iter()
            .filter(|device| device.class == class)
            .map(|device| device.slot)
            .collect()
    }

    pub fn has_device(&self, class: DeviceClass) -> bool {
        self.devices.iter().any(|device| device.class == class)
    }

    pub fn has_weapon_type(&self, kind: WeaponType) -> bool {
        self.weapons.iter().any(|weapon| weapon.kind == kind)
    }
}
