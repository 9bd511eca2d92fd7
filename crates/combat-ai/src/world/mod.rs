//! World model the AI reads from.
//!
//! Ships are referenced by [`ShipId`] handles; the [`Scene`] owns their state
//! and answers queries by value.

mod math;
mod scene;
mod ship;

pub use math::{Vector2, delta_angle, lerp};
pub use scene::{InMemoryScene, Scene, Side};
pub use ship::{
    Device, DeviceClass, ShipId, ShipSpec, ShipState, ShipStatus, UnitClass, UnitId, UnitState,
    Weapon, WeaponType,
};
