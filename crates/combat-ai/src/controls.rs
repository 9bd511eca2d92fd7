//! Control outputs written by leaves.
//!
//! [`ShipControls`] is the only channel from the AI to the ship. The owner
//! reads it after each evaluation and applies it to the simulation.

use std::collections::BTreeSet;

use crate::world::Vector2;

/// Per-tick steering, weapon and device commands.
///
/// Everything except the terminal commands (`self_destruct`, `vanish`) is
/// cleared by [`ShipControls::begin_tick`] before each evaluation, so a leaf
/// that is not reached leaves no stale command behind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShipControls {
    /// Forward thrust, `0.0..=1.0`.
    pub thrust: f32,
    /// Desired heading in degrees; `None` keeps the current heading.
    pub course: Option<f32>,
    /// Steering point for remotely controlled ammunition.
    pub ammo_target: Option<Vector2>,
    pub launch_drones: bool,
    pub self_destruct: bool,
    pub vanish: bool,
    fire: BTreeSet<usize>,
    charge: BTreeSet<usize>,
    devices: BTreeSet<usize>,
}

impl ShipControls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all per-tick commands.
    pub fn begin_tick(&mut self) {
        self.thrust = 0.0;
        self.course = None;
        self.ammo_target = None;
        self.launch_drones = false;
        self.fire.clear();
        self.charge.clear();
        self.devices.clear();
    }

    pub fn steer(&mut self, course: f32, thrust: f32) {
        self.course = Some(course);
        self.thrust = thrust.clamp(0.0, 1.0);
    }

    /// Fires the weapon in `slot` this tick. Releases any charge on it.
    pub fn fire(&mut self, slot: usize) {
        self.charge.remove(&slot);
        self.fire.insert(slot);
    }

    /// Holds the trigger of a charged weapon without releasing it.
    pub fn charge(&mut self, slot: usize) {
        if !self.fire.contains(&slot) {
            self.charge.insert(slot);
        }
    }

    pub fn activate_device(&mut self, slot: usize) {
        self.devices.insert(slot);
    }

    pub fn is_firing(&self, slot: usize) -> bool {
        self.fire.contains(&slot)
    }

    pub fn is_charging(&self, slot: usize) -> bool {
        self.charge.contains(&slot)
    }

    pub fn is_device_active(&self, slot: usize) -> bool {
        self.devices.contains(&slot)
    }

    pub fn firing(&self) -> impl Iterator<Item = usize> + '_ {
        self.fire.iter().copied()
    }

    pub fn active_devices(&self) -> impl Iterator<Item = usize> + '_ {
        self.devices.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_tick_keeps_terminal_commands() {
        let mut controls = ShipControls::new();
        controls.steer(90.0, 2.0);
        controls.fire(1);
        controls.activate_device(0);
        controls.self_destruct = true;
        assert_eq!(controls.thrust, 1.0);

        controls.begin_tick();
        assert_eq!(controls.course, None);
        assert_eq!(controls.firing().count(), 0);
        assert!(!controls.is_device_active(0));
        assert!(controls.self_destruct);
    }

    #[test]
    fn firing_releases_charge() {
        let mut controls = ShipControls::new();
        controls.charge(2);
        assert!(controls.is_charging(2));
        controls.fire(2);
        assert!(!controls.is_charging(2));
        controls.charge(2);
        assert!(controls.is_firing(2) && !controls.is_charging(2));
    }
}
