//! Weapon lists and derived attack ranges.

use crate::world::{ShipSpec, Weapon, WeaponType};

/// An ordered set of weapons with cached range bounds.
///
/// Both bounds are zero for an empty list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeaponList {
    weapons: Vec<Weapon>,
    range_min: f32,
    range_max: f32,
}

impl WeaponList {
    pub fn new(weapons: Vec<Weapon>) -> Self {
        let (range_min, range_max) = if weapons.is_empty() {
            (0.0, 0.0)
        } else {
            weapons
                .iter()
                .fold((f32::INFINITY, 0.0_f32), |(min, max), weapon| {
                    (min.min(weapon.range), max.max(weapon.range))
                })
        };

        Self {
            weapons,
            range_min,
            range_max,
        }
    }

    /// All weapons of a ship.
    pub fn from_spec(spec: &ShipSpec) -> Self {
        Self::new(spec.weapons.clone())
    }

    /// Subset matching `predicate`, in the same order.
    pub fn filter(&self, predicate: impl Fn(&Weapon) -> bool) -> Self {
        Self::new(
            self.weapons
                .iter()
                .filter(|weapon| predicate(weapon))
                .cloned()
                .collect(),
        )
    }

    pub fn of_type(&self, kind: WeaponType) -> Self {
        self.filter(|weapon| weapon.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Weapon> {
        self.weapons.iter()
    }

    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }

    pub fn range_min(&self) -> f32 {
        self.range_min
    }

    pub fn range_max(&self) -> f32 {
        self.range_max
    }

    pub fn slots(&self) -> Vec<usize> {
        self.weapons.iter().map(|weapon| weapon.slot).collect()
    }

    /// Slowest projectile speed among weapons that fire projectiles.
    ///
    /// `None` when every weapon hits instantly, in which case aiming needs no
    /// lead.
    pub fn projectile_speed(&self) -> Option<f32> {
        self.weapons
            .iter()
            .map(|weapon| weapon.projectile_speed)
            .filter(|speed| *speed > 0.0)
            .min_by(f32::total_cmp)
    }
}
