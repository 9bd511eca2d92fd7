//! Weapon and attack leaves.

use behavior_tree::{AlwaysFailure, Behavior, Status};

use crate::context::Context;
use crate::nodes::{ShipNode, heading_to, lead_point, ship_and_target};
use crate::settings::AiLevel;
use crate::weapons::WeaponList;
use crate::world::{DeviceClass, ShipId, ShipSpec, WeaponType, delta_angle};

/// Turret arc; weapons with this arc fire in any direction.
const FULL_ARC: f32 = 360.0;

#[derive(Debug, Clone, Copy)]
struct Aim {
    target: ShipId,
    offset: f32,
    since: f32,
}

/// Aims at the target and fires the selected weapons that can hit it.
///
/// Each new target gets a random aim offset of up to
/// [`AiLevel::aim_error`] degrees, and no shot is fired before it has been
/// tracked for [`AiLevel::reaction_time`] seconds. A fixed weapon fires once
/// the heading error is within half its arc plus [`AiLevel::fire_tolerance`].
///
/// Fails without a target or when no selected weapon reaches it.
pub struct Attack {
    level: AiLevel,
    aim: Option<Aim>,
}

impl Attack {
    pub fn new(level: AiLevel) -> Self {
        Self { level, aim: None }
    }

    fn aim_at(&mut self, ctx: &mut Context, target: ShipId) -> Aim {
        match self.aim {
            Some(aim) if aim.target == target => aim,
            _ => {
                let error = self.level.aim_error();
                let aim = Aim {
                    target,
                    offset: ctx.random_range(-error, error),
                    since: ctx.elapsed_time(),
                };
                self.aim = Some(aim);
                aim
            }
        }
    }
}

impl Behavior<Context> for Attack {
    fn tick(&mut self, ctx: &mut Context) -> Status {
        let Some((me, target)) = ship_and_target(ctx) else {
            return Status::Failure;
        };

        let gap = me.gap_to(&target);
        let weapons = ctx.selected_weapons().filter(|weapon| weapon.range >= gap);
        if weapons.is_empty() {
            return Status::Failure;
        }

        let aim = self.aim_at(ctx, target.id);
        let course =
            heading_to(me.position, lead_point(&me, &target, weapons.projectile_speed())) + aim.offset;
        ctx.controls_mut().course = Some(course);

        if ctx.elapsed_time() - aim.since < self.level.reaction_time() {
            return Status::Success;
        }

        let error = delta_angle(me.rotation, course).abs();
        let tolerance = self.level.fire_tolerance();
        for weapon in weapons.iter() {
            if weapon.firing_arc >= FULL_ARC || error <= weapon.firing_arc / 2.0 + tolerance {
                ctx.controls_mut().fire(weapon.slot);
            }
        }

        tracing::trace!(
            "Ship {} attacking {}: gap={:.1}, error={:.1}",
            me.id,
            target.id,
            gap,
            error
        );
        Status::Success
    }
}

/// Restricts the selected weapons to one type.
pub struct SelectWeapon {
    weapons: WeaponList,
}

impl SelectWeapon {
    pub fn create(spec: &ShipSpec, kind: WeaponType) -> ShipNode {
        let weapons = WeaponList::from_spec(spec).of_type(kind);
        if weapons.is_empty() {
            return Box::new(AlwaysFailure);
        }
        Box::new(Self { weapons })
    }
}

impl Behavior<Context> for SelectWeapon {
    fn tick(&mut self, ctx: &mut Context) -> Status {
        ctx.select_weapons(self.weapons.clone());
        Status::Success
    }
}

/// Holds charged weapons and releases them once the target is in range.
pub struct ChargeWeapons {
    weapons: WeaponList,
}

impl ChargeWeapons {
    pub fn create(spec: &ShipSpec) -> ShipNode {
        let weapons = WeaponList::from_spec(spec).of_type(WeaponType::Charged);
        if weapons.is_empty() {
            return Box::new(AlwaysFailure);
        }
        Box::new(Self { weapons })
    }
}

impl Behavior<Context> for ChargeWeapons {
    fn tick(&mut self, ctx: &mut Context) -> Status {
        let Some((me, target)) = ship_and_target(ctx) else {
            return Status::Failure;
        };

        let gap = me.gap_to(&target);
        let controls = ctx.controls_mut();
        for weapon in self.weapons.iter() {
            if gap <= weapon.range {
                controls.fire(weapon.slot);
            } else {
                controls.charge(weapon.slot);
            }
        }
        Status::Success
    }
}

/// Steers remotely controlled ammunition at the target.
pub struct TrackControllableAmmo;

impl TrackControllableAmmo {
    pub fn create(spec: &ShipSpec) -> ShipNode {
        if !spec.has_weapon_type(WeaponType::Controllable) {
            return Box::new(AlwaysFailure);
        }
        Box::new(Self)
    }
}

impl Behavior<Context> for TrackControllableAmmo {
    fn tick(&mut self, ctx: &mut Context) -> Status {
        let Some(target) = ctx.target_state() else {
            return Status::Failure;
        };
        ctx.controls_mut().ammo_target = Some(target.position);
        Status::Success
    }
}

/// Backs away from a target that is too close by firing recoil weapons at it.
///
/// Fails unless the target is closer than the shortest weapon range.
pub struct UseRecoil {
    weapons: WeaponList,
}

impl UseRecoil {
    pub fn create(spec: &ShipSpec) -> ShipNode {
        let weapons = WeaponList::from_spec(spec).filter(|weapon| weapon.recoil > 0.0);
        if weapons.is_empty() {
            return Box::new(AlwaysFailure);
        }
        Box::new(Self { weapons })
    }
}

impl Behavior<Context> for UseRecoil {
    fn tick(&mut self, ctx: &mut Context) -> Status {
        let Some((me, target)) = ship_and_target(ctx) else {
            return Status::Failure;
        };
        if me.gap_to(&target) >= ctx.attack_range_min() {
            return Status::Failure;
        }

        let controls = ctx.controls_mut();
        controls.course = Some(heading_to(me.position, target.position));
        for slot in self.weapons.slots() {
            controls.fire(slot);
        }
        Status::Success
    }
}

/// Charges the target at full thrust, optionally with accelerators on.
pub struct Ram {
    accelerators: Vec<usize>,
}

impl Ram {
    pub fn new(spec: &ShipSpec, use_ship_systems: bool) -> Self {
        let accelerators = if use_ship_systems {
            spec.device_slots(DeviceClass::Accelerator)
        } else {
            Vec::new()
        };
        Self { accelerators }
    }
}

impl Behavior<Context> for Ram {
    fn tick(&mut self, ctx: &mut Context) -> Status {
        let Some((me, target)) = ship_and_target(ctx) else {
            return Status::Failure;
        };

        let controls = ctx.controls_mut();
        controls.steer(heading_to(me.position, target.position), 1.0);
        for slot in &self.accelerators {
            controls.activate_device(*slot);
        }
        Status::Success
    }
}

/// Orders the ship to self-destruct.
///
/// With `in_attack_range`, only does so once the target is within the
/// longest weapon range.
pub struct DetonateShip {
    in_attack_range: bool,
}

impl DetonateShip {
    pub fn new(in_attack_range: bool) -> Self {
        Self { in_attack_range }
    }
}

impl Behavior<Context> for DetonateShip {
    fn tick(&mut self, ctx: &mut Context) -> Status {
        if self.in_attack_range {
            match ship_and_target(ctx) {
                Some((me, target)) if me.gap_to(&target) <= ctx.attack_range_max() => {}
                _ => return Status::Failure,
            }
        }

        tracing::debug!("Ship {} self-destructing", ctx.ship_id());
        ctx.controls_mut().self_destruct = true;
        Status::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::testing::*;
    use crate::world::{Device, Vector2, Weapon};

    #[test]
    fn attack_fires_weapons_in_range_after_reaction() {
        let scene = scene();
        add_enemy(&scene, ENEMY, Vector2::new(6.0, 0.0));
        let mut ctx = context(&scene, &gunship_spec());
        ctx.update_target(Some(ENEMY));

        let mut node = Attack::new(AiLevel::Expert);
        assert_eq!(node.tick(&mut ctx), Status::Success);
        assert!(ctx.controls().is_firing(0));
        // The beam (range 4) cannot reach a gap of 5.
        assert!(!ctx.controls().is_firing(1));
    }

    #[test]
    fn attack_waits_for_reaction_time() {
        let scene = scene();
        add_enemy(&scene, ENEMY, Vector2::new(6.0, 0.0));
        let mut ctx = context(&scene, &gunship_spec());
        ctx.update_target(Some(ENEMY));

        let mut node = Attack::new(AiLevel::Easy);
        assert_eq!(node.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.controls().firing().count(), 0);

        ctx.update(AiLevel::Easy.reaction_time() + 0.1);
        ctx.controls_mut().begin_tick();
        node.tick(&mut ctx);
        assert!(ctx.controls().is_firing(0));
    }

    #[test]
    fn attack_fails_out_of_range_or_without_target() {
        let scene = scene();
        let mut ctx = context(&scene, &gunship_spec());
        let mut node = Attack::new(AiLevel::Expert);
        assert_eq!(node.tick(&mut ctx), Status::Failure);

        add_enemy(&scene, ENEMY, Vector2::new(50.0, 0.0));
        ctx.update_target(Some(ENEMY));
        assert_eq!(node.tick(&mut ctx), Status::Failure);
    }

    #[test]
    fn fixed_weapon_needs_alignment() {
        let scene = scene();
        add_enemy(&scene, ENEMY, Vector2::new(0.0, 6.0));
        let mut ctx = context(&scene, &gunship_spec());
        ctx.update_target(Some(ENEMY));

        // Target is 90 degrees off the nose.
        let mut node = Attack::new(AiLevel::Expert);
        assert_eq!(node.tick(&mut ctx), Status::Success);
        let course = ctx.controls().course.unwrap();
        assert!((course - 90.0).abs() < 1e-3);
        assert_eq!(ctx.controls().firing().count(), 0);
    }

    #[test]
    fn select_weapon_narrows_selection() {
        let spec = gunship_spec();
        let scene = scene();
        let mut ctx = context(&scene, &spec);

        let mut node = SelectWeapon::create(&spec, WeaponType::Beam);
        assert_eq!(node.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.selected_weapons().slots(), vec![1]);

        let missing = SelectWeapon::create(&spec, WeaponType::Homing);
        assert_eq!(missing.constant(), Some(Status::Failure));
    }

    #[test]
    fn capability_gated_factories() {
        let plain = gunship_spec();
        assert_eq!(ChargeWeapons::create(&plain).constant(), Some(Status::Failure));
        assert_eq!(TrackControllableAmmo::create(&plain).constant(), Some(Status::Failure));
        assert_eq!(UseRecoil::create(&plain).constant(), Some(Status::Failure));

        let mut armed = plain.clone();
        armed.weapons.push(Weapon::new(2, WeaponType::Charged, 8.0));
        armed.weapons.push(Weapon::new(3, WeaponType::Controllable, 30.0));
        assert_eq!(ChargeWeapons::create(&armed).constant(), None);
        assert_eq!(TrackControllableAmmo::create(&armed).constant(), None);
    }

    #[test]
    fn charge_holds_until_in_range() {
        let mut spec = gunship_spec();
        spec.weapons.push(Weapon::new(2, WeaponType::Charged, 8.0));
        let scene = scene();
        add_enemy(&scene, ENEMY, Vector2::new(20.0, 0.0));
        let mut ctx = context(&scene, &spec);
        ctx.update_target(Some(ENEMY));

        let mut node = ChargeWeapons::create(&spec);
        assert_eq!(node.tick(&mut ctx), Status::Success);
        assert!(ctx.controls().is_charging(2));

        scene.update_ship(ENEMY, |ship| ship.position = Vector2::new(5.0, 0.0));
        node.tick(&mut ctx);
        assert!(ctx.controls().is_firing(2));
    }

    #[test]
    fn ram_uses_accelerators() {
        let mut spec = gunship_spec();
        spec.devices.push(Device {
            slot: 4,
            class: DeviceClass::Accelerator,
        });
        let scene = scene();
        add_enemy(&scene, ENEMY, Vector2::new(20.0, 0.0));
        let mut ctx = context(&scene, &spec);
        ctx.update_target(Some(ENEMY));

        assert_eq!(Ram::new(&spec, true).tick(&mut ctx), Status::Success);
        assert!(ctx.controls().is_device_active(4));
        assert_eq!(ctx.controls().thrust, 1.0);
    }

    #[test]
    fn detonate_respects_range() {
        let scene = scene();
        add_enemy(&scene, ENEMY, Vector2::new(30.0, 0.0));
        let mut ctx = context(&scene, &gunship_spec());
        ctx.update_target(Some(ENEMY));

        assert_eq!(DetonateShip::new(true).tick(&mut ctx), Status::Failure);
        assert!(!ctx.controls().self_destruct);
        assert_eq!(DetonateShip::new(false).tick(&mut ctx), Status::Success);
        assert!(ctx.controls().self_destruct);
    }
}
