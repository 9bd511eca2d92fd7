//! Checks on the ship's own state.

use behavior_tree::{Behavior, Status};

use crate::context::Context;

/// Succeeds while energy is at least `fail_if_less` and no recharge is in
/// progress.
pub struct HaveEnoughEnergy {
    fail_if_less: f32,
}

impl HaveEnoughEnergy {
    pub fn new(fail_if_less: f32) -> Self {
        Self { fail_if_less }
    }
}

impl Behavior<Context> for HaveEnoughEnergy {
    fn tick(&mut self, ctx: &mut Context) -> Status {
        if ctx.restoring_energy() {
            return Status::Failure;
        }
        match ctx.ship() {
            Some(me) if me.energy >= self.fail_if_less => Status::Success,
            _ => Status::Failure,
        }
    }
}

/// Holds the ship back while its energy recovers.
///
/// Starts restoring when energy drops below `fail_if_less` and keeps
/// restoring until it reaches `restore_until`. Returns `Running` while
/// restoring and `Failure` when no recharge is needed, so it fits at the
/// front of a selector.
pub struct RechargeEnergy {
    fail_if_less: f32,
    restore_until: f32,
}

impl RechargeEnergy {
    pub fn new(fail_if_less: f32, restore_until: f32) -> Self {
        Self {
            fail_if_less,
            restore_until: restore_until.max(fail_if_less),
        }
    }
}

impl Behavior<Context> for RechargeEnergy {
    fn tick(&mut self, ctx: &mut Context) -> Status {
        let Some(me) = ctx.ship() else {
            return Status::Failure;
        };

        if ctx.restoring_energy() {
            if me.energy >= self.restore_until {
                tracing::debug!("Ship {} energy restored ({:.2})", me.id, me.energy);
                ctx.set_restoring_energy(false);
                return Status::Failure;
            }
            return Status::Running;
        }

        if me.energy < self.fail_if_less {
            tracing::debug!("Ship {} low on energy ({:.2}), recharging", me.id, me.energy);
            ctx.set_restoring_energy(true);
            return Status::Running;
        }
        Status::Failure
    }
}

/// Succeeds if hull points are below `min_value`.
pub struct IsLowOnHp {
    min_value: f32,
}

impl IsLowOnHp {
    pub fn new(min_value: f32) -> Self {
        Self { min_value }
    }
}

impl Behavior<Context> for IsLowOnHp {
    fn tick(&mut self, ctx: &mut Context) -> Status {
        match ctx.ship() {
            Some(me) if me.hp < self.min_value => Status::Success,
            _ => Status::Failure,
        }
    }
}

pub struct IsControlledByPlayer;

impl Behavior<Context> for IsControlledByPlayer {
    fn tick(&mut self, ctx: &mut Context) -> Status {
        match ctx.ship() {
            Some(me) if me.player_controlled => Status::Success,
            _ => Status::Failure,
        }
    }
}

/// Succeeds if a cached threat hits within `time_to_collision` seconds.
///
/// Reads the threat cache only; pair it with `LookForThreats`.
pub struct HaveIncomingThreat {
    time_to_collision: f32,
}

impl HaveIncomingThreat {
    pub fn new(time_to_collision: f32) -> Self {
        Self { time_to_collision }
    }
}

impl Behavior<Context> for HaveIncomingThreat {
    fn tick(&mut self, ctx: &mut Context) -> Status {
        if ctx.time_to_collision() <= self.time_to_collision {
            Status::Success
        } else {
            Status::Failure
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::testing::*;

    #[test]
    fn recharge_hysteresis() {
        let scene = scene();
        let mut ctx = context(&scene, &gunship_spec());
        let mut recharge = RechargeEnergy::new(0.2, 0.8);
        let mut enough = HaveEnoughEnergy::new(0.1);

        assert_eq!(recharge.tick(&mut ctx), Status::Failure);
        assert_eq!(enough.tick(&mut ctx), Status::Success);

        scene.update_ship(ME, |ship| ship.energy = 0.1);
        assert_eq!(recharge.tick(&mut ctx), Status::Running);
        assert!(ctx.restoring_energy());

        // Above the trigger but below the target: still restoring.
        scene.update_ship(ME, |ship| ship.energy = 0.5);
        assert_eq!(recharge.tick(&mut ctx), Status::Running);
        assert_eq!(enough.tick(&mut ctx), Status::Failure);

        scene.update_ship(ME, |ship| ship.energy = 0.8);
        assert_eq!(recharge.tick(&mut ctx), Status::Failure);
        assert!(!ctx.restoring_energy());
        assert_eq!(enough.tick(&mut ctx), Status::Success);
    }

    #[test]
    fn hp_and_player_checks() {
        let scene = scene();
        let mut ctx = context(&scene, &gunship_spec());
        assert_eq!(IsLowOnHp::new(0.3).tick(&mut ctx), Status::Failure);
        assert_eq!(IsControlledByPlayer.tick(&mut ctx), Status::Failure);

        scene.update_ship(ME, |ship| {
            ship.hp = 0.2;
            ship.player_controlled = true;
        });
        assert_eq!(IsLowOnHp::new(0.3).tick(&mut ctx), Status::Success);
        assert_eq!(IsControlledByPlayer.tick(&mut ctx), Status::Success);
    }

    #[test]
    fn no_threat_cache_means_no_threat() {
        let scene = scene();
        let mut ctx = context(&scene, &gunship_spec());
        assert_eq!(HaveIncomingThreat::new(1000.0).tick(&mut ctx), Status::Failure);
    }
}
