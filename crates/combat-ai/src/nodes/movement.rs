//! Steering leaves.

use behavior_tree::{Behavior, Status};

use crate::context::Context;
use crate::nodes::{attack_range, heading_to, lead_point, ship_and_target};

/// Speed below which a ship counts as stopped.
const STOPPED_SPEED: f32 = 0.1;

/// Approaches the target until within attack range.
///
/// The range is `lerp(range_min, range_max, min_max_lerp) * multiplier`.
/// Returns `Running` while closing in and `Success` once within range.
pub struct MoveToAttackRange {
    min_max_lerp: f32,
    multiplier: f32,
}

impl MoveToAttackRange {
    /// A non-positive `multiplier` means 1.
    pub fn new(min_max_lerp: f32, multiplier: f32) -> Self {
        Self {
            min_max_lerp,
            multiplier: if multiplier > 0.0 { multiplier } else { 1.0 },
        }
    }
}

impl Behavior<Context> for MoveToAttackRange {
    fn tick(&mut self, ctx: &mut Context) -> Status {
        let Some((me, target)) = ship_and_target(ctx) else {
            return Status::Failure;
        };

        let range = attack_range(ctx, self.min_max_lerp) * self.multiplier;
        if me.gap_to(&target) <= range {
            return Status::Success;
        }

        ctx.controls_mut()
            .steer(heading_to(me.position, target.position), 1.0);
        Status::Running
    }
}

/// Keeps the distance to the target within `range ± range * tolerance`.
pub struct MaintainAttackRange {
    min_max_lerp: f32,
    tolerance: f32,
}

impl MaintainAttackRange {
    pub fn new(min_max_lerp: f32, tolerance: f32) -> Self {
        Self {
            min_max_lerp,
            tolerance: tolerance.abs(),
        }
    }
}

impl Behavior<Context> for MaintainAttackRange {
    fn tick(&mut self, ctx: &mut Context) -> Status {
        let Some((me, target)) = ship_and_target(ctx) else {
            return Status::Failure;
        };

        let range = attack_range(ctx, self.min_max_lerp);
        let gap = me.gap_to(&target);
        let towards = heading_to(me.position, target.position);

        if gap > range * (1.0 + self.tolerance) {
            ctx.controls_mut().steer(towards, 1.0);
            Status::Running
        } else if gap < range * (1.0 - self.tolerance) {
            ctx.controls_mut().steer(towards + 180.0, 1.0);
            Status::Running
        } else {
            Status::Success
        }
    }
}

/// Succeeds if the target is within the interpolated attack range.
pub struct IsWithinAttackRange {
    min_max_lerp: f32,
}

impl IsWithinAttackRange {
    pub fn new(min_max_lerp: f32) -> Self {
        Self { min_max_lerp }
    }
}

impl Behavior<Context> for IsWithinAttackRange {
    fn tick(&mut self, ctx: &mut Context) -> Status {
        match ship_and_target(ctx) {
            Some((me, target)) if me.gap_to(&target) <= attack_range(ctx, self.min_max_lerp) => {
                Status::Success
            }
            _ => Status::Failure,
        }
    }
}

/// Full thrust toward the target.
pub struct Chase;

impl Behavior<Context> for Chase {
    fn tick(&mut self, ctx: &mut Context) -> Status {
        let Some((me, target)) = ship_and_target(ctx) else {
            return Status::Failure;
        };
        ctx.controls_mut()
            .steer(heading_to(me.position, target.position), 1.0);
        Status::Success
    }
}

/// Brakes against the current velocity.
///
/// Returns `Running` while moving and `Success` once stopped.
pub struct Stop;

impl Behavior<Context> for Stop {
    fn tick(&mut self, ctx: &mut Context) -> Status {
        let Some(me) = ctx.ship() else {
            return Status::Failure;
        };

        if me.velocity.length() <= STOPPED_SPEED {
            ctx.controls_mut().thrust = 0.0;
            return Status::Success;
        }
        ctx.controls_mut().steer((-me.velocity).angle(), 1.0);
        Status::Running
    }
}

/// Turns toward the target without thrust.
pub struct LookAtTarget;

impl Behavior<Context> for LookAtTarget {
    fn tick(&mut self, ctx: &mut Context) -> Status {
        let Some((me, target)) = ship_and_target(ctx) else {
            return Status::Failure;
        };
        ctx.controls_mut().course = Some(heading_to(me.position, target.position));
        Status::Success
    }
}

/// Turns toward where the selected weapons' projectiles would meet the target.
pub struct SustainAim;

impl Behavior<Context> for SustainAim {
    fn tick(&mut self, ctx: &mut Context) -> Status {
        let Some((me, target)) = ship_and_target(ctx) else {
            return Status::Failure;
        };
        let speed = ctx.selected_weapons().projectile_speed();
        let aim = lead_point(&me, &target, speed);
        ctx.controls_mut().course = Some(heading_to(me.position, aim));
        Status::Success
    }
}

/// Dodges the most imminent threat by steering across its path.
pub struct AvoidThreats;

impl Behavior<Context> for AvoidThreats {
    fn tick(&mut self, ctx: &mut Context) -> Status {
        let Some(me) = ctx.ship() else {
            return Status::Failure;
        };
        let Some(threat) = ctx.threats().first().cloned() else {
            return Status::Failure;
        };

        // Sidestep to the side the threat is not already drifting toward.
        let offset = me.position - threat.position;
        let across = offset.perpendicular();
        let relative = threat.velocity - me.velocity;
        let escape = if across.dot(relative) > 0.0 { -across } else { across };

        tracing::trace!(
            "Ship {} avoiding {:?}, impact in {:.2}s",
            me.id,
            threat.unit,
            threat.time_to_hit
        );
        ctx.controls_mut().steer(escape.angle(), 1.0);
        Status::Success
    }
}
