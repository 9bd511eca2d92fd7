//! Drone leaves that depend on the mothership.

use behavior_tree::{Behavior, Status};

use crate::context::Context;
use crate::nodes::heading_to;
use crate::world::{ShipState, ShipStatus};

/// Owner of the controlled drone, whatever its status.
fn owner(ctx: &Context) -> Option<ShipState> {
    let owner = ctx.ship()?.owner?;
    ctx.scene().ship(owner)
}

fn owner_status(ctx: &Context) -> Option<ShipStatus> {
    let owner = ctx.ship()?.owner?;
    Some(ctx.scene().status(owner))
}

/// Targets the drone's own mothership.
///
/// Fails for non-drones and when the mothership is no longer active.
pub struct TargetMothership;

impl Behavior<Context> for TargetMothership {
    fn tick(&mut self, ctx: &mut Context) -> Status {
        let Some(me) = ctx.ship() else {
            return Status::Failure;
        };
        if !me.is_drone() {
            return Status::Failure;
        }
        match ctx.mothership() {
            Some(owner) => {
                ctx.set_target(Some(owner.id));
                Status::Success
            }
            None => Status::Failure,
        }
    }
}

/// Orbits the mothership at a fixed distance.
///
/// The distance is rolled once when the tree is built, so drones of one
/// mothership spread out.
pub struct FlyAroundMothership {
    distance: f32,
}

impl FlyAroundMothership {
    pub fn new(distance: f32) -> Self {
        Self { distance }
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }
}

impl Behavior<Context> for FlyAroundMothership {
    fn tick(&mut self, ctx: &mut Context) -> Status {
        let (Some(me), Some(owner)) = (ctx.ship(), ctx.mothership()) else {
            return Status::Failure;
        };

        let offset = me.position - owner.position;
        let distance = offset.length();
        let controls = ctx.controls_mut();
        if distance > self.distance * 1.2 || distance <= f32::EPSILON {
            controls.steer(heading_to(me.position, owner.position), 1.0);
        } else if distance < self.distance * 0.8 {
            controls.steer(offset.angle(), 0.5);
        } else {
            controls.steer(offset.perpendicular().angle(), 0.5);
        }
        Status::Success
    }
}

pub struct MothershipRetreated;

impl Behavior<Context> for MothershipRetreated {
    fn tick(&mut self, ctx: &mut Context) -> Status {
        match owner_status(ctx) {
            Some(ShipStatus::Retreated) => Status::Success,
            _ => Status::Failure,
        }
    }
}

pub struct MothershipDestroyed;

impl Behavior<Context> for MothershipDestroyed {
    fn tick(&mut self, ctx: &mut Context) -> Status {
        match owner_status(ctx) {
            Some(ShipStatus::Destroyed) => Status::Success,
            _ => Status::Failure,
        }
    }
}

/// Succeeds if the active mothership's hull is below `min_value`.
pub struct MothershipLowHp {
    min_value: f32,
}

impl MothershipLowHp {
    pub fn new(min_value: f32) -> Self {
        Self { min_value }
    }
}

impl Behavior<Context> for MothershipLowHp {
    fn tick(&mut self, ctx: &mut Context) -> Status {
        match owner(ctx) {
            Some(owner) if ctx.is_active(owner.id) && owner.hp < self.min_value => Status::Success,
            _ => Status::Failure,
        }
    }
}

/// Releases a drone from its mothership leash for good.
pub struct GoBerserk;

impl Behavior<Context> for GoBerserk {
    fn tick(&mut self, ctx: &mut Context) -> Status {
        match ctx.ship() {
            Some(me) if me.is_drone() => {
                if !ctx.is_berserk() {
                    tracing::debug!("Drone {} going berserk", me.id);
                    ctx.set_berserk(true);
                }
                Status::Success
            }
            _ => Status::Failure,
        }
    }
}
