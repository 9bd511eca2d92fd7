//! Device and drone bay leaves.

use behavior_tree::{AlwaysFailure, Behavior, Status};

use crate::context::Context;
use crate::nodes::ShipNode;
use crate::world::{DeviceClass, ShipSpec};

/// Threats closer than this many seconds raise the frontal shield.
pub const SHIELD_REACTION_TIME: f32 = 1.0;

/// Activates every device of one class.
pub struct ActivateDevice {
    slots: Vec<usize>,
}

impl ActivateDevice {
    pub fn create(spec: &ShipSpec, class: DeviceClass) -> ShipNode {
        let slots = spec.device_slots(class);
        if slots.is_empty() {
            return Box::new(AlwaysFailure);
        }
        Box::new(Self { slots })
    }
}

impl Behavior<Context> for ActivateDevice {
    fn tick(&mut self, ctx: &mut Context) -> Status {
        let controls = ctx.controls_mut();
        for slot in &self.slots {
            controls.activate_device(*slot);
        }
        Status::Success
    }
}

/// Raises the frontal shield against an imminent hit.
///
/// Reads the threat cache; fails when nothing hits within
/// [`SHIELD_REACTION_TIME`].
pub struct DefendWithFrontalShield {
    slots: Vec<usize>,
}

impl DefendWithFrontalShield {
    pub fn create(spec: &ShipSpec) -> ShipNode {
        let slots = spec.device_slots(DeviceClass::FrontalShield);
        if slots.is_empty() {
            return Box::new(AlwaysFailure);
        }
        Box::new(Self { slots })
    }
}

impl Behavior<Context> for DefendWithFrontalShield {
    fn tick(&mut self, ctx: &mut Context) -> Status {
        if ctx.time_to_collision() > SHIELD_REACTION_TIME {
            return Status::Failure;
        }
        let Some((me, threat)) = ctx.ship().zip(ctx.threats().first().cloned()) else {
            return Status::Failure;
        };

        let controls = ctx.controls_mut();
        controls.course = Some((threat.position - me.position).angle());
        for slot in &self.slots {
            controls.activate_device(*slot);
        }
        Status::Success
    }
}

/// Launches drones from the drone bays.
pub struct SpawnDrones;

impl SpawnDrones {
    pub fn create(spec: &ShipSpec) -> ShipNode {
        if spec.drone_bays == 0 {
            return Box::new(AlwaysFailure);
        }
        Box::new(Self)
    }
}

impl Behavior<Context> for SpawnDrones {
    fn tick(&mut self, ctx: &mut Context) -> Status {
        ctx.controls_mut().launch_drones = true;
        Status::Success
    }
}
