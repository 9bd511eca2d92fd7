//! Leaf nodes for ship behavior trees.
//!
//! Every leaf reads the world through [`Context`] and writes its decisions
//! into the context's controls, target or flags. A leaf returns `Failure`
//! whenever its precondition (target, energy, device, owner) is not met.
//!
//! Leaves that need a loadout capability have a `create` factory that
//! returns an always-failing leaf when the ship lacks it.

pub mod combat;
pub mod conditions;
pub mod devices;
pub mod mothership;
pub mod movement;
pub mod targeting;
pub mod utility;

pub use combat::{Attack, ChargeWeapons, DetonateShip, Ram, SelectWeapon, TrackControllableAmmo, UseRecoil};
pub use conditions::{HaveEnoughEnergy, HaveIncomingThreat, IsControlledByPlayer, IsLowOnHp, RechargeEnergy};
pub use devices::{ActivateDevice, DefendWithFrontalShield, SpawnDrones};
pub use mothership::{
    FlyAroundMothership, GoBerserk, MothershipDestroyed, MothershipLowHp, MothershipRetreated,
    TargetMothership,
};
pub use movement::{
    AvoidThreats, Chase, IsWithinAttackRange, LookAtTarget, MaintainAttackRange,
    MoveToAttackRange, Stop, SustainAim,
};
pub use targeting::{FindEnemy, LookForSecondaryTargets, LookForThreats};
pub use utility::{DebugLog, ShowMessage, Vanish, Wait};

use behavior_tree::Node;

use crate::context::Context;
use crate::world::{ShipState, Vector2, lerp};

/// A compiled node evaluated against a ship context.
pub type ShipNode = Node<Context>;

/// Heading from `from` to `to`, in degrees.
pub(crate) fn heading_to(from: Vector2, to: Vector2) -> f32 {
    (to - from).angle()
}

/// Attack range interpolated between the shortest and longest weapon range.
pub(crate) fn attack_range(ctx: &Context, min_max_lerp: f32) -> f32 {
    lerp(ctx.attack_range_min(), ctx.attack_range_max(), min_max_lerp)
}

/// Where to aim so that a projectile of `speed` meets `target`.
///
/// Without a projectile speed (instant-hit weapons) this is the target's
/// current position.
pub(crate) fn lead_point(shooter: &ShipState, target: &ShipState, speed: Option<f32>) -> Vector2 {
    let Some(speed) = speed else {
        return target.position;
    };

    let relative = target.velocity - shooter.velocity;
    let mut point = target.position;
    for _ in 0..2 {
        let time = shooter.position.distance(point) / speed;
        point = target.position + relative * time;
    }
    point
}

/// The controlled ship and its active target, or `None` if either is gone.
pub(crate) fn ship_and_target(ctx: &Context) -> Option<(ShipState, ShipState)> {
    Some((ctx.ship()?, ctx.target_state()?))
}
