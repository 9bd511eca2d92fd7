//! Target acquisition leaves.

use behavior_tree::{Behavior, Status};

use crate::context::{Context, ThreatAnalyzer};
use crate::world::{ShipState, UnitClass};

/// Picks the nearest enemy as the target.
///
/// A still-active target is kept until `time_since_target_update` reaches
/// the current cooldown. The cooldown is re-rolled in
/// `[min_cooldown, max_cooldown]` after every search.
///
/// With a drone range, candidates are limited to that radius around the
/// mothership unless the drone has gone berserk.
pub struct FindEnemy {
    min_cooldown: f32,
    max_cooldown: f32,
    in_attack_range: bool,
    ignore_drones: bool,
    drone_range: Option<f32>,
    cooldown: f32,
}

impl FindEnemy {
    pub fn new(min_cooldown: f32, max_cooldown: f32, in_attack_range: bool, ignore_drones: bool) -> Self {
        Self {
            min_cooldown,
            max_cooldown: max_cooldown.max(min_cooldown),
            in_attack_range,
            ignore_drones,
            drone_range: None,
            cooldown: 0.0,
        }
    }

    /// Restricts the search to `range` around the mothership.
    pub fn with_drone_range(mut self, range: f32) -> Self {
        self.drone_range = Some(range);
        self
    }

    fn search(&self, ctx: &Context, me: &ShipState) -> Option<ShipState> {
        let leash = match self.drone_range {
            Some(range) if !ctx.is_berserk() => ctx.mothership().map(|owner| (owner.position, range)),
            _ => None,
        };
        let attack_range = ctx.attack_range_max();
        let scene = ctx.scene();

        scene
            .enemies_of(me.id)
            .into_iter()
            .filter_map(|id| scene.active_ship(id))
            .filter(|enemy| !(self.ignore_drones && enemy.class == UnitClass::Drone))
            .filter(|enemy| !self.in_attack_range || me.gap_to(enemy) <= attack_range)
            .filter(|enemy| match leash {
                Some((center, range)) => center.distance(enemy.position) <= range,
                None => true,
            })
            .min_by(|a, b| me.gap_to(a).total_cmp(&me.gap_to(b)))
    }
}

impl Behavior<Context> for FindEnemy {
    fn tick(&mut self, ctx: &mut Context) -> Status {
        let Some(me) = ctx.ship() else {
            return Status::Failure;
        };

        // Targets set by other leaves (a drone's own mothership) are not kept.
        let current = ctx
            .target()
            .filter(|id| ctx.is_active(*id) && ctx.scene().enemies_of(me.id).contains(id));
        if current.is_some() && ctx.time_since_target_update() < self.cooldown {
            return Status::Success;
        }

        self.cooldown = ctx.random_range(self.min_cooldown, self.max_cooldown);
        match self.search(ctx, &me) {
            Some(enemy) => {
                ctx.update_target(Some(enemy.id));
                Status::Success
            }
            None if current.is_some() => {
                ctx.update_target(current);
                Status::Success
            }
            None => {
                if ctx.target().is_some() {
                    ctx.update_target(None);
                }
                Status::Failure
            }
        }
    }
}

/// Refreshes the secondary target cache. Always succeeds.
pub struct LookForSecondaryTargets {
    cooldown: f32,
}

impl LookForSecondaryTargets {
    pub fn new(cooldown: f32) -> Self {
        Self { cooldown }
    }
}

impl Behavior<Context> for LookForSecondaryTargets {
    fn tick(&mut self, ctx: &mut Context) -> Status {
        ctx.update_target_list(self.cooldown);
        Status::Success
    }
}

/// Refreshes the threat cache. Always succeeds.
pub struct LookForThreats {
    cooldown: f32,
    analyzer: ThreatAnalyzer,
}

impl LookForThreats {
    pub fn new(cooldown: f32, analyzer: ThreatAnalyzer) -> Self {
        Self { cooldown, analyzer }
    }
}

impl Behavior<Context> for LookForThreats {
    fn tick(&mut self, ctx: &mut Context) -> Status {
        ctx.update_threat_list(&self.analyzer, self.cooldown);
        Status::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::testing::*;
    use crate::world::{ShipId, ShipStatus, Side, Vector2};

    #[test]
    fn fails_without_enemies() {
        let scene = scene();
        let mut ctx = context(&scene, &gunship_spec());
        let mut node = FindEnemy::new(1.0, 2.0, false, false);

        assert_eq!(node.tick(&mut ctx), Status::Failure);
        assert_eq!(ctx.target(), None);
    }

    #[test]
    fn picks_nearest_enemy() {
        let scene = scene();
        add_enemy(&scene, ShipId(2), Vector2::new(20.0, 0.0));
        add_enemy(&scene, ShipId(3), Vector2::new(5.0, 0.0));
        let mut ctx = context(&scene, &gunship_spec());
        let mut node = FindEnemy::new(1.0, 2.0, false, false);

        assert_eq!(node.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.target(), Some(ShipId(3)));
    }

    #[test]
    fn keeps_target_during_cooldown() {
        let scene = scene();
        add_enemy(&scene, ShipId(2), Vector2::new(20.0, 0.0));
        let mut ctx = context(&scene, &gunship_spec());
        let mut node = FindEnemy::new(5.0, 5.0, false, false);
        node.tick(&mut ctx);

        add_enemy(&scene, ShipId(3), Vector2::new(5.0, 0.0));
        ctx.update(1.0);
        assert_eq!(node.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.target(), Some(ShipId(2)));

        ctx.update(5.0);
        node.tick(&mut ctx);
        assert_eq!(ctx.target(), Some(ShipId(3)));
    }

    #[test]
    fn drops_friendly_target_within_cooldown() {
        let scene = scene();
        let friend = ShipId(5);
        scene.add_ship(ShipState::new(friend, Vector2::new(3.0, 0.0)), Side(0));
        add_enemy(&scene, ShipId(2), Vector2::new(20.0, 0.0));
        let mut ctx = context(&scene, &gunship_spec());
        let mut node = FindEnemy::new(5.0, 5.0, false, false);
        node.tick(&mut ctx);
        assert_eq!(ctx.target(), Some(ShipId(2)));

        ctx.set_target(Some(friend));
        ctx.update(0.5);
        assert_eq!(node.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.target(), Some(ShipId(2)));

        scene.set_status(ShipId(2), ShipStatus::Destroyed);
        ctx.set_target(Some(friend));
        ctx.update(0.5);
        assert_eq!(node.tick(&mut ctx), Status::Failure);
        assert_eq!(ctx.target(), None);
    }

    #[test]
    fn clears_dead_target() {
        let scene = scene();
        add_enemy(&scene, ShipId(2), Vector2::new(20.0, 0.0));
        let mut ctx = context(&scene, &gunship_spec());
        let mut node = FindEnemy::new(5.0, 5.0, false, false);
        node.tick(&mut ctx);

        scene.set_status(ShipId(2), ShipStatus::Destroyed);
        ctx.update(0.1);
        assert_eq!(node.tick(&mut ctx), Status::Failure);
        assert_eq!(ctx.target(), None);
    }

    #[test]
    fn attack_range_filter() {
        let scene = scene();
        add_enemy(&scene, ShipId(2), Vector2::new(30.0, 0.0));
        let mut ctx = context(&scene, &gunship_spec());

        let mut node = FindEnemy::new(1.0, 1.0, true, false);
        assert_eq!(node.tick(&mut ctx), Status::Failure);
    }

    #[test]
    fn drone_search_is_leashed_to_mothership() {
        let scene = scene();
        scene.add_ship(ShipState::new(ShipId(10), Vector2::new(100.0, 0.0)), Side(0));
        scene.add_ship(ShipState::drone(ShipId(11), ShipId(10), Vector2::ZERO), Side(0));
        add_enemy(&scene, ShipId(2), Vector2::new(2.0, 0.0));
        add_enemy(&scene, ShipId(3), Vector2::new(95.0, 0.0));

        let mut ctx = Context::new(ShipId(11), &gunship_spec(), scene.clone()).with_seed(Some(3));
        let mut node = FindEnemy::new(1.0, 1.0, false, false).with_drone_range(10.0);
        assert_eq!(node.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.target(), Some(ShipId(3)));

        ctx.set_berserk(true);
        ctx.update(2.0);
        node.tick(&mut ctx);
        assert_eq!(ctx.target(), Some(ShipId(2)));
    }
}
