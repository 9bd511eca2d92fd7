//! Toy kinematics for a one-on-one fight.
//!
//! The AI ship turns toward the commanded course at a fixed rate and moves at
//! `thrust * MAX_SPEED`. Every fired weapon whose range reaches the target
//! deals `DAMAGE_PER_SECOND` of hull per second. The target drifts sideways
//! and never shoots back.

use std::sync::Arc;

use combat_ai::world::{InMemoryScene, Side, Vector2, Weapon, WeaponType, delta_angle};
use combat_ai::{
    AiSettings, Localization, Scene, ShipAi, ShipId, ShipSpec, ShipState, ShipStatus,
    TreeDefinition, TreeLibrary,
};

use crate::config::SimConfig;

const AI_SHIP: ShipId = ShipId(1);
const TARGET: ShipId = ShipId(2);

const MAX_SPEED: f32 = 8.0;
/// Degrees per second.
const TURN_RATE: f32 = 180.0;
const DAMAGE_PER_SECOND: f32 = 0.25;
const TARGET_DRIFT: Vector2 = Vector2 { x: 1.5, y: 0.0 };

/// Result of [`Duel::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub ticks: u32,
    pub elapsed: f32,
    /// Weapon-ticks that landed on the target.
    pub shots: u32,
    pub target_hp: f32,
    pub target_status: ShipStatus,
}

pub struct Duel {
    scene: Arc<InMemoryScene>,
    spec: ShipSpec,
    ai: ShipAi,
}

impl Duel {
    pub fn new(
        config: &SimConfig,
        tree: &TreeDefinition,
        library: &TreeLibrary,
        settings: &AiSettings,
        localization: &dyn Localization,
    ) -> Self {
        let scene = Arc::new(InMemoryScene::new());
        scene.add_ship(ShipState::new(AI_SHIP, Vector2::ZERO), Side(0));

        let mut target = ShipState::new(TARGET, Vector2::new(0.0, config.distance));
        target.velocity = TARGET_DRIFT;
        scene.add_ship(target, Side(1));

        let spec = gunship();
        let ai = ShipAi::compile(
            AI_SHIP,
            &spec,
            scene.clone(),
            tree,
            Some(library),
            settings,
            localization,
        );

        Self { scene, spec, ai }
    }

    /// Runs up to `ticks` ticks of `dt` seconds, stopping early once either
    /// ship leaves the fight.
    ///
    /// # Returns
    ///
    /// Shots landed and the target's final state
    pub fn run(&mut self, ticks: u32, dt: f32) -> Outcome {
        let mut shots = 0;
        let mut last_status = None;
        let mut ran = 0;

        for _ in 0..ticks {
            ran += 1;
            let status = self.ai.tick(dt);
            if last_status != Some(status) {
                tracing::debug!(
                    "Tick {}: tree {:?}, target {:?}",
                    self.ai.context().frame_id(),
                    status,
                    self.ai.context().target()
                );
                last_status = Some(status);
            }

            for message in self.ai.take_messages() {
                tracing::info!("Ship {} says \"{}\"", message.ship, message.text);
            }

            shots += self.apply_fire(dt);
            self.move_ships(dt);

            if self.resolve_exits() {
                break;
            }
        }

        let target = self.scene.ship(TARGET);
        Outcome {
            ticks: ran,
            elapsed: self.ai.context().elapsed_time(),
            shots,
            target_hp: target.map(|ship| ship.hp).unwrap_or_default(),
            target_status: self.scene.status(TARGET),
        }
    }

    /// Applies this tick's fire to the current target; returns the number of
    /// weapons that reached it.
    fn apply_fire(&mut self, dt: f32) -> u32 {
        let Some(target) = self.ai.context().target() else {
            return 0;
        };
        let (Some(me), Some(enemy)) = (self.scene.ship(AI_SHIP), self.scene.ship(target)) else {
            return 0;
        };

        let gap = me.gap_to(&enemy);
        let hits = self
            .ai
            .controls()
            .firing()
            .filter_map(|slot| self.spec.weapons.iter().find(|weapon| weapon.slot == slot))
            .filter(|weapon| weapon.range >= gap)
            .count() as u32;
        if hits == 0 {
            return 0;
        }

        let damage = DAMAGE_PER_SECOND * dt * hits as f32;
        self.scene.update_ship(target, |ship| ship.hp = (ship.hp - damage).max(0.0));
        tracing::trace!("Ship {} hit for {:.3}", target, damage);
        hits
    }

    fn move_ships(&mut self, dt: f32) {
        let controls = self.ai.controls().clone();
        self.scene.update_ship(AI_SHIP, |ship| {
            if let Some(course) = controls.course {
                let max_turn = TURN_RATE * dt;
                let turn = delta_angle(ship.rotation, course).clamp(-max_turn, max_turn);
                ship.rotation = (ship.rotation + turn).rem_euclid(360.0);
            }
            ship.velocity = Vector2::from_angle(ship.rotation) * (controls.thrust * MAX_SPEED);
            ship.position += ship.velocity * dt;
        });

        self.scene.update_ship(TARGET, |ship| {
            ship.position += ship.velocity * dt;
        });
    }

    /// Applies terminal commands and deaths. Returns `true` when the duel is over.
    fn resolve_exits(&mut self) -> bool {
        let controls = self.ai.controls();
        if controls.vanish {
            tracing::info!("Ship {} left the fight", AI_SHIP);
            self.scene.set_status(AI_SHIP, ShipStatus::Retreated);
            return true;
        }
        if controls.self_destruct {
            tracing::info!("Ship {} self-destructed", AI_SHIP);
            self.scene.set_status(AI_SHIP, ShipStatus::Destroyed);
            return true;
        }

        let destroyed = self.scene.ship(TARGET).is_some_and(|ship| ship.hp <= 0.0);
        if destroyed {
            tracing::info!(
                "Ship {} destroyed at {:.1}s",
                TARGET,
                self.ai.context().elapsed_time()
            );
            self.scene.set_status(TARGET, ShipStatus::Destroyed);
        }
        destroyed
    }
}

/// Loadout of the AI ship: a long-range cannon and a short beam.
fn gunship() -> ShipSpec {
    ShipSpec {
        weapons: vec![
            Weapon {
                projectile_speed: 30.0,
                firing_arc: 20.0,
                ..Weapon::new(0, WeaponType::Projectile, 12.0)
            },
            Weapon {
                firing_arc: 360.0,
                ..Weapon::new(1, WeaponType::Beam, 5.0)
            },
        ],
        ..ShipSpec::default()
    }
}
