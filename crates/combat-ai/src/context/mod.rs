//! Per-ship evaluation context.
//!
//! The [`Context`] is the blackboard a ship's tree is evaluated against. It
//! owns the clock, the current target, the secondary target and threat caches,
//! the weapon selection and the [`ShipControls`] that leaves write into.

mod targets;
mod threats;

use std::sync::Arc;

use behavior_tree::TickContext;
use rand::{Rng, RngCore};
use rand_chacha::ChaCha8Rng;

use crate::controls::ShipControls;
use crate::rng::{STREAM_RUNTIME, make_rng};
use crate::weapons::WeaponList;
use crate::world::{Scene, ShipId, ShipSpec, ShipState};

pub use targets::{MAX_SECONDARY_TARGETS, MIN_SEARCH_RADIUS, TargetList};
pub use threats::{ThreatAnalyzer, ThreatInfo, ThreatList};

/// Initial value of every "last updated" timestamp, so that the first
/// cooldown check always passes.
pub const NEVER_UPDATED: f32 = -60.0;

/// A message a ship wants to show, drained by the owner.
#[derive(Debug, Clone, PartialEq)]
pub struct ShipMessage {
    pub ship: ShipId,
    pub text: String,
    pub color: Option<String>,
}

/// Mutable per-ship state shared by all nodes of one tree.
///
/// # Lifetime
///
/// One context per ship AI. The scene is shared and queried by value, so the
/// context never borrows ship state across ticks; the target is a [`ShipId`]
/// handle checked against the scene before each use.
pub struct Context {
    scene: Arc<dyn Scene>,
    ship: ShipId,

    elapsed_time: f32,
    delta_time: f32,
    frame_id: u64,

    target: Option<ShipId>,
    target_update_time: f32,

    target_list: Option<TargetList>,
    target_list_update_time: f32,
    threat_list: Option<ThreatList>,
    threat_list_update_time: f32,

    all_weapons: WeaponList,
    selected_weapons: Option<WeaponList>,

    controls: ShipControls,
    restoring_energy: bool,
    berserk: bool,
    messages: Vec<ShipMessage>,

    seed: Option<u64>,
    rng: Option<ChaCha8Rng>,
}

impl Context {
    /// Creates a context for `ship` with the loadout described by `spec`.
    ///
    /// # Arguments
    ///
    /// * `ship` - Ship this context drives
    /// * `spec` - Static loadout; the weapon list and attack ranges derive from it
    /// * `scene` - Shared scene the ship lives in
    pub fn new(ship: ShipId, spec: &ShipSpec, scene: Arc<dyn Scene>) -> Self {
        Self {
            scene,
            ship,
            elapsed_time: 0.0,
            delta_time: 0.0,
            frame_id: 0,
            target: None,
            target_update_time: NEVER_UPDATED,
            target_list: None,
            target_list_update_time: NEVER_UPDATED,
            threat_list: None,
            threat_list_update_time: NEVER_UPDATED,
            all_weapons: WeaponList::from_spec(spec),
            selected_weapons: None,
            controls: ShipControls::new(),
            restoring_energy: false,
            berserk: false,
            messages: Vec::new(),
            seed: None,
            rng: None,
        }
    }

    /// Seeds the runtime random source (builder pattern).
    ///
    /// Without a seed the source is created from OS entropy on first use.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self.rng = None;
        self
    }

    /// Advances the clock by one tick.
    pub fn update(&mut self, delta_time: f32) {
        self.delta_time = delta_time;
        self.elapsed_time += delta_time;
        self.frame_id += 1;
    }

    // ===== Clock =====

    pub fn elapsed_time(&self) -> f32 {
        self.elapsed_time
    }

    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    pub fn frame_id(&self) -> u64 {
        self.frame_id
    }

    // ===== Ship and scene =====

    pub fn scene(&self) -> &dyn Scene {
        self.scene.as_ref()
    }

    pub fn ship_id(&self) -> ShipId {
        self.ship
    }

    /// Current state of the controlled ship.
    pub fn ship(&self) -> Option<ShipState> {
        self.scene.ship(self.ship)
    }

    pub fn is_active(&self, id: ShipId) -> bool {
        self.scene.is_active(id)
    }

    /// The ship's mothership, if it is a drone and the mothership is active.
    pub fn mothership(&self) -> Option<ShipState> {
        let owner = self.ship()?.owner?;
        self.scene.active_ship(owner)
    }

    // ===== Target =====

    pub fn target(&self) -> Option<ShipId> {
        self.target
    }

    /// State of the current target if it is still active.
    pub fn target_state(&self) -> Option<ShipState> {
        self.target.and_then(|id| self.scene.active_ship(id))
    }

    /// Replaces the target and restarts the target timer.
    pub fn update_target(&mut self, target: Option<ShipId>) {
        if target != self.target {
            tracing::debug!(
                "Ship {} target changed: {:?} -> {:?}",
                self.ship,
                self.target,
                target
            );
        }
        self.target = target;
        self.target_update_time = self.elapsed_time;
    }

    /// Replaces the target without touching the target timer.
    pub fn set_target(&mut self, target: Option<ShipId>) {
        self.target = target;
    }

    pub fn time_since_target_update(&self) -> f32 {
        self.elapsed_time - self.target_update_time
    }

    // ===== Caches =====

    /// Refreshes the secondary target cache unless it was refreshed less than
    /// `cooldown` seconds ago. Creates the cache on first call.
    pub fn update_target_list(&mut self, cooldown: f32) {
        let list = self.target_list.get_or_insert_with(TargetList::new);
        if self.elapsed_time - self.target_list_update_time < cooldown {
            return;
        }
        self.target_list_update_time = self.elapsed_time;

        let Some(ship) = self.scene.ship(self.ship) else {
            list.clear();
            return;
        };
        let radius = (self.all_weapons.range_max() * 2.0).max(MIN_SEARCH_RADIUS);
        list.refresh(self.scene.as_ref(), &ship, self.target, radius);

        tracing::debug!(
            "Ship {} refreshed secondary targets: {} found",
            self.ship,
            list.targets().len()
        );
    }

    /// Refreshes the threat cache unless it was refreshed less than `cooldown`
    /// seconds ago. Creates the cache on first call.
    pub fn update_threat_list(&mut self, analyzer: &ThreatAnalyzer, cooldown: f32) {
        let list = self.threat_list.get_or_insert_with(ThreatList::new);
        if self.elapsed_time - self.threat_list_update_time < cooldown {
            return;
        }
        self.threat_list_update_time = self.elapsed_time;

        let Some(ship) = self.scene.ship(self.ship) else {
            list.clear();
            return;
        };
        list.refresh(self.scene.as_ref(), &ship, analyzer);

        tracing::debug!(
            "Ship {} refreshed threats: {} incoming, time to collision {}",
            self.ship,
            list.threats().len(),
            list.time_to_collision()
        );
    }

    /// Cached secondary targets; empty before the first refresh.
    pub fn secondary_targets(&self) -> &[ShipId] {
        self.target_list
            .as_ref()
            .map(TargetList::targets)
            .unwrap_or_default()
    }

    /// Cached threats, most imminent first; empty before the first refresh.
    pub fn threats(&self) -> &[ThreatInfo] {
        self.threat_list
            .as_ref()
            .map(ThreatList::threats)
            .unwrap_or_default()
    }

    /// Seconds until the most imminent cached threat hits.
    pub fn time_to_collision(&self) -> f32 {
        self.threat_list
            .as_ref()
            .map_or(f32::INFINITY, ThreatList::time_to_collision)
    }

    // ===== Weapons =====

    pub fn all_weapons(&self) -> &WeaponList {
        &self.all_weapons
    }

    /// Weapons leaves should fire with; all weapons unless overridden.
    pub fn selected_weapons(&self) -> &WeaponList {
        self.selected_weapons.as_ref().unwrap_or(&self.all_weapons)
    }

    pub fn select_weapons(&mut self, weapons: WeaponList) {
        self.selected_weapons = Some(weapons);
    }

    pub fn reset_weapon_selection(&mut self) {
        self.selected_weapons = None;
    }

    pub fn have_weapons(&self) -> bool {
        !self.all_weapons.is_empty()
    }

    pub fn attack_range_min(&self) -> f32 {
        self.all_weapons.range_min()
    }

    pub fn attack_range_max(&self) -> f32 {
        self.all_weapons.range_max()
    }

    // ===== Outputs and flags =====

    pub fn controls(&self) -> &ShipControls {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut ShipControls {
        &mut self.controls
    }

    pub fn restoring_energy(&self) -> bool {
        self.restoring_energy
    }

    pub fn set_restoring_energy(&mut self, restoring: bool) {
        self.restoring_energy = restoring;
    }

    pub fn is_berserk(&self) -> bool {
        self.berserk
    }

    pub fn set_berserk(&mut self, berserk: bool) {
        self.berserk = berserk;
    }

    pub fn post_message(&mut self, text: String, color: Option<String>) {
        self.messages.push(ShipMessage {
            ship: self.ship,
            text,
            color,
        });
    }

    /// Drains queued messages.
    pub fn take_messages(&mut self) -> Vec<ShipMessage> {
        std::mem::take(&mut self.messages)
    }

    // ===== Randomness =====

    fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        let (seed, ship) = (self.seed, self.ship);
        self.rng
            .get_or_insert_with(|| make_rng(seed, ship, STREAM_RUNTIME))
    }

    /// Uniform value in `[min, max]`; `min` when the range is empty or not finite.
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        if !min.is_finite() || !max.is_finite() || max <= min {
            return min;
        }
        self.rng_mut().gen_range(min..=max)
    }
}

impl TickContext for Context {
    fn time(&self) -> f32 {
        self.elapsed_time
    }

    fn frame_id(&self) -> u64 {
        self.frame_id
    }

    fn rng(&mut self) -> &mut dyn RngCore {
        self.rng_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{InMemoryScene, Side, Vector2, Weapon, WeaponType};

    fn spec() -> ShipSpec {
        ShipSpec {
            weapons: vec![
                Weapon::new(0, WeaponType::Projectile, 10.0),
                Weapon::new(1, WeaponType::Beam, 4.0),
            ],
            ..ShipSpec::default()
        }
    }

    fn context() -> Context {
        let scene = InMemoryScene::new();
        scene.add_ship(ShipState::new(ShipId(1), Vector2::ZERO), Side(0));
        Context::new(ShipId(1), &spec(), Arc::new(scene))
    }

    #[test]
    fn starts_with_expired_timers() {
        let ctx = context();
        assert_eq!(ctx.time_since_target_update(), 60.0);
        assert_eq!(ctx.time_to_collision(), f32::INFINITY);
        assert!(ctx.secondary_targets().is_empty());
        assert!(ctx.threats().is_empty());
    }

    #[test]
    fn derives_ranges_from_weapons() {
        let mut ctx = context();
        assert!(ctx.have_weapons());
        assert_eq!(ctx.attack_range_min(), 4.0);
        assert_eq!(ctx.attack_range_max(), 10.0);
        assert_eq!(ctx.selected_weapons().len(), 2);

        let beams = ctx.all_weapons().of_type(WeaponType::Beam);
        ctx.select_weapons(beams);
        assert_eq!(ctx.selected_weapons().slots(), vec![1]);
        // Attack ranges stay tied to the full list.
        assert_eq!(ctx.attack_range_max(), 10.0);

        ctx.reset_weapon_selection();
        assert_eq!(ctx.selected_weapons().len(), 2);
    }

    #[test]
    fn update_target_restarts_timer() {
        let mut ctx = context();
        ctx.update(1.5);
        ctx.update_target(Some(ShipId(2)));
        assert_eq!(ctx.time_since_target_update(), 0.0);
        ctx.update(0.5);
        assert_eq!(ctx.time_since_target_update(), 0.5);

        ctx.set_target(None);
        assert_eq!(ctx.time_since_target_update(), 0.5);
    }

    #[test]
    fn seeded_rolls_repeat() {
        let mut a = context().with_seed(Some(7));
        let mut b = context().with_seed(Some(7));
        for _ in 0..8 {
            assert_eq!(a.random_range(0.0, 1.0), b.random_range(0.0, 1.0));
        }
        assert_eq!(a.random_range(3.0, 3.0), 3.0);
    }

    #[test]
    fn non_finite_range_yields_min() {
        let mut ctx = context().with_seed(Some(7));
        assert_eq!(ctx.random_range(1.0, f32::INFINITY), 1.0);
        assert_eq!(ctx.random_range(2.0, f32::NAN), 2.0);
        assert!(ctx.random_range(f32::NAN, 1.0).is_nan());
    }

    #[test]
    fn messages_drain() {
        let mut ctx = context();
        ctx.post_message("hello".into(), None);
        assert_eq!(ctx.take_messages().len(), 1);
        assert!(ctx.take_messages().is_empty());
    }
}
