//! Scene queries and an in-memory scene implementation.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

use super::{ShipId, ShipState, ShipStatus, UnitState, Vector2};

/// Read-only view of the battlefield.
///
/// Queries return owned snapshots so that a context never holds a borrow into
/// the scene across ticks.
pub trait Scene: Send + Sync {
    /// Last known state of a ship, whatever its status.
    fn ship(&self, id: ShipId) -> Option<ShipState>;

    /// Lifecycle status. Unknown ships report `Destroyed`.
    fn status(&self, id: ShipId) -> ShipStatus;

    /// Active ships hostile to `id`.
    fn enemies_of(&self, id: ShipId) -> Vec<ShipId>;

    /// Non-ship units within `radius` of `position`.
    fn units_near(&self, position: Vector2, radius: f32) -> Vec<UnitState>;

    fn is_active(&self, id: ShipId) -> bool {
        self.status(id) == ShipStatus::Active
    }

    /// State of `id` if it is still active.
    fn active_ship(&self, id: ShipId) -> Option<ShipState> {
        if self.is_active(id) { self.ship(id) } else { None }
    }
}

/// Team affiliation. Ships on different sides are enemies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct Side(pub u8);

#[derive(Debug, Clone)]
struct SceneShip {
    state: ShipState,
    status: ShipStatus,
    side: Side,
}

#[derive(Debug, Default)]
struct SceneData {
    ships: BTreeMap<ShipId, SceneShip>,
    units: Vec<UnitState>,
}

/// Scene backed by plain collections behind a lock.
///
/// Used by the simulation harness and by tests. Every call to
/// [`Scene::enemies_of`] and [`Scene::units_near`] is counted so tests can
/// observe cache refreshes.
#[derive(Debug, Default)]
pub struct InMemoryScene {
    data: RwLock<SceneData>,
    enemy_queries: AtomicUsize,
    unit_queries: AtomicUsize,
}

impl InMemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an active ship on `side`, replacing any previous entry.
    pub fn add_ship(&self, state: ShipState, side: Side) {
        let mut data = self.data.write().unwrap_or_else(PoisonError::into_inner);
        data.ships.insert(
            state.id,
            SceneShip {
                state,
                status: ShipStatus::Active,
                side,
            },
        );
    }

    /// Drops `id` from the scene; it then reads as destroyed.
    pub fn remove_ship(&self, id: ShipId) -> Option<ShipState> {
        let mut data = self.data.write().unwrap_or_else(PoisonError::into_inner);
        data.ships.remove(&id).map(|ship| ship.state)
    }

    pub fn set_status(&self, id: ShipId, status: ShipStatus) {
        let mut data = self.data.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(ship) = data.ships.get_mut(&id) {
            ship.status = status;
        }
    }

    /// Applies `f` to the stored state of `id`. Returns `false` for unknown ships.
    pub fn update_ship(&self, id: ShipId, f: impl FnOnce(&mut ShipState)) -> bool {
        let mut data = self.data.write().unwrap_or_else(PoisonError::into_inner);
        match data.ships.get_mut(&id) {
            Some(ship) => {
                f(&mut ship.state);
                true
            }
            None => false,
        }
    }

    pub fn add_unit(&self, unit: UnitState) {
        let mut data = self.data.write().unwrap_or_else(PoisonError::into_inner);
        data.units.push(unit);
    }

    pub fn clear_units(&self) {
        let mut data = self.data.write().unwrap_or_else(PoisonError::into_inner);
        data.units.clear();
    }

    pub fn ship_ids(&self) -> Vec<ShipId> {
        let data = self.data.read().unwrap_or_else(PoisonError::into_inner);
        data.ships.keys().copied().collect()
    }

    /// Number of `enemies_of` calls served so far.
    pub fn enemy_queries(&self) -> usize {
        self.enemy_queries.load(Ordering::Relaxed)
    }

    /// Number of `units_near` calls served so far.
    pub fn unit_queries(&self) -> usize {
        self.unit_queries.load(Ordering::Relaxed)
    }
}

impl Scene for InMemoryScene {
    fn ship(&self, id: ShipId) -> Option<ShipState> {
        let data = self.data.read().unwrap_or_else(PoisonError::into_inner);
        data.ships.get(&id).map(|ship| ship.state.clone())
    }

    fn status(&self, id: ShipId) -> ShipStatus {
        let data = self.data.read().unwrap_or_else(PoisonError::into_inner);
        data.ships
            .get(&id)
            .map_or(ShipStatus::Destroyed, |ship| ship.status)
    }

    fn enemies_of(&self, id: ShipId) -> Vec<ShipId> {
        self.enemy_queries.fetch_add(1, Ordering::Relaxed);
        let data = self.data.read().unwrap_or_else(PoisonError::into_inner);
        let Some(side) = data.ships.get(&id).map(|ship| ship.side) else {
            return Vec::new();
        };

        data.ships
            .values()
            .filter(|ship| ship.side != side && ship.status == ShipStatus::Active)
            .map(|ship| ship.state.id)
            .collect()
    }

    fn units_near(&self, position: Vector2, radius: f32) -> Vec<UnitState> {
        self.unit_queries.fetch_add(1, Ordering::Relaxed);
        let data = self.data.read().unwrap_or_else(PoisonError::into_inner);
        data.units
            .iter()
            .filter(|unit| unit.position.distance(position) <= radius + unit.radius)
            .cloned()
            .collect()
    }
}
