//! Secondary target cache.

use crate::world::{Scene, ShipId, ShipState};

/// Most secondary targets kept per refresh.
pub const MAX_SECONDARY_TARGETS: usize = 4;

/// Search radius used when the ship has no weapons.
pub const MIN_SEARCH_RADIUS: f32 = 30.0;

/// Nearby enemies other than the primary target, nearest first.
#[derive(Debug, Clone, Default)]
pub struct TargetList {
    targets: Vec<ShipId>,
}

impl TargetList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn targets(&self) -> &[ShipId] {
        &self.targets
    }

    pub fn clear(&mut self) {
        self.targets.clear();
    }

    /// Rescans the scene around `ship`.
    pub fn refresh(
        &mut self,
        scene: &dyn Scene,
        ship: &ShipState,
        primary: Option<ShipId>,
        radius: f32,
    ) {
        let mut candidates: Vec<(f32, ShipId)> = scene
            .enemies_of(ship.id)
            .into_iter()
            .filter(|id| Some(*id) != primary)
            .filter_map(|id| scene.active_ship(id))
            .map(|enemy| (ship.gap_to(&enemy), enemy.id))
            .filter(|(gap, _)| *gap <= radius)
            .collect();
        candidates.sort_by(|a, b| a.0.total_cmp(&b.0));

        self.targets = candidates
            .into_iter()
            .take(MAX_SECONDARY_TARGETS)
            .map(|(_, id)| id)
            .collect();
    }
}
