//! Incoming threat prediction.

use crate::world::{Scene, ShipState, UnitId, UnitState, Vector2};

/// A unit predicted to hit the ship.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreatInfo {
    pub unit: UnitId,
    pub position: Vector2,
    pub velocity: Vector2,
    /// Seconds until contact; zero when already touching.
    pub time_to_hit: f32,
}

/// Collision predictor for units around a ship.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreatAnalyzer {
    /// Threats hitting later than this are ignored.
    pub horizon: f32,
    /// Scan radius around the ship.
    pub scan_radius: f32,
}

impl Default for ThreatAnalyzer {
    fn default() -> Self {
        Self {
            horizon: 5.0,
            scan_radius: 40.0,
        }
    }
}

impl ThreatAnalyzer {
    /// Seconds until `unit` touches `ship`, assuming both keep their velocity.
    ///
    /// Solves `|p + v t| = r` for the earliest `t >= 0`, where `p` and `v`
    /// are the unit's position and velocity relative to the ship and `r` the
    /// sum of radii.
    pub fn time_to_hit(&self, ship: &ShipState, unit: &UnitState) -> Option<f32> {
        let p = unit.position - ship.position;
        let v = unit.velocity - ship.velocity;
        let r = unit.radius + ship.radius;

        let c = p.length_squared() - r * r;
        if c <= 0.0 {
            return Some(0.0);
        }

        let a = v.length_squared();
        if a <= f32::EPSILON {
            return None;
        }

        let b = 2.0 * p.dot(v);
        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let t = (-b - discriminant.sqrt()) / (2.0 * a);
        (t >= 0.0 && t <= self.horizon).then_some(t)
    }
}

/// Units on a collision course, most imminent first.
#[derive(Debug, Clone, Default)]
pub struct ThreatList {
    threats: Vec<ThreatInfo>,
}

impl ThreatList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn threats(&self) -> &[ThreatInfo] {
        &self.threats
    }

    pub fn clear(&mut self) {
        self.threats.clear();
    }

    /// Time until the most imminent hit, or infinity without threats.
    pub fn time_to_collision(&self) -> f32 {
        self.threats
            .first()
            .map_or(f32::INFINITY, |threat| threat.time_to_hit)
    }

    /// Rescans the units around `ship`.
    pub fn refresh(&mut self, scene: &dyn Scene, ship: &ShipState, analyzer: &ThreatAnalyzer) {
        let mut threats: Vec<ThreatInfo> = scene
            .units_near(ship.position, analyzer.scan_radius)
            .into_iter()
            .filter_map(|unit| {
                analyzer.time_to_hit(ship, &unit).map(|time_to_hit| ThreatInfo {
                    unit: unit.id,
                    position: unit.position,
                    velocity: unit.velocity,
                    time_to_hit,
                })
            })
            .collect();
        threats.sort_by(|a, b| a.time_to_hit.total_cmp(&b.time_to_hit));
        self.threats = threats;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::ShipId;

    fn unit(position: Vector2, velocity: Vector2) -> UnitState {
        UnitState {
            id: UnitId(1),
            position,
            velocity,
            radius: 0.5,
        }
    }

    #[test]
    fn head_on_projectile_hits() {
        let ship = ShipState::new(ShipId(1), Vector2::ZERO);
        let analyzer = ThreatAnalyzer::default();

        let incoming = unit(Vector2::new(10.0, 0.0), Vector2::new(-5.0, 0.0));
        let t = analyzer.time_to_hit(&ship, &incoming).unwrap();
        // Contact at distance 1.5 (sum of radii): (10 - 1.5) / 5
        assert!((t - 1.7).abs() < 1e-4);
    }

    #[test]
    fn receding_or_passing_units_are_ignored() {
        let ship = ShipState::new(ShipId(1), Vector2::ZERO);
        let analyzer = ThreatAnalyzer::default();

        let receding = unit(Vector2::new(10.0, 0.0), Vector2::new(5.0, 0.0));
        assert_eq!(analyzer.time_to_hit(&ship, &receding), None);

        let passing = unit(Vector2::new(10.0, 5.0), Vector2::new(-5.0, 0.0));
        assert_eq!(analyzer.time_to_hit(&ship, &passing), None);

        let touching = unit(Vector2::new(1.0, 0.0), Vector2::ZERO);
        assert_eq!(analyzer.time_to_hit(&ship, &touching), Some(0.0));
    }

    #[test]
    fn beyond_horizon_is_ignored() {
        let ship = ShipState::new(ShipId(1), Vector2::ZERO);
        let analyzer = ThreatAnalyzer {
            horizon: 1.0,
            ..ThreatAnalyzer::default()
        };
        let slow = unit(Vector2::new(20.0, 0.0), Vector2::new(-1.0, 0.0));
        assert_eq!(analyzer.time_to_hit(&ship, &slow), None);
    }
}
