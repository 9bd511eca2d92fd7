//! Properties of the steering and threat geometry.

use combat_ai::world::{UnitId, UnitState, Vector2, delta_angle};
use combat_ai::{AiLevel, AiSettings, Requirement, ShipId, ShipSpec, ShipState, ThreatAnalyzer};
use proptest::prelude::*;

fn level() -> impl Strategy<Value = AiLevel> {
    prop_oneof![
        Just(AiLevel::Easy),
        Just(AiLevel::Medium),
        Just(AiLevel::Hard),
        Just(AiLevel::Expert)
    ]
}

proptest! {
    #[test]
    fn delta_angle_is_the_short_way_round(from in -720.0f32..720.0, to in -720.0f32..720.0) {
        let delta = delta_angle(from, to);
        prop_assert!(delta > -180.0 && delta <= 180.0);
    }

    #[test]
    fn head_on_unit_hits_when_the_gap_closes(distance in 3.0f32..30.0, speed in 1.0f32..20.0) {
        let ship = ShipState::new(ShipId(1), Vector2::ZERO);
        let unit = UnitState {
            id: UnitId(1),
            position: Vector2::new(distance, 0.0),
            velocity: Vector2::new(-speed, 0.0),
            radius: 0.5,
        };
        let analyzer = ThreatAnalyzer { horizon: 100.0, scan_radius: 100.0 };

        let expected = (distance - ship.radius - unit.radius) / speed;
        let time = analyzer.time_to_hit(&ship, &unit);
        prop_assert!(time.is_some());
        prop_assert!((time.unwrap_or_default() - expected).abs() < 1e-3);
    }

    #[test]
    fn receding_unit_never_hits(distance in 3.0f32..30.0, speed in 0.1f32..20.0) {
        let ship = ShipState::new(ShipId(1), Vector2::ZERO);
        let unit = UnitState {
            id: UnitId(1),
            position: Vector2::new(0.0, distance),
            velocity: Vector2::new(0.0, speed),
            radius: 0.5,
        };
        prop_assert_eq!(ThreatAnalyzer::default().time_to_hit(&ship, &unit), None);
    }

    #[test]
    fn not_negates_level_bands(current in level(), min in level(), max in level()) {
        let settings = AiSettings { level: current, ..AiSettings::default() };
        let spec = ShipSpec::default();
        let band = Requirement::AiLevel { min, max };
        let inverted = Requirement::Not(Box::new(band.clone()));

        prop_assert_eq!(band.is_met(&spec, &settings), min <= current && current <= max);
        prop_assert_ne!(band.is_met(&spec, &settings), inverted.is_met(&spec, &settings));
    }
}
