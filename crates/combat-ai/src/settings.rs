//! AI tuning shared by every ship of a battle.
use std::env;

use crate::context::ThreatAnalyzer;

/// Skill level. Higher levels aim tighter and react faster.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum AiLevel {
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
}

impl AiLevel {
    /// Largest random aim offset in degrees, rolled per target.
    pub fn aim_error(self) -> f32 {
        match self {
            AiLevel::Easy => 12.0,
            AiLevel::Medium => 6.0,
            AiLevel::Hard => 2.0,
            AiLevel::Expert => 0.0,
        }
    }

    /// Seconds a new target must be tracked before the first shot.
    pub fn reaction_time(self) -> f32 {
        match self {
            AiLevel::Easy => 1.0,
            AiLevel::Medium => 0.5,
            AiLevel::Hard => 0.2,
            AiLevel::Expert => 0.0,
        }
    }

    /// Extra heading error in degrees accepted by fixed weapons.
    pub fn fire_tolerance(self) -> f32 {
        match self {
            AiLevel::Easy => 15.0,
            AiLevel::Medium => 8.0,
            AiLevel::Hard => 4.0,
            AiLevel::Expert => 2.0,
        }
    }
}

/// Settings the tree is compiled and evaluated with.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AiSettings {
    pub level: AiLevel,
    /// Leash radius of drones around their mothership; zero disables the leash.
    pub drone_range: f32,
    /// Base seed for all random sources; entropy when absent.
    pub seed: Option<u64>,
    /// Threats hitting later than this many seconds are ignored.
    pub threat_horizon: f32,
    pub threat_scan_radius: f32,
}

impl Default for AiSettings {
    fn default() -> Self {
        let analyzer = ThreatAnalyzer::default();
        Self {
            level: AiLevel::default(),
            drone_range: 0.0,
            seed: None,
            threat_horizon: analyzer.horizon,
            threat_scan_radius: analyzer.scan_radius,
        }
    }
}

impl AiSettings {
    /// Construct settings from defaults and environment variables.
    ///
    /// Environment variables:
    /// - `COMBAT_AI_LEVEL` - `easy`, `medium`, `hard` or `expert` (default: medium)
    /// - `COMBAT_AI_DRONE_RANGE` - Drone leash radius (default: 0, disabled)
    /// - `COMBAT_AI_SEED` - Base random seed (default: unseeded)
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Applies environment overrides on top of these settings.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(level) = read_env::<AiLevel>("COMBAT_AI_LEVEL") {
            self.level = level;
        }
        if let Some(range) = read_env::<f32>("COMBAT_AI_DRONE_RANGE") {
            self.drone_range = range.max(0.0);
        }
        if let Some(seed) = read_env::<u64>("COMBAT_AI_SEED") {
            self.seed = Some(seed);
        }
        self
    }

    pub fn threat_analyzer(&self) -> ThreatAnalyzer {
        ThreatAnalyzer {
            horizon: self.threat_horizon,
            scan_radius: self.threat_scan_radius,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
