//! Harness configuration from environment variables.

use std::env;
use std::path::PathBuf;

/// Paths and timing for one simulated duel.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RON tree library.
    pub trees: PathBuf,
    /// Name of the tree compiled for the AI ship.
    pub root: String,
    /// TOML AI settings.
    pub settings: PathBuf,
    pub ticks: u32,
    /// Seconds per tick.
    pub dt: f32,
    /// Starting distance between the two ships.
    pub distance: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            trees: PathBuf::from("data/trees/combat.ron"),
            root: "ship".to_string(),
            settings: PathBuf::from("data/ai.toml"),
            ticks: 600,
            dt: 0.05,
            distance: 40.0,
        }
    }
}

impl SimConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `COMBAT_SIM_TREES`: Tree library path
    /// - `COMBAT_SIM_ROOT`: Root tree name
    /// - `COMBAT_SIM_SETTINGS`: AI settings path
    /// - `COMBAT_SIM_TICKS`: Number of ticks to run (at least 1)
    /// - `COMBAT_SIM_DT`: Tick length in seconds
    /// - `COMBAT_SIM_DISTANCE`: Starting distance
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(path) = env::var("COMBAT_SIM_TREES") {
            config.trees = PathBuf::from(path);
        }
        if let Ok(root) = env::var("COMBAT_SIM_ROOT") {
            config.root = root;
        }
        if let Ok(path) = env::var("COMBAT_SIM_SETTINGS") {
            config.settings = PathBuf::from(path);
        }
        if let Some(ticks) = read_env::<u32>("COMBAT_SIM_TICKS") {
            config.ticks = ticks.max(1);
        }
        if let Some(dt) = read_env::<f32>("COMBAT_SIM_DT").filter(|dt| *dt > 0.0) {
            config.dt = dt;
        }
        if let Some(distance) = read_env::<f32>("COMBAT_SIM_DISTANCE") {
            config.distance = distance.max(0.0);
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
