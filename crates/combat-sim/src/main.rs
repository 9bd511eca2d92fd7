//! Combat AI harness binary.
//!
//! Loads a tree library (RON) and AI settings (TOML), then plays a headless
//! duel between one AI ship and a drifting target, logging what the AI does.
//!
//! # Examples
//!
//! ```bash
//! RUST_LOG=combat_ai=debug cargo run -p combat-sim
//!
//! # Another root tree, more ticks
//! COMBAT_SIM_ROOT=engage COMBAT_SIM_TICKS=1200 cargo run -p combat-sim
//! ```

mod config;
mod duel;

use anyhow::{Context as _, Result};
use combat_ai::{IdentityLocalization, SettingsLoader, TreeLoader};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::SimConfig;
use crate::duel::Duel;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();

    let config = SimConfig::from_env();
    tracing::info!("Starting combat sim: {:?}", config);

    let settings = SettingsLoader::load(&config.settings)
        .with_context(|| format!("loading settings {}", config.settings.display()))?
        .with_env_overrides();
    tracing::info!("AI level: {}", settings.level);

    let (library, tree) = TreeLoader::load_with_root(&config.trees, &config.root)
        .with_context(|| format!("loading trees {}", config.trees.display()))?;
    for issue in library.validate() {
        tracing::warn!("Tree library issue: {}", issue);
    }

    let mut duel = Duel::new(&config, &tree, &library, &settings, &IdentityLocalization);
    let outcome = duel.run(config.ticks, config.dt);

    tracing::info!(
        "Duel finished after {} ticks ({:.1}s): shots {}, target hp {:.2}, status {:?}",
        outcome.ticks,
        outcome.elapsed,
        outcome.shots,
        outcome.target_hp,
        outcome.target_status
    );

    Ok(())
}

/// Logs to stderr, filtered by `RUST_LOG`.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
