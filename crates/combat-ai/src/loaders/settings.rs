//! AI settings loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::settings::AiSettings;

/// Loader for AI settings from TOML files.
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load settings from a TOML file.
    ///
    /// Missing keys keep their defaults. Environment overrides are not
    /// applied; see [`AiSettings::with_env_overrides`].
    pub fn load(path: &Path) -> LoadResult<AiSettings> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<AiSettings> {
        Ok(toml::from_str(content)?)
    }
}
