//! Content loaders for reading AI data from files.
//!
//! Tree libraries are RON, AI settings are TOML.

mod settings;
mod trees;

pub use settings::SettingsLoader;
pub use trees::TreeLoader;

use std::path::{Path, PathBuf};

/// Errors raised while loading AI content.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse tree RON: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("failed to parse settings TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("tree library has no tree named '{name}'")]
    UnknownRoot { name: String },
}

/// Common result type for loaders.
pub type LoadResult<T> = Result<T, ContentError>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })
}
