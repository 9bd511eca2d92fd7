//! Text lookup for messages shown by ships.

use std::collections::HashMap;

/// Resolves message keys to display text.
pub trait Localization: Send + Sync {
    fn localize(&self, key: &str) -> String;
}

/// Returns keys unchanged, minus a leading `$` key marker.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityLocalization;

impl Localization for IdentityLocalization {
    fn localize(&self, key: &str) -> String {
        key.strip_prefix('$').unwrap_or(key).to_owned()
    }
}

/// Table-backed lookup that falls back to [`IdentityLocalization`].
#[derive(Debug, Clone, Default)]
pub struct TableLocalization {
    entries: HashMap<String, String>,
}

impl TableLocalization {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }

    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(key.into(), text.into());
    }
}

impl Localization for TableLocalization {
    fn localize(&self, key: &str) -> String {
        match self.entries.get(key) {
            Some(text) => text.clone(),
            None => IdentityLocalization.localize(key),
        }
    }
}
