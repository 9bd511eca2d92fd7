//! Tree library loader.

use std::path::Path;

use crate::definition::{TreeDefinition, TreeLibrary};
use crate::loaders::{ContentError, LoadResult, read_file};

/// Loader for behavior trees from RON files.
pub struct TreeLoader;

impl TreeLoader {
    /// Load a tree library from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to a RON map of tree name to tree definition
    ///
    /// # Returns
    ///
    /// Returns the library. Sub-tree references are not checked here; call
    /// [`TreeLibrary::validate`] for that.
    pub fn load_library(path: &Path) -> LoadResult<TreeLibrary> {
        let content = read_file(path)?;
        let library = Self::parse_library(&content)?;

        tracing::debug!(
            "Loaded {} behavior trees from {}",
            library.len(),
            path.display()
        );
        Ok(library)
    }

    /// Load a single tree definition from a RON file.
    pub fn load_tree(path: &Path) -> LoadResult<TreeDefinition> {
        let content = read_file(path)?;
        Ok(ron::from_str(&content)?)
    }

    pub fn parse_library(content: &str) -> LoadResult<TreeLibrary> {
        Ok(ron::from_str(content)?)
    }

    /// Load a library and pick the tree to run.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::UnknownRoot`] if `root` is not in the library.
    pub fn load_with_root(path: &Path, root: &str) -> LoadResult<(TreeLibrary, TreeDefinition)> {
        let library = Self::load_library(path)?;
        let tree = library
            .get(root)
            .cloned()
            .ok_or_else(|| ContentError::UnknownRoot {
                name: root.to_owned(),
            })?;
        Ok((library, tree))
    }
}
