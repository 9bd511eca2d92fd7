//! Named trees and sub-tree reference checks.

use std::collections::BTreeMap;

use super::{NodeDefinition, NodeKind, TreeDefinition};

/// Problem found by [`TreeLibrary::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeIssue {
    #[error("tree '{tree}' references unknown sub-tree '{missing}'")]
    UnknownSubTree { tree: String, missing: String },

    #[error("sub-tree cycle: {}", path.join(" -> "))]
    SubTreeCycle { path: Vec<String> },

    #[error("tree '{tree}' has no root node")]
    EmptyTree { tree: String },
}

/// Trees addressable by name, the targets of `SubTree` nodes.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct TreeLibrary {
    trees: BTreeMap<String, TreeDefinition>,
}

impl TreeLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, tree: TreeDefinition) {
        self.trees.insert(name.into(), tree);
    }

    pub fn get(&self, name: &str) -> Option<&TreeDefinition> {
        self.trees.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.trees.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.trees.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Checks every tree without compiling it.
    ///
    /// Reports empty trees, references to missing trees and reference cycles.
    /// Each cycle is reported once, starting from its alphabetically first
    /// member.
    pub fn validate(&self) -> Vec<TreeIssue> {
        let mut issues = Vec::new();

        for (name, tree) in &self.trees {
            if tree.root.is_none() {
                issues.push(TreeIssue::EmptyTree { tree: name.clone() });
            }
            for missing in self.references(tree) {
                if !self.contains(missing) {
                    issues.push(TreeIssue::UnknownSubTree {
                        tree: name.clone(),
                        missing: missing.to_owned(),
                    });
                }
            }
        }

        let mut reported: Vec<Vec<String>> = Vec::new();
        for name in self.trees.keys() {
            let mut path = vec![name.clone()];
            self.find_cycles(&mut path, &mut reported);
        }
        issues.extend(
            reported
                .into_iter()
                .map(|path| TreeIssue::SubTreeCycle { path }),
        );

        issues
    }

    /// Sub-tree names referenced anywhere in `tree`.
    fn references<'a>(&self, tree: &'a TreeDefinition) -> Vec<&'a str> {
        let mut names = Vec::new();
        if let Some(root) = &tree.root {
            collect_references(root, &mut names);
        }
        names
    }

    fn find_cycles(&self, path: &mut Vec<String>, reported: &mut Vec<Vec<String>>) {
        let Some(current) = path.last().and_then(|name| self.trees.get(name)) else {
            return;
        };

        for next in self.references(current) {
            if let Some(start) = path.iter().position(|name| name == next) {
                let cycle = &path[start..];
                // Only the rotation starting at the smallest name is reported.
                if cycle.iter().min() == cycle.first() {
                    let mut closed = cycle.to_vec();
                    closed.push(next.to_owned());
                    if !reported.contains(&closed) {
                        reported.push(closed);
                    }
                }
                continue;
            }
            if self.contains(next) {
                path.push(next.to_owned());
                self.find_cycles(path, reported);
                path.pop();
            }
        }
    }
}

fn collect_references<'a>(node: &'a NodeDefinition, names: &mut Vec<&'a str>) {
    if let NodeKind::SubTree { tree } = &node.kind {
        names.push(tree);
    }
    for child in node.kind.children() {
        collect_references(child, names);
    }
}
