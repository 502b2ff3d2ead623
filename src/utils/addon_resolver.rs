//! Addon path resolution
//!
//! Modules live as directories under one of several addons roots (community,
//! enterprise, themes, project repositories). Resolution walks the roots in
//! their configured order and returns the first directory that looks like a
//! valid module, i.e. carries a manifest file. First match wins; with the
//! same roots and filesystem state the result is always the same.

use crate::models::module::MANIFEST_NAMES;
use std::path::{Path, PathBuf};

/// Resolver over an ordered list of addons roots
#[derive(Debug, Clone)]
pub struct AddonResolver {
    roots: Vec<PathBuf>,
}

impl AddonResolver {
    /// Create a resolver over the given roots, searched in order
    pub fn new(roots: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    /// The configured roots, in search order
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Resolve a module name to its directory
    ///
    /// Returns the first `root/name` directory containing a manifest file, or
    /// None when no root matches.
    pub fn resolve(&self, module_name: &str) -> Option<PathBuf> {
        for root in &self.roots {
            let candidate = root.join(module_name);
            if Self::is_addon_dir(&candidate) {
                return Some(candidate);
            }
        }
        None
    }

    /// Path of the manifest file inside a resolved module directory
    pub fn manifest_path(module_dir: &Path) -> Option<PathBuf> {
        MANIFEST_NAMES
            .iter()
            .map(|name| module_dir.join(name))
            .find(|path| path.is_file())
    }

    /// Whether a directory is a valid addon, i.e. contains a manifest file
    pub fn is_addon_dir(path: &Path) -> bool {
        path.is_dir() && Self::manifest_path(path).is_some()
    }
}
