//! Addon module data structures

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

/// Recognized manifest file names, in probe order
pub const MANIFEST_NAMES: [&str; 2] = ["__manifest__.py", "__openerp__.py"];

/// Parsed manifest content of an addon module
///
/// The manifest is a Python dictionary literal; the commonly used fields are
/// lifted into typed accessors while the full mapping stays available in `raw`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManifestDetails {
    pub name: Option<String>,
    pub version: Option<String>,
    pub summary: Option<String>,
    pub category: Option<String>,
    /// Declared dependency module names, in declaration order
    pub depends: Vec<String>,
    pub auto_install: bool,
    pub installable: bool,
    pub application: bool,
    /// Data file paths declared by the module
    pub data: Vec<String>,
    /// The complete manifest mapping as parsed
    pub raw: Value,
}

impl ManifestDetails {
    /// Build manifest details from a parsed literal mapping
    pub fn from_value(value: Value) -> Self {
        let mut details = ManifestDetails {
            installable: true,
            ..Default::default()
        };

        if let Value::Object(map) = &value {
            details.name = extract_optional_string(map, "name");
            details.version = extract_optional_string(map, "version");
            details.summary = extract_optional_string(map, "summary");
            details.category = extract_optional_string(map, "category");
            details.depends = extract_string_array(map, "depends");
            details.data = extract_string_array(map, "data");

            if let Some(Value::Bool(auto_install)) = map.get("auto_install") {
                details.auto_install = *auto_install;
            }
            if let Some(Value::Bool(installable)) = map.get("installable") {
                details.installable = *installable;
            }
            if let Some(Value::Bool(application)) = map.get("application") {
                details.application = *application;
            }
        }

        details.raw = value;
        details
    }
}

fn extract_optional_string(map: &serde_json::Map<String, Value>, field: &str) -> Option<String> {
    match map.get(field) {
        Some(Value::String(s)) => Some(s.clone()),
        _ => None,
    }
}

fn extract_string_array(map: &serde_json::Map<String, Value>, field: &str) -> Vec<String> {
    match map.get(field) {
        Some(Value::Array(arr)) => arr
            .iter()
            .filter_map(|v| {
                if let Value::String(s) = v {
                    Some(s.clone())
                } else {
                    None
                }
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// A single addon module discovered during graph construction
///
/// Created when first referenced in a traversal; immutable once resolved. A
/// module stays in the graph even when no addons root contains it, in which
/// case `path` is None.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddonModule {
    /// Unique module name (the directory name under an addons root)
    pub name: String,
    /// Resolved filesystem path, absent when the module was not found
    pub path: Option<PathBuf>,
    /// Declared dependency names, in declaration order
    pub depends: Vec<String>,
    /// Parsed manifest, absent for unresolved modules or malformed manifests
    pub manifest: Option<ManifestDetails>,
}

impl AddonModule {
    /// Create a new, not yet resolved module
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
            depends: Vec::new(),
            manifest: None,
        }
    }

    /// Create a resolved module from its path and manifest
    pub fn resolved(name: impl Into<String>, path: PathBuf, manifest: Option<ManifestDetails>) -> Self {
        let depends = manifest
            .as_ref()
            .map(|m| m.depends.clone())
            .unwrap_or_default();

        Self {
            name: name.into(),
            path: Some(path),
            depends,
            manifest,
        }
    }

    /// Whether the module was found in one of the addons roots
    pub fn is_resolved(&self) -> bool {
        self.path.is_some()
    }
}
