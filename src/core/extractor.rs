//! Selective context extraction engine
//!
//! Walks an ordered module list and runs the per-category extraction
//! strategies against each module, appending every match to a shared context
//! bundle. Foundation modules that every deployment ships (and that the
//! downstream consumer therefore already knows) are skipped; the exclusion
//! set is injectable and its entries may be glob patterns.

use crate::core::categories::{
    AssetExtractor, ControllerExtractor, DataExtractor, ManifestExtractor, ModelExtractor,
    ReportExtractor, SecurityExtractor, ViewExtractor, WebsiteTemplateExtractor,
};
use crate::models::analysis::AnalysisSpec;
use crate::models::bundle::{BundleSummary, Category, ContextBundle};
use crate::models::config::DEFAULT_EXCLUDED_MODULES;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Shared input contract for category extractors
pub struct ModuleContext<'a> {
    /// Name of the module being processed
    pub module: &'a str,
    /// Resolved module directory
    pub path: &'a Path,
    /// The read-only analysis specification
    pub spec: &'a AnalysisSpec,
    /// Module under active development, force-included for some categories
    pub override_module: Option<&'a str>,
}

/// A single category extraction strategy
pub trait CategoryExtractor {
    /// The bundle category this extractor feeds
    fn category(&self) -> Category;

    /// Scan the module and append every match to the bundle
    ///
    /// Must never fail: unreadable or malformed files are logged and skipped.
    fn extract(&self, ctx: &ModuleContext<'_>, bundle: &mut ContextBundle);
}

/// The context extraction engine
pub struct ContextExtractor {
    exclude: Vec<ExcludeEntry>,
    override_module: Option<String>,
    extractors: Vec<Box<dyn CategoryExtractor>>,
}

enum ExcludeEntry {
    Name(String),
    Pattern(glob::Pattern),
}

impl ContextExtractor {
    /// Create an engine with the default foundation-module exclusions
    pub fn new() -> Self {
        Self::with_exclusions(
            &DEFAULT_EXCLUDED_MODULES
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>(),
        )
    }

    /// Create an engine with a caller-supplied exclusion set
    ///
    /// Entries containing glob metacharacters are compiled as patterns;
    /// anything else matches by exact name. An entry that fails to compile is
    /// kept as an exact name and logged.
    pub fn with_exclusions(exclude_modules: &[String]) -> Self {
        let exclude = exclude_modules
            .iter()
            .map(|entry| {
                if entry.contains(['*', '?', '[']) {
                    match glob::Pattern::new(entry) {
                        Ok(pattern) => ExcludeEntry::Pattern(pattern),
                        Err(err) => {
                            warn!("Invalid exclusion pattern '{}': {}", entry, err);
                            ExcludeEntry::Name(entry.clone())
                        }
                    }
                } else {
                    ExcludeEntry::Name(entry.clone())
                }
            })
            .collect();

        Self {
            exclude,
            override_module: None,
            extractors: vec![
                Box::new(ManifestExtractor),
                Box::new(ModelExtractor::new()),
                Box::new(ViewExtractor),
                Box::new(ControllerExtractor),
                Box::new(AssetExtractor),
                Box::new(SecurityExtractor),
                Box::new(ReportExtractor),
                Box::new(WebsiteTemplateExtractor),
                Box::new(DataExtractor),
            ],
        }
    }

    /// Set the module under active development
    pub fn with_override(mut self, module: Option<String>) -> Self {
        self.override_module = module;
        self
    }

    /// Whether a module name is excluded from extraction
    pub fn is_excluded(&self, name: &str) -> bool {
        self.exclude.iter().any(|entry| match entry {
            ExcludeEntry::Name(excluded) => excluded == name,
            ExcludeEntry::Pattern(pattern) => pattern.matches(name),
        })
    }

    /// Extract context for the given modules, in the given order
    ///
    /// Modules without a resolved path are skipped with a warning. Within a
    /// module the categories run in their fixed order, so the bundle layout
    /// is deterministic: per module, per category, per file.
    pub fn extract(
        &self,
        ordered_modules: &[String],
        resolved_paths: &HashMap<String, PathBuf>,
        spec: &AnalysisSpec,
    ) -> ContextBundle {
        info!(
            "Gathering context from modules: {}",
            ordered_modules.join(", ")
        );

        let mut bundle = ContextBundle::new();

        for module in ordered_modules {
            if self.is_excluded(module) {
                debug!("Skipping foundation module '{}'", module);
                continue;
            }

            let Some(path) = resolved_paths.get(module) else {
                warn!("No resolved path for module '{}', skipping", module);
                continue;
            };

            let ctx = ModuleContext {
                module,
                path,
                spec,
                override_module: self.override_module.as_deref(),
            };

            for extractor in &self.extractors {
                extractor.extract(&ctx, &mut bundle);
            }
        }

        log_summary(&bundle.summary());
        bundle
    }
}

impl Default for ContextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Log the per-module, per-category extraction summary
fn log_summary(summary: &BundleSummary) {
    for module in &summary.modules {
        for category in &module.categories {
            debug!(
                "{}/{}: {} item(s), {} line(s), {} char(s)",
                module.module, category.category, category.items, category.lines, category.chars
            );
        }
    }
    debug!(
        "Total: {} item(s), {} line(s), {} char(s)",
        summary.total_items, summary.total_lines, summary.total_chars
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn make_module(root: &Path, name: &str) -> PathBuf {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("__manifest__.py"), format!("{{'name': '{}'}}", name)).unwrap();
        dir
    }

    #[test]
    fn test_excluded_modules_are_skipped() {
        let root = TempDir::new().unwrap();
        let base_dir = make_module(root.path(), "base");
        let sale_dir = make_module(root.path(), "sale");

        let paths = HashMap::from([
            ("base".to_string(), base_dir),
            ("sale".to_string(), sale_dir),
        ]);

        let engine = ContextExtractor::new();
        let ordered = vec!["base".to_string(), "sale".to_string()];
        let bundle = engine.extract(&ordered, &paths, &AnalysisSpec::default());

        let paths: Vec<&str> = bundle.iter().map(|(path, _)| path).collect();
        assert_eq!(paths, vec!["sale/__manifest__.py"]);
    }

    #[test]
    fn test_glob_exclusions() {
        let engine = ContextExtractor::with_exclusions(&[
            "base".to_string(),
            "l10n_*".to_string(),
        ]);

        assert!(engine.is_excluded("base"));
        assert!(engine.is_excluded("l10n_be"));
        assert!(!engine.is_excluded("sale"));
    }

    #[test]
    fn test_unresolved_modules_are_skipped() {
        let engine = ContextExtractor::new();
        let ordered = vec!["ghost".to_string()];
        let bundle = engine.extract(&ordered, &HashMap::new(), &AnalysisSpec::default());
        assert!(bundle.is_empty());
    }

    #[test]
    fn test_bundle_follows_module_order() {
        let root = TempDir::new().unwrap();
        let first = make_module(root.path(), "first");
        let second = make_module(root.path(), "second");

        let paths = HashMap::from([
            ("first".to_string(), first),
            ("second".to_string(), second),
        ]);

        let engine = ContextExtractor::new();
        let ordered = vec!["second".to_string(), "first".to_string()];
        let bundle = engine.extract(&ordered, &paths, &AnalysisSpec::default());

        let paths: Vec<&str> = bundle.iter().map(|(path, _)| path).collect();
        assert_eq!(paths, vec!["second/__manifest__.py", "first/__manifest__.py"]);
    }

    #[test]
    fn test_category_order_within_module() {
        let root = TempDir::new().unwrap();
        let dir = make_module(root.path(), "shop");

        let data = dir.join("data");
        fs::create_dir_all(&data).unwrap();
        fs::write(data.join("defaults.xml"), "<odoo/>").unwrap();

        let security = dir.join("security");
        fs::create_dir_all(&security).unwrap();
        fs::write(security.join("ir.model.access.csv"), "id").unwrap();

        let paths = HashMap::from([("shop".to_string(), dir)]);
        let engine = ContextExtractor::new();
        let bundle = engine.extract(&["shop".to_string()], &paths, &AnalysisSpec::default());

        let categories: Vec<Category> =
            bundle.artifacts().iter().map(|a| a.category).collect();
        assert_eq!(
            categories,
            vec![Category::Manifest, Category::Security, Category::Data]
        );
    }
}
