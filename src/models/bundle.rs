//! Context bundle data structures
//!
//! The bundle is the output sink of the extraction engine: an ordered,
//! append-only sequence of named text artifacts. Insertion order is
//! significant for the consumer (earlier files establish context for later
//! ones), so the bundle never reorders or deduplicates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Extraction categories, in the fixed per-module emission order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Manifest,
    Models,
    Views,
    Controllers,
    Assets,
    Security,
    Reports,
    Website,
    Data,
    /// Source files referenced from translation entries
    Code,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Manifest => "manifest",
            Category::Models => "models",
            Category::Views => "views",
            Category::Controllers => "controllers",
            Category::Assets => "assets",
            Category::Security => "security",
            Category::Reports => "reports",
            Category::Website => "website",
            Category::Data => "data",
            Category::Code => "code",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single named text artifact in the bundle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    /// Namespaced path, `moduleName/relativePath`
    pub path: String,
    /// Module the artifact was extracted from
    pub module: String,
    /// Extraction category the artifact belongs to
    pub category: Category,
    /// Full text content
    pub content: String,
}

/// Ordered append-only collection of context artifacts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContextBundle {
    artifacts: Vec<Artifact>,
}

impl ContextBundle {
    /// Create an empty bundle
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an artifact with a module-qualified path
    pub fn push(
        &mut self,
        module: &str,
        category: Category,
        relative_path: &str,
        content: String,
    ) {
        let relative_path = relative_path.trim_start_matches('/');
        self.artifacts.push(Artifact {
            path: format!("{}/{}", module, relative_path),
            module: module.to_string(),
            category,
            content,
        });
    }

    /// Append an artifact keyed by an already-qualified path
    pub fn push_raw(&mut self, module: &str, category: Category, path: &str, content: String) {
        self.artifacts.push(Artifact {
            path: path.to_string(),
            module: module.to_string(),
            category,
            content,
        });
    }

    /// Number of artifacts in the bundle
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    /// Whether the bundle holds no artifacts
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// Artifacts in insertion order
    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    /// Iterate over `(path, content)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.artifacts
            .iter()
            .map(|a| (a.path.as_str(), a.content.as_str()))
    }

    /// Compute the per-module, per-category summary of this bundle
    pub fn summary(&self) -> BundleSummary {
        let mut modules: Vec<ModuleSummary> = Vec::new();

        for artifact in &self.artifacts {
            let lines = artifact.content.lines().count();
            let chars = artifact.content.chars().count();

            let module_pos = match modules.iter().position(|m| m.module == artifact.module) {
                Some(pos) => pos,
                None => {
                    modules.push(ModuleSummary {
                        module: artifact.module.clone(),
                        categories: Vec::new(),
                    });
                    modules.len() - 1
                }
            };
            let module = &mut modules[module_pos];

            let category_pos = match module
                .categories
                .iter()
                .position(|c| c.category == artifact.category)
            {
                Some(pos) => pos,
                None => {
                    module.categories.push(CategorySummary {
                        category: artifact.category,
                        items: 0,
                        lines: 0,
                        chars: 0,
                    });
                    module.categories.len() - 1
                }
            };
            let category = &mut module.categories[category_pos];

            category.items += 1;
            category.lines += lines;
            category.chars += chars;
        }

        for module in &mut modules {
            module.categories.sort_by_key(|c| c.category);
        }

        let total_items = self.artifacts.len();
        let total_lines = modules
            .iter()
            .flat_map(|m| &m.categories)
            .map(|c| c.lines)
            .sum();
        let total_chars = modules
            .iter()
            .flat_map(|m| &m.categories)
            .map(|c| c.chars)
            .sum();

        BundleSummary {
            generated_at: chrono::Utc::now(),
            total_items,
            total_lines,
            total_chars,
            modules,
        }
    }
}

/// Per-category counters inside a module summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: Category,
    pub items: usize,
    pub lines: usize,
    pub chars: usize,
}

/// Per-module counters in a bundle summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleSummary {
    pub module: String,
    pub categories: Vec<CategorySummary>,
}

/// Aggregate counters over a whole bundle, for observability output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleSummary {
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub total_items: usize,
    pub total_lines: usize,
    pub total_chars: usize,
    /// Modules in first-appearance order
    pub modules: Vec<ModuleSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_namespaces_paths() {
        let mut bundle = ContextBundle::new();
        bundle.push("sale", Category::Views, "views/sale_views.xml", "<odoo/>".to_string());
        bundle.push("sale", Category::Manifest, "/__manifest__.py", "{}".to_string());

        let paths: Vec<&str> = bundle.iter().map(|(path, _)| path).collect();
        assert_eq!(paths, vec!["sale/views/sale_views.xml", "sale/__manifest__.py"]);
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let mut bundle = ContextBundle::new();
        bundle.push("b", Category::Data, "data/z.xml", String::new());
        bundle.push("a", Category::Data, "data/a.xml", String::new());
        bundle.push("b", Category::Data, "data/a.xml", String::new());

        let paths: Vec<&str> = bundle.iter().map(|(path, _)| path).collect();
        assert_eq!(paths, vec!["b/data/z.xml", "a/data/a.xml", "b/data/a.xml"]);
    }

    #[test]
    fn test_duplicate_paths_are_allowed() {
        let mut bundle = ContextBundle::new();
        bundle.push("m", Category::Assets, "static/app.js", "one".to_string());
        bundle.push("m", Category::Assets, "static/app.js", "two".to_string());
        assert_eq!(bundle.len(), 2);
    }

    #[test]
    fn test_summary_counts() {
        let mut bundle = ContextBundle::new();
        bundle.push("sale", Category::Models, "models/sale.py", "a\nb\nc".to_string());
        bundle.push("sale", Category::Models, "models/order.py", "d".to_string());
        bundle.push("crm", Category::Manifest, "__manifest__.py", "{}".to_string());

        let summary = bundle.summary();
        assert_eq!(summary.total_items, 3);
        assert_eq!(summary.total_lines, 5);
        assert_eq!(summary.modules.len(), 2);
        assert_eq!(summary.modules[0].module, "sale");

        let models = &summary.modules[0].categories[0];
        assert_eq!(models.category, Category::Models);
        assert_eq!(models.items, 2);
        assert_eq!(models.lines, 4);
    }
}
