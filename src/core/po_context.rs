//! Context gathering from translation (PO) files
//!
//! PO entries carry source references of the form
//! `#: code:addons/<module>/<path>:<line>`. Those references are enough to
//! recover the files a translation touches: each referenced module is
//! resolved through the addon resolver and the referenced file's content is
//! pulled into a bundle, keyed by the referenced path.

use crate::models::bundle::{Category, ContextBundle};
use crate::utils::AddonResolver;
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Gather the source files referenced by PO file content
///
/// Each distinct referenced path is included once, in order of first
/// appearance. References outside `addons/`, to unresolvable modules or to
/// missing files are logged and skipped.
pub fn gather_po_context(po_content: &str, resolver: &AddonResolver) -> ContextBundle {
    let reference = Regex::new(r"#: code:(.*?):\d+").expect("valid regex");

    let mut bundle = ContextBundle::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut modules: HashSet<String> = HashSet::new();

    for captures in reference.captures_iter(po_content) {
        let referenced = &captures[1];
        if !seen.insert(referenced.to_string()) {
            continue;
        }

        let Some((module, full_path)) = locate_reference(referenced, resolver) else {
            warn!("Could not find context file: {}", referenced);
            continue;
        };

        match fs::read_to_string(&full_path) {
            Ok(content) => {
                modules.insert(module.clone());
                bundle.push_raw(&module, Category::Code, referenced, content);
            }
            Err(err) => {
                warn!("Could not read context file {}: {}", full_path.display(), err);
            }
        }
    }

    let mut module_names: Vec<&str> = modules.iter().map(|s| s.as_str()).collect();
    module_names.sort();
    info!(
        "Gathered context from {} files in modules: {}",
        bundle.len(),
        module_names.join(", ")
    );

    bundle
}

/// Resolve a `addons/<module>/<rest>` reference to a module name and path
fn locate_reference(referenced: &str, resolver: &AddonResolver) -> Option<(String, PathBuf)> {
    let rest = referenced.strip_prefix("addons/")?;
    let mut parts = rest.splitn(2, '/');
    let module = parts.next().filter(|m| !m.is_empty())?;
    let relative = parts.next()?;

    let module_path = resolver.resolve(module)?;
    let full_path = module_path.join(Path::new(relative));
    if !full_path.is_file() {
        return None;
    }

    Some((module.to_string(), full_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_addon(root: &Path, name: &str) -> PathBuf {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("__manifest__.py"), "{}").unwrap();
        dir
    }

    #[test]
    fn test_references_are_gathered_once() {
        let root = TempDir::new().unwrap();
        let sale = make_addon(root.path(), "sale");
        fs::create_dir_all(sale.join("models")).unwrap();
        fs::write(sale.join("models/sale_order.py"), "class SaleOrder: pass").unwrap();

        let po = "\
#: code:addons/sale/models/sale_order.py:12
msgid \"Order\"
#: code:addons/sale/models/sale_order.py:40
msgid \"Quotation\"
";

        let resolver = AddonResolver::new([root.path()]);
        let bundle = gather_po_context(po, &resolver);

        assert_eq!(bundle.len(), 1);
        let (path, content) = bundle.iter().next().unwrap();
        assert_eq!(path, "addons/sale/models/sale_order.py");
        assert!(content.contains("SaleOrder"));
    }

    #[test]
    fn test_unresolvable_references_are_skipped() {
        let root = TempDir::new().unwrap();
        make_addon(root.path(), "sale");

        let po = "\
#: code:addons/ghost/models/thing.py:3
#: code:addons/sale/models/missing.py:7
#: code:web/static/src/core.js:1
";

        let resolver = AddonResolver::new([root.path()]);
        let bundle = gather_po_context(po, &resolver);
        assert!(bundle.is_empty());
    }
}
