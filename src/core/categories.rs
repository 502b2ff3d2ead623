//! Per-category extraction strategies
//!
//! Each category of module content (manifest, models, views, ...) has its own
//! extractor implementing a common contract. The engine runs them in a fixed
//! order per module; every extractor decides on its own which files matter
//! and appends matches to the shared bundle. A failing file is logged and
//! skipped, never fatal.

use crate::core::extractor::{CategoryExtractor, ModuleContext};
use crate::error::{handle_error, ContextError};
use crate::models::bundle::{Category, ContextBundle};
use crate::parsers::python::{declared_routes, package_imports};
use crate::parsers::ClassScanner;
use crate::utils::AddonResolver;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Read a file, logging and swallowing any failure
fn read_file(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(err) => {
            warn!("Could not read {}: {}", path.display(), err);
            None
        }
    }
}

/// Path of `path` relative to the module directory, for bundle namespacing
fn relative_path(path: &Path, module_dir: &Path) -> String {
    path.strip_prefix(module_dir)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}

/// All files with the given extension under a directory, in lexicographic
/// walk order
fn files_with_extension(dir: &Path, extension: &str) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == extension))
        .collect()
}

/// Direct children of a directory with one of the given extensions, sorted
fn direct_files_with_extensions(dir: &Path, extensions: &[&str]) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .is_some_and(|ext| extensions.iter().any(|wanted| ext == *wanted))
        })
        .collect();
    files.sort();
    files
}

/// Whether XML content holds at least one `record` of `record_model` whose
/// `model` field is in the requested set
fn has_matching_record(
    content: &str,
    record_model: &str,
    requested: &HashSet<&str>,
) -> std::result::Result<bool, roxmltree::Error> {
    let doc = roxmltree::Document::parse(content)?;

    Ok(doc.descendants().any(|node| {
        node.has_tag_name("record")
            && node.attribute("model") == Some(record_model)
            && node.children().any(|field| {
                field.has_tag_name("field")
                    && field.attribute("name") == Some("model")
                    && field.text().is_some_and(|text| requested.contains(text))
            })
    }))
}

/// Includes the manifest file verbatim
pub struct ManifestExtractor;

impl CategoryExtractor for ManifestExtractor {
    fn category(&self) -> Category {
        Category::Manifest
    }

    fn extract(&self, ctx: &ModuleContext<'_>, bundle: &mut ContextBundle) {
        let Some(manifest_path) = AddonResolver::manifest_path(ctx.path) else {
            return;
        };
        let Some(content) = read_file(&manifest_path) else {
            return;
        };

        let relative = relative_path(&manifest_path, ctx.path);
        bundle.push(ctx.module, Category::Manifest, &relative, content);
    }
}

/// Slices model files into the class blocks matching the requested models
///
/// Only files imported by the models package initializer are considered. With
/// an empty requested-model set, whole files are included verbatim instead,
/// but only for the caller's override module (the module under active
/// development).
pub struct ModelExtractor {
    scanner: ClassScanner,
}

impl ModelExtractor {
    pub fn new() -> Self {
        Self {
            scanner: ClassScanner::new(),
        }
    }
}

impl Default for ModelExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryExtractor for ModelExtractor {
    fn category(&self) -> Category {
        Category::Models
    }

    fn extract(&self, ctx: &ModuleContext<'_>, bundle: &mut ContextBundle) {
        let models_dir = ctx.path.join("models");
        let init_path = models_dir.join("__init__.py");
        if !models_dir.is_dir() || !init_path.is_file() {
            return;
        }

        let requested = ctx.spec.model_names();
        let whole_files = requested.is_empty();
        if whole_files && ctx.override_module != Some(ctx.module) {
            return;
        }

        let Some(init_source) = read_file(&init_path) else {
            return;
        };

        for import in package_imports(&init_source) {
            let file = models_dir.join(format!("{}.py", import));
            if !file.is_file() {
                continue;
            }
            let Some(source) = read_file(&file) else {
                continue;
            };
            let relative = format!("models/{}.py", import);

            if whole_files {
                bundle.push(ctx.module, Category::Models, &relative, source);
                continue;
            }

            for block in self.scanner.blocks(&source) {
                let declared = self.scanner.declared_models(&block.text);
                let inherited = self.scanner.inherited_models(&block.text);

                if declared
                    .iter()
                    .chain(inherited.iter())
                    .any(|model| requested.contains(model.as_str()))
                {
                    bundle.push(ctx.module, Category::Models, &relative, block.text);
                }
            }
        }
    }
}

/// Includes XML files defining views for the requested models
pub struct ViewExtractor;

impl CategoryExtractor for ViewExtractor {
    fn category(&self) -> Category {
        Category::Views
    }

    fn extract(&self, ctx: &ModuleContext<'_>, bundle: &mut ContextBundle) {
        let requested = ctx.spec.view_models();
        if requested.is_empty() {
            return;
        }

        for xml_file in files_with_extension(ctx.path, "xml") {
            let Some(content) = read_file(&xml_file) else {
                continue;
            };

            match has_matching_record(&content, "ir.ui.view", &requested) {
                Ok(true) => {
                    let relative = relative_path(&xml_file, ctx.path);
                    bundle.push(ctx.module, Category::Views, &relative, content);
                }
                Ok(false) => {}
                Err(err) => {
                    handle_error(ContextError::XmlParse {
                        file: xml_file.clone(),
                        source: err,
                    });
                }
            }
        }
    }
}

/// Includes controller files declaring any of the requested routes
pub struct ControllerExtractor;

impl CategoryExtractor for ControllerExtractor {
    fn category(&self) -> Category {
        Category::Controllers
    }

    fn extract(&self, ctx: &ModuleContext<'_>, bundle: &mut ContextBundle) {
        let requested = ctx.spec.routes();
        if requested.is_empty() {
            return;
        }

        let controllers_dir = ctx.path.join("controllers");
        if !controllers_dir.is_dir() {
            return;
        }

        for py_file in files_with_extension(&controllers_dir, "py") {
            let Some(content) = read_file(&py_file) else {
                continue;
            };

            let routes = declared_routes(&content);
            if routes.iter().any(|route| requested.contains(route.as_str())) {
                let relative = relative_path(&py_file, ctx.path);
                bundle.push(ctx.module, Category::Controllers, &relative, content);
            }
        }
    }
}

/// Includes asset files referenced by path in the analysis
///
/// The declared path is tried directly against the module root first (with a
/// leading `/moduleName/` prefix stripped); on a miss, a recursive search by
/// file name keeps the first match in lexicographic walk order.
pub struct AssetExtractor;

impl CategoryExtractor for AssetExtractor {
    fn category(&self) -> Category {
        Category::Assets
    }

    fn extract(&self, ctx: &ModuleContext<'_>, bundle: &mut ContextBundle) {
        for declared in ctx.spec.asset_paths() {
            let module_prefix = format!("/{}/", ctx.module);
            let declared = declared.strip_prefix(&module_prefix).unwrap_or(declared);

            let candidate = ctx.path.join(declared);
            if candidate.is_file() {
                if let Some(content) = read_file(&candidate) {
                    bundle.push(ctx.module, Category::Assets, declared, content);
                }
                continue;
            }

            // Fallback: first file with a matching name anywhere in the module
            let Some(file_name) = Path::new(declared).file_name() else {
                continue;
            };

            let fallback = WalkDir::new(ctx.path)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().is_file())
                .find(|entry| entry.file_name() == file_name);

            match fallback {
                Some(entry) => {
                    if let Some(content) = read_file(entry.path()) {
                        let relative = relative_path(entry.path(), ctx.path);
                        bundle.push(ctx.module, Category::Assets, &relative, content);
                    }
                }
                None => debug!(
                    "Asset '{}' not found in module '{}'",
                    declared, ctx.module
                ),
            }
        }
    }
}

/// Includes all tabular and markup files directly inside `security/`
pub struct SecurityExtractor;

impl CategoryExtractor for SecurityExtractor {
    fn category(&self) -> Category {
        Category::Security
    }

    fn extract(&self, ctx: &ModuleContext<'_>, bundle: &mut ContextBundle) {
        let security_dir = ctx.path.join("security");
        if !security_dir.is_dir() {
            return;
        }

        for file in direct_files_with_extensions(&security_dir, &["csv", "xml"]) {
            if let Some(content) = read_file(&file) {
                let relative = relative_path(&file, ctx.path);
                bundle.push(ctx.module, Category::Security, &relative, content);
            }
        }
    }
}

/// Includes XML files defining report actions for the requested models
pub struct ReportExtractor;

impl CategoryExtractor for ReportExtractor {
    fn category(&self) -> Category {
        Category::Reports
    }

    fn extract(&self, ctx: &ModuleContext<'_>, bundle: &mut ContextBundle) {
        let requested = ctx.spec.report_models();
        if requested.is_empty() {
            return;
        }

        for xml_file in files_with_extension(ctx.path, "xml") {
            let Some(content) = read_file(&xml_file) else {
                continue;
            };

            match has_matching_record(&content, "ir.actions.report", &requested) {
                Ok(true) => {
                    let relative = relative_path(&xml_file, ctx.path);
                    bundle.push(ctx.module, Category::Reports, &relative, content);
                }
                Ok(false) => {}
                Err(err) => {
                    handle_error(ContextError::XmlParse {
                        file: xml_file.clone(),
                        source: err,
                    });
                }
            }
        }
    }
}

/// Includes XML files holding any of the requested website templates
pub struct WebsiteTemplateExtractor;

impl CategoryExtractor for WebsiteTemplateExtractor {
    fn category(&self) -> Category {
        Category::Website
    }

    fn extract(&self, ctx: &ModuleContext<'_>, bundle: &mut ContextBundle) {
        let requested = ctx.spec.template_ids();
        if requested.is_empty() {
            return;
        }

        for xml_file in files_with_extension(ctx.path, "xml") {
            let Some(content) = read_file(&xml_file) else {
                continue;
            };

            let doc = match roxmltree::Document::parse(&content) {
                Ok(doc) => doc,
                Err(err) => {
                    handle_error(ContextError::XmlParse {
                        file: xml_file.clone(),
                        source: err,
                    });
                    continue;
                }
            };

            let matches = doc.descendants().any(|node| {
                node.has_tag_name("template")
                    && node.attribute("id").is_some_and(|id| requested.contains(id))
            });

            if matches {
                let relative = relative_path(&xml_file, ctx.path);
                bundle.push(ctx.module, Category::Website, &relative, content);
            }
        }
    }
}

/// Includes all tabular and markup files directly inside `data/`
pub struct DataExtractor;

impl CategoryExtractor for DataExtractor {
    fn category(&self) -> Category {
        Category::Data
    }

    fn extract(&self, ctx: &ModuleContext<'_>, bundle: &mut ContextBundle) {
        let data_dir = ctx.path.join("data");
        if !data_dir.is_dir() {
            return;
        }

        for file in direct_files_with_extensions(&data_dir, &["xml", "csv"]) {
            if let Some(content) = read_file(&file) {
                let relative = relative_path(&file, ctx.path);
                bundle.push(ctx.module, Category::Data, &relative, content);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analysis::AnalysisSpec;
    use std::fs;
    use tempfile::TempDir;

    fn ctx<'a>(
        module: &'a str,
        path: &'a Path,
        spec: &'a AnalysisSpec,
        override_module: Option<&'a str>,
    ) -> ModuleContext<'a> {
        ModuleContext {
            module,
            path,
            spec,
            override_module,
        }
    }

    fn spec_from(json: &str) -> AnalysisSpec {
        AnalysisSpec::from_json_str(json, "analysis.json").unwrap()
    }

    #[test]
    fn test_model_extractor_keeps_only_matching_blocks() {
        let dir = TempDir::new().unwrap();
        let models = dir.path().join("models");
        fs::create_dir_all(&models).unwrap();
        fs::write(models.join("__init__.py"), "from . import foo, bar\n").unwrap();
        fs::write(
            models.join("foo.py"),
            "class Foo(models.Model):\n    _name = 'my.model'\n\nclass Other(models.Model):\n    _name = 'other.model'\n",
        )
        .unwrap();
        fs::write(
            models.join("bar.py"),
            "class Bar(models.Model):\n    _name = 'bar.model'\n",
        )
        .unwrap();

        let spec = spec_from(r#"{"models": [{"name": "my.model"}]}"#);
        let mut bundle = ContextBundle::new();
        ModelExtractor::new().extract(&ctx("m", dir.path(), &spec, None), &mut bundle);

        assert_eq!(bundle.len(), 1);
        let (path, content) = bundle.iter().next().unwrap();
        assert_eq!(path, "m/models/foo.py");
        assert!(content.contains("my.model"));
        assert!(!content.contains("other.model"));
    }

    #[test]
    fn test_model_extractor_matches_inherited() {
        let dir = TempDir::new().unwrap();
        let models = dir.path().join("models");
        fs::create_dir_all(&models).unwrap();
        fs::write(models.join("__init__.py"), "from . import partner\n").unwrap();
        fs::write(
            models.join("partner.py"),
            "class Partner(models.Model):\n    _inherit = 'res.partner'\n",
        )
        .unwrap();

        let spec = spec_from(r#"{"models": [{"name": "res.partner"}]}"#);
        let mut bundle = ContextBundle::new();
        ModelExtractor::new().extract(&ctx("m", dir.path(), &spec, None), &mut bundle);

        assert_eq!(bundle.len(), 1);
    }

    #[test]
    fn test_model_extractor_override_includes_whole_files() {
        let dir = TempDir::new().unwrap();
        let models = dir.path().join("models");
        fs::create_dir_all(&models).unwrap();
        fs::write(models.join("__init__.py"), "from . import foo\n").unwrap();
        let source = "import os\n\nclass Foo(models.Model):\n    _name = 'my.model'\n";
        fs::write(models.join("foo.py"), source).unwrap();

        let spec = AnalysisSpec::default();

        // Without the override, nothing is extracted
        let mut bundle = ContextBundle::new();
        ModelExtractor::new().extract(&ctx("m", dir.path(), &spec, None), &mut bundle);
        assert!(bundle.is_empty());

        // With the override matching the module, the file comes in verbatim
        let mut bundle = ContextBundle::new();
        ModelExtractor::new().extract(&ctx("m", dir.path(), &spec, Some("m")), &mut bundle);
        assert_eq!(bundle.len(), 1);
        assert_eq!(bundle.iter().next().unwrap().1, source);
    }

    #[test]
    fn test_model_extractor_skips_unimported_files() {
        let dir = TempDir::new().unwrap();
        let models = dir.path().join("models");
        fs::create_dir_all(&models).unwrap();
        fs::write(models.join("__init__.py"), "from . import foo\n").unwrap();
        fs::write(
            models.join("foo.py"),
            "class Foo(models.Model):\n    _name = 'my.model'\n",
        )
        .unwrap();
        fs::write(
            models.join("stray.py"),
            "class Stray(models.Model):\n    _name = 'my.model'\n",
        )
        .unwrap();

        let spec = spec_from(r#"{"models": [{"name": "my.model"}]}"#);
        let mut bundle = ContextBundle::new();
        ModelExtractor::new().extract(&ctx("m", dir.path(), &spec, None), &mut bundle);

        let paths: Vec<&str> = bundle.iter().map(|(path, _)| path).collect();
        assert_eq!(paths, vec!["m/models/foo.py"]);
    }

    #[test]
    fn test_view_extractor_matches_model_records() {
        let dir = TempDir::new().unwrap();
        let views = dir.path().join("views");
        fs::create_dir_all(&views).unwrap();
        fs::write(
            views.join("partner_views.xml"),
            r#"<odoo><record id="v" model="ir.ui.view"><field name="model">res.partner</field></record></odoo>"#,
        )
        .unwrap();
        fs::write(
            views.join("other_views.xml"),
            r#"<odoo><record id="w" model="ir.ui.view"><field name="model">sale.order</field></record></odoo>"#,
        )
        .unwrap();
        fs::write(views.join("broken.xml"), "<odoo><unclosed></odoo>").unwrap();

        let spec = spec_from(r#"{"views": [{"model": "res.partner"}]}"#);
        let mut bundle = ContextBundle::new();
        ViewExtractor.extract(&ctx("m", dir.path(), &spec, None), &mut bundle);

        let paths: Vec<&str> = bundle.iter().map(|(path, _)| path).collect();
        assert_eq!(paths, vec!["m/views/partner_views.xml"]);
    }

    #[test]
    fn test_controller_extractor_matches_routes() {
        let dir = TempDir::new().unwrap();
        let controllers = dir.path().join("controllers");
        fs::create_dir_all(&controllers).unwrap();
        fs::write(
            controllers.join("main.py"),
            "@http.route('/shop/cart', auth='public')\ndef cart():\n    pass\n",
        )
        .unwrap();
        fs::write(
            controllers.join("other.py"),
            "@http.route('/about')\ndef about():\n    pass\n",
        )
        .unwrap();

        let spec = spec_from(r#"{"controller": [{"action_name": "/shop/cart"}]}"#);
        let mut bundle = ContextBundle::new();
        ControllerExtractor.extract(&ctx("m", dir.path(), &spec, None), &mut bundle);

        let paths: Vec<&str> = bundle.iter().map(|(path, _)| path).collect();
        assert_eq!(paths, vec!["m/controllers/main.py"]);
    }

    #[test]
    fn test_asset_extractor_direct_path_with_module_prefix() {
        let dir = TempDir::new().unwrap();
        let js_dir = dir.path().join("static/src/js");
        fs::create_dir_all(&js_dir).unwrap();
        fs::write(js_dir.join("app.js"), "console.log('app');").unwrap();

        let spec = spec_from(r#"{"assets": [{"file_path": "/my_module/static/src/js/app.js"}]}"#);
        let mut bundle = ContextBundle::new();
        AssetExtractor.extract(&ctx("my_module", dir.path(), &spec, None), &mut bundle);

        let paths: Vec<&str> = bundle.iter().map(|(path, _)| path).collect();
        assert_eq!(paths, vec!["my_module/static/src/js/app.js"]);
    }

    #[test]
    fn test_asset_extractor_filename_fallback() {
        let dir = TempDir::new().unwrap();
        let js_dir = dir.path().join("static/lib");
        fs::create_dir_all(&js_dir).unwrap();
        fs::write(js_dir.join("widget.js"), "widget").unwrap();

        let spec = spec_from(r#"{"assets": [{"file_path": "static/src/js/widget.js"}]}"#);
        let mut bundle = ContextBundle::new();
        AssetExtractor.extract(&ctx("m", dir.path(), &spec, None), &mut bundle);

        let paths: Vec<&str> = bundle.iter().map(|(path, _)| path).collect();
        assert_eq!(paths, vec!["m/static/lib/widget.js"]);
    }

    #[test]
    fn test_security_and_data_extractors_take_direct_files_only() {
        let dir = TempDir::new().unwrap();
        let security = dir.path().join("security");
        fs::create_dir_all(security.join("nested")).unwrap();
        fs::write(security.join("ir.model.access.csv"), "id,name").unwrap();
        fs::write(security.join("rules.xml"), "<odoo/>").unwrap();
        fs::write(security.join("notes.txt"), "ignored").unwrap();
        fs::write(security.join("nested/deep.csv"), "ignored").unwrap();

        let data = dir.path().join("data");
        fs::create_dir_all(&data).unwrap();
        fs::write(data.join("mail_data.xml"), "<odoo/>").unwrap();

        let spec = AnalysisSpec::default();
        let mut bundle = ContextBundle::new();
        SecurityExtractor.extract(&ctx("m", dir.path(), &spec, None), &mut bundle);
        DataExtractor.extract(&ctx("m", dir.path(), &spec, None), &mut bundle);

        let paths: Vec<&str> = bundle.iter().map(|(path, _)| path).collect();
        assert_eq!(
            paths,
            vec![
                "m/security/ir.model.access.csv",
                "m/security/rules.xml",
                "m/data/mail_data.xml",
            ]
        );
    }

    #[test]
    fn test_report_extractor() {
        let dir = TempDir::new().unwrap();
        let report = dir.path().join("report");
        fs::create_dir_all(&report).unwrap();
        fs::write(
            report.join("sale_report.xml"),
            r#"<odoo><record id="r" model="ir.actions.report"><field name="model">sale.order</field></record></odoo>"#,
        )
        .unwrap();

        let spec = spec_from(r#"{"reports": [{"model": "sale.order"}]}"#);
        let mut bundle = ContextBundle::new();
        ReportExtractor.extract(&ctx("m", dir.path(), &spec, None), &mut bundle);
        assert_eq!(bundle.len(), 1);
    }

    #[test]
    fn test_website_template_extractor() {
        let dir = TempDir::new().unwrap();
        let views = dir.path().join("views");
        fs::create_dir_all(&views).unwrap();
        fs::write(
            views.join("templates.xml"),
            r#"<odoo><template id="cart_summary" name="Cart"><div/></template></odoo>"#,
        )
        .unwrap();
        fs::write(
            views.join("unrelated.xml"),
            r#"<odoo><template id="checkout" name="Checkout"><div/></template></odoo>"#,
        )
        .unwrap();

        let spec = spec_from(r#"{"website_views": [{"view": "cart_summary"}]}"#);
        let mut bundle = ContextBundle::new();
        WebsiteTemplateExtractor.extract(&ctx("m", dir.path(), &spec, None), &mut bundle);

        let paths: Vec<&str> = bundle.iter().map(|(path, _)| path).collect();
        assert_eq!(paths, vec!["m/views/templates.xml"]);
    }

    #[test]
    fn test_manifest_extractor() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("__manifest__.py"), "{'name': 'M'}").unwrap();

        let spec = AnalysisSpec::default();
        let mut bundle = ContextBundle::new();
        ManifestExtractor.extract(&ctx("m", dir.path(), &spec, None), &mut bundle);

        let (path, content) = bundle.iter().next().unwrap();
        assert_eq!(path, "m/__manifest__.py");
        assert_eq!(content, "{'name': 'M'}");
    }
}
