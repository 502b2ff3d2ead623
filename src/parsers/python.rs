//! Shallow Python source scanning
//!
//! Model files, package initializers and controllers are never executed or
//! fully parsed. Instead, this module slices source text with line-level
//! patterns: top-level class declaration blocks by indentation, import lists
//! from package initializers, and route declarations from decorators. It is a
//! deliberate heuristic substitute for a real parser, kept behind a narrow
//! interface so it could be swapped for a syntax-tree extractor later.

use regex::Regex;

/// A class declaration block sliced out of a source file
#[derive(Debug, Clone)]
pub struct ClassBlock {
    /// Indentation depth of the `class` keyword
    pub indent: usize,
    /// Header line of the declaration
    pub header: String,
    /// Full block text, header included
    pub text: String,
}

/// Scanner for class declaration blocks and the model names they declare
pub struct ClassScanner {
    class_header: Regex,
    model_name: Regex,
    inherit_single: Regex,
    inherit_list: Regex,
    quoted: Regex,
}

impl ClassScanner {
    pub fn new() -> Self {
        Self {
            class_header: Regex::new(r"^(\s*)class\s+.*:").expect("valid regex"),
            model_name: Regex::new(r#"_name\s*=\s*['"]([^'"]+)['"]"#).expect("valid regex"),
            inherit_single: Regex::new(r#"_inherit\s*=\s*['"]([^'"]+)['"]"#).expect("valid regex"),
            inherit_list: Regex::new(r"_inherit\s*=\s*\[([^\]]+)\]").expect("valid regex"),
            quoted: Regex::new(r#"['"]([^'"]+)['"]"#).expect("valid regex"),
        }
    }

    /// Slice a source file into class declaration blocks
    ///
    /// A block starts at a `class` header and extends until the first
    /// non-blank line whose indentation returns to the header's level or
    /// less. Nested classes stay inside their parent's block.
    pub fn blocks(&self, source: &str) -> Vec<ClassBlock> {
        let lines: Vec<&str> = source.lines().collect();
        let mut blocks = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let line = lines[i];
            let Some(captures) = self.class_header.captures(line) else {
                i += 1;
                continue;
            };

            let indent = captures.get(1).map(|m| m.as_str().len()).unwrap_or(0);
            let mut block_lines = vec![line];

            let mut j = i + 1;
            while j < lines.len() {
                let next = lines[j];
                if !next.trim().is_empty() && leading_spaces(next) <= indent {
                    break;
                }
                block_lines.push(next);
                j += 1;
            }

            blocks.push(ClassBlock {
                indent,
                header: line.trim().to_string(),
                text: block_lines.join("\n"),
            });
            i = j;
        }

        blocks
    }

    /// Model technical names assigned via `_name` in a block
    pub fn declared_models(&self, block: &str) -> Vec<String> {
        self.model_name
            .captures_iter(block)
            .map(|c| c[1].to_string())
            .collect()
    }

    /// Model technical names referenced via `_inherit`, single or list form
    pub fn inherited_models(&self, block: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .inherit_single
            .captures_iter(block)
            .map(|c| c[1].to_string())
            .collect();

        if let Some(captures) = self.inherit_list.captures(block) {
            names.extend(
                self.quoted
                    .captures_iter(&captures[1])
                    .map(|c| c[1].to_string()),
            );
        }

        names
    }
}

impl Default for ClassScanner {
    fn default() -> Self {
        Self::new()
    }
}

fn leading_spaces(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

/// Names imported from the current package in an `__init__.py`
///
/// Matches `from . import name[, name...]` lines; anything else is ignored.
pub fn package_imports(init_source: &str) -> Vec<String> {
    let pattern = Regex::new(r"^\s*from\s+\.\s+import\s+([\w, ]+)").expect("valid regex");

    let mut names = Vec::new();
    for line in init_source.lines() {
        if let Some(captures) = pattern.captures(line) {
            for name in captures[1].split(',') {
                let name = name.trim();
                if !name.is_empty() {
                    names.push(name.to_string());
                }
            }
        }
    }
    names
}

/// Routes declared through `@http.route` decorators, single-string and
/// list-of-strings forms
pub fn declared_routes(source: &str) -> Vec<String> {
    let single = Regex::new(r#"@http\.route\(\s*['"]([^'"]+)['"]"#).expect("valid regex");
    let list = Regex::new(r"@http\.route\(\s*\[([^\]]+)\]").expect("valid regex");
    let quoted = Regex::new(r#"['"]([^'"]+)['"]"#).expect("valid regex");

    let mut routes: Vec<String> = single
        .captures_iter(source)
        .map(|c| c[1].to_string())
        .collect();

    for captures in list.captures_iter(source) {
        routes.extend(quoted.captures_iter(&captures[1]).map(|c| c[1].to_string()));
    }

    routes
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODEL_SOURCE: &str = r#"from odoo import fields, models


class SaleOrder(models.Model):
    _name = 'sale.order'
    _description = 'Sales Order'

    partner_id = fields.Many2one('res.partner')

    def action_confirm(self):
        return True


class ResPartner(models.Model):
    _inherit = 'res.partner'

    sale_count = fields.Integer()
"#;

    #[test]
    fn test_blocks_are_sliced_by_indentation() {
        let scanner = ClassScanner::new();
        let blocks = scanner.blocks(MODEL_SOURCE);

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].indent, 0);
        assert!(blocks[0].header.starts_with("class SaleOrder"));
        assert!(blocks[0].text.contains("action_confirm"));
        assert!(!blocks[0].text.contains("sale_count"));
        assert!(blocks[1].text.contains("sale_count"));
    }

    #[test]
    fn test_blank_lines_stay_in_block() {
        let scanner = ClassScanner::new();
        let blocks = scanner.blocks(MODEL_SOURCE);
        // The blank line between fields and the method must not end the block
        assert!(blocks[0].text.contains("partner_id"));
        assert!(blocks[0].text.contains("def action_confirm"));
    }

    #[test]
    fn test_declared_and_inherited_models() {
        let scanner = ClassScanner::new();
        let blocks = scanner.blocks(MODEL_SOURCE);

        assert_eq!(scanner.declared_models(&blocks[0].text), vec!["sale.order"]);
        assert!(scanner.inherited_models(&blocks[0].text).is_empty());
        assert_eq!(scanner.inherited_models(&blocks[1].text), vec!["res.partner"]);
    }

    #[test]
    fn test_inherit_list_form() {
        let scanner = ClassScanner::new();
        let block = "class Mixin(models.Model):\n    _inherit = ['mail.thread', 'mail.activity.mixin']";
        assert_eq!(
            scanner.inherited_models(block),
            vec!["mail.thread", "mail.activity.mixin"]
        );
    }

    #[test]
    fn test_package_imports() {
        let init = "from . import sale_order\nfrom . import res_partner, utils\nimport os\n";
        assert_eq!(
            package_imports(init),
            vec!["sale_order", "res_partner", "utils"]
        );
    }

    #[test]
    fn test_declared_routes() {
        let source = r#"
class Shop(http.Controller):
    @http.route('/shop/cart', type='http', auth='public')
    def cart(self):
        pass

    @http.route(['/shop', '/shop/page/<int:page>'], type='http')
    def shop(self, page=0):
        pass
"#;
        let routes = declared_routes(source);
        assert_eq!(routes, vec!["/shop/cart", "/shop", "/shop/page/<int:page>"]);
    }

    #[test]
    fn test_no_classes() {
        let scanner = ClassScanner::new();
        assert!(scanner.blocks("x = 1\n").is_empty());
    }
}
