//! Manifest file parsing
//!
//! An addon manifest is a Python file expected to contain exactly one
//! dictionary-shaped literal. The reader parses that literal structure
//! directly, without ever executing code: strings (including triple-quoted
//! and implicitly concatenated ones), numbers, booleans, None, lists, tuples
//! and nested dictionaries. Anything else inside the literal makes the read
//! fail gracefully.

use crate::error::{ContextError, Result};
use crate::models::module::ManifestDetails;
use serde_json::{Map, Number, Value};
use std::fs;
use std::path::Path;
use tracing::warn;

/// Reader for addon manifest files
pub struct ManifestReader;

impl ManifestReader {
    /// Read and parse a manifest file
    ///
    /// Returns None when the file is missing, unreadable or does not contain
    /// a parseable literal mapping; the cause is logged as a warning and
    /// never propagated.
    pub fn read(path: &Path) -> Option<ManifestDetails> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                warn!("Could not read manifest {}: {}", path.display(), err);
                return None;
            }
        };

        match Self::parse(&content, path) {
            Ok(value) => Some(ManifestDetails::from_value(value)),
            Err(err) => {
                warn!("{}", err.user_message());
                None
            }
        }
    }

    /// Parse manifest content into its literal mapping
    pub fn parse(content: &str, path: &Path) -> Result<Value> {
        let mut parser = LiteralParser::new(content);
        parser.skip_trivia();

        if parser.peek() != Some('{') {
            return Err(ContextError::manifest_parse_error(
                path,
                "expected a dictionary literal",
            ));
        }

        parser
            .parse_value()
            .map_err(|message| ContextError::manifest_parse_error(path, message))
    }
}

/// Recursive-descent parser over a Python literal expression
///
/// Errors are plain strings with a line number; the caller wraps them with
/// file context.
struct LiteralParser {
    chars: Vec<char>,
    pos: usize,
}

type ParseResult<T> = std::result::Result<T, String>;

impl LiteralParser {
    fn new(content: &str) -> Self {
        Self {
            chars: content.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn line(&self) -> usize {
        self.chars[..self.pos.min(self.chars.len())]
            .iter()
            .filter(|c| **c == '\n')
            .count()
            + 1
    }

    fn error(&self, message: impl Into<String>) -> String {
        format!("{} (line {})", message.into(), self.line())
    }

    /// Skip whitespace, comments and line continuations
    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.pos += 1;
                }
                Some('#') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.pos += 1;
                    }
                }
                Some('\\') if self.chars.get(self.pos + 1) == Some(&'\n') => {
                    self.pos += 2;
                }
                _ => break,
            }
        }
    }

    fn parse_value(&mut self) -> ParseResult<Value> {
        self.skip_trivia();

        match self.peek() {
            Some('{') => self.parse_dict(),
            Some('[') => self.parse_sequence(']'),
            Some('(') => self.parse_sequence(')'),
            Some('\'') | Some('"') => self.parse_string_group().map(Value::String),
            // Prefixed string forms like r'...' or b"..."
            Some(c)
                if is_string_prefix(c)
                    && matches!(self.chars.get(self.pos + 1), Some('\'') | Some('"')) =>
            {
                self.parse_string_group().map(Value::String)
            }
            Some(c) if c.is_ascii_digit() || c == '-' || c == '+' || c == '.' => {
                self.parse_number()
            }
            Some(c) if c.is_alphabetic() || c == '_' => self.parse_word(),
            Some(c) => Err(self.error(format!("unexpected character '{}'", c))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn parse_dict(&mut self) -> ParseResult<Value> {
        self.bump(); // consume '{'
        let mut map = Map::new();

        loop {
            self.skip_trivia();
            if self.peek() == Some('}') {
                self.bump();
                return Ok(Value::Object(map));
            }

            let key = match self.parse_value()? {
                Value::String(s) => s,
                other => {
                    return Err(self.error(format!("unsupported dictionary key: {}", other)))
                }
            };

            self.skip_trivia();
            if self.bump() != Some(':') {
                return Err(self.error("expected ':' after dictionary key"));
            }

            let value = self.parse_value()?;
            map.insert(key, value);

            self.skip_trivia();
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some('}') => {}
                _ => return Err(self.error("expected ',' or '}' in dictionary")),
            }
        }
    }

    fn parse_sequence(&mut self, close: char) -> ParseResult<Value> {
        self.bump(); // consume '[' or '('
        let mut items = Vec::new();

        loop {
            self.skip_trivia();
            if self.peek() == Some(close) {
                self.bump();
                return Ok(Value::Array(items));
            }

            items.push(self.parse_value()?);

            self.skip_trivia();
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some(c) if c == close => {}
                _ => return Err(self.error(format!("expected ',' or '{}' in sequence", close))),
            }
        }
    }

    /// Parse one or more adjacent string literals, concatenated
    fn parse_string_group(&mut self) -> ParseResult<String> {
        let mut result = self.parse_string()?;

        loop {
            let checkpoint = self.pos;
            self.skip_trivia();

            let has_prefix = matches!(self.peek(), Some(c) if is_string_prefix(c))
                && matches!(self.chars.get(self.pos + 1), Some('\'') | Some('"'));
            let at_quote = matches!(self.peek(), Some('\'') | Some('"'));

            if at_quote || has_prefix {
                result.push_str(&self.parse_string()?);
            } else {
                self.pos = checkpoint;
                return Ok(result);
            }
        }
    }

    fn parse_string(&mut self) -> ParseResult<String> {
        let mut raw = false;
        while let Some(c) = self.peek() {
            if is_string_prefix(c) {
                if c == 'r' || c == 'R' {
                    raw = true;
                }
                if c == 'f' || c == 'F' {
                    return Err(self.error("f-strings are not literal values"));
                }
                self.bump();
            } else {
                break;
            }
        }

        let quote = match self.bump() {
            Some(c @ ('\'' | '"')) => c,
            _ => return Err(self.error("expected string quote")),
        };

        // Triple-quoted form
        let triple = self.peek() == Some(quote) && self.chars.get(self.pos + 1) == Some(&quote);
        if triple {
            self.pos += 2;
        }

        let mut value = String::new();
        loop {
            let c = match self.bump() {
                Some(c) => c,
                None => return Err(self.error("unterminated string literal")),
            };

            if c == quote {
                if !triple {
                    return Ok(value);
                }
                if self.peek() == Some(quote) && self.chars.get(self.pos + 1) == Some(&quote) {
                    self.pos += 2;
                    return Ok(value);
                }
                value.push(c);
            } else if c == '\\' && !raw {
                match self.bump() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some('r') => value.push('\r'),
                    Some('0') => value.push('\0'),
                    Some('\n') => {}
                    Some(other) => value.push(other),
                    None => return Err(self.error("unterminated string literal")),
                }
            } else {
                value.push(c);
            }
        }
    }

    fn parse_number(&mut self) -> ParseResult<Value> {
        let start = self.pos;

        if matches!(self.peek(), Some('-') | Some('+')) {
            self.bump();
        }
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || c == '.' || c == '_' || c == 'e' || c == 'E' {
                self.bump();
            } else if (c == '-' || c == '+')
                && matches!(self.chars.get(self.pos - 1), Some('e') | Some('E'))
            {
                self.bump();
            } else {
                break;
            }
        }

        let text: String = self.chars[start..self.pos]
            .iter()
            .filter(|c| **c != '_')
            .collect();

        if let Ok(int) = text.parse::<i64>() {
            return Ok(Value::Number(Number::from(int)));
        }
        if let Ok(float) = text.parse::<f64>() {
            if let Some(number) = Number::from_f64(float) {
                return Ok(Value::Number(number));
            }
        }

        Err(self.error(format!("invalid number literal '{}'", text)))
    }

    fn parse_word(&mut self) -> ParseResult<Value> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                self.bump();
            } else {
                break;
            }
        }

        let word: String = self.chars[start..self.pos].iter().collect();
        match word.as_str() {
            "True" => Ok(Value::Bool(true)),
            "False" => Ok(Value::Bool(false)),
            "None" => Ok(Value::Null),
            _ => Err(self.error(format!("non-literal expression '{}'", word))),
        }
    }
}

fn is_string_prefix(c: char) -> bool {
    matches!(c, 'r' | 'R' | 'b' | 'B' | 'u' | 'U' | 'f' | 'F')
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;

    fn parse(content: &str) -> Result<Value> {
        ManifestReader::parse(content, &PathBuf::from("__manifest__.py"))
    }

    #[test]
    fn test_parse_typical_manifest() {
        let content = r#"
# -*- coding: utf-8 -*-
{
    'name': 'Sales',
    'version': '17.0.1.2',
    'depends': ['base', 'mail'],
    'installable': True,
    'application': False,
    'license': None,
    'sequence': 15,
    'data': [
        'security/ir.model.access.csv',
        'views/sale_views.xml',
    ],
}
"#;

        let value = parse(content).unwrap();
        assert_eq!(value["name"], json!("Sales"));
        assert_eq!(value["depends"], json!(["base", "mail"]));
        assert_eq!(value["installable"], json!(true));
        assert_eq!(value["license"], json!(null));
        assert_eq!(value["sequence"], json!(15));
    }

    #[test]
    fn test_parse_nested_dict_and_tuple() {
        let content = r#"
{
    "assets": {
        "web.assets_backend": (
            "static/src/js/widget.js",
            "static/src/scss/widget.scss",
        ),
    },
    "price": -3.5,
}
"#;

        let value = parse(content).unwrap();
        assert_eq!(
            value["assets"]["web.assets_backend"],
            json!(["static/src/js/widget.js", "static/src/scss/widget.scss"])
        );
        assert_eq!(value["price"], json!(-3.5));
    }

    #[test]
    fn test_parse_string_forms() {
        let content = r#"
{
    'summary': """Multi
line""",
    'description': 'part one ' 'part two',
    'path': r'static\src',
    'escaped': 'tab\there',
}
"#;

        let value = parse(content).unwrap();
        assert_eq!(value["summary"], json!("Multi\nline"));
        assert_eq!(value["description"], json!("part one part two"));
        assert_eq!(value["path"], json!("static\\src"));
        assert_eq!(value["escaped"], json!("tab\there"));
    }

    #[test]
    fn test_non_literal_expression_fails_gracefully() {
        let content = "{'name': get_name()}";
        let err = parse(content).unwrap_err();
        assert!(err.to_string().contains("non-literal"));
    }

    #[test]
    fn test_missing_dict_fails() {
        assert!(parse("import os").is_err());
        assert!(parse("").is_err());
    }

    #[test]
    fn test_syntax_error_fails_gracefully() {
        assert!(parse("{'name': 'Sales'").is_err());
        assert!(parse("{'name' 'Sales'}").is_err());
        assert!(parse("{'name': 'Sales',, }").is_err());
    }

    #[test]
    fn test_read_missing_file_returns_none() {
        assert!(ManifestReader::read(&PathBuf::from("/nonexistent/__manifest__.py")).is_none());
    }

    #[test]
    fn test_read_parses_details() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("__manifest__.py");
        std::fs::write(&path, "{'name': 'CRM', 'depends': ['base']}").unwrap();

        let details = ManifestReader::read(&path).unwrap();
        assert_eq!(details.name.as_deref(), Some("CRM"));
        assert_eq!(details.depends, vec!["base"]);
    }
}
