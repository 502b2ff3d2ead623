//! Configuration-related data structures

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Foundation modules that every deployment ships and that are therefore
/// never worth re-extracting
pub const DEFAULT_EXCLUDED_MODULES: [&str; 4] = ["base", "web", "mail", "utm"];

/// Main configuration settings for addonctx
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Ordered addons roots searched when resolving a module name
    pub addons_paths: Vec<PathBuf>,

    /// Modules excluded from extraction; entries may be glob patterns
    pub exclude_modules: Vec<String>,

    /// Maximum dependency depth to traverse (unbounded when absent)
    pub max_depth: Option<usize>,

    /// Output format (text, json, csv)
    pub output_format: OutputFormat,

    /// Output file path (if not specified, output to stdout)
    pub output_file: Option<PathBuf>,

    /// Whether to suppress non-essential output
    pub quiet: bool,

    /// Whether to show detailed progress and debug information
    pub verbose: bool,

    /// Whether to use colors in text output
    pub use_colors: bool,

    /// Whether to show progress bars
    pub show_progress: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            addons_paths: vec![PathBuf::from(".")],
            exclude_modules: DEFAULT_EXCLUDED_MODULES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_depth: None,
            output_format: OutputFormat::Text,
            output_file: None,
            quiet: false,
            verbose: false,
            use_colors: true,
            show_progress: true,
        }
    }
}

/// Supported output formats
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// CSV artifact listing for spreadsheet analysis
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Partial settings for configuration merging
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartialSettings {
    pub addons_paths: Option<Vec<PathBuf>>,
    pub exclude_modules: Option<Vec<String>>,
    pub max_depth: Option<usize>,
    pub output_format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub quiet: Option<bool>,
    pub verbose: Option<bool>,
    pub use_colors: Option<bool>,
    pub show_progress: Option<bool>,
}

impl PartialSettings {
    /// Merge another PartialSettings into this one
    /// Fields from `other` take precedence over existing fields
    pub fn merge_from(&mut self, other: PartialSettings) {
        if other.addons_paths.is_some() {
            self.addons_paths = other.addons_paths;
        }
        if other.exclude_modules.is_some() {
            self.exclude_modules = other.exclude_modules;
        }
        if other.max_depth.is_some() {
            self.max_depth = other.max_depth;
        }
        if other.output_format.is_some() {
            self.output_format = other.output_format;
        }
        if other.output_file.is_some() {
            self.output_file = other.output_file;
        }
        if other.quiet.is_some() {
            self.quiet = other.quiet;
        }
        if other.verbose.is_some() {
            self.verbose = other.verbose;
        }
        if other.use_colors.is_some() {
            self.use_colors = other.use_colors;
        }
        if other.show_progress.is_some() {
            self.show_progress = other.show_progress;
        }
    }

    /// Convert partial settings to full settings
    /// Uses defaults for any fields that are None
    pub fn to_settings(&self) -> Settings {
        let mut settings = Settings::default();

        if let Some(addons_paths) = &self.addons_paths {
            settings.addons_paths = addons_paths.clone();
        }
        if let Some(exclude_modules) = &self.exclude_modules {
            settings.exclude_modules = exclude_modules.clone();
        }
        if let Some(max_depth) = self.max_depth {
            settings.max_depth = Some(max_depth);
        }
        if let Some(output_format) = &self.output_format {
            settings.output_format = output_format.clone();
        }
        if let Some(output_file) = &self.output_file {
            settings.output_file = Some(output_file.clone());
        }
        if let Some(quiet) = self.quiet {
            settings.quiet = quiet;
        }
        if let Some(verbose) = self.verbose {
            settings.verbose = verbose;
        }
        if let Some(use_colors) = self.use_colors {
            settings.use_colors = use_colors;
        }
        if let Some(show_progress) = self.show_progress {
            settings.show_progress = show_progress;
        }

        settings
    }
}
