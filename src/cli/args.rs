//! Command-line argument parsing

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// addonctx - Odoo addon dependency graph and context extraction tool
#[derive(Parser, Debug, Clone)]
#[command(name = "addonctx")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Build addon dependency graphs and extract task-relevant context")]
#[command(long_about = "addonctx locates addon modules across multiple addons roots, rebuilds their \
declared dependency graph from manifests, and slices the relevant fragments of models, views, \
controllers, assets, security and data files into an ordered context bundle for downstream \
consumption (e.g. a reasoning service).")]
#[command(after_help = "EXAMPLES:

Basic Usage:
    # Extract context for a module and its direct dependencies
    addonctx sale --addons-path ./odoo/addons --analysis analysis.json

    # Search several roots in order (first match wins)
    addonctx sale --addons-path ./enterprise --addons-path ./odoo/addons

    # Traverse the full dependency chain instead of one level
    addonctx sale --depth 0 --analysis analysis.json

Dependency Tree:
    # Print the dependency tree and installation order only
    addonctx sale crm --tree

Extraction Control:
    # Force-include a module under active development
    addonctx sale --analysis analysis.json --override-module my_sale_custom

    # Skip localization modules on top of the default exclusions
    addonctx sale --exclude-module base --exclude-module 'l10n_*'

Translation Files:
    # Gather the source files referenced by a PO file
    addonctx --po ./fr.po --addons-path ./odoo/addons

Output Options:
    # Machine-readable bundle for the prompt builder
    addonctx sale --analysis analysis.json --output json --output-file context.json

    # CSV artifact listing for spreadsheet analysis
    addonctx sale --analysis analysis.json --output csv

Configuration:
    # Use a specific configuration file
    addonctx sale --config ./addonctx.toml

    # Create a default configuration file
    addonctx --init
")]
pub struct Args {
    /// Seed module names to build the dependency graph from
    #[arg(value_name = "MODULE", help = "Seed module names to build the dependency graph from")]
    pub modules: Vec<String>,

    /// Addons roots to search, in order
    #[arg(short = 'p', long = "addons-path", value_name = "PATH", help = "Addons root to search (can be specified multiple times; searched in order, first match wins)")]
    pub addons_path: Vec<PathBuf>,

    /// Maximum dependency depth to traverse
    #[arg(short, long, value_name = "DEPTH", help = "Maximum dependency depth to traverse (0 for unbounded, default 1)")]
    pub depth: Option<usize>,

    /// Analysis specification file (JSON)
    #[arg(short, long, value_name = "FILE", help = "JSON analysis specification naming the models, views, routes, assets, reports and templates of interest")]
    pub analysis: Option<PathBuf>,

    /// Module under active development, force-included in model extraction
    #[arg(long, value_name = "MODULE", help = "Module under active development; its model files are included verbatim when the analysis requests no specific models")]
    pub override_module: Option<String>,

    /// Modules to exclude from extraction (may be glob patterns)
    #[arg(long = "exclude-module", value_name = "MODULE", help = "Module to exclude from extraction (can be specified multiple times; glob patterns allowed; replaces the default foundation set)")]
    pub exclude_module: Vec<String>,

    /// Print the dependency tree and installation order, then exit
    #[arg(short, long, help = "Print the dependency tree and installation order without extracting context")]
    pub tree: bool,

    /// Gather context from a PO translation file instead of an analysis
    #[arg(long, value_name = "FILE", help = "PO file whose source references should be gathered into the bundle")]
    pub po: Option<PathBuf>,

    /// Output format (text, json, csv)
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, help = "Output format: 'text' for a human-readable summary, 'json' for the full bundle, 'csv' for an artifact listing")]
    pub output: OutputFormat,

    /// Output file path (stdout if not specified)
    #[arg(long, value_name = "FILE", help = "File to write output to (uses stdout if not specified)")]
    pub output_file: Option<PathBuf>,

    /// Suppress non-essential output
    #[arg(short, long, help = "Suppress non-essential output (only show results, no progress or summary information)")]
    pub quiet: bool,

    /// Show detailed progress and debug information
    #[arg(short, long, help = "Show detailed progress and debug information")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, help = "Disable colored output (useful for terminals without ANSI support or for piping output)")]
    pub no_colors: bool,

    /// Disable progress bars
    #[arg(long, help = "Disable progress bars (useful for CI environments or when redirecting output)")]
    pub no_progress: bool,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", help = "Path to configuration file (defaults to .addonctx.toml in current directory if not specified)")]
    pub config: Option<PathBuf>,

    /// Initialize a default configuration file
    #[arg(long, help = "Create a default configuration file (.addonctx.toml) in the current directory")]
    pub init: bool,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// CSV artifact listing
    Csv,
}

impl From<OutputFormat> for crate::models::config::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => crate::models::config::OutputFormat::Text,
            OutputFormat::Json => crate::models::config::OutputFormat::Json,
            OutputFormat::Csv => crate::models::config::OutputFormat::Csv,
        }
    }
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }

    /// The requested traversal depth, with 0 meaning unbounded
    ///
    /// The CLI exposes 0 as "follow the whole chain" because an unbounded
    /// traversal is easier to ask for that way; internally the builder takes
    /// None for unbounded.
    pub fn effective_depth(&self, configured: Option<usize>) -> Option<usize> {
        match self.depth.or(configured) {
            Some(0) => None,
            Some(depth) => Some(depth),
            None => Some(1),
        }
    }
}
