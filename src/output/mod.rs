//! Output formatting and writing functionality

mod formatters;
mod progress;
mod writers;

pub use self::formatters::format_dependency_tree;
pub use self::progress::ProgressReporter;
pub use self::writers::{create_writer, FileWriter, OutputWriter, StdoutWriter};

use crate::error::Result;
use crate::models::bundle::{BundleSummary, ContextBundle};
use crate::models::dependency_graph::{GraphStatistics, InstallOrder};
use serde::Serialize;

/// Everything a formatter needs about one extraction run
#[derive(Debug, Clone, Serialize)]
pub struct ContextReport {
    /// The seed modules the run started from
    pub seeds: Vec<String>,
    /// The computed processing order
    pub order: InstallOrder,
    /// Graph counters for display
    pub statistics: GraphStatistics,
    /// The extracted artifacts
    pub bundle: ContextBundle,
    /// Per-module, per-category counters
    pub summary: BundleSummary,
}

impl ContextReport {
    /// Assemble a report from an order and a bundle
    pub fn new(
        seeds: Vec<String>,
        order: InstallOrder,
        statistics: GraphStatistics,
        bundle: ContextBundle,
    ) -> Self {
        let summary = bundle.summary();
        Self {
            seeds,
            order,
            statistics,
            bundle,
            summary,
        }
    }
}

/// Trait for different output formatters
pub trait Formatter {
    /// Format an extraction report into a string
    fn format(&self, report: &ContextReport) -> Result<String>;
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    pub use_colors: bool,
    pub verbose: bool,
    pub quiet: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(use_colors: bool, verbose: bool, quiet: bool) -> Self {
        Self {
            use_colors,
            verbose,
            quiet,
        }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, report: &ContextReport) -> Result<String> {
        // In quiet mode, only output the essential totals
        if self.quiet {
            let mut output = String::new();
            output.push_str(&format!(
                "Modules: {}, Artifacts: {}, Lines: {}\n",
                report.order.modules.len(),
                report.summary.total_items,
                report.summary.total_lines,
            ));
            if report.order.has_cycle {
                output.push_str("Circular dependency detected\n");
            }
            return Ok(output);
        }

        Ok(formatters::format_report_text(
            report,
            self.use_colors,
            self.verbose,
        ))
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, report: &ContextReport) -> Result<String> {
        formatters::format_report_json(report)
    }
}

/// CSV formatter listing artifacts for spreadsheet analysis
pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, report: &ContextReport) -> Result<String> {
        formatters::format_report_csv(report)
    }
}

/// Create a formatter based on the output format
pub fn create_formatter(
    format: &crate::models::config::OutputFormat,
    use_colors: bool,
    verbose: bool,
    quiet: bool,
) -> Box<dyn Formatter> {
    match format {
        crate::models::config::OutputFormat::Text => {
            Box::new(TextFormatter::new(use_colors, verbose, quiet))
        }
        crate::models::config::OutputFormat::Json => Box::new(JsonFormatter),
        crate::models::config::OutputFormat::Csv => Box::new(CsvFormatter),
    }
}
