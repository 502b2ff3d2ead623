//! Output formatting functionality
//!
//! This module provides formatters for the different output formats and the
//! dependency-tree pretty printer.

use crate::error::{ContextError, Result};
use crate::models::dependency_graph::ModuleGraph;
use crate::output::ContextReport;
use ansi_term::Colour::{Blue, Cyan, Red};
use ansi_term::Style;

/// Format an extraction report as text
pub fn format_report_text(report: &ContextReport, use_colors: bool, verbose: bool) -> String {
    let mut output = String::new();

    // Summary header
    if use_colors {
        output.push_str(&format!("{}\n\n", Blue.bold().paint("Context Extraction Summary")));
    } else {
        output.push_str("Context Extraction Summary\n\n");
    }

    output.push_str(&format!("Seed modules: {}\n", report.seeds.join(", ")));
    output.push_str(&format!("Modules in graph: {}\n", report.statistics.node_count));
    output.push_str(&format!("Dependency edges: {}\n", report.statistics.edge_count));

    if report.order.has_cycle {
        let warning = "Circular dependency detected, processing order is unordered";
        if use_colors {
            output.push_str(&format!("{}\n", Red.bold().paint(warning)));
        } else {
            output.push_str(&format!("{}\n", warning));
        }
    }

    output.push_str(&format!(
        "Artifacts: {} item(s), {} line(s), {} char(s)\n",
        report.summary.total_items, report.summary.total_lines, report.summary.total_chars
    ));

    // Per-module breakdown
    if !report.summary.modules.is_empty() {
        output.push_str("\nPer module:\n");
        for module in &report.summary.modules {
            if use_colors {
                output.push_str(&format!("  {}:\n", Cyan.bold().paint(&module.module)));
            } else {
                output.push_str(&format!("  {}:\n", module.module));
            }
            for category in &module.categories {
                output.push_str(&format!(
                    "    {}: {} item(s), {} line(s), {} char(s)\n",
                    category.category, category.items, category.lines, category.chars
                ));
            }
        }
    }

    // In verbose mode, list every artifact path in bundle order
    if verbose && !report.bundle.is_empty() {
        output.push_str("\nArtifacts:\n");
        for (path, content) in report.bundle.iter() {
            output.push_str(&format!("  {} ({} lines)\n", path, content.lines().count()));
        }
    }

    output
}

/// Format an extraction report as JSON
pub fn format_report_json(report: &ContextReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(|e| ContextError::JsonSerialize { source: e })
}

/// Format an extraction report as a CSV artifact listing
pub fn format_report_csv(report: &ContextReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);

    // Write header row
    writer.write_record(["Path", "Module", "Category", "Lines", "Chars"])?;

    // Write data rows
    for artifact in report.bundle.artifacts() {
        writer.write_record([
            artifact.path.clone(),
            artifact.module.clone(),
            artifact.category.as_str().to_string(),
            artifact.content.lines().count().to_string(),
            artifact.content.chars().count().to_string(),
        ])?;
    }

    // Add summary row with empty cells for non-applicable fields
    writer.write_record([
        "TOTAL".to_string(),
        String::new(),
        String::new(),
        report.summary.total_lines.to_string(),
        report.summary.total_chars.to_string(),
    ])?;

    // Get the CSV data as a string
    let data = writer
        .into_inner()
        .map_err(|e| ContextError::Csv {
            source: e.into_error().into(),
        })?;

    String::from_utf8(data).map_err(|e| ContextError::CsvSerialize { source: e })
}

/// Pretty-print a dependency graph with its installation order
///
/// Lists every module in sorted-by-name order with its direct dependencies,
/// followed by the topological installation order, or an explicit message
/// when a cycle makes ordering impossible.
pub fn format_dependency_tree(graph: &ModuleGraph, seeds: &[String], use_colors: bool) -> String {
    let mut output = String::new();

    let title = format!("Dependency Tree for: {}", seeds.join(", "));
    if use_colors {
        output.push_str(&format!("\n{}\n\n", Style::new().bold().underline().paint(title)));
    } else {
        output.push_str(&format!("\n{}\n\n", title));
    }

    let mut sorted_modules: Vec<&str> = graph.modules().collect();
    sorted_modules.sort_unstable();

    for module in &sorted_modules {
        let mut dependencies = graph.dependencies_of(module);
        if dependencies.is_empty() {
            continue;
        }
        dependencies.sort_unstable();

        if use_colors {
            output.push_str(&format!(
                "  {} -> {}\n",
                Cyan.bold().paint(*module),
                dependencies.join(", ")
            ));
        } else {
            output.push_str(&format!("  {} -> {}\n", module, dependencies.join(", ")));
        }
    }

    let order = graph.install_order();
    if order.has_cycle {
        let message = "Error: Circular dependency detected, cannot determine installation order.";
        if use_colors {
            output.push_str(&format!("\n{}\n", Red.bold().paint(message)));
        } else {
            output.push_str(&format!("\n{}\n", message));
        }
    } else {
        let heading = "Installation Order (Topological Sort):";
        if use_colors {
            output.push_str(&format!(
                "\n{}\n\n",
                Style::new().bold().underline().paint(heading)
            ));
        } else {
            output.push_str(&format!("\n{}\n\n", heading));
        }
        for module in &order.modules {
            output.push_str(&format!("  - {}\n", module));
        }
    }

    output
}
