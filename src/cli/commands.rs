//! Command implementations

use super::Args;
use crate::config::{cli::CliConfig, load_config};
use crate::core::{gather_po_context, ContextExtractor, GraphBuilder};
use crate::error::{ContextError, Result};
use crate::models::analysis::AnalysisSpec;
use crate::models::config::Settings;
use crate::output::{
    create_formatter, create_writer, format_dependency_tree, ContextReport, ProgressReporter,
};
use crate::utils::AddonResolver;
use std::fs;

/// Available commands
#[derive(Debug)]
pub enum Command {
    /// Extract context for the seed modules
    Extract(Args),
    /// Print the dependency tree and installation order
    Tree(Args),
    /// Gather context from a PO translation file
    PoContext(Args),
    /// Initialize a default configuration file
    Init,
}

impl Command {
    /// Create a command from parsed arguments
    pub fn from_args(args: Args) -> Self {
        if args.init {
            return Command::Init;
        }
        if args.po.is_some() {
            return Command::PoContext(args);
        }
        if args.tree {
            return Command::Tree(args);
        }
        Command::Extract(args)
    }

    /// Execute the command
    pub fn execute(&self) -> Result<()> {
        self.validate()?;

        match self {
            Command::Extract(args) => execute_extract(args),
            Command::Tree(args) => execute_tree(args),
            Command::PoContext(args) => execute_po_context(args),
            Command::Init => execute_init(),
        }
    }

    /// Validate the command arguments
    pub fn validate(&self) -> Result<()> {
        match self {
            Command::Extract(args) | Command::Tree(args) => {
                if args.modules.is_empty() {
                    return Err(ContextError::config_error(
                        "At least one seed module name is required",
                    ));
                }
                validate_common(args)
            }
            Command::PoContext(args) => {
                if let Some(po) = &args.po {
                    if !po.is_file() {
                        return Err(ContextError::InvalidPath { path: po.clone() });
                    }
                }
                validate_common(args)
            }
            Command::Init => Ok(()),
        }
    }
}

fn validate_common(args: &Args) -> Result<()> {
    for path in &args.addons_path {
        if !path.exists() {
            return Err(ContextError::InvalidPath { path: path.clone() });
        }
    }

    if let Some(config_path) = &args.config {
        if !config_path.exists() {
            return Err(ContextError::ConfigNotFound {
                path: config_path.clone(),
            });
        }
    }

    if let Some(analysis) = &args.analysis {
        if !analysis.is_file() {
            return Err(ContextError::InvalidPath {
                path: analysis.clone(),
            });
        }
    }

    Ok(())
}

fn load_settings(args: &Args) -> Result<Settings> {
    let cli_config = CliConfig::from_args(args);
    load_config(&cli_config)
}

fn execute_extract(args: &Args) -> Result<()> {
    let settings = load_settings(args)?;

    if !settings.quiet {
        println!(
            "{} v{} - addon context extractor",
            crate::NAME,
            crate::VERSION
        );
        println!("Seed modules: {}", args.modules.join(", "));
        if settings.verbose {
            println!("Settings: {:#?}", settings);
        }
    }

    let reporter = ProgressReporter::new(settings.quiet, settings.verbose);
    let spinner = if settings.show_progress {
        reporter.create_spinner("Building dependency graph")
    } else {
        None
    };

    let resolver = AddonResolver::new(settings.addons_paths.clone());
    let builder = GraphBuilder::new(&resolver);
    let build = builder.build(&args.modules, args.effective_depth(settings.max_depth));

    let order = build.graph.install_order();
    if order.has_cycle {
        tracing::error!("Circular dependency detected. Context may be incomplete.");
    }

    if let Some(spinner) = &spinner {
        spinner.set_message("Extracting context");
    }

    let spec = match &args.analysis {
        Some(path) => AnalysisSpec::from_json_file(path)?,
        None => AnalysisSpec::default(),
    };

    let engine = ContextExtractor::with_exclusions(&settings.exclude_modules)
        .with_override(args.override_module.clone());
    let bundle = engine.extract(&order.modules, &build.resolved_paths(), &spec);

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    reporter.print_verbose(&format!("Extracted {} artifact(s)", bundle.len()));

    let report = ContextReport::new(
        args.modules.clone(),
        order,
        build.graph.statistics(),
        bundle,
    );

    write_report(&report, &settings)
}

fn execute_tree(args: &Args) -> Result<()> {
    let settings = load_settings(args)?;

    let resolver = AddonResolver::new(settings.addons_paths.clone());
    let builder = GraphBuilder::new(&resolver);
    let build = builder.build(&args.modules, args.effective_depth(settings.max_depth));

    let tree = format_dependency_tree(&build.graph, &args.modules, settings.use_colors);
    let writer = create_writer(settings.output_file.as_ref());
    writer.write(&tree)
}

fn execute_po_context(args: &Args) -> Result<()> {
    let settings = load_settings(args)?;

    let po_path = args.po.as_ref().expect("validated by Command::validate");
    let po_content = fs::read_to_string(po_path).map_err(ContextError::io_error)?;

    let resolver = AddonResolver::new(settings.addons_paths.clone());
    let bundle = gather_po_context(&po_content, &resolver);

    // A PO run has no graph; report with an empty one
    let graph = crate::models::dependency_graph::ModuleGraph::new();
    let report = ContextReport::new(Vec::new(), graph.install_order(), graph.statistics(), bundle);

    write_report(&report, &settings)
}

fn execute_init() -> Result<()> {
    // Create a default configuration file in the current directory
    let config_path = std::path::PathBuf::from(".addonctx.toml");

    // Check if the file already exists
    if config_path.exists() {
        println!(
            "Configuration file already exists at: {}",
            config_path.display()
        );
        println!("To overwrite it, delete the file first and run this command again.");
        return Ok(());
    }

    crate::config::create_default_config(&config_path)?;

    println!(
        "Created default configuration file at: {}",
        config_path.display()
    );
    println!("\nThe configuration file contains default settings that you can customize.");
    println!("\nExample configuration options:");
    println!("  - addons_paths: Ordered addons roots to search for modules");
    println!("  - exclude_modules: Modules skipped during extraction");
    println!("  - max_depth: Maximum dependency depth to traverse");
    println!("  - output_format: Output format (text, json, csv)");

    Ok(())
}

fn write_report(report: &ContextReport, settings: &Settings) -> Result<()> {
    let formatter = create_formatter(
        &settings.output_format,
        settings.use_colors,
        settings.verbose,
        settings.quiet,
    );
    let output = formatter.format(report)?;

    let writer = create_writer(settings.output_file.as_ref());
    writer.write(&output)
}
