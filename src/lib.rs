//! addonctx - addon dependency graphs and selective context extraction
//!
//! This library locates addon modules across multiple addons roots, rebuilds
//! their declared dependency graph from manifest files, computes a
//! cycle-tolerant installation order, and slices the task-relevant fragments
//! of models, views, controllers, assets, security and data files into an
//! ordered context bundle.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod output;
pub mod parsers;
pub mod utils;

// Re-export commonly used types
pub use crate::core::{gather_po_context, ContextExtractor, GraphBuilder};
pub use error::{handle_error, try_with_recovery, ContextError, ErrorSeverity, OptionExt, Result, ResultExt};
pub use models::{
    analysis::AnalysisSpec,
    bundle::{Artifact, Category, ContextBundle},
    config::Settings,
    dependency_graph::{InstallOrder, ModuleGraph},
    module::{AddonModule, ManifestDetails},
};
pub use utils::AddonResolver;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
