//! Core graph construction and context extraction

pub mod categories;
pub mod extractor;
pub mod graph_builder;
pub mod po_context;

pub use extractor::{CategoryExtractor, ContextExtractor, ModuleContext};
pub use graph_builder::{GraphBuildResult, GraphBuilder};
pub use po_context::gather_po_context;
