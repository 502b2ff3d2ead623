//! Command-line interface

pub mod args;
pub mod commands;

pub use args::{Args, OutputFormat};
pub use commands::Command;
