//! Error handling for addonctx

pub mod context;
pub mod types;


pub use context::{handle_error, try_with_recovery, OptionExt, ResultExt};
pub use types::{ContextError, ErrorSeverity, Result};
