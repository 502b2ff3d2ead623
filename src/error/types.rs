//! Error types and definitions for addonctx
//!
//! This module provides the error handling system for the application,
//! including error types, severity levels and a result alias.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Error severity levels for different error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Warning level errors - operation can continue
    Warning,
    /// Error level - current operation fails but overall process can continue
    Error,
    /// Critical level - process should terminate
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "WARNING"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Main error type for addonctx operations
#[derive(Debug, Error)]
pub enum ContextError {
    /// Standard IO errors
    #[error("IO error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },

    /// Manifest literal parsing errors with file context
    #[error("Manifest parsing error in {path}: {message}")]
    ManifestParse { path: PathBuf, message: String },

    /// JSON parsing errors with file context
    #[error("JSON parsing error in {file}: {source}")]
    JsonParse {
        file: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// XML parsing errors with file context
    #[error("XML parsing error in {file}: {source}")]
    XmlParse {
        file: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Configuration file not found
    #[error("Configuration file not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file read errors
    #[error("Error reading configuration file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file parse errors
    #[error("Error parsing configuration file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Permission denied errors
    #[error("Permission denied accessing {path}")]
    PermissionDenied { path: PathBuf },

    /// Invalid path errors
    #[error("Invalid path: {path}")]
    InvalidPath { path: PathBuf },

    /// Module not found in any addons root
    #[error("Module '{name}' not found in any addons path")]
    ModuleNotFound { name: String },

    /// Glob pattern errors
    #[error("Glob pattern error: {source}")]
    GlobPattern {
        #[source]
        source: glob::PatternError,
    },

    /// Invalid output format
    #[error("Invalid output format: {format}")]
    InvalidOutputFormat { format: String },

    /// Output file write errors
    #[error("Error writing to output file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stdout write errors
    #[error("Error writing to stdout: {source}")]
    StdoutWrite {
        #[source]
        source: std::io::Error,
    },

    /// Context extraction errors
    #[error("Context extraction error: {message}")]
    Extraction { message: String },

    /// JSON serialization error
    #[error("JSON serialization error: {source}")]
    JsonSerialize {
        #[source]
        source: serde_json::Error,
    },

    /// CSV handling errors
    #[error("CSV error: {source}")]
    Csv {
        #[source]
        source: csv::Error,
    },

    /// CSV serialization error
    #[error("CSV serialization error: {source}")]
    CsvSerialize {
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// Output directory not found
    #[error("Output directory not found: {path}")]
    OutputDirectoryNotFound { path: PathBuf },
}

impl ContextError {
    /// Get the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Warning level errors - operation can continue
            ContextError::PermissionDenied { .. } => ErrorSeverity::Warning,
            ContextError::ManifestParse { .. } => ErrorSeverity::Warning,
            ContextError::XmlParse { .. } => ErrorSeverity::Warning,
            ContextError::ModuleNotFound { .. } => ErrorSeverity::Warning,

            // Critical errors - process should terminate
            ContextError::Config { .. } => ErrorSeverity::Critical,
            ContextError::ConfigNotFound { .. } => ErrorSeverity::Critical,
            ContextError::ConfigRead { .. } => ErrorSeverity::Critical,
            ContextError::ConfigParse { .. } => ErrorSeverity::Critical,
            ContextError::InvalidOutputFormat { .. } => ErrorSeverity::Critical,
            ContextError::StdoutWrite { .. } => ErrorSeverity::Critical,
            ContextError::OutputDirectoryNotFound { .. } => ErrorSeverity::Critical,

            // Regular errors - current operation fails but overall process can continue
            _ => ErrorSeverity::Error,
        }
    }

    /// Check if this is a critical error that should terminate the process
    pub fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            ContextError::PermissionDenied { path } => {
                format!("Cannot access '{}' due to permission denied. Check file permissions.", path.display())
            }
            ContextError::ManifestParse { path, message } => {
                format!("Malformed manifest '{}': {}. The module is treated as having no dependencies.", path.display(), message)
            }
            ContextError::JsonParse { file, source } => {
                format!("Invalid JSON in '{}': {}. Please check the file format.", file.display(), source)
            }
            ContextError::XmlParse { file, source } => {
                format!("Invalid XML in '{}': {}. The file is skipped.", file.display(), source)
            }
            ContextError::Io { source } => {
                format!("File system error: {}. Check disk space and permissions.", source)
            }
            ContextError::InvalidPath { path } => {
                format!("Invalid path: '{}'. Please provide a valid directory path.", path.display())
            }
            ContextError::ConfigNotFound { path } => {
                format!("Configuration file not found at '{}'. Create a config file or use command line options.", path.display())
            }
            ContextError::ModuleNotFound { name } => {
                format!("Module '{}' was not found in any of the configured addons paths.", name)
            }
            ContextError::OutputDirectoryNotFound { path } => {
                format!("Output directory '{}' does not exist. Please create the directory or specify a different output path.", path.display())
            }
            // For other errors, use the standard Display implementation
            _ => self.to_string(),
        }
    }

    /// Get a suggestion for resolving this error, when one applies
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            ContextError::InvalidPath { .. } => {
                Some("Check that the path exists and is accessible")
            }
            ContextError::ConfigNotFound { .. } => {
                Some("Create a .addonctx.toml file in your project directory or specify a config file with --config")
            }
            ContextError::PermissionDenied { .. } => {
                Some("Try running with elevated permissions or check file permissions")
            }
            ContextError::ModuleNotFound { .. } => {
                Some("Add the repository containing the module with --addons-path")
            }
            ContextError::OutputDirectoryNotFound { .. } => {
                Some("Create the output directory first or specify a different path")
            }
            _ => None,
        }
    }

    /// Create an IO error with context
    pub fn io_error(source: std::io::Error) -> Self {
        ContextError::Io { source }
    }

    /// Create a manifest parse error with file context
    pub fn manifest_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ContextError::ManifestParse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a JSON parse error with file context
    pub fn json_parse_error(file: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        ContextError::JsonParse {
            file: file.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        ContextError::Config {
            message: message.into(),
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        ContextError::PermissionDenied { path: path.into() }
    }

    /// Create a context extraction error
    pub fn extraction_error(message: impl Into<String>) -> Self {
        ContextError::Extraction {
            message: message.into(),
        }
    }
}

// Implement From for common error types
impl From<std::io::Error> for ContextError {
    fn from(err: std::io::Error) -> Self {
        ContextError::io_error(err)
    }
}

impl From<csv::Error> for ContextError {
    fn from(err: csv::Error) -> Self {
        ContextError::Csv { source: err }
    }
}

impl From<glob::PatternError> for ContextError {
    fn from(err: glob::PatternError) -> Self {
        ContextError::GlobPattern { source: err }
    }
}

impl From<serde_json::Error> for ContextError {
    fn from(err: serde_json::Error) -> Self {
        ContextError::JsonSerialize { source: err }
    }
}

/// Result type alias for addonctx operations
pub type Result<T> = std::result::Result<T, ContextError>;
