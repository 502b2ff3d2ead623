//! Configuration file handling

use std::path::{Path, PathBuf};

use super::{parser, ConfigSource};
use crate::error::Result;
use crate::models::config::PartialSettings;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = ".addonctx.toml";

/// Configuration file source
pub struct FileConfig {
    path: PathBuf,
    name: String,
    priority: u8,
}

impl FileConfig {
    /// Create a new file configuration source with the default path
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_CONFIG_FILE),
            name: "default config file".to_string(),
            priority: 20, // Higher priority than environment variables but lower than CLI
        }
    }

    /// Create a new file configuration source with a custom path
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            name: format!("config file ({})", path.as_ref().display()),
            priority: 20,
        }
    }

    /// Get the path of this configuration file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create a default configuration file at this location
    pub fn create_default(&self) -> Result<()> {
        parser::create_default_config(&self.path)
    }
}

impl ConfigSource for FileConfig {
    fn load(&self) -> Result<PartialSettings> {
        if !self.is_available() {
            return Err(crate::error::ContextError::ConfigNotFound {
                path: self.path.clone(),
            });
        }

        parser::parse_config_file(&self.path)
    }

    fn is_available(&self) -> bool {
        self.path.exists() && self.path.is_file()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Environment variable configuration source
pub struct EnvConfig {
    prefix: String,
    name: String,
    priority: u8,
}

impl EnvConfig {
    /// Create a new environment variable configuration source
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            name: format!("{} environment variables", &prefix),
            prefix,
            priority: 10, // Lower priority than file config
        }
    }

    fn var(&self, key: &str) -> Option<String> {
        std::env::var(format!("{}_{}", self.prefix, key)).ok()
    }
}

impl ConfigSource for EnvConfig {
    fn load(&self) -> Result<PartialSettings> {
        let mut settings = PartialSettings::default();

        if let Some(paths) = self.var("ADDONS_PATHS") {
            settings.addons_paths = Some(
                paths
                    .split(',')
                    .map(|s| PathBuf::from(s.trim()))
                    .collect(),
            );
        }

        if let Some(exclude) = self.var("EXCLUDE_MODULES") {
            settings.exclude_modules = Some(
                exclude
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .collect(),
            );
        }

        if let Some(max_depth) = self.var("MAX_DEPTH") {
            if let Ok(depth) = max_depth.parse() {
                settings.max_depth = Some(depth);
            }
        }

        if let Some(format) = self.var("OUTPUT_FORMAT") {
            if let Ok(output_format) = format.parse() {
                settings.output_format = Some(output_format);
            }
        }

        Ok(settings)
    }

    fn is_available(&self) -> bool {
        // Check if any relevant environment variables exist
        self.var("ADDONS_PATHS").is_some()
            || self.var("EXCLUDE_MODULES").is_some()
            || self.var("MAX_DEPTH").is_some()
            || self.var("OUTPUT_FORMAT").is_some()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}
