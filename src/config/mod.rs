//! Configuration management

pub mod cli;
pub mod file;
pub mod parser;
pub mod settings;
#[cfg(test)]
pub mod tests;

use crate::error::Result;
use crate::models::config::{PartialSettings, Settings};

pub use cli::CliConfig;
pub use file::{EnvConfig, FileConfig};
pub use parser::{create_default_config, find_default_config, parse_config_content, parse_config_file};
pub use settings::SettingsValidator;

/// Trait for configuration sources
pub trait ConfigSource {
    /// Load configuration from this source
    fn load(&self) -> Result<PartialSettings>;

    /// Check if this configuration source is available
    fn is_available(&self) -> bool;

    /// Get the name of this configuration source for logging
    fn name(&self) -> &str;

    /// Get the priority of this source (higher numbers take precedence)
    fn priority(&self) -> u8 {
        10 // Default priority
    }
}

/// Configuration builder for merging multiple sources
pub struct ConfigBuilder {
    partial: PartialSettings,
}

impl ConfigBuilder {
    /// Create a new configuration builder with defaults
    pub fn new() -> Self {
        Self {
            partial: PartialSettings::default(),
        }
    }

    /// Merge settings from a partial configuration
    pub fn merge(mut self, partial: PartialSettings) -> Self {
        self.partial.merge_from(partial);
        self
    }

    /// Load and merge settings from a configuration source
    pub fn load_from<S: ConfigSource>(self, source: &S) -> Result<Self> {
        if source.is_available() {
            match source.load() {
                Ok(partial) => Ok(self.merge(partial)),
                Err(e) => Err(e),
            }
        } else {
            Ok(self)
        }
    }

    /// Try to load from a source, ignoring if not available
    pub fn try_load_from<S: ConfigSource>(self, source: &S) -> Self {
        if source.is_available() {
            match source.load() {
                Ok(partial) => self.merge(partial),
                Err(_) => self,
            }
        } else {
            self
        }
    }

    /// Add configuration from a file
    pub fn add_config_file(self, path: &std::path::Path) -> Result<Self> {
        let file_config = FileConfig::with_path(path.to_path_buf());
        self.load_from(&file_config)
    }

    /// Try to add configuration from the default config file
    pub fn try_add_default_config_file(self) -> Self {
        if let Ok(Some(default_config)) = parser::find_default_config() {
            self.merge(default_config)
        } else {
            self
        }
    }

    /// Build the final settings with validation
    pub fn build(self) -> Result<Settings> {
        // Convert partial settings to full settings
        let settings = self.partial.to_settings();

        // Validate settings
        settings::SettingsValidator::validate(&settings)?;

        Ok(settings)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Load configuration from multiple sources with proper precedence handling
///
/// Precedence: defaults < config file < environment < CLI.
pub fn load_config(cli_config: &CliConfig) -> Result<Settings> {
    let mut builder = ConfigBuilder::new();

    // Config file: an explicitly given path must load; otherwise fall back to
    // the default locations when present
    if let Some(config_path) = cli_config.config_path() {
        builder = builder.add_config_file(config_path)?;
    } else {
        builder = builder.try_add_default_config_file();
    }

    // Environment variables
    let env_config = EnvConfig::new("ADDONCTX");
    builder = builder.try_load_from(&env_config);

    // CLI args (highest priority)
    builder = builder.load_from(cli_config)?;

    // Build and validate the final settings
    builder.build()
}
