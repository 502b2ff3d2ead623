//! CLI-backed configuration source

use super::ConfigSource;
use crate::cli::Args;
use crate::error::Result;
use crate::models::config::PartialSettings;
use std::path::Path;

/// Configuration source backed by parsed command-line arguments
pub struct CliConfig {
    args: Args,
}

impl CliConfig {
    /// Create a CLI configuration source from parsed arguments
    pub fn from_args(args: &Args) -> Self {
        Self { args: args.clone() }
    }

    /// Path of an explicitly requested config file, if any
    pub fn config_path(&self) -> Option<&Path> {
        self.args.config.as_deref()
    }

    /// The wrapped arguments
    pub fn args(&self) -> &Args {
        &self.args
    }
}

impl ConfigSource for CliConfig {
    fn load(&self) -> Result<PartialSettings> {
        let mut settings = PartialSettings::default();

        if !self.args.addons_path.is_empty() {
            settings.addons_paths = Some(self.args.addons_path.clone());
        }
        if !self.args.exclude_module.is_empty() {
            settings.exclude_modules = Some(self.args.exclude_module.clone());
        }
        if let Some(depth) = self.args.depth {
            settings.max_depth = Some(depth);
        }
        settings.output_format = Some(self.args.output.into());
        if let Some(output_file) = &self.args.output_file {
            settings.output_file = Some(output_file.clone());
        }

        // Flags only override when actually set, so file and environment
        // settings survive their absence
        if self.args.quiet {
            settings.quiet = Some(true);
        }
        if self.args.verbose {
            settings.verbose = Some(true);
        }
        if self.args.no_colors {
            settings.use_colors = Some(false);
        }
        if self.args.no_progress {
            settings.show_progress = Some(false);
        }

        Ok(settings)
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "command line arguments"
    }

    fn priority(&self) -> u8 {
        30 // Highest priority
    }
}
