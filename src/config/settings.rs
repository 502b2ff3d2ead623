//! Settings validation

use crate::error::{ContextError, Result};
use crate::models::config::Settings;

/// Validator for fully merged settings
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validate settings for internal consistency
    pub fn validate(settings: &Settings) -> Result<()> {
        if settings.addons_paths.is_empty() {
            return Err(ContextError::config_error(
                "At least one addons path is required",
            ));
        }

        for path in &settings.addons_paths {
            if path.as_os_str().is_empty() {
                return Err(ContextError::config_error("Empty addons path entry"));
            }
        }

        if settings.max_depth == Some(0) {
            return Err(ContextError::config_error(
                "max_depth must be at least 1 when set",
            ));
        }

        for pattern in &settings.exclude_modules {
            if pattern.is_empty() {
                return Err(ContextError::config_error("Empty module exclusion entry"));
            }
            if pattern.contains(['*', '?', '[']) {
                glob::Pattern::new(pattern).map_err(|e| {
                    ContextError::config_error(format!(
                        "Invalid module exclusion '{}': {}",
                        pattern, e
                    ))
                })?;
            }
        }

        if settings.quiet && settings.verbose {
            return Err(ContextError::config_error(
                "quiet and verbose are mutually exclusive",
            ));
        }

        Ok(())
    }
}
