//! Configuration file parsing utilities

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ContextError, Result};
use crate::models::config::PartialSettings;

/// Parse a TOML configuration file into PartialSettings
pub fn parse_config_file<P: AsRef<Path>>(path: P) -> Result<PartialSettings> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ContextError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| ContextError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_config_content(&content, path)
}

/// Parse TOML configuration content into PartialSettings
pub fn parse_config_content<P: AsRef<Path>>(content: &str, path: P) -> Result<PartialSettings> {
    let path = path.as_ref();

    // Parse the TOML content
    let settings: PartialSettings =
        toml::from_str(content).map_err(|e| ContextError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;

    // Validate the parsed settings
    validate_partial_settings(&settings, path)?;

    Ok(settings)
}

/// Validate partial settings for obvious errors
pub fn validate_partial_settings<P: AsRef<Path>>(
    settings: &PartialSettings,
    path: P,
) -> Result<()> {
    let path = path.as_ref();

    // Validate addons paths if specified
    if let Some(addons_paths) = &settings.addons_paths {
        if addons_paths.is_empty() {
            return Err(ContextError::Config {
                message: format!("Empty addons_paths in config file: {}", path.display()),
            });
        }
        for addons_path in addons_paths {
            if addons_path.as_os_str().is_empty() {
                return Err(ContextError::Config {
                    message: format!("Empty addons path entry in config file: {}", path.display()),
                });
            }
        }
    }

    // Validate exclusion entries if specified
    if let Some(patterns) = &settings.exclude_modules {
        for pattern in patterns {
            if pattern.is_empty() {
                return Err(ContextError::Config {
                    message: format!("Empty module exclusion in config file: {}", path.display()),
                });
            }

            // Glob-shaped entries must compile
            if pattern.contains(['*', '?', '[']) {
                glob::Pattern::new(pattern).map_err(|e| ContextError::Config {
                    message: format!(
                        "Invalid module exclusion '{}' in config file: {}: {}",
                        pattern,
                        path.display(),
                        e
                    ),
                })?;
            }
        }
    }

    // Validate max_depth if specified
    if let Some(depth) = settings.max_depth {
        if depth == 0 {
            return Err(ContextError::Config {
                message: format!(
                    "Invalid max_depth 0 in config file: {}. Must be at least 1.",
                    path.display()
                ),
            });
        }
    }

    // Validate output file if specified
    if let Some(output_file) = &settings.output_file {
        if output_file.as_os_str().is_empty() {
            return Err(ContextError::Config {
                message: format!("Invalid empty output_file in config file: {}", path.display()),
            });
        }
    }

    Ok(())
}

/// Find and load configuration from default locations
pub fn find_default_config() -> Result<Option<PartialSettings>> {
    // Check current directory first
    let current_dir_config = PathBuf::from(".addonctx.toml");
    if current_dir_config.exists() {
        return Ok(Some(parse_config_file(current_dir_config)?));
    }

    // Check user home directory next
    if let Some(home_dir) = dirs::home_dir() {
        let home_config = home_dir.join(".addonctx.toml");
        if home_config.exists() {
            return Ok(Some(parse_config_file(home_config)?));
        }
    }

    // Check XDG config directory if available
    if let Some(config_dir) = dirs::config_dir() {
        let xdg_config = config_dir.join("addonctx").join("config.toml");
        if xdg_config.exists() {
            return Ok(Some(parse_config_file(xdg_config)?));
        }
    }

    // No config file found
    Ok(None)
}

/// Create a default configuration file at the specified path
pub fn create_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    // Create parent directories if they don't exist
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(ContextError::io_error)?;
        }
    }

    // Use the embedded default configuration template
    let default_config = include_str!("default_config.toml");

    // Write to file
    fs::write(path, default_config).map_err(ContextError::io_error)?;

    Ok(())
}
