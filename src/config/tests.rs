//! Tests for configuration loading and merging

use super::*;
use crate::models::config::{OutputFormat, PartialSettings, Settings};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_parse_config_file() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("test_config.toml");

    let config_content = r#"
        addons_paths = ["/srv/odoo/addons", "/srv/enterprise"]
        exclude_modules = ["base", "web", "l10n_*"]
        max_depth = 2
        output_format = "json"
        quiet = false
    "#;

    fs::write(&config_path, config_content).unwrap();

    let settings = parse_config_file(&config_path).unwrap();

    assert_eq!(
        settings.addons_paths,
        Some(vec![
            PathBuf::from("/srv/odoo/addons"),
            PathBuf::from("/srv/enterprise")
        ])
    );
    assert_eq!(
        settings.exclude_modules,
        Some(vec![
            "base".to_string(),
            "web".to_string(),
            "l10n_*".to_string()
        ])
    );
    assert_eq!(settings.max_depth, Some(2));
    assert_eq!(settings.output_format, Some(OutputFormat::Json));
}

#[test]
fn test_parse_config_file_missing() {
    let result = parse_config_file("/nonexistent/config.toml");
    assert!(matches!(
        result,
        Err(crate::error::ContextError::ConfigNotFound { .. })
    ));
}

#[test]
fn test_parse_config_content_rejects_bad_values() {
    assert!(parse_config_content("max_depth = 0", "test.toml").is_err());
    assert!(parse_config_content(r#"exclude_modules = [""]"#, "test.toml").is_err());
    assert!(parse_config_content(r#"exclude_modules = ["l10n_["]"#, "test.toml").is_err());
    assert!(parse_config_content("addons_paths = []", "test.toml").is_err());
    assert!(parse_config_content("not valid toml [", "test.toml").is_err());
}

#[test]
fn test_merge_precedence() {
    let file_settings = PartialSettings {
        max_depth: Some(1),
        output_format: Some(OutputFormat::Text),
        quiet: Some(true),
        ..Default::default()
    };

    let cli_settings = PartialSettings {
        max_depth: Some(3),
        ..Default::default()
    };

    let settings = ConfigBuilder::new()
        .merge(file_settings)
        .merge(cli_settings)
        .build()
        .unwrap();

    // CLI value wins where set, file value survives where not
    assert_eq!(settings.max_depth, Some(3));
    assert_eq!(settings.output_format, OutputFormat::Text);
    assert!(settings.quiet);
}

#[test]
fn test_defaults_fill_the_gaps() {
    let settings = ConfigBuilder::new().build().unwrap();

    assert_eq!(settings.addons_paths, vec![PathBuf::from(".")]);
    assert!(settings.exclude_modules.contains(&"base".to_string()));
    assert_eq!(settings.max_depth, None);
    assert_eq!(settings.output_format, OutputFormat::Text);
    assert!(settings.use_colors);
}

#[test]
fn test_validator_rejects_conflicts() {
    let settings = Settings {
        quiet: true,
        verbose: true,
        ..Default::default()
    };
    assert!(SettingsValidator::validate(&settings).is_err());

    let settings = Settings {
        addons_paths: vec![],
        ..Default::default()
    };
    assert!(SettingsValidator::validate(&settings).is_err());

    let settings = Settings {
        exclude_modules: vec!["l10n_[".to_string()],
        ..Default::default()
    };
    assert!(SettingsValidator::validate(&settings).is_err());

    assert!(SettingsValidator::validate(&Settings::default()).is_ok());
}

#[test]
fn test_create_default_config_is_parseable() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("default_config.toml");

    assert!(!config_path.exists());
    create_default_config(&config_path).unwrap();
    assert!(config_path.exists());

    // Parse the created file to ensure it's valid; all entries are commented
    // out, so nothing is set
    let settings = parse_config_file(&config_path).unwrap();
    assert!(settings.addons_paths.is_none());
}

#[test]
fn test_output_format_parsing() {
    assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
    assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
    assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
    assert!("yaml".parse::<OutputFormat>().is_err());
}
