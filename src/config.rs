//! Configuration file support for npm-sbom.
//!
//! Provides YAML-based configuration through `npm-sbom.config.yml` files,
//! including data structures, file loading, validation and merging with
//! command-line flags.

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::cli::Args;
use npm_sbom::application::dto::OutputFormat;
use npm_sbom::shared::error::SbomError;
use npm_sbom::shared::Result;

pub const CONFIG_FILENAME: &str = "npm-sbom.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub format: Option<String>,
    pub include_dev_dependencies: Option<bool>,
    pub include_serial_number: Option<bool>,
    pub include_license_data: Option<bool>,
    pub include_license_text: Option<bool>,
    /// JSON array of SPDX identifiers, relative to the config file
    pub spdx_license_list: Option<PathBuf>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
    #[serde(skip)]
    source_dir: PathBuf,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let mut config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;
    config.source_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

    validate_config(&config)?;
    warn_unknown_fields(&config);
    tracing::debug!(path = %path.display(), "loaded config file");

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(format) = &config.format {
        if let Err(message) = OutputFormat::from_str(format) {
            return Err(SbomError::Validation {
                message: format!(
                    "Invalid config: {}\n\n💡 Hint: Set 'format' to either xml or json.",
                    message
                ),
            }
            .into());
        }
    }
    if let Some(path) = &config.spdx_license_list {
        if path.as_os_str().is_empty() {
            return Err(SbomError::Validation {
                message: "Invalid config: spdx_license_list must not be empty.\n\n\
                          💡 Hint: Point it at a JSON array of SPDX identifiers or remove the key."
                    .to_string(),
            }
            .into());
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

/// Effective settings after merging CLI flags over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub format: OutputFormat,
    pub include_dev_dependencies: bool,
    pub include_serial_number: bool,
    pub include_license_data: bool,
    pub include_license_text: bool,
    pub spdx_license_list: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Xml,
            include_dev_dependencies: false,
            include_serial_number: true,
            include_license_data: true,
            include_license_text: true,
            spdx_license_list: None,
        }
    }
}

impl Settings {
    /// CLI flag > config file > default.
    pub fn resolve(args: &Args, config: Option<&ConfigFile>) -> Result<Self> {
        let defaults = Self::default();
        let Some(config) = config else {
            return Ok(Self::from_args(args, defaults));
        };

        let from_file = Self {
            format: match &config.format {
                Some(format) => OutputFormat::from_str(format).map_err(anyhow::Error::msg)?,
                None => defaults.format,
            },
            include_dev_dependencies: config
                .include_dev_dependencies
                .unwrap_or(defaults.include_dev_dependencies),
            include_serial_number: config
                .include_serial_number
                .unwrap_or(defaults.include_serial_number),
            include_license_data: config
                .include_license_data
                .unwrap_or(defaults.include_license_data),
            include_license_text: config
                .include_license_text
                .unwrap_or(defaults.include_license_text),
            spdx_license_list: config
                .spdx_license_list
                .as_ref()
                .map(|path| config.source_dir.join(path)),
        };

        Ok(Self::from_args(args, from_file))
    }

    fn from_args(args: &Args, base: Self) -> Self {
        Self {
            format: args.format.unwrap_or(base.format),
            include_dev_dependencies: args.include_dev || base.include_dev_dependencies,
            include_serial_number: !args.no_serial_number && base.include_serial_number,
            include_license_data: !args.no_license_data && base.include_license_data,
            include_license_text: !args.no_license_text && base.include_license_text,
            spdx_license_list: base.spdx_license_list,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn args(flags: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("npm-sbom").chain(flags.iter().copied())).unwrap()
    }

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            r#"
format: json
include_dev_dependencies: true
include_serial_number: false
include_license_data: true
include_license_text: false
spdx_license_list: licenses.json
"#,
        )
        .unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.format.as_deref(), Some("json"));
        assert_eq!(config.include_dev_dependencies, Some(true));
        assert_eq!(config.include_serial_number, Some(false));
        assert_eq!(config.include_license_data, Some(true));
        assert_eq!(config.include_license_text, Some(false));
        assert_eq!(
            config.spdx_license_list.as_deref(),
            Some(Path::new("licenses.json"))
        );
        assert!(config.unknown_fields.is_empty());
    }

    #[test]
    fn test_discover_config_found() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "format: xml\n").unwrap();

        let config = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(config.format.as_deref(), Some("xml"));
    }

    #[test]
    fn test_discover_config_not_found() {
        let dir = TempDir::new().unwrap();
        assert!(discover_config(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config_from_path(Path::new("/nonexistent/config.yml"));
        let err = format!("{}", result.unwrap_err());
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_parse_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("bad.yml");
        fs::write(&config_path, "invalid: yaml: [[[broken").unwrap();

        let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_invalid_format_validation_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "format: markdown\n").unwrap();

        let err = load_config_from_path(&config_path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SbomError>(),
            Some(SbomError::Validation { .. })
        ));
        assert!(err.to_string().contains("Invalid format: markdown"));
    }

    #[test]
    fn test_empty_spdx_list_validation_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "spdx_license_list: \"\"\n").unwrap();

        let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("must not be empty"));
    }

    #[test]
    fn test_unknown_fields_warning() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            "format: json\nexclude_packages: [a]\ncheck_cve: true\n",
        )
        .unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.unknown_fields.len(), 2);
        assert!(config.unknown_fields.contains_key("exclude_packages"));
        assert!(config.unknown_fields.contains_key("check_cve"));
    }

    #[test]
    fn test_settings_defaults_without_config() {
        let settings = Settings::resolve(&args(&[]), None).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.format, OutputFormat::Xml);
        assert!(settings.include_serial_number);
    }

    #[test]
    fn test_settings_config_values_apply() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            "format: json\ninclude_dev_dependencies: true\ninclude_license_text: false\nspdx_license_list: spdx.json\n",
        )
        .unwrap();
        let config = load_config_from_path(&config_path).unwrap();

        let settings = Settings::resolve(&args(&[]), Some(&config)).unwrap();
        assert_eq!(settings.format, OutputFormat::Json);
        assert!(settings.include_dev_dependencies);
        assert!(!settings.include_license_text);
        assert!(settings.include_license_data);
        assert_eq!(
            settings.spdx_license_list,
            Some(dir.path().join("spdx.json"))
        );
    }

    #[test]
    fn test_settings_cli_overrides_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            "format: json\ninclude_serial_number: true\ninclude_license_data: true\n",
        )
        .unwrap();
        let config = load_config_from_path(&config_path).unwrap();

        let settings = Settings::resolve(
            &args(&["-f", "xml", "--no-serial-number", "--no-license-data"]),
            Some(&config),
        )
        .unwrap();
        assert_eq!(settings.format, OutputFormat::Xml);
        assert!(!settings.include_serial_number);
        assert!(!settings.include_license_data);
    }
}
