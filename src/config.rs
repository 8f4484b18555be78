//! Configuration file support for diffused.
//!
//! Provides YAML-based configuration through `diffused.config.yml` files,
//! including data structures, file loading, and validation.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::adapters::outbound::scanners::ScannerSettings;
use crate::application::dto::OutputFormat;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "diffused.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub scanner: Option<ScannerConfig>,
    pub output: Option<String>,
    pub all_info: Option<bool>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Scan backend section of the configuration file.
#[derive(Debug, Deserialize, Default)]
pub struct ScannerConfig {
    pub binary: Option<String>,
    pub scan_timeout_secs: Option<u64>,
    pub version_timeout_secs: Option<u64>,
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

impl ConfigFile {
    /// Scanner settings with every unset value taken from the defaults.
    pub fn scanner_settings(&self) -> ScannerSettings {
        let defaults = ScannerSettings::default();
        let Some(scanner) = self.scanner.as_ref() else {
            return defaults;
        };

        ScannerSettings {
            binary: scanner.binary.clone().unwrap_or(defaults.binary),
            scan_timeout: scanner
                .scan_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.scan_timeout),
            version_timeout: scanner
                .version_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.version_timeout),
        }
    }

    /// Output format named in the file, if any.
    pub fn output_format(&self) -> Result<Option<OutputFormat>> {
        self.output
            .as_deref()
            .map(|s| OutputFormat::from_str(s).map_err(|e| anyhow::anyhow!(e)))
            .transpose()
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

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
    if let Some(ref scanner) = config.scanner {
        if let Some(ref binary) = scanner.binary {
            if binary.trim().is_empty() {
                bail!(
                    "Invalid config: scanner.binary must not be empty.\n\n\
                     💡 Hint: Set it to the scanner executable name or path (e.g., \"trivy\")."
                );
            }
        }

        for (field, value) in [
            ("scan_timeout_secs", scanner.scan_timeout_secs),
            ("version_timeout_secs", scanner.version_timeout_secs),
        ] {
            if value == Some(0) {
                bail!(
                    "Invalid config: scanner.{} must be greater than 0.\n\n\
                     💡 Hint: Timeouts are given in whole seconds.",
                    field
                );
            }
        }
    }

    if let Some(ref output) = config.output {
        if let Err(e) = OutputFormat::from_str(output) {
            bail!("Invalid config: output: {}", e);
        }
    }

    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let scanner_fields = config
        .scanner
        .iter()
        .flat_map(|scanner| scanner.unknown_fields.keys())
        .map(|key| format!("scanner.{}", key));

    for key in config.unknown_fields.keys().cloned().chain(scanner_fields) {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
