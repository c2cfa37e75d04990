//! Configuration file support for base-image-inventory.
//!
//! Provides YAML-based configuration through `base-image-inventory.config.yml`
//! files, including data structures, file loading, validation, and merging
//! with command-line values.

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::adapters::outbound::network::{GitHubClientSettings, MAX_PER_PAGE};
use crate::application::use_cases::DEFAULT_MAX_DEPTH;
use crate::shared::error::InventoryError;
use crate::shared::security::{validate_regular_file, MAX_CONFIG_FILE_SIZE};
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "base-image-inventory.config.yml";

/// Deepest `max_depth` accepted from a config file
const MAX_CONFIGURED_DEPTH: usize = 256;

/// Most attempts per request accepted from a config file
const MAX_CONFIGURED_RETRIES: u32 = 10;

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub api_url: Option<String>,
    pub per_page: Option<u32>,
    pub max_depth: Option<usize>,
    pub timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
    pub exclude_repos: Option<Vec<String>>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Settings after config file values and command-line values are merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSettings {
    pub client: GitHubClientSettings,
    pub max_depth: usize,
    pub exclude_patterns: Vec<String>,
}

impl ConfigFile {
    /// Merges this config with command-line values.
    ///
    /// The token only ever comes from the command line or environment.
    /// Exclude patterns from both sources are combined, config first.
    pub fn resolve(self, token: Option<String>, cli_excludes: Vec<String>) -> ResolvedSettings {
        let defaults = GitHubClientSettings::default();
        let client = GitHubClientSettings {
            api_url: self.api_url.unwrap_or(defaults.api_url),
            token: token.filter(|t| !t.trim().is_empty()),
            per_page: self.per_page.unwrap_or(defaults.per_page),
            timeout_secs: self.timeout_secs.unwrap_or(defaults.timeout_secs),
            max_retries: self.max_retries.unwrap_or(defaults.max_retries),
        };

        let mut exclude_patterns = self.exclude_repos.unwrap_or_default();
        for pattern in cli_excludes {
            if !exclude_patterns.contains(&pattern) {
                exclude_patterns.push(pattern);
            }
        }

        ResolvedSettings {
            client,
            max_depth: self.max_depth.unwrap_or(DEFAULT_MAX_DEPTH),
            exclude_patterns,
        }
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    validate_regular_file(path, "Config file", MAX_CONFIG_FILE_SIZE).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is a regular file.",
            path.display()
        )
    })?;

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

    validate_config(&config, path)?;
    warn_unknown_fields(&config);

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
fn validate_config(config: &ConfigFile, path: &Path) -> Result<()> {
    let invalid = |details: String| -> anyhow::Error {
        InventoryError::ConfigError {
            path: path.to_path_buf(),
            details,
        }
        .into()
    };

    if let Some(ref api_url) = config.api_url {
        if !(api_url.starts_with("https://") || api_url.starts_with("http://")) {
            return Err(invalid(format!(
                "api_url must start with http:// or https:// (got '{}')",
                api_url
            )));
        }
    }

    if let Some(per_page) = config.per_page {
        if per_page == 0 || per_page > MAX_PER_PAGE {
            return Err(invalid(format!(
                "per_page must be between 1 and {} (got {})",
                MAX_PER_PAGE, per_page
            )));
        }
    }

    if let Some(max_depth) = config.max_depth {
        if max_depth > MAX_CONFIGURED_DEPTH {
            return Err(invalid(format!(
                "max_depth must be at most {} (got {})",
                MAX_CONFIGURED_DEPTH, max_depth
            )));
        }
    }

    if config.timeout_secs == Some(0) {
        return Err(invalid("timeout_secs must be greater than 0".to_string()));
    }

    if let Some(max_retries) = config.max_retries {
        if max_retries == 0 || max_retries > MAX_CONFIGURED_RETRIES {
            return Err(invalid(format!(
                "max_retries must be between 1 and {} (got {})",
                MAX_CONFIGURED_RETRIES, max_retries
            )));
        }
    }

    if let Some(ref patterns) = config.exclude_repos {
        for (i, pattern) in patterns.iter().enumerate() {
            if pattern.trim().is_empty() {
                return Err(invalid(format!("exclude_repos[{}] must not be empty", i)));
            }
        }
    }

    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
