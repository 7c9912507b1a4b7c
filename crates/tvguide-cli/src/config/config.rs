//! `AppConfig` struct and TOML read/write.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Schedule rendering settings.
    #[serde(default)]
    pub schedule: ScheduleConfig,
    /// Update check settings.
    #[serde(default)]
    pub update: UpdateConfig,
}

/// Schedule rendering configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// Heading placed above the rendered list.
    #[serde(default = "default_heading")]
    pub heading: String,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            heading: default_heading(),
        }
    }
}

/// Default schedule heading.
fn default_heading() -> String {
    String::from("Today's Shows")
}

/// Update check configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct UpdateConfig {
    /// Release feed repository as `owner/repo`. Empty = not configured.
    #[serde(default)]
    pub repository: String,
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }
}
