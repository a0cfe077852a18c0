//! Configuration module
//!
//! An optional TOML file holding the same knobs as the command line;
//! explicit flags always win over file values.

use crate::error::CliResult;
use anyhow::Context;
use notefold_core::Proximity;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct CliConfig {
    /// Merge tolerances
    #[serde(default)]
    pub proximity: Proximity,

    /// File discovery configuration
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Discovery-related configuration
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Substring a notebook file name must contain
    pub name_contains: String,

    /// Suffix a notebook file name must carry
    pub name_ends_with: String,

    /// Marker appended to output names; files carrying it are skipped
    pub marker: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            name_contains: "Notebook".to_string(),
            name_ends_with: ".html".to_string(),
            marker: "Aggregated".to_string(),
        }
    }
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub default_format: String,

    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "html".to_string(),
            pretty_json: true,
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> CliResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = toml::from_str(&text)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }
}
