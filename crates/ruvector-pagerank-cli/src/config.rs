//! CLI configuration file.

use anyhow::{Context, Result};
use ruvector_pagerank::config::RankConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Output format for `rank`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table.
    #[default]
    Text,
    /// Single JSON document.
    Json,
}

/// `[output]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Number of top-ranked nodes to print.
    pub top_k: usize,
    /// Output format.
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            top_k: 10,
            format: OutputFormat::Text,
        }
    }
}

/// Contents of a `--config` TOML file.
///
/// ```toml
/// [rank]
/// alpha = 0.85
/// tolerance = 1e-8
///
/// [output]
/// top_k = 5
/// format = "json"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Ranking parameters.
    pub rank: RankConfig,
    /// Output settings.
    pub output: OutputConfig,
}

impl Config {
    /// Load from `path`, or defaults when no path is given.
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }
}
