//! Configuration handling for MitoScan CLI
//!
//! Supports loading configuration from mitoscan.toml files with CLI argument overrides.

use anyhow::{Context, Result};
use mitoscan_core::{AlignmentMode, ScoringScheme, DEFAULT_BLOCK_WIDTH};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "mitoscan.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub align: AlignConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Worker threads for parallel indexing and reference comparison (0 = all cores)
    #[serde(default)]
    pub threads: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Score for two equal bases
    #[serde(default = "default_match_score")]
    pub match_score: i32,

    /// Score for two unequal bases
    #[serde(default = "default_mismatch")]
    pub mismatch: i32,

    /// Score per gap column
    #[serde(default = "default_gap")]
    pub gap: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignConfig {
    /// Default alignment mode
    #[serde(default)]
    pub mode: AlignmentMode,

    /// Columns per display block
    #[serde(default = "default_block_width")]
    pub block_width: usize,

    /// Largest score matrix (in cells) the CLI will attempt
    #[serde(default = "default_max_cells")]
    pub max_cells: u64,
}

// Default value functions
fn default_match_score() -> i32 { 1 }
fn default_mismatch() -> i32 { -1 }
fn default_gap() -> i32 { -2 }
fn default_block_width() -> usize { DEFAULT_BLOCK_WIDTH }
fn default_max_cells() -> u64 { 300_000_000 }

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { threads: 0 }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            match_score: default_match_score(),
            mismatch: default_mismatch(),
            gap: default_gap(),
        }
    }
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            mode: AlignmentMode::Global,
            block_width: default_block_width(),
            max_cells: default_max_cells(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            scoring: ScoringConfig::default(),
            align: AlignConfig::default(),
        }
    }
}

impl ScoringConfig {
    /// Scoring scheme with per-invocation overrides applied
    pub fn scheme_with(
        &self,
        match_score: Option<i32>,
        mismatch: Option<i32>,
        gap: Option<i32>,
    ) -> ScoringScheme {
        ScoringScheme::new(
            match_score.unwrap_or(self.match_score),
            mismatch.unwrap_or(self.mismatch),
            gap.unwrap_or(self.gap),
        )
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => {
                log::info!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)?
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    log::info!("Loading configuration from: {}", DEFAULT_CONFIG_FILE);
                    Self::load_from_file(&default_path)?
                } else {
                    log::debug!("Using default configuration");
                    Self::default()
                }
            }
        };

        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write configuration file: {}", path.display()))?;

        Ok(())
    }

    /// Generate example configuration file content
    pub fn example_toml() -> Result<String> {
        toml::to_string_pretty(&Self::default())
            .context("Failed to serialize default configuration")
    }
}
