use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::graph::DEFAULT_MAX_DEPTH;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "KINSHIP_CONFIG";

/// Config file looked up in the working directory when `KINSHIP_CONFIG` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "kinship.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub kinship: KinshipConfig,
    #[serde(default)]
    pub query: QueryConfig,
}

/// Dataset and process settings
#[derive(Debug, Clone, Deserialize)]
pub struct KinshipConfig {
    /// Dataset loaded by the CLI when `--dataset` is not given.
    #[serde(default)]
    pub dataset_path: Option<PathBuf>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for KinshipConfig {
    fn default() -> Self {
        Self {
            dataset_path: None,
            log_level: default_log_level(),
        }
    }
}

/// Query tuning
#[derive(Debug, Clone, Deserialize)]
pub struct QueryConfig {
    /// Generations an ancestor search may walk before the data is treated as cyclic.
    #[serde(default = "default_max_ancestor_depth")]
    pub max_ancestor_depth: usize,
    #[serde(default = "default_descendant_depth")]
    pub default_descendant_depth: usize,
    /// Classification cache entries per graph snapshot; 0 disables caching.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            max_ancestor_depth: default_max_ancestor_depth(),
            default_descendant_depth: default_descendant_depth(),
            cache_capacity: default_cache_capacity(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_ancestor_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_descendant_depth() -> usize {
    3
}

fn default_cache_capacity() -> usize {
    1024
}

impl Config {
    /// Load configuration from file
    ///
    /// Loads environment variables from .env file (if present) before loading config.
    /// Looks for config file in this order:
    /// 1. Path specified in KINSHIP_CONFIG environment variable
    /// 2. ./kinship.toml in current directory
    pub fn load() -> Result<Self> {
        let _ = dotenv::dotenv();
        Self::from_file(&Self::config_path())
    }

    /// Like `load`, but falls back to defaults when the config file does not exist.
    /// A file that exists but fails to parse or validate is still an error.
    pub fn load_or_default() -> Result<Self> {
        let _ = dotenv::dotenv();
        let config_path = Self::config_path();
        if !config_path.exists() {
            log::debug!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::from_file(&config_path)
    }

    /// Parse and validate a specific config file.
    pub fn from_file(config_path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        config.validate()?;
        Ok(config)
    }

    fn config_path() -> PathBuf {
        std::env::var(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.query.max_ancestor_depth == 0 {
            anyhow::bail!("query.max_ancestor_depth must be greater than 0");
        }

        if let Some(dataset) = &self.kinship.dataset_path {
            if !dataset.is_file() {
                anyhow::bail!(
                    "dataset_path does not point to a file: {}. Set dataset_path in kinship.toml to a JSON, YAML or TOML dataset.",
                    dataset.display()
                );
            }
        }

        Ok(())
    }

    pub fn dataset_path(&self) -> Option<&Path> {
        self.kinship.dataset_path.as_deref()
    }
}
