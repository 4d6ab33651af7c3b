//! Engine configuration
//!
//! The only tunable surface is the concurrent path: how many workers to run,
//! how small a partition may get, and how partial results are merged.
//!
//! ```json
//! { "workers": 8, "min_partition_len": 1024, "merge": "tree" }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// How partial per-partition results are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeStrategy {
    /// Coordinator folds partials one after another, in partition order
    Sequential,
    /// Pairwise reduction tree
    #[default]
    Tree,
}

/// Configuration for the concurrent aggregation path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Worker threads used for partitioned aggregation
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Inputs are never split into partitions shorter than this
    #[serde(default = "default_min_partition_len")]
    pub min_partition_len: usize,

    #[serde(default)]
    pub merge: MergeStrategy,
}

fn default_workers() -> usize {
    num_cpus::get().max(1)
}

fn default_min_partition_len() -> usize {
    1024
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            min_partition_len: default_min_partition_len(),
            merge: MergeStrategy::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Single worker, no partitioning
    pub fn serial() -> Self {
        Self {
            workers: 1,
            ..Default::default()
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_min_partition_len(mut self, len: usize) -> Self {
        self.min_partition_len = len;
        self
    }

    pub fn with_merge(mut self, merge: MergeStrategy) -> Self {
        self.merge = merge;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::Invalid("workers must be at least 1".to_string()));
        }
        if self.min_partition_len == 0 {
            return Err(ConfigError::Invalid(
                "min_partition_len must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
