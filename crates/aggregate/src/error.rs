//! Aggregation errors

use athena_query::BoxError;
use std::fmt;
use thiserror::Error;

use crate::config::ConfigError;

/// Which user-supplied function failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Filter,
    Key,
    Value,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Filter => "filter",
            Stage::Key => "key function",
            Stage::Value => "value function",
        })
    }
}

#[derive(Error, Debug)]
pub enum AggregateError {
    /// A caller-supplied function failed; no partial mapping is returned
    #[error("User-supplied {stage} failed on record {index}: {source}")]
    UserFunction {
        stage: Stage,
        index: usize,
        #[source]
        source: BoxError,
    },

    #[error("Partition plan covers {covered} records but input has {len}")]
    PartitionMismatch { covered: usize, len: usize },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl AggregateError {
    pub(crate) fn user(stage: Stage, index: usize, source: impl Into<BoxError>) -> Self {
        AggregateError::UserFunction {
            stage,
            index,
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AggregateError>;
