//! Query errors

use std::fmt;
use thiserror::Error;

/// Error raised by a caller-supplied function
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Which user-supplied function failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Predicate,
    Projection,
    Derive,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Predicate => "predicate",
            Stage::Projection => "projection",
            Stage::Derive => "derive",
        })
    }
}

#[derive(Error, Debug)]
pub enum QueryError {
    /// A caller-supplied function failed; the query was aborted with no partial result
    #[error("User-supplied {stage} failed on record {index}: {source}")]
    UserFunction {
        stage: Stage,
        index: usize,
        #[source]
        source: BoxError,
    },
}

impl QueryError {
    pub(crate) fn user(stage: Stage, index: usize, source: impl Into<BoxError>) -> Self {
        QueryError::UserFunction {
            stage,
            index,
            source: source.into(),
        }
    }

    /// Index of the record the failing function was evaluated on
    pub fn index(&self) -> usize {
        match self {
            QueryError::UserFunction { index, .. } => *index,
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            QueryError::UserFunction { stage, .. } => *stage,
        }
    }
}

pub type Result<T> = std::result::Result<T, QueryError>;
