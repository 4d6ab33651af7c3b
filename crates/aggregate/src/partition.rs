//! Splitting an input slice into disjoint contiguous partitions

use std::ops::Range;

use crate::config::EngineConfig;
use crate::error::{AggregateError, Result};

/// Ordered lengths of contiguous partitions covering an input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionPlan {
    lengths: Vec<usize>,
}

impl PartitionPlan {
    /// Split `len` records into `partitions` near-equal parts.
    ///
    /// Earlier partitions take the remainder, so lengths differ by at most one.
    pub fn even(len: usize, partitions: usize) -> Self {
        let partitions = partitions.clamp(1, len.max(1));
        if len == 0 {
            return Self { lengths: Vec::new() };
        }
        let base = len / partitions;
        let extra = len % partitions;
        let lengths = (0..partitions)
            .map(|i| base + usize::from(i < extra))
            .collect();
        Self { lengths }
    }

    /// Plan for `len` records under `config`: at most one partition per
    /// worker, none shorter than `min_partition_len` (except a lone remainder)
    pub fn for_config(len: usize, config: &EngineConfig) -> Self {
        let by_size = len.div_ceil(config.min_partition_len.max(1));
        Self::even(len, by_size.min(config.workers.max(1)))
    }

    /// Caller-supplied lengths; they must add up to `len`.
    ///
    /// Zero-length entries are dropped.
    pub fn from_lengths(lengths: impl IntoIterator<Item = usize>, len: usize) -> Result<Self> {
        let lengths: Vec<usize> = lengths.into_iter().filter(|l| *l > 0).collect();
        let covered: usize = lengths.iter().sum();
        if covered != len {
            return Err(AggregateError::PartitionMismatch { covered, len });
        }
        Ok(Self { lengths })
    }

    pub fn lengths(&self) -> &[usize] {
        &self.lengths
    }

    /// Number of partitions
    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }

    /// Number of records covered
    pub fn covered(&self) -> usize {
        self.lengths.iter().sum()
    }

    /// Index ranges of each partition, in input order
    pub fn ranges(&self) -> Vec<Range<usize>> {
        let mut start = 0;
        self.lengths
            .iter()
            .map(|len| {
                let range = start..start + len;
                start += len;
                range
            })
            .collect()
    }
}
