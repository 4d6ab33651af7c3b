//! Combining per-partition results

use std::hash::Hash;

use crate::config::MergeStrategy;
use crate::grouped::GroupedStats;
use crate::measure::Measure;

impl MergeStrategy {
    pub fn merge<K: Eq + Hash, V: Measure>(
        &self,
        partials: Vec<GroupedStats<K, V>>,
    ) -> GroupedStats<K, V> {
        match self {
            MergeStrategy::Sequential => merge_sequential(partials),
            MergeStrategy::Tree => merge_tree(partials),
        }
    }
}

/// Fold partials left to right into one result
pub fn merge_sequential<K: Eq + Hash, V: Measure>(
    partials: Vec<GroupedStats<K, V>>,
) -> GroupedStats<K, V> {
    partials
        .into_iter()
        .fold(GroupedStats::new(), GroupedStats::merge)
}

/// Merge neighbouring pairs until one result remains
pub fn merge_tree<K: Eq + Hash, V: Measure>(
    mut partials: Vec<GroupedStats<K, V>>,
) -> GroupedStats<K, V> {
    while partials.len() > 1 {
        let mut next = Vec::with_capacity(partials.len().div_ceil(2));
        let mut iter = partials.into_iter();
        while let Some(left) = iter.next() {
            match iter.next() {
                Some(right) => next.push(left.merge(right)),
                None => next.push(left),
            }
        }
        partials = next;
    }
    partials.pop().unwrap_or_default()
}
