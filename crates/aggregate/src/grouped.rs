//! Per-group accumulators and their reduction to scalars

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::hash::Hash;

use crate::accumulator::Accumulator;
use crate::measure::Measure;

/// Scalar each group is reduced to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reduction {
    Sum,
    Count,
    Average,
}

impl Reduction {
    pub fn apply<V: Measure>(&self, acc: &Accumulator<V>) -> Decimal {
        match self {
            Reduction::Sum => V::to_decimal(acc.total()),
            Reduction::Count => Decimal::from(acc.count()),
            Reduction::Average => acc.average(),
        }
    }
}

/// Mapping from group key to accumulator.
///
/// Iteration order over groups is unspecified.
#[derive(Debug, Clone)]
pub struct GroupedStats<K, V: Measure> {
    groups: HashMap<K, Accumulator<V>>,
}

impl<K: Eq + Hash, V: Measure> GroupedStats<K, V> {
    pub fn new() -> Self {
        Self {
            groups: HashMap::new(),
        }
    }

    /// Fold `value` into the group for `key`, creating it if needed
    #[inline]
    pub fn fold(&mut self, key: K, value: V) {
        self.groups.entry(key).or_default().fold(value);
    }

    /// Merge another partial result into this one.
    ///
    /// Per key, totals and counts are summed; keys present on one side only
    /// are carried over unchanged.
    pub fn merge(mut self, mut other: Self) -> Self {
        // Fold the smaller map into the larger one
        if other.groups.len() > self.groups.len() {
            std::mem::swap(&mut self, &mut other);
        }
        self.merge_from(other);
        self
    }

    pub fn merge_from(&mut self, other: Self) {
        for (key, acc) in other.groups {
            match self.groups.entry(key) {
                Entry::Occupied(mut existing) => existing.get_mut().merge(acc),
                Entry::Vacant(slot) => {
                    slot.insert(acc);
                }
            }
        }
    }

    pub fn get(&self, key: &K) -> Option<&Accumulator<V>> {
        self.groups.get(key)
    }

    /// Total for `key`, zero if the group is absent
    pub fn sum(&self, key: &K) -> V::Total {
        self.get(key).map(|acc| acc.total()).unwrap_or(V::ZERO)
    }

    /// Number of records in `key`'s group, zero if absent
    pub fn count(&self, key: &K) -> u64 {
        self.get(key).map(|acc| acc.count()).unwrap_or(0)
    }

    /// Average for `key`; an absent or empty group averages to zero
    pub fn average(&self, key: &K) -> Decimal {
        self.get(key).map(|acc| acc.average()).unwrap_or(Decimal::ZERO)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.groups.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &Accumulator<V>)> {
        self.groups.iter()
    }

    /// Reduce every group to a scalar
    pub fn reduce(&self, reduction: Reduction) -> HashMap<K, Decimal>
    where
        K: Clone,
    {
        self.groups
            .iter()
            .map(|(key, acc)| (key.clone(), reduction.apply(acc)))
            .collect()
    }

    pub fn into_reduced(self, reduction: Reduction) -> HashMap<K, Decimal> {
        self.groups
            .into_iter()
            .map(|(key, acc)| (key, reduction.apply(&acc)))
            .collect()
    }

    pub fn into_inner(self) -> HashMap<K, Accumulator<V>> {
        self.groups
    }
}

impl<K: Eq + Hash, V: Measure> Default for GroupedStats<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, V: Measure> PartialEq for GroupedStats<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.groups == other.groups
    }
}

impl<K: Eq + Hash, V: Measure> FromIterator<(K, V)> for GroupedStats<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut stats = Self::new();
        for (key, value) in iter {
            stats.fold(key, value);
        }
        stats
    }
}
