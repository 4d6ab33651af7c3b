//! Partitioned grouped reduction across a worker pool
//!
//! Each partition is folded into a private [`GroupedStats`] and the partials
//! are merged once at the end. Because accumulators combine as a commutative
//! monoid, the merged result equals [`group_serial`](crate::group_serial)
//! over the same input for every partitioning and merge order.
//!
//! The input slice is borrowed for the whole call, so it cannot be modified
//! while an aggregation over it is in flight.

use athena_query::BoxError;
use log::{debug, warn};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::convert::Infallible;
use std::hash::Hash;

use crate::config::{ConfigError, EngineConfig};
use crate::error::Result;
use crate::grouped::{GroupedStats, Reduction};
use crate::measure::Measure;
use crate::partition::PartitionPlan;
use crate::pool::run_partitions;
use crate::serial::{group_serial_filtered, try_fold_from};

/// Runs grouped reductions over a fixed-size worker pool
#[derive(Debug, Clone, Default)]
pub struct ParallelAggregator {
    config: EngineConfig,
}

impl ParallelAggregator {
    pub fn new(config: EngineConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn with_workers(workers: usize) -> std::result::Result<Self, ConfigError> {
        Self::new(EngineConfig::default().with_workers(workers))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Partition plan this aggregator would use for `len` records
    pub fn plan(&self, len: usize) -> PartitionPlan {
        PartitionPlan::for_config(len, &self.config)
    }

    /// Group every record by `key` and fold `value` into its group
    pub fn group<T, K, V, KF, VF>(&self, records: &[T], key: KF, value: VF) -> GroupedStats<K, V>
    where
        T: Sync,
        K: Eq + Hash + Send,
        V: Measure,
        KF: Fn(&T) -> K + Sync,
        VF: Fn(&T) -> V + Sync,
    {
        self.group_filtered(records, |_| true, key, value)
    }

    /// [`group`](Self::group) restricted to records matching `filter`
    pub fn group_filtered<T, K, V, P, KF, VF>(
        &self,
        records: &[T],
        filter: P,
        key: KF,
        value: VF,
    ) -> GroupedStats<K, V>
    where
        T: Sync,
        K: Eq + Hash + Send,
        V: Measure,
        P: Fn(&T) -> bool + Sync,
        KF: Fn(&T) -> K + Sync,
        VF: Fn(&T) -> V + Sync,
    {
        let plan = self.plan(records.len());
        self.group_with_plan(records, &plan, filter, key, value)
    }

    /// Grouped reduction over an explicit partition plan.
    ///
    /// Panics if `plan` does not cover exactly `records.len()` records.
    pub fn group_with_plan<T, K, V, P, KF, VF>(
        &self,
        records: &[T],
        plan: &PartitionPlan,
        filter: P,
        key: KF,
        value: VF,
    ) -> GroupedStats<K, V>
    where
        T: Sync,
        K: Eq + Hash + Send,
        V: Measure,
        P: Fn(&T) -> bool + Sync,
        KF: Fn(&T) -> K + Sync,
        VF: Fn(&T) -> V + Sync,
    {
        assert_eq!(
            plan.covered(),
            records.len(),
            "partition plan must cover the input"
        );
        self.log_plan(records.len(), plan);

        let Ok(partials) = run_partitions(records, plan, self.config.workers, |part, _| {
            Ok::<_, Infallible>(group_serial_filtered(part, &filter, &key, &value))
        });
        self.merge(partials)
    }

    /// Fallible grouped reduction.
    ///
    /// If any partition fails, the whole aggregation fails and no partial
    /// mapping is returned.
    pub fn try_group<T, K, V, E, P, KF, VF>(
        &self,
        records: &[T],
        filter: P,
        key: KF,
        value: VF,
    ) -> Result<GroupedStats<K, V>>
    where
        T: Sync,
        K: Eq + Hash + Send,
        V: Measure,
        E: Into<BoxError>,
        P: Fn(&T) -> std::result::Result<bool, E> + Sync,
        KF: Fn(&T) -> std::result::Result<K, E> + Sync,
        VF: Fn(&T) -> std::result::Result<V, E> + Sync,
    {
        let plan = self.plan(records.len());
        self.try_group_with_plan(records, &plan, filter, key, value)
    }

    /// Fallible [`group_with_plan`](Self::group_with_plan); a plan that does
    /// not cover the input is reported as an error
    pub fn try_group_with_plan<T, K, V, E, P, KF, VF>(
        &self,
        records: &[T],
        plan: &PartitionPlan,
        filter: P,
        key: KF,
        value: VF,
    ) -> Result<GroupedStats<K, V>>
    where
        T: Sync,
        K: Eq + Hash + Send,
        V: Measure,
        E: Into<BoxError>,
        P: Fn(&T) -> std::result::Result<bool, E> + Sync,
        KF: Fn(&T) -> std::result::Result<K, E> + Sync,
        VF: Fn(&T) -> std::result::Result<V, E> + Sync,
    {
        let plan = PartitionPlan::from_lengths(plan.lengths().iter().copied(), records.len())?;
        self.log_plan(records.len(), &plan);

        let partials = run_partitions(records, &plan, self.config.workers, |part, offset| {
            try_fold_from(part, offset, &filter, &key, &value)
        })
        .inspect_err(|e| warn!("Aggregation aborted: {}", e))?;
        Ok(self.merge(partials))
    }

    /// Group, then reduce each group to a scalar
    pub fn aggregate<T, K, V, KF, VF>(
        &self,
        records: &[T],
        key: KF,
        value: VF,
        reduction: Reduction,
    ) -> HashMap<K, Decimal>
    where
        T: Sync,
        K: Eq + Hash + Send,
        V: Measure,
        KF: Fn(&T) -> K + Sync,
        VF: Fn(&T) -> V + Sync,
    {
        self.group(records, key, value).into_reduced(reduction)
    }

    fn log_plan(&self, len: usize, plan: &PartitionPlan) {
        debug!(
            "Aggregating {} records in {} partitions on up to {} workers",
            len,
            plan.len(),
            self.config.workers
        );
    }

    fn merge<K: Eq + Hash, V: Measure>(&self, partials: Vec<GroupedStats<K, V>>) -> GroupedStats<K, V> {
        let partitions = partials.len();
        let merged = self.config.merge.merge(partials);
        debug!(
            "Merged {} partials into {} groups ({:?})",
            partitions,
            merged.len(),
            self.config.merge
        );
        merged
    }
}

/// [`ParallelAggregator::group`] with the default configuration
pub fn group_concurrent<T, K, V, KF, VF>(records: &[T], key: KF, value: VF) -> GroupedStats<K, V>
where
    T: Sync,
    K: Eq + Hash + Send,
    V: Measure,
    KF: Fn(&T) -> K + Sync,
    VF: Fn(&T) -> V + Sync,
{
    ParallelAggregator::default().group(records, key, value)
}

/// [`ParallelAggregator::try_group`] with the default configuration
pub fn try_group_concurrent<T, K, V, E, P, KF, VF>(
    records: &[T],
    filter: P,
    key: KF,
    value: VF,
) -> Result<GroupedStats<K, V>>
where
    T: Sync,
    K: Eq + Hash + Send,
    V: Measure,
    E: Into<BoxError>,
    P: Fn(&T) -> std::result::Result<bool, E> + Sync,
    KF: Fn(&T) -> std::result::Result<K, E> + Sync,
    VF: Fn(&T) -> std::result::Result<V, E> + Sync,
{
    ParallelAggregator::default().try_group(records, filter, key, value)
}
