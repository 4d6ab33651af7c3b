//! Non-reducing traversal with a caller-selected ordering guarantee
//!
//! Reductions are order-independent, so the aggregation paths never need to
//! preserve input order. A plain traversal (streaming audit lines out, say)
//! does: callers pick [`Traversal::Ordered`] to visit records strictly in
//! input order. Ordered traversal runs on the calling thread and gives up
//! partitioned parallelism, so it is opt-in.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;

use crate::config::EngineConfig;
use crate::partition::PartitionPlan;
use crate::pool::run_partitions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Traversal {
    /// Visit records in input order, on the calling thread
    Ordered,
    /// Visit records in any order, possibly on several workers at once
    #[default]
    Unordered,
}

/// Call `visit` once for every record
pub fn for_each<T, F>(records: &[T], traversal: Traversal, config: &EngineConfig, visit: F)
where
    T: Sync,
    F: Fn(&T) + Sync,
{
    match traversal {
        Traversal::Ordered => records.iter().for_each(visit),
        Traversal::Unordered => {
            let plan = PartitionPlan::for_config(records.len(), config);
            let Ok(_) = run_partitions(records, &plan, config.workers, |part, _| {
                part.iter().for_each(&visit);
                Ok::<_, Infallible>(())
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn config() -> EngineConfig {
        EngineConfig::default()
            .with_workers(4)
            .with_min_partition_len(2)
    }

    #[test]
    fn test_ordered_preserves_input_order() {
        let records: Vec<u32> = (1..=8).rev().collect();
        let seen = Mutex::new(Vec::new());

        for_each(&records, Traversal::Ordered, &config(), |r| {
            seen.lock().unwrap().push(*r)
        });

        assert_eq!(seen.into_inner().unwrap(), records);
    }

    #[test]
    fn test_unordered_visits_every_record_once() {
        let records: Vec<u32> = (1..=64).collect();
        let seen = Mutex::new(Vec::new());
        let visits = AtomicUsize::new(0);

        for_each(&records, Traversal::Unordered, &config(), |r| {
            visits.fetch_add(1, Ordering::Relaxed);
            seen.lock().unwrap().push(*r);
        });

        let mut seen = seen.into_inner().unwrap();
        seen.sort_unstable();
        assert_eq!(seen, records);
        assert_eq!(visits.load(Ordering::Relaxed), 64);
    }

    #[test]
    fn test_default_is_unordered() {
        assert_eq!(Traversal::default(), Traversal::Unordered);
    }
}
