//! Athena Aggregation Engine
//!
//! Groups records by a derived key and reduces each group to a sum, count or
//! average. Two execution paths produce identical results:
//!
//! - **Serial**: one pass in input order on the calling thread
//! - **Concurrent**: the input slice is split into disjoint partitions, each
//!   folded by a worker into a private map, then merged once
//!
//! ## Architecture
//!
//! ```text
//!                       ┌─► worker 0: fold ─► GroupedStats ─┐
//!  &[T] ─► PartitionPlan ┼─► worker 1: fold ─► GroupedStats ─┼─► merge ─► GroupedStats
//!                       └─► worker N: fold ─► GroupedStats ─┘              │
//!                                                                  reduce ▼
//!                                                             HashMap<K, Decimal>
//! ```
//!
//! Merging sums totals and counts per key. That combine is associative and
//! commutative with the empty map as identity, so neither the partitioning
//! nor the merge order can change the result.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use athena_aggregate::{ParallelAggregator, Reduction, group_serial};
//!
//! let serial = group_serial(&orders, |o| o.side, |o| o.trade_count_to_fill);
//! assert_eq!(serial.average(&Side::Sell), dec!(3));
//!
//! let parallel = ParallelAggregator::with_workers(4)?
//!     .aggregate(&orders, |o| o.side, |o| o.trade_count_to_fill, Reduction::Sum);
//! ```

pub mod accumulator;
pub mod config;
pub mod error;
pub mod grouped;
pub mod measure;
pub mod merge;
pub mod parallel;
pub mod partition;
mod pool;
pub mod serial;
pub mod traversal;

// Re-export main types
pub use accumulator::Accumulator;
pub use config::{ConfigError, EngineConfig, MergeStrategy};
pub use error::{AggregateError, Result, Stage};
pub use grouped::{GroupedStats, Reduction};
pub use measure::Measure;
pub use merge::{merge_sequential, merge_tree};
pub use parallel::{ParallelAggregator, group_concurrent, try_group_concurrent};
pub use partition::PartitionPlan;
pub use serial::{aggregate_serial, group_serial, group_serial_filtered, summarize, try_group_serial};
pub use traversal::{Traversal, for_each};
