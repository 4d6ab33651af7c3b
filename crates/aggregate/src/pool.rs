//! Scoped worker pool over partitions of a borrowed slice
//!
//! Partitions are queued on a channel and pulled by a fixed number of scoped
//! workers. Each job sees only its own sub-slice and returns a private
//! result, so no state is shared during the fold. After the first failure,
//! workers stop pulling new partitions; a partition already in progress runs
//! to completion.

use crossbeam_channel::unbounded;
use log::trace;
use std::ops::Range;
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use crate::partition::PartitionPlan;

/// Run `job` over every partition of `records` on up to `workers` threads.
///
/// `job` receives the partition slice and the absolute index of its first
/// record. Results come back in partition order. If any job fails, the
/// failure of the lowest-indexed failing partition is returned. A panicking
/// job is re-raised on the calling thread.
pub(crate) fn run_partitions<T, R, E, J>(
    records: &[T],
    plan: &PartitionPlan,
    workers: usize,
    job: J,
) -> Result<Vec<R>, E>
where
    T: Sync,
    R: Send,
    E: Send,
    J: Fn(&[T], usize) -> Result<R, E> + Sync,
{
    let ranges = plan.ranges();
    let workers = workers.clamp(1, ranges.len().max(1));

    if workers == 1 {
        return ranges
            .into_iter()
            .map(|range| job(&records[range.clone()], range.start))
            .collect();
    }

    let (tx, rx) = unbounded::<(usize, Range<usize>)>();
    for queued in ranges.into_iter().enumerate() {
        // Receiver is alive until the scope below ends
        let _ = tx.send(queued);
    }
    drop(tx);

    let failed = AtomicBool::new(false);
    let mut results: Vec<(usize, Result<R, E>)> = thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|worker| {
                let rx = rx.clone();
                let job = &job;
                let failed = &failed;
                scope.spawn(move || {
                    let mut done = Vec::new();
                    while let Ok((index, range)) = rx.recv() {
                        if failed.load(Ordering::Acquire) {
                            break;
                        }
                        trace!(
                            "worker {} folding partition {} ({} records)",
                            worker,
                            index,
                            range.len()
                        );
                        let result = job(&records[range.clone()], range.start);
                        if result.is_err() {
                            failed.store(true, Ordering::Release);
                        }
                        done.push((index, result));
                    }
                    done
                })
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|handle| match handle.join() {
                Ok(done) => done,
                Err(payload) => panic::resume_unwind(payload),
            })
            .collect()
    });

    results.sort_unstable_by_key(|(index, _)| *index);
    results.into_iter().map(|(_, result)| result).collect()
}
