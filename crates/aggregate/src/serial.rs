//! Single-threaded grouped reduction
//!
//! Records are folded in input order on the calling thread. This is the
//! reference the concurrent path must agree with.

use athena_query::{BoxError, matching};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::hash::Hash;

use crate::accumulator::Accumulator;
use crate::error::{AggregateError, Result, Stage};
use crate::grouped::{GroupedStats, Reduction};
use crate::measure::Measure;

/// Group every record by `key` and fold `value` into its group
pub fn group_serial<'a, T, K, V, I, KF, VF>(records: I, key: KF, value: VF) -> GroupedStats<K, V>
where
    T: 'a,
    K: Eq + Hash,
    V: Measure,
    I: IntoIterator<Item = &'a T>,
    KF: Fn(&T) -> K,
    VF: Fn(&T) -> V,
{
    records
        .into_iter()
        .map(|record| (key(record), value(record)))
        .collect()
}

/// [`group_serial`] restricted to records matching `filter`
pub fn group_serial_filtered<'a, T, K, V, I, P, KF, VF>(
    records: I,
    filter: P,
    key: KF,
    value: VF,
) -> GroupedStats<K, V>
where
    T: 'a,
    K: Eq + Hash,
    V: Measure,
    I: IntoIterator<Item = &'a T>,
    P: Fn(&T) -> bool,
    KF: Fn(&T) -> K,
    VF: Fn(&T) -> V,
{
    group_serial(matching(records, filter), key, value)
}

/// Group, then reduce each group to a scalar
pub fn aggregate_serial<'a, T, K, V, I, KF, VF>(
    records: I,
    key: KF,
    value: VF,
    reduction: Reduction,
) -> HashMap<K, Decimal>
where
    T: 'a,
    K: Eq + Hash,
    V: Measure,
    I: IntoIterator<Item = &'a T>,
    KF: Fn(&T) -> K,
    VF: Fn(&T) -> V,
{
    group_serial(records, key, value).into_reduced(reduction)
}

/// Ungrouped reduction of `value` over records matching `filter`
pub fn summarize<'a, T, V, I, P, VF>(records: I, filter: P, value: VF) -> Accumulator<V>
where
    T: 'a,
    V: Measure,
    I: IntoIterator<Item = &'a T>,
    P: Fn(&T) -> bool,
    VF: Fn(&T) -> V,
{
    matching(records, filter).map(value).collect()
}

/// Fallible grouped reduction; the first failing function aborts the whole
/// fold and no partial mapping is returned
pub fn try_group_serial<'a, T, K, V, E, I, P, KF, VF>(
    records: I,
    filter: P,
    key: KF,
    value: VF,
) -> Result<GroupedStats<K, V>>
where
    T: 'a,
    K: Eq + Hash,
    V: Measure,
    E: Into<BoxError>,
    I: IntoIterator<Item = &'a T>,
    P: Fn(&T) -> std::result::Result<bool, E>,
    KF: Fn(&T) -> std::result::Result<K, E>,
    VF: Fn(&T) -> std::result::Result<V, E>,
{
    try_fold_from(records, 0, &filter, &key, &value)
}

/// Fold with absolute record indices starting at `offset`
pub(crate) fn try_fold_from<'a, T, K, V, E, I, P, KF, VF>(
    records: I,
    offset: usize,
    filter: &P,
    key: &KF,
    value: &VF,
) -> Result<GroupedStats<K, V>>
where
    T: 'a,
    K: Eq + Hash,
    V: Measure,
    E: Into<BoxError>,
    I: IntoIterator<Item = &'a T>,
    P: Fn(&T) -> std::result::Result<bool, E>,
    KF: Fn(&T) -> std::result::Result<K, E>,
    VF: Fn(&T) -> std::result::Result<V, E>,
{
    let mut stats = GroupedStats::new();
    for (i, record) in records.into_iter().enumerate() {
        let index = offset + i;
        if !filter(record).map_err(|e| AggregateError::user(Stage::Filter, index, e))? {
            continue;
        }
        let k = key(record).map_err(|e| AggregateError::user(Stage::Key, index, e))?;
        let v = value(record).map_err(|e| AggregateError::user(Stage::Value, index, e))?;
        stats.fold(k, v);
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_input() {
        let records: Vec<(char, i64)> = Vec::new();
        let stats = group_serial(&records, |r| r.0, |r| r.1);
        assert!(stats.is_empty());
        assert!(aggregate_serial(&records, |r| r.0, |r| r.1, Reduction::Average).is_empty());
        assert_eq!(summarize(&records, |_| true, |r| r.1).average(), Decimal::ZERO);
    }

    #[test]
    fn test_filtered_grouping() {
        let records = vec![('x', 1i64), ('y', 2), ('x', 3), ('y', 4)];
        let stats = group_serial_filtered(&records, |r| r.1 > 1, |r| r.0, |r| r.1);
        assert_eq!(stats.sum(&'x'), 3);
        assert_eq!(stats.count(&'x'), 1);
        assert_eq!(stats.average(&'y'), dec!(3));
    }

    #[test]
    fn test_try_group_reports_absolute_index() {
        let records = vec![1i64, 2, 3, 4];
        let err = try_group_serial(
            &records,
            |_| Ok(true),
            |r| Ok(r % 2),
            |r| if *r == 4 { Err("no value for 4") } else { Ok(*r) },
        )
        .unwrap_err();

        match err {
            AggregateError::UserFunction { stage, index, .. } => {
                assert_eq!(stage, Stage::Value);
                assert_eq!(index, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_try_group_matches_infallible() {
        let records = vec![('a', 5i64), ('b', 6), ('a', 7)];
        let fallible =
            try_group_serial(&records, |_| Ok::<_, BoxError>(true), |r| Ok(r.0), |r| Ok(r.1))
                .unwrap();
        assert_eq!(fallible, group_serial(&records, |r| r.0, |r| r.1));
    }
}
