//! Predicate matching primitives
//!
//! Every query is a single pass over the input in iteration order. The
//! fallible `try_*` variants are fail-fast: the first error aborts the query
//! and nothing computed so far is returned.

use crate::error::{BoxError, QueryError, Result, Stage};

/// Lazily yield the records satisfying `predicate`, in input order
pub fn matching<'a, T, I, P>(records: I, predicate: P) -> impl Iterator<Item = &'a T>
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
    P: Fn(&T) -> bool,
{
    records.into_iter().filter(move |record| predicate(*record))
}

/// Count records for which `predicate` holds, passing each record together
/// with a field pre-extracted by `derive`
pub fn count_matching_with<'a, T, D, I, X, P>(records: I, derive: X, predicate: P) -> usize
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
    X: Fn(&T) -> D,
    P: Fn(&T, D) -> bool,
{
    records
        .into_iter()
        .filter(|record| predicate(*record, derive(*record)))
        .count()
}

/// Count records for which `predicate` holds
pub fn count_matching<'a, T, I, P>(records: I, predicate: P) -> usize
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
    P: Fn(&T) -> bool,
{
    count_matching_with(records, |_| (), |record, ()| predicate(record))
}

/// Project every record for which `predicate` holds, preserving input order
pub fn project_matching<'a, T, R, I, P, F>(records: I, predicate: P, projection: F) -> Vec<R>
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
    P: Fn(&T) -> bool,
    F: Fn(&T) -> R,
{
    matching(records, predicate).map(projection).collect()
}

/// Fallible [`count_matching_with`]
pub fn try_count_matching_with<'a, T, D, E, I, X, P>(
    records: I,
    derive: X,
    predicate: P,
) -> Result<usize>
where
    T: 'a,
    E: Into<BoxError>,
    I: IntoIterator<Item = &'a T>,
    X: Fn(&T) -> std::result::Result<D, E>,
    P: Fn(&T, D) -> std::result::Result<bool, E>,
{
    let mut count = 0;
    for (index, record) in records.into_iter().enumerate() {
        let derived = derive(record).map_err(|e| QueryError::user(Stage::Derive, index, e))?;
        if predicate(record, derived).map_err(|e| QueryError::user(Stage::Predicate, index, e))? {
            count += 1;
        }
    }
    Ok(count)
}

/// Fallible [`count_matching`]
pub fn try_count_matching<'a, T, E, I, P>(records: I, predicate: P) -> Result<usize>
where
    T: 'a,
    E: Into<BoxError>,
    I: IntoIterator<Item = &'a T>,
    P: Fn(&T) -> std::result::Result<bool, E>,
{
    try_count_matching_with(records, |_| Ok(()), |record, ()| predicate(record))
}

/// Fallible [`project_matching`]
pub fn try_project_matching<'a, T, R, E, I, P, F>(
    records: I,
    predicate: P,
    projection: F,
) -> Result<Vec<R>>
where
    T: 'a,
    E: Into<BoxError>,
    I: IntoIterator<Item = &'a T>,
    P: Fn(&T) -> std::result::Result<bool, E>,
    F: Fn(&T) -> std::result::Result<R, E>,
{
    let mut projected = Vec::new();
    for (index, record) in records.into_iter().enumerate() {
        if predicate(record).map_err(|e| QueryError::user(Stage::Predicate, index, e))? {
            projected
                .push(projection(record).map_err(|e| QueryError::user(Stage::Projection, index, e))?);
        }
    }
    Ok(projected)
}
