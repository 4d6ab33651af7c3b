//! Running (total, count) pair used during reduction

use rust_decimal::Decimal;

use crate::measure::Measure;

/// Partial reduction state for one group.
///
/// Accumulators form a commutative monoid under [`Accumulator::combine`]
/// with [`Accumulator::new`] as identity, which is what lets partitions be
/// folded independently and merged in any order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accumulator<V: Measure> {
    total: V::Total,
    count: u64,
}

impl<V: Measure> Accumulator<V> {
    pub fn new() -> Self {
        Self {
            total: V::ZERO,
            count: 0,
        }
    }

    /// Fold one value in
    #[inline]
    pub fn fold(&mut self, value: V) {
        self.total = V::accumulate(self.total, value);
        self.count += 1;
    }

    /// Component-wise sum of two accumulators
    #[inline]
    pub fn combine(self, other: Self) -> Self {
        Self {
            total: V::combine(self.total, other.total),
            count: self.count + other.count,
        }
    }

    #[inline]
    pub fn merge(&mut self, other: Self) {
        *self = self.combine(other);
    }

    pub fn total(&self) -> V::Total {
        self.total
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// total / count, or zero for an empty accumulator
    pub fn average(&self) -> Decimal {
        if self.count == 0 {
            return Decimal::ZERO;
        }
        V::to_decimal(self.total) / Decimal::from(self.count)
    }
}

impl<V: Measure> Default for Accumulator<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Measure> Extend<V> for Accumulator<V> {
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        for value in iter {
            self.fold(value);
        }
    }
}

impl<V: Measure> FromIterator<V> for Accumulator<V> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let mut acc = Self::new();
        acc.extend(iter);
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_average_is_zero() {
        let acc = Accumulator::<i64>::new();
        assert!(acc.is_empty());
        assert_eq!(acc.average(), Decimal::ZERO);
    }

    #[test]
    fn test_fold_and_average() {
        let acc: Accumulator<u32> = [4, 2].into_iter().collect();
        assert_eq!(acc.total(), 6);
        assert_eq!(acc.count(), 2);
        assert_eq!(acc.average(), dec!(3.0));
    }

    #[test]
    fn test_average_is_exact_decimal() {
        let acc: Accumulator<i64> = [1, 2].into_iter().collect();
        assert_eq!(acc.average(), dec!(1.5));

        let acc: Accumulator<Decimal> = [dec!(0.1), dec!(0.2)].into_iter().collect();
        assert_eq!(acc.total(), dec!(0.3));
        assert_eq!(acc.average(), dec!(0.15));
    }

    #[test]
    fn test_combine_identity_and_commutativity() {
        let a: Accumulator<i64> = [3, 4].into_iter().collect();
        let b: Accumulator<i64> = [10].into_iter().collect();

        assert_eq!(a.combine(Accumulator::new()), a);
        assert_eq!(Accumulator::new().combine(a), a);
        assert_eq!(a.combine(b), b.combine(a));
        assert_eq!(a.combine(b).total(), 17);
        assert_eq!(a.combine(b).count(), 3);
    }

    #[test]
    fn test_max_counts_sum_without_overflow() {
        let acc: Accumulator<u32> = [u32::MAX, u32::MAX].into_iter().collect();
        assert_eq!(acc.total(), 2 * u128::from(u32::MAX));
        assert_eq!(acc.average(), Decimal::from(u32::MAX));

        let merged = acc.combine(acc);
        assert_eq!(merged.count(), 4);
        assert_eq!(merged.average(), Decimal::from(u32::MAX));
    }
}
