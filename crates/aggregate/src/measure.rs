//! Numeric values that can be summed and averaged

use rust_decimal::Decimal;
use std::fmt::Debug;

/// A value extracted from a record for reduction.
///
/// Values are folded into a running [`Measure::Total`], which for integers is
/// a 128-bit type so that summing any realistic number of records cannot
/// overflow. `combine` must be associative and commutative with `ZERO` as
/// identity. Decimal sums are exact while they fit in Decimal's 96-bit
/// mantissa.
pub trait Measure: Copy + Send + Sync + Debug + PartialEq + 'static {
    type Total: Copy + Send + Sync + Debug + PartialEq + 'static;

    const ZERO: Self::Total;

    /// Fold one value into a running total
    fn accumulate(total: Self::Total, value: Self) -> Self::Total;

    /// Sum two running totals
    fn combine(left: Self::Total, right: Self::Total) -> Self::Total;

    fn to_decimal(total: Self::Total) -> Decimal;
}

/// Integer totals beyond Decimal's range clamp to its bounds
fn signed_to_decimal(total: i128) -> Decimal {
    Decimal::try_from_i128_with_scale(total, 0).unwrap_or(if total < 0 {
        Decimal::MIN
    } else {
        Decimal::MAX
    })
}

fn unsigned_to_decimal(total: u128) -> Decimal {
    i128::try_from(total).map_or(Decimal::MAX, signed_to_decimal)
}

macro_rules! impl_measure_int {
    ($($t:ty => $wide:ty, $to_decimal:ident);* $(;)?) => {
        $(
            impl Measure for $t {
                type Total = $wide;

                const ZERO: $wide = 0;

                #[inline]
                fn accumulate(total: $wide, value: Self) -> $wide {
                    total + <$wide>::from(value)
                }

                #[inline]
                fn combine(left: $wide, right: $wide) -> $wide {
                    left + right
                }

                #[inline]
                fn to_decimal(total: $wide) -> Decimal {
                    $to_decimal(total)
                }
            }
        )*
    };
}

impl_measure_int!(
    i32 => i128, signed_to_decimal;
    i64 => i128, signed_to_decimal;
    u32 => u128, unsigned_to_decimal;
    u64 => u128, unsigned_to_decimal;
);

impl Measure for Decimal {
    type Total = Decimal;

    const ZERO: Decimal = Decimal::ZERO;

    #[inline]
    fn accumulate(total: Decimal, value: Self) -> Decimal {
        total + value
    }

    #[inline]
    fn combine(left: Decimal, right: Decimal) -> Decimal {
        left + right
    }

    #[inline]
    fn to_decimal(total: Decimal) -> Decimal {
        total
    }
}
