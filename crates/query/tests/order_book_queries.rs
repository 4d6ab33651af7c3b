//! Integration test: queries over small order book snapshots
//!
//! Pricing book:
//! 1. EUR BUY  100.00 @ 1.69 fee 0.01
//! 2. USD BUY  200.00 @ 1.70 fee 0.01
//! 3. CNY SELL 250.00 @ 10.58 fee 0.01
//!
//! Trading book is the same except order 2 is USD SELL 201.00.

use athena_core::{Market, Order, Side};
use athena_query::{
    BoxError, Stage, audit_matching, count_matching, count_matching_with_fee, predicates,
    project_matching, try_count_matching,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn pricing_book() -> Vec<Order> {
    vec![
        Order::new(Market::Eur, Side::Buy, dec!(100.00), dec!(1.69), dec!(0.01)),
        Order::new(Market::Usd, Side::Buy, dec!(200.00), dec!(1.70), dec!(0.01)),
        Order::new(Market::Cny, Side::Sell, dec!(250.00), dec!(10.58), dec!(0.01)),
    ]
}

fn order_book() -> Vec<Order> {
    vec![
        Order::new(Market::Eur, Side::Buy, dec!(100.00), dec!(1.69), dec!(0.01)),
        Order::new(Market::Usd, Side::Sell, dec!(201.00), dec!(1.70), dec!(0.01)),
        Order::new(Market::Cny, Side::Sell, dec!(250.00), dec!(10.58), dec!(0.01)),
    ]
}

#[test]
fn test_count_orders_priced_at_or_above_threshold() {
    let _ = env_logger::try_init();
    let book = order_book();

    assert_eq!(count_matching(&book, |o| o.price >= dec!(1.70)), 2);
    assert_eq!(count_matching(&book, predicates::price_at_least(dec!(1.70))), 2);
}

#[test]
fn test_count_sell_orders_priced_at_or_above_threshold() {
    let book = pricing_book();
    assert_eq!(count_matching(&book, |o| o.price >= dec!(1.70)), 2);

    let count = count_matching(&book, |o| o.price >= dec!(1.70) && o.side == Side::Sell);
    assert_eq!(count, 1);

    // Both sells in the trading book clear the threshold
    let combined = predicates::all_of(
        predicates::price_at_least(dec!(1.70)),
        predicates::side_is(Side::Sell),
    );
    assert_eq!(count_matching(&order_book(), combined), 2);
}

#[test]
fn test_fee_aware_predicate_matches_all_orders() {
    let book = pricing_book();

    // 1.69 + 0.01 reaches the threshold once the fee is included
    let count = count_matching_with_fee(&book, |o, fee: Decimal| o.price + fee >= dec!(1.70));
    assert_eq!(count, 3);

    assert_eq!(
        count_matching(&book, predicates::price_with_fee_at_least(dec!(1.70))),
        3
    );
}

#[test]
fn test_audit_details_for_large_sell_orders() {
    let book = order_book();

    let audit = audit_matching(&book, |o| o.side == Side::Sell && o.amount >= dec!(200.00));

    assert_eq!(audit.len(), 2);
    assert!(audit[0].starts_with("market=USD side=SELL amount=201.00"));
    assert!(audit[1].starts_with("market=CNY side=SELL amount=250.00"));
}

#[test]
fn test_no_matches_is_empty_not_error() {
    let book = order_book();

    assert!(audit_matching(&book, |o| o.market == Market::Jpy).is_empty());
    assert_eq!(count_matching(&book, |o| o.price > dec!(1000)), 0);
}

#[test]
fn test_sell_amounts_projection() {
    let book = order_book();

    let amounts = project_matching(&book, |o| o.is_sell(), |o| o.amount);
    assert_eq!(amounts, vec![dec!(201.00), dec!(250.00)]);
}

#[test]
fn test_failing_predicate_aborts_query() {
    let book = order_book();

    let result = try_count_matching(&book, |o| {
        if o.market == Market::Usd {
            Err::<bool, BoxError>("USD pricing unavailable".into())
        } else {
            Ok(true)
        }
    });

    let err = result.unwrap_err();
    assert_eq!(err.stage(), Stage::Predicate);
    assert_eq!(err.index(), 1);
}

proptest! {
    #[test]
    fn prop_count_equals_projection_len(
        values in prop::collection::vec(0i64..1_000, 0..200),
        threshold in 0i64..1_000,
    ) {
        let count = count_matching(&values, |v| *v >= threshold);
        let projected = project_matching(&values, |v| *v >= threshold, |v| *v);
        prop_assert_eq!(count, projected.len());
        prop_assert!(count <= values.len());
    }

    #[test]
    fn prop_projection_preserves_relative_order(
        values in prop::collection::vec(0i64..1_000, 0..200),
        modulus in 1i64..7,
    ) {
        let indexed: Vec<(usize, i64)> = values.iter().copied().enumerate().collect();
        let positions = project_matching(&indexed, |(_, v)| v % modulus == 0, |(i, _)| *i);
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));

        let expected: Vec<i64> = values.iter().copied().filter(|v| v % modulus == 0).collect();
        let projected = project_matching(&values, |v| v % modulus == 0, |v| *v);
        prop_assert_eq!(projected, expected);
    }
}
