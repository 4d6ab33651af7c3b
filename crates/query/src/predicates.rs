//! Reusable order predicates
//!
//! Plain functions returning closures, so they can be passed anywhere a
//! predicate is expected and combined with [`all_of`], [`any_of`] and [`negate`].

use athena_core::{Market, Order, Side};
use rust_decimal::Decimal;

/// Orders priced at or above `threshold`
pub fn price_at_least(threshold: Decimal) -> impl Fn(&Order) -> bool + Clone + Send + Sync {
    move |order| order.price >= threshold
}

/// Orders whose price plus fee (rounded half-up to 2dp) is at or above `threshold`
pub fn price_with_fee_at_least(threshold: Decimal) -> impl Fn(&Order) -> bool + Clone + Send + Sync {
    move |order| order.price_with_fee() >= threshold
}

/// Orders with an amount at or above `threshold`
pub fn amount_at_least(threshold: Decimal) -> impl Fn(&Order) -> bool + Clone + Send + Sync {
    move |order| order.amount >= threshold
}

pub fn side_is(side: Side) -> impl Fn(&Order) -> bool + Clone + Send + Sync {
    move |order| order.side == side
}

pub fn market_is(market: Market) -> impl Fn(&Order) -> bool + Clone + Send + Sync {
    move |order| order.market == market
}

/// Both predicates hold
pub fn all_of<T, A, B>(a: A, b: B) -> impl Fn(&T) -> bool
where
    T: ?Sized,
    A: Fn(&T) -> bool,
    B: Fn(&T) -> bool,
{
    move |item| a(item) && b(item)
}

/// Either predicate holds
pub fn any_of<T, A, B>(a: A, b: B) -> impl Fn(&T) -> bool
where
    T: ?Sized,
    A: Fn(&T) -> bool,
    B: Fn(&T) -> bool,
{
    move |item| a(item) || b(item)
}

pub fn negate<T, A>(a: A) -> impl Fn(&T) -> bool
where
    T: ?Sized,
    A: Fn(&T) -> bool,
{
    move |item| !a(item)
}
