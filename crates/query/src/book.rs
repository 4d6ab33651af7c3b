//! Order-specific query conveniences

use athena_core::Order;
use rust_decimal::Decimal;

use crate::matching::{count_matching_with, project_matching};

/// Count orders where `predicate(order, fee)` holds
pub fn count_matching_with_fee<'a, I, P>(orders: I, predicate: P) -> usize
where
    I: IntoIterator<Item = &'a Order>,
    P: Fn(&Order, Decimal) -> bool,
{
    count_matching_with(orders, |order: &Order| order.fee, predicate)
}

/// Audit lines for every order matching `predicate`, in book order
pub fn audit_matching<'a, I, P>(orders: I, predicate: P) -> Vec<String>
where
    I: IntoIterator<Item = &'a Order>,
    P: Fn(&Order) -> bool,
{
    project_matching(orders, predicate, Order::audit_details)
}
