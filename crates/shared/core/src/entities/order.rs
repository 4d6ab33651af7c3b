use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Market, Side};
use crate::error::{OrderError, Result};
use crate::values::{Amount, Fee, Price, TradeCount};

/// A resting order in a snapshot of the book.
///
/// Orders have no persisted identifier; identity is the position in the
/// caller's collection. The engines only ever borrow orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "OrderRecord")]
pub struct Order {
    pub market: Market,
    pub side: Side,
    pub amount: Amount,
    pub price: Price,
    pub fee: Fee,
    /// Filled in by the caller once the order has been worked
    #[serde(default)]
    pub trade_count_to_fill: TradeCount,
}

/// Wire shape of an order, validated into [`Order`] on deserialization
#[derive(Deserialize)]
struct OrderRecord {
    market: Market,
    side: Side,
    amount: Amount,
    price: Price,
    fee: Fee,
    #[serde(default)]
    trade_count_to_fill: TradeCount,
}

impl TryFrom<OrderRecord> for Order {
    type Error = OrderError;

    fn try_from(record: OrderRecord) -> Result<Self> {
        Ok(
            Self::try_new(record.market, record.side, record.amount, record.price, record.fee)?
                .with_trade_count_to_fill(record.trade_count_to_fill),
        )
    }
}

impl Order {
    /// Create an order from already-validated values
    pub fn new(market: Market, side: Side, amount: Amount, price: Price, fee: Fee) -> Self {
        Self {
            market,
            side,
            amount,
            price,
            fee,
            trade_count_to_fill: 0,
        }
    }

    /// Create an order, rejecting negative amount, price or fee
    pub fn try_new(
        market: Market,
        side: Side,
        amount: Amount,
        price: Price,
        fee: Fee,
    ) -> Result<Self> {
        for (field, value) in [("amount", amount), ("price", price), ("fee", fee)] {
            if value.is_sign_negative() && !value.is_zero() {
                return Err(OrderError::NegativeValue { field, value });
            }
        }
        Ok(Self::new(market, side, amount, price, fee))
    }

    /// Builder-style setter for the trade count
    pub fn with_trade_count_to_fill(mut self, count: TradeCount) -> Self {
        self.trade_count_to_fill = count;
        self
    }

    pub fn set_trade_count_to_fill(&mut self, count: TradeCount) {
        self.trade_count_to_fill = count;
    }

    pub fn is_sell(&self) -> bool {
        self.side == Side::Sell
    }

    /// Price including the fee, rounded half-up to 2 decimal places
    pub fn price_with_fee(&self) -> Decimal {
        (self.price + self.fee).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Notional value (amount * price)
    pub fn notional(&self) -> Decimal {
        self.amount * self.price
    }

    /// One-line audit record for this order
    pub fn audit_details(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "market={} side={} amount={} price={} fee={} trades_to_fill={}",
            self.market, self.side, self.amount, self.price, self.fee, self.trade_count_to_fill
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn eur_buy() -> Order {
        Order::new(Market::Eur, Side::Buy, dec!(100.00), dec!(1.69), dec!(0.01))
    }

    #[test]
    fn test_audit_details() {
        let order = eur_buy().with_trade_count_to_fill(3);
        assert_eq!(
            order.audit_details(),
            "market=EUR side=BUY amount=100.00 price=1.69 fee=0.01 trades_to_fill=3"
        );
    }

    #[test]
    fn test_price_with_fee() {
        assert_eq!(eur_buy().price_with_fee(), dec!(1.70));

        let order = Order::new(Market::Usd, Side::Sell, dec!(1), dec!(1.694), dec!(0.001));
        assert_eq!(order.price_with_fee(), dec!(1.70));
    }

    #[test]
    fn test_try_new_rejects_negative() {
        let err = Order::try_new(Market::Usd, Side::Sell, dec!(10), dec!(-1.5), dec!(0))
            .unwrap_err();
        assert_eq!(
            err,
            OrderError::NegativeValue {
                field: "price",
                value: dec!(-1.5)
            }
        );

        assert!(Order::try_new(Market::Usd, Side::Sell, dec!(0), dec!(0), dec!(0)).is_ok());
    }

    #[test]
    fn test_trade_count_setter() {
        let mut order = eur_buy();
        assert_eq!(order.trade_count_to_fill, 0);
        order.set_trade_count_to_fill(4);
        assert_eq!(order.trade_count_to_fill, 4);
    }

    #[test]
    fn test_deserialize_without_trade_count() {
        let json = r#"{"market":"CNY","side":"SELL","amount":"250.00","price":"10.58","fee":"0.01"}"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.market, Market::Cny);
        assert!(order.is_sell());
        assert_eq!(order.price, dec!(10.58));
        assert_eq!(order.trade_count_to_fill, 0);
    }

    #[test]
    fn test_deserialize_rejects_negative_values() {
        let json = r#"{"market":"USD","side":"SELL","amount":"-5","price":"-1.70","fee":"-0.01"}"#;
        let err = serde_json::from_str::<Order>(json).unwrap_err();
        assert!(err.to_string().contains("amount must not be negative"));

        let json = r#"{"market":"USD","side":"SELL","amount":"5","price":"1.70","fee":"-0.01"}"#;
        let err = serde_json::from_str::<Order>(json).unwrap_err();
        assert!(err.to_string().contains("fee must not be negative"));
    }

    #[test]
    fn test_serialize_then_load_keeps_trade_count() {
        let order = eur_buy().with_trade_count_to_fill(3);
        let json = serde_json::to_string(&order).unwrap();
        let loaded: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, order);
    }
}
