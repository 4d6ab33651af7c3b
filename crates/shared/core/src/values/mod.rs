use rust_decimal::Decimal;

/// Order amount - uses Decimal so threshold comparisons are exact
pub type Amount = Decimal;

/// Limit price - uses Decimal for precision
pub type Price = Decimal;

/// Fee charged on the order
pub type Fee = Decimal;

/// Number of trades it took to fill an order
pub type TradeCount = u32;
