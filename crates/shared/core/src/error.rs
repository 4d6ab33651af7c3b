//! Order construction errors

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("Order {field} must not be negative: {value}")]
    NegativeValue { field: &'static str, value: Decimal },
}

pub type Result<T> = std::result::Result<T, OrderError>;
