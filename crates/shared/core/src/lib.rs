//! Athena Core Domain
//!
//! Order record types shared by the query and aggregation engines.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod error;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{Market, Order, Side};
pub use error::{OrderError, Result};
pub use values::{Amount, Fee, Price, TradeCount};
