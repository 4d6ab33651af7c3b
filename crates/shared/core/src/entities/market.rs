use serde::{Deserialize, Serialize};
use std::fmt;

/// Fiat market an order was placed on.
///
/// Only used as a grouping dimension; no ordering between markets is implied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Market {
    Eur,
    Usd,
    Cny,
    Gbp,
    Jpy,
}

impl Market {
    pub fn as_str(&self) -> &'static str {
        match self {
            Market::Eur => "EUR",
            Market::Usd => "USD",
            Market::Cny => "CNY",
            Market::Gbp => "GBP",
            Market::Jpy => "JPY",
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
