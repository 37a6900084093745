//! Order side and fill records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order side (buy or sell).
///
/// The "unknown side" failure mode of a stringly-typed order interface is
/// unrepresentable here by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Get the opposite side.
    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// The realized outcome of an executed order after slippage and commission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    /// Symbol traded
    pub symbol: String,
    /// Buy or sell
    pub side: Side,
    /// Quantity filled
    pub quantity: Decimal,
    /// Execution price after slippage
    pub fill_price: Decimal,
    /// Commission charged
    pub commission: Decimal,
    /// Realized P&L; non-zero only on SELL fills, computed against the
    /// position's average entry price before the quantity is decremented.
    pub realized_pnl: Decimal,
}
