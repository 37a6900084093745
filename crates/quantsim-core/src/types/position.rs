//! Open position state.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An open long position in a single symbol.
///
/// A position exists only while its quantity is strictly positive; the
/// ledger removes the entry the moment quantity reaches zero. Short
/// positions are not modeled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Number of units held, always >= 0
    pub quantity: Decimal,
    /// Volume-weighted average entry price
    pub avg_entry_price: Decimal,
}

impl Position {
    /// Create a new position.
    pub fn new(quantity: Decimal, avg_entry_price: Decimal) -> Self {
        Self {
            quantity,
            avg_entry_price,
        }
    }

    /// Market value at the given price.
    pub fn market_value(&self, price: Decimal) -> Decimal {
        self.quantity * price
    }

    /// Cost basis at the average entry price.
    pub fn cost_basis(&self) -> Decimal {
        self.quantity * self.avg_entry_price
    }
}
