//! Cash and position ledger for one simulation run.
//!
//! The ledger owns cash and open positions, applies fills, marks open
//! positions to market, and records the trade log and equity curve. It has
//! no dependency on the broker or the engine.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::types::{Fill, Position, Side};

/// One point of the recorded equity curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    /// Total mark-to-market value (cash + positions)
    pub value: Decimal,
}

/// Result of applying a fill to the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplyOutcome {
    /// Trade applied in full.
    Applied,
    /// Buy applied, but it drove cash negative. The trade is not rolled
    /// back; the condition is reported so callers can choose to halt.
    CashDepleted,
    /// Sell exceeded the held quantity or hit an unopened position. The
    /// trade was rejected and the ledger left unchanged.
    InsufficientPosition,
}

impl ApplyOutcome {
    /// True when the ledger rejected the trade without mutation.
    pub fn is_rejected(&self) -> bool {
        matches!(self, ApplyOutcome::InsufficientPosition)
    }
}

/// Cash, open positions, trade log, and equity history for one run.
#[derive(Debug, Clone)]
pub struct Ledger {
    initial_capital: Decimal,
    cash: Decimal,
    positions: HashMap<String, Position>,
    trades: Vec<Fill>,
    equity_curve: Vec<EquityPoint>,
    cash_depletions: u32,
}

impl Ledger {
    /// Create a ledger holding only the initial capital.
    pub fn new(initial_capital: Decimal) -> Self {
        Self {
            initial_capital,
            cash: initial_capital,
            positions: HashMap::new(),
            trades: Vec::new(),
            equity_curve: Vec::new(),
            cash_depletions: 0,
        }
    }

    /// Capital the ledger started with.
    pub fn initial_capital(&self) -> Decimal {
        self.initial_capital
    }

    /// Current cash balance. May be negative after a cash-depleting buy.
    pub fn cash(&self) -> Decimal {
        self.cash
    }

    /// Number of buys that drove cash negative during this run.
    pub fn cash_depletions(&self) -> u32 {
        self.cash_depletions
    }

    /// Open position for a symbol, if held.
    pub fn position(&self, symbol: &str) -> Option<&Position> {
        self.positions.get(symbol)
    }

    /// Held quantity for a symbol; zero when unheld.
    pub fn position_quantity(&self, symbol: &str) -> Decimal {
        self.positions
            .get(symbol)
            .map(|p| p.quantity)
            .unwrap_or(Decimal::ZERO)
    }

    /// Check whether a symbol is currently held.
    pub fn has_position(&self, symbol: &str) -> bool {
        self.positions.contains_key(symbol)
    }

    /// All open positions.
    pub fn positions(&self) -> &HashMap<String, Position> {
        &self.positions
    }

    /// The ordered trade log.
    pub fn trades(&self) -> &[Fill] {
        &self.trades
    }

    /// The ordered equity curve, one point per engine time step.
    pub fn equity_curve(&self) -> &[EquityPoint] {
        &self.equity_curve
    }

    /// Apply a fill and return the fill as applied plus the outcome.
    ///
    /// Buys are always accepted: cash is debited by value plus commission
    /// and the entry price re-averaged, even when the balance goes negative
    /// (reported as [`ApplyOutcome::CashDepleted`], never rolled back).
    /// Sells are rejected without mutation when the symbol is unheld or the
    /// quantity exceeds the held quantity; accepted sells credit proceeds
    /// minus commission plus the realized P&L against the average entry
    /// price. The realized-P&L cash credit is intentional accounting here,
    /// not an oversight; changing it changes simulation results.
    ///
    /// Every accepted trade appends exactly one record to the trade log.
    pub fn apply(&mut self, mut fill: Fill) -> (Fill, ApplyOutcome) {
        let trade_value = fill.quantity * fill.fill_price;

        let outcome = match fill.side {
            Side::Buy => {
                self.cash -= trade_value + fill.commission;

                let position = self
                    .positions
                    .entry(fill.symbol.clone())
                    .or_insert_with(|| Position::new(Decimal::ZERO, fill.fill_price));
                let old_value = position.quantity * position.avg_entry_price;
                let new_quantity = position.quantity + fill.quantity;
                if new_quantity > Decimal::ZERO {
                    position.avg_entry_price = (old_value + trade_value) / new_quantity;
                }
                position.quantity = new_quantity;
                // a position entry never exists with quantity zero
                if new_quantity == Decimal::ZERO {
                    self.positions.remove(&fill.symbol);
                }

                fill.realized_pnl = Decimal::ZERO;

                if self.cash < Decimal::ZERO {
                    self.cash_depletions += 1;
                    warn!(symbol = %fill.symbol, cash = %self.cash, "cash depleted by buy");
                    ApplyOutcome::CashDepleted
                } else {
                    ApplyOutcome::Applied
                }
            }
            Side::Sell => {
                let Some(position) = self.positions.get_mut(&fill.symbol) else {
                    fill.realized_pnl = Decimal::ZERO;
                    return (fill, ApplyOutcome::InsufficientPosition);
                };
                if fill.quantity > position.quantity {
                    fill.realized_pnl = Decimal::ZERO;
                    return (fill, ApplyOutcome::InsufficientPosition);
                }

                // realized against the average entry price, before the
                // quantity is decremented
                let realized = (fill.fill_price - position.avg_entry_price) * fill.quantity;
                self.cash += trade_value - fill.commission;
                self.cash += realized;

                position.quantity -= fill.quantity;
                if position.quantity == Decimal::ZERO {
                    self.positions.remove(&fill.symbol);
                }

                fill.realized_pnl = realized;
                ApplyOutcome::Applied
            }
        };

        self.trades.push(fill.clone());
        (fill, outcome)
    }

    /// Total mark-to-market value: cash plus each held position valued at
    /// the supplied price, falling back to the average entry price when a
    /// price is missing. Never fails.
    pub fn mark_to_market(&self, prices: &HashMap<String, Decimal>) -> Decimal {
        let mut market_value = Decimal::ZERO;
        for (symbol, position) in &self.positions {
            match prices.get(symbol) {
                Some(price) => market_value += position.market_value(*price),
                None => {
                    warn!(%symbol, "no current price available, valuing at average entry price");
                    market_value += position.cost_basis();
                }
            }
        }
        self.cash + market_value
    }

    /// Append one equity point at the given timestamp.
    ///
    /// The engine supplies timestamps in non-decreasing order; the ledger
    /// does not re-sort.
    pub fn record_equity(&mut self, timestamp: i64, prices: &HashMap<String, Decimal>) {
        let value = self.mark_to_market(prices);
        self.equity_curve.push(EquityPoint { timestamp, value });
    }
}
