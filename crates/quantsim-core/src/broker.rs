//! Order execution model: reference price in, applied fill out.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::{ConfigError, OrderError};
use crate::ledger::{ApplyOutcome, Ledger};
use crate::types::{Fill, Side};

/// Pure transformation from an order request to a fill.
///
/// Slippage and commission-per-share are immutable configuration fixed at
/// construction. Each executed order is applied to the ledger before
/// returning; the returned fill reflects the computed values even when the
/// ledger rejects the application, so callers must check the returned
/// [`ApplyOutcome`] rather than re-derive it from the fill.
#[derive(Debug, Clone)]
pub struct Broker {
    commission_per_share: Decimal,
    slippage_bps: Decimal,
}

impl Broker {
    /// Create a broker. Negative commission or slippage is rejected.
    pub fn new(commission_per_share: Decimal, slippage_bps: Decimal) -> Result<Self, ConfigError> {
        if commission_per_share < Decimal::ZERO {
            return Err(ConfigError::NegativeCommission(commission_per_share));
        }
        if slippage_bps < Decimal::ZERO {
            return Err(ConfigError::NegativeSlippage(slippage_bps));
        }
        Ok(Self {
            commission_per_share,
            slippage_bps,
        })
    }

    /// Commission charged per share.
    pub fn commission_per_share(&self) -> Decimal {
        self.commission_per_share
    }

    /// Slippage in basis points.
    pub fn slippage_bps(&self) -> Decimal {
        self.slippage_bps
    }

    /// Execute an order against the ledger.
    ///
    /// Buys fill at `reference × (1 + slippage_bps/10000)`, sells at
    /// `reference × (1 − slippage_bps/10000)`; commission is
    /// `quantity × commission_per_share`.
    pub fn execute(
        &self,
        ledger: &mut Ledger,
        timestamp: i64,
        symbol: &str,
        side: Side,
        quantity: Decimal,
        reference_price: Decimal,
    ) -> Result<(Fill, ApplyOutcome), OrderError> {
        if quantity < Decimal::ZERO {
            return Err(OrderError::NegativeQuantity(quantity));
        }
        if reference_price < Decimal::ZERO {
            return Err(OrderError::NegativePrice(reference_price));
        }

        let slippage_factor = self.slippage_bps / dec!(10000);
        let fill_price = match side {
            Side::Buy => reference_price * (Decimal::ONE + slippage_factor),
            Side::Sell => reference_price * (Decimal::ONE - slippage_factor),
        };
        let commission = quantity * self.commission_per_share;

        let fill = Fill {
            timestamp,
            symbol: symbol.to_string(),
            side,
            quantity,
            fill_price,
            commission,
            realized_pnl: Decimal::ZERO,
        };
        Ok(ledger.apply(fill))
    }
}

/// Per-step view handed to a strategy: read access to the ledger plus order
/// routing through the broker. Strategies never mutate the ledger directly.
pub struct ExecutionContext<'a> {
    ledger: &'a mut Ledger,
    broker: &'a Broker,
    timestamp: i64,
}

impl<'a> ExecutionContext<'a> {
    /// Create the context for one time step.
    pub fn new(ledger: &'a mut Ledger, broker: &'a Broker, timestamp: i64) -> Self {
        Self {
            ledger,
            broker,
            timestamp,
        }
    }

    /// Timestamp of the current step.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Current cash balance.
    pub fn cash(&self) -> Decimal {
        self.ledger.cash()
    }

    /// Held quantity for a symbol; zero when unheld.
    pub fn position_quantity(&self, symbol: &str) -> Decimal {
        self.ledger.position_quantity(symbol)
    }

    /// Check whether a symbol is currently held.
    pub fn has_position(&self, symbol: &str) -> bool {
        self.ledger.has_position(symbol)
    }

    /// Commission the broker will charge per share.
    pub fn commission_per_share(&self) -> Decimal {
        self.broker.commission_per_share()
    }

    /// Submit an order at the current step's timestamp.
    pub fn order(
        &mut self,
        symbol: &str,
        side: Side,
        quantity: Decimal,
        reference_price: Decimal,
    ) -> Result<(Fill, ApplyOutcome), OrderError> {
        self.broker.execute(
            self.ledger,
            self.timestamp,
            symbol,
            side,
            quantity,
            reference_price,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_rejects_negatives() {
        assert_eq!(
            Broker::new(dec!(-0.01), Decimal::ZERO).unwrap_err(),
            ConfigError::NegativeCommission(dec!(-0.01))
        );
        assert_eq!(
            Broker::new(Decimal::ZERO, dec!(-1)).unwrap_err(),
            ConfigError::NegativeSlippage(dec!(-1))
        );
        assert!(Broker::new(Decimal::ZERO, Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_slippage_raises_buys_and_lowers_sells() {
        // 10 bps on a 100.00 reference
        let broker = Broker::new(Decimal::ZERO, dec!(10)).unwrap();
        let mut ledger = Ledger::new(dec!(10000));

        let (buy, _) = broker
            .execute(&mut ledger, 0, "AAPL", Side::Buy, dec!(1), dec!(100))
            .unwrap();
        assert_eq!(buy.fill_price, dec!(100.10));

        let (sell, _) = broker
            .execute(&mut ledger, 1, "AAPL", Side::Sell, dec!(1), dec!(100))
            .unwrap();
        assert_eq!(sell.fill_price, dec!(99.90));
    }

    #[test]
    fn test_commission_scales_with_quantity() {
        let broker = Broker::new(dec!(0.05), Decimal::ZERO).unwrap();
        let mut ledger = Ledger::new(dec!(10000));

        let (fill, outcome) = broker
            .execute(&mut ledger, 0, "AAPL", Side::Buy, dec!(20), dec!(100))
            .unwrap();
        assert_eq!(fill.commission, dec!(1));
        assert_eq!(outcome, ApplyOutcome::Applied);
        assert_eq!(ledger.cash(), dec!(10000) - dec!(2000) - dec!(1));
    }

    #[test]
    fn test_invalid_orders_rejected() {
        let broker = Broker::new(Decimal::ZERO, Decimal::ZERO).unwrap();
        let mut ledger = Ledger::new(dec!(10000));

        let err = broker
            .execute(&mut ledger, 0, "AAPL", Side::Buy, dec!(-1), dec!(100))
            .unwrap_err();
        assert_eq!(err, OrderError::NegativeQuantity(dec!(-1)));

        let err = broker
            .execute(&mut ledger, 0, "AAPL", Side::Buy, dec!(1), dec!(-100))
            .unwrap_err();
        assert_eq!(err, OrderError::NegativePrice(dec!(-100)));

        // nothing reached the ledger
        assert!(ledger.trades().is_empty());
        assert_eq!(ledger.cash(), dec!(10000));
    }

    #[test]
    fn test_rejected_sell_returns_computed_fill() {
        let broker = Broker::new(dec!(0.01), dec!(10)).unwrap();
        let mut ledger = Ledger::new(dec!(10000));

        let (fill, outcome) = broker
            .execute(&mut ledger, 0, "AAPL", Side::Sell, dec!(5), dec!(100))
            .unwrap();
        assert_eq!(outcome, ApplyOutcome::InsufficientPosition);
        // the fill still carries the computed price and commission
        assert_eq!(fill.fill_price, dec!(99.90));
        assert_eq!(fill.commission, dec!(0.05));
        assert!(ledger.trades().is_empty());
    }

    #[test]
    fn test_context_routes_orders_and_reads() {
        let broker = Broker::new(Decimal::ZERO, Decimal::ZERO).unwrap();
        let mut ledger = Ledger::new(dec!(1000));

        let mut ctx = ExecutionContext::new(&mut ledger, &broker, 42);
        assert_eq!(ctx.timestamp(), 42);
        assert_eq!(ctx.cash(), dec!(1000));
        assert!(!ctx.has_position("AAPL"));

        let (fill, outcome) = ctx.order("AAPL", Side::Buy, dec!(2), dec!(100)).unwrap();
        assert_eq!(fill.timestamp, 42);
        assert_eq!(outcome, ApplyOutcome::Applied);
        assert_eq!(ctx.cash(), dec!(800));
        assert_eq!(ctx.position_quantity("AAPL"), dec!(2));
    }
}
