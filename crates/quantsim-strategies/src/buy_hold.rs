//! Buy-and-hold strategy.
//!
//! Buys a fixed quantity of one symbol on the first step it can afford the
//! trade, commission included, then holds to the end of the run.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use quantsim_core::{ExecutionContext, Side, StepBars, Strategy, StrategyError};

/// Configuration for the buy-and-hold strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuyAndHoldConfig {
    /// Symbol to buy
    #[serde(default)]
    pub symbol: String,
    /// Quantity to buy once
    #[serde(default = "default_quantity")]
    pub quantity: Decimal,
}

fn default_quantity() -> Decimal {
    dec!(10)
}

impl Default for BuyAndHoldConfig {
    fn default() -> Self {
        Self {
            symbol: String::new(),
            quantity: default_quantity(),
        }
    }
}

impl BuyAndHoldConfig {
    pub fn validate(&self) -> Result<(), StrategyError> {
        if self.symbol.trim().is_empty() {
            return Err(StrategyError::InvalidConfig(
                "A target symbol is required".into(),
            ));
        }
        if self.quantity <= Decimal::ZERO {
            return Err(StrategyError::InvalidConfig(
                "Quantity must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Buys once, holds forever.
pub struct BuyAndHoldStrategy {
    config: BuyAndHoldConfig,
    bought: bool,
}

impl BuyAndHoldStrategy {
    pub fn new(config: BuyAndHoldConfig) -> Self {
        Self {
            config,
            bought: false,
        }
    }
}

impl Strategy for BuyAndHoldStrategy {
    fn name(&self) -> &str {
        "Buy and Hold"
    }

    fn description(&self) -> &str {
        "Buys a fixed quantity once when affordable, then holds"
    }

    fn on_bar(
        &mut self,
        timestamp: i64,
        bars: &StepBars,
        ctx: &mut ExecutionContext<'_>,
    ) -> Result<(), StrategyError> {
        if self.bought {
            return Ok(());
        }
        let Some(close) = bars.close(&self.config.symbol) else {
            return Ok(());
        };
        if !close.is_finite() || close <= 0.0 {
            debug!(symbol = %self.config.symbol, close, "skipping invalid price");
            return Ok(());
        }
        let price = Decimal::try_from(close)
            .map_err(|e| StrategyError::Fault(e.to_string()))?;

        let cost = price * self.config.quantity + ctx.commission_per_share() * self.config.quantity;
        if ctx.cash() >= cost {
            ctx.order(&self.config.symbol, Side::Buy, self.config.quantity, price)?;
            self.bought = true;
            debug!(symbol = %self.config.symbol, timestamp, "entered hold position");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quantsim_core::{Bar, Broker, Ledger};

    fn step(symbol: &str, timestamp: i64, close: f64) -> StepBars {
        [(
            symbol.to_string(),
            Bar::new(timestamp, close, close + 1.0, close - 1.0, close, 1000.0),
        )]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_config_validation() {
        assert!(BuyAndHoldConfig::default().validate().is_err());

        let config = BuyAndHoldConfig {
            symbol: "AAPL".to_string(),
            quantity: dec!(10),
        };
        assert!(config.validate().is_ok());

        let config = BuyAndHoldConfig {
            symbol: "AAPL".to_string(),
            quantity: Decimal::ZERO,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_buys_exactly_once() {
        let broker = Broker::new(Decimal::ZERO, Decimal::ZERO).unwrap();
        let mut ledger = Ledger::new(dec!(10000));
        let mut strategy = BuyAndHoldStrategy::new(BuyAndHoldConfig {
            symbol: "TEST".to_string(),
            quantity: dec!(10),
        });

        for i in 0..5 {
            let bars = step("TEST", i, 100.0);
            let mut ctx = ExecutionContext::new(&mut ledger, &broker, i);
            strategy.on_bar(i, &bars, &mut ctx).unwrap();
        }

        assert_eq!(ledger.trades().len(), 1);
        assert_eq!(ledger.position_quantity("TEST"), dec!(10));
        assert_eq!(ledger.cash(), dec!(9000));
    }

    #[test]
    fn test_waits_until_affordable() {
        let broker = Broker::new(Decimal::ZERO, Decimal::ZERO).unwrap();
        // cannot afford 10 shares at 100 with 500 in cash
        let mut ledger = Ledger::new(dec!(500));
        let mut strategy = BuyAndHoldStrategy::new(BuyAndHoldConfig {
            symbol: "TEST".to_string(),
            quantity: dec!(10),
        });

        let bars = step("TEST", 0, 100.0);
        let mut ctx = ExecutionContext::new(&mut ledger, &broker, 0);
        strategy.on_bar(0, &bars, &mut ctx).unwrap();
        assert!(ledger.trades().is_empty());

        // price falls within reach
        let bars = step("TEST", 1, 40.0);
        let mut ctx = ExecutionContext::new(&mut ledger, &broker, 1);
        strategy.on_bar(1, &bars, &mut ctx).unwrap();
        assert_eq!(ledger.trades().len(), 1);
        assert_eq!(ledger.cash(), dec!(100));
    }

    #[test]
    fn test_affordability_includes_commission() {
        let broker = Broker::new(dec!(1), Decimal::ZERO).unwrap();
        // 10 shares at 100 plus 10 commission needs 1010
        let mut ledger = Ledger::new(dec!(1005));
        let mut strategy = BuyAndHoldStrategy::new(BuyAndHoldConfig {
            symbol: "TEST".to_string(),
            quantity: dec!(10),
        });

        let bars = step("TEST", 0, 100.0);
        let mut ctx = ExecutionContext::new(&mut ledger, &broker, 0);
        strategy.on_bar(0, &bars, &mut ctx).unwrap();
        assert!(ledger.trades().is_empty());
    }

    #[test]
    fn test_skips_missing_symbol() {
        let broker = Broker::new(Decimal::ZERO, Decimal::ZERO).unwrap();
        let mut ledger = Ledger::new(dec!(10000));
        let mut strategy = BuyAndHoldStrategy::new(BuyAndHoldConfig {
            symbol: "ABSENT".to_string(),
            quantity: dec!(10),
        });

        let bars = step("TEST", 0, 100.0);
        let mut ctx = ExecutionContext::new(&mut ledger, &broker, 0);
        strategy.on_bar(0, &bars, &mut ctx).unwrap();
        assert!(ledger.trades().is_empty());
    }
}
