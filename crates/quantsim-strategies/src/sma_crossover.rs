//! Simple moving average crossover strategy.
//!
//! Buys when the short SMA crosses above the long SMA and sells the whole
//! position when it crosses back below. Signals fire on the transition
//! only, never on level: a short SMA that stays above the long SMA for a
//! hundred steps produces one buy, not a hundred.

use std::collections::VecDeque;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use quantsim_core::{ExecutionContext, Side, StepBars, Strategy, StrategyError};

/// Configuration for the SMA crossover strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmaCrossoverConfig {
    /// Symbol to trade
    #[serde(default)]
    pub symbol: String,
    /// Short moving average window
    #[serde(default = "default_short_window")]
    pub short_window: usize,
    /// Long moving average window
    #[serde(default = "default_long_window")]
    pub long_window: usize,
}

fn default_short_window() -> usize {
    50
}

fn default_long_window() -> usize {
    200
}

impl Default for SmaCrossoverConfig {
    fn default() -> Self {
        Self {
            symbol: String::new(),
            short_window: default_short_window(),
            long_window: default_long_window(),
        }
    }
}

impl SmaCrossoverConfig {
    pub fn validate(&self) -> Result<(), StrategyError> {
        if self.symbol.trim().is_empty() {
            return Err(StrategyError::InvalidConfig(
                "A target symbol is required".into(),
            ));
        }
        if self.short_window == 0 || self.long_window == 0 {
            return Err(StrategyError::InvalidConfig(
                "SMA window periods must be positive".into(),
            ));
        }
        if self.short_window >= self.long_window {
            return Err(StrategyError::InvalidConfig(
                "Short window must be less than long window".into(),
            ));
        }
        Ok(())
    }
}

/// SMA crossover with edge-triggered entries and exits.
pub struct SmaCrossoverStrategy {
    config: SmaCrossoverConfig,
    window: VecDeque<f64>,
    prev_short: Option<f64>,
    prev_long: Option<f64>,
    in_market: bool,
}

impl SmaCrossoverStrategy {
    pub fn new(config: SmaCrossoverConfig) -> Self {
        let capacity = config.long_window;
        Self {
            config,
            window: VecDeque::with_capacity(capacity),
            prev_short: None,
            prev_long: None,
            in_market: false,
        }
    }

    fn mean_of_last(&self, n: usize) -> f64 {
        let len = self.window.len();
        self.window.iter().skip(len - n).sum::<f64>() / n as f64
    }
}

impl Strategy for SmaCrossoverStrategy {
    fn name(&self) -> &str {
        "SMA Crossover"
    }

    fn description(&self) -> &str {
        "Trades short/long simple moving average crossovers"
    }

    fn on_bar(
        &mut self,
        timestamp: i64,
        bars: &StepBars,
        ctx: &mut ExecutionContext<'_>,
    ) -> Result<(), StrategyError> {
        let Some(close) = bars.close(&self.config.symbol) else {
            return Ok(());
        };
        if !close.is_finite() || close <= 0.0 {
            debug!(symbol = %self.config.symbol, close, "skipping invalid price");
            return Ok(());
        }

        self.window.push_back(close);
        if self.window.len() > self.config.long_window {
            self.window.pop_front();
        }
        if self.window.len() < self.config.long_window {
            return Ok(());
        }

        let short_sma = self.mean_of_last(self.config.short_window);
        let long_sma = self.mean_of_last(self.config.long_window);
        let price = Decimal::try_from(close)
            .map_err(|e| StrategyError::Fault(e.to_string()))?;

        // signal on the transition only
        if short_sma > long_sma
            && matches!((self.prev_short, self.prev_long), (Some(s), Some(l)) if s <= l)
        {
            if !self.in_market {
                // reserve 0.5% headroom for slippage and commission
                let shares = (ctx.cash() / (price * dec!(1.005))).floor();
                if shares > Decimal::ZERO {
                    ctx.order(&self.config.symbol, Side::Buy, shares, price)?;
                    self.in_market = true;
                    debug!(symbol = %self.config.symbol, timestamp, %shares, "bullish crossover");
                }
            }
        } else if long_sma > short_sma
            && matches!((self.prev_short, self.prev_long), (Some(s), Some(l)) if l <= s)
            && self.in_market
        {
            let shares = ctx.position_quantity(&self.config.symbol);
            if shares > Decimal::ZERO {
                ctx.order(&self.config.symbol, Side::Sell, shares, price)?;
            }
            self.in_market = false;
            debug!(symbol = %self.config.symbol, timestamp, %shares, "bearish crossover");
        }

        self.prev_short = Some(short_sma);
        self.prev_long = Some(long_sma);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quantsim_core::{Bar, Broker, Ledger};

    fn step(timestamp: i64, close: f64) -> StepBars {
        [(
            "TEST".to_string(),
            Bar::new(timestamp, close, close + 1.0, close - 1.0, close, 1000.0),
        )]
        .into_iter()
        .collect()
    }

    fn drive(strategy: &mut SmaCrossoverStrategy, ledger: &mut Ledger, prices: &[f64]) {
        let broker = Broker::new(Decimal::ZERO, Decimal::ZERO).unwrap();
        for (i, &price) in prices.iter().enumerate() {
            let ts = i as i64;
            let bars = step(ts, price);
            let mut ctx = ExecutionContext::new(ledger, &broker, ts);
            strategy.on_bar(ts, &bars, &mut ctx).unwrap();
        }
    }

    fn short_config() -> SmaCrossoverConfig {
        SmaCrossoverConfig {
            symbol: "TEST".to_string(),
            short_window: 2,
            long_window: 3,
        }
    }

    #[test]
    fn test_config_validation() {
        assert!(short_config().validate().is_ok());

        let mut config = short_config();
        config.short_window = 3;
        assert!(config.validate().is_err());

        let mut config = short_config();
        config.long_window = 0;
        assert!(config.validate().is_err());

        let mut config = short_config();
        config.symbol = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_no_signal_before_window_full() {
        let mut strategy = SmaCrossoverStrategy::new(short_config());
        let mut ledger = Ledger::new(dec!(10000));
        drive(&mut strategy, &mut ledger, &[10.0, 12.0]);
        assert!(ledger.trades().is_empty());
    }

    #[test]
    fn test_bullish_then_bearish_crossover() {
        let mut strategy = SmaCrossoverStrategy::new(short_config());
        let mut ledger = Ledger::new(dec!(10000));

        // downtrend fills the window with short below long, the jump to 12
        // crosses it above (buy), the drop to 7 crosses it back (sell)
        drive(&mut strategy, &mut ledger, &[10.0, 9.0, 8.0, 12.0, 11.0, 7.0]);

        let trades = ledger.trades();
        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].side, Side::Buy);
        assert_eq!(trades[1].side, Side::Sell);
        // all-in sizing with 0.5% headroom: floor(10000 / (12 * 1.005))
        assert_eq!(trades[0].quantity, dec!(829));
        // the exit flattens the position completely
        assert_eq!(trades[1].quantity, dec!(829));
        assert!(!ledger.has_position("TEST"));
    }

    #[test]
    fn test_level_above_does_not_retrigger() {
        let mut strategy = SmaCrossoverStrategy::new(short_config());
        let mut ledger = Ledger::new(dec!(10000));

        // one crossover followed by a sustained uptrend
        drive(
            &mut strategy,
            &mut ledger,
            &[10.0, 9.0, 8.0, 12.0, 13.0, 14.0, 15.0, 16.0],
        );

        // a single buy despite the short SMA staying above for many steps
        assert_eq!(ledger.trades().len(), 1);
    }

    #[test]
    fn test_flat_series_never_trades() {
        let mut strategy = SmaCrossoverStrategy::new(short_config());
        let mut ledger = Ledger::new(dec!(10000));
        drive(&mut strategy, &mut ledger, &[10.0; 20]);
        assert!(ledger.trades().is_empty());
    }
}
