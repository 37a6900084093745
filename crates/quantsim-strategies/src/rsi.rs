//! RSI reversal strategy.
//!
//! Uses Wilder's smoothed RSI, computed incrementally: the first `period`
//! price changes seed the average gain and loss with a simple mean, after
//! which each step folds in with weight 1/period. Entries and exits fire
//! on threshold crossings, not on level.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use quantsim_core::{ExecutionContext, Side, StepBars, Strategy, StrategyError};

/// Configuration for the RSI strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RsiConfig {
    /// Symbol to trade
    #[serde(default)]
    pub symbol: String,
    /// Smoothing period
    #[serde(default = "default_period")]
    pub period: usize,
    /// Buy when RSI crosses up through this level
    #[serde(default = "default_oversold")]
    pub oversold: f64,
    /// Sell when RSI crosses down through this level
    #[serde(default = "default_overbought")]
    pub overbought: f64,
}

fn default_period() -> usize {
    14
}

fn default_oversold() -> f64 {
    30.0
}

fn default_overbought() -> f64 {
    70.0
}

impl Default for RsiConfig {
    fn default() -> Self {
        Self {
            symbol: String::new(),
            period: default_period(),
            oversold: default_oversold(),
            overbought: default_overbought(),
        }
    }
}

impl RsiConfig {
    pub fn validate(&self) -> Result<(), StrategyError> {
        if self.symbol.trim().is_empty() {
            return Err(StrategyError::InvalidConfig(
                "A target symbol is required".into(),
            ));
        }
        if self.period == 0 {
            return Err(StrategyError::InvalidConfig(
                "Period must be positive".into(),
            ));
        }
        if self.overbought <= self.oversold {
            return Err(StrategyError::InvalidConfig(
                "Overbought threshold must be greater than oversold threshold".into(),
            ));
        }
        if !(0.0..=100.0).contains(&self.oversold) || !(0.0..=100.0).contains(&self.overbought) {
            return Err(StrategyError::InvalidConfig(
                "Thresholds must lie between 0 and 100".into(),
            ));
        }
        Ok(())
    }
}

/// RSI oversold/overbought reversal trading.
pub struct RsiStrategy {
    config: RsiConfig,
    prev_close: Option<f64>,
    // seeding accumulators for the first `period` changes
    seed_count: usize,
    seed_gain: f64,
    seed_loss: f64,
    avg_gain: Option<f64>,
    avg_loss: Option<f64>,
    prev_rsi: Option<f64>,
    in_market: bool,
}

impl RsiStrategy {
    pub fn new(config: RsiConfig) -> Self {
        Self {
            config,
            prev_close: None,
            seed_count: 0,
            seed_gain: 0.0,
            seed_loss: 0.0,
            avg_gain: None,
            avg_loss: None,
            prev_rsi: None,
            in_market: false,
        }
    }

    /// Fold one price change into the smoothed averages. Returns the
    /// updated (avg_gain, avg_loss) once the seed window is complete.
    fn update_averages(&mut self, change: f64) -> Option<(f64, f64)> {
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);
        let period = self.config.period as f64;

        match (self.avg_gain, self.avg_loss) {
            (Some(g), Some(l)) => {
                let g = (g * (period - 1.0) + gain) / period;
                let l = (l * (period - 1.0) + loss) / period;
                self.avg_gain = Some(g);
                self.avg_loss = Some(l);
                Some((g, l))
            }
            _ => {
                self.seed_gain += gain;
                self.seed_loss += loss;
                self.seed_count += 1;
                if self.seed_count < self.config.period {
                    return None;
                }
                let g = self.seed_gain / period;
                let l = self.seed_loss / period;
                self.avg_gain = Some(g);
                self.avg_loss = Some(l);
                Some((g, l))
            }
        }
    }
}

impl Strategy for RsiStrategy {
    fn name(&self) -> &str {
        "RSI"
    }

    fn description(&self) -> &str {
        "Trades RSI oversold/overbought threshold crossings"
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

        let Some(prev_close) = self.prev_close.replace(close) else {
            return Ok(());
        };
        let Some((avg_gain, avg_loss)) = self.update_averages(close - prev_close) else {
            return Ok(());
        };

        // a dead-flat seed window gives no signal either way
        if avg_gain == 0.0 && avg_loss == 0.0 {
            return Ok(());
        }
        let rsi = if avg_loss == 0.0 {
            100.0
        } else {
            100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
        };

        let price = Decimal::try_from(close)
            .map_err(|e| StrategyError::Fault(e.to_string()))?;

        if rsi > self.config.oversold
            && matches!(self.prev_rsi, Some(prev) if prev <= self.config.oversold)
        {
            if !self.in_market {
                // reserve 0.5% headroom for slippage and commission
                let shares = (ctx.cash() / (price * dec!(1.005))).floor();
                if shares > Decimal::ZERO {
                    ctx.order(&self.config.symbol, Side::Buy, shares, price)?;
                    self.in_market = true;
                    debug!(symbol = %self.config.symbol, timestamp, rsi, "oversold exit, buying");
                }
            }
        } else if rsi < self.config.overbought
            && matches!(self.prev_rsi, Some(prev) if prev >= self.config.overbought)
            && self.in_market
        {
            let shares = ctx.position_quantity(&self.config.symbol);
            if shares > Decimal::ZERO {
                ctx.order(&self.config.symbol, Side::Sell, shares, price)?;
            }
            self.in_market = false;
            debug!(symbol = %self.config.symbol, timestamp, rsi, "overbought exit, selling");
        }

        self.prev_rsi = Some(rsi);
        Ok(())
    }
}
