//! The simulation event loop.

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use quantsim_core::{
    Broker, ConfigError, Dataset, DatasetError, ExecutionContext, Ledger, SimulationError,
    Strategy,
};

/// Backtest configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestConfig {
    /// Initial capital, must be positive
    pub initial_capital: Decimal,
    /// Commission per share, must be non-negative
    pub commission_per_share: Decimal,
    /// Slippage in basis points, must be non-negative
    pub slippage_bps: Decimal,
    /// Symbols the run trades; non-empty, no blank entries
    pub symbols: Vec<String>,
    /// Annual risk-free rate used by the performance summary
    pub risk_free_rate: f64,
    /// Annualization factor (252 for daily bars)
    pub periods_per_year: f64,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            initial_capital: dec!(100000),
            commission_per_share: Decimal::ZERO,
            slippage_bps: Decimal::ZERO,
            symbols: vec![],
            risk_free_rate: 0.0,
            periods_per_year: 252.0,
        }
    }
}

impl BacktestConfig {
    /// Validate the configuration; each violation maps to a distinct error.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_capital <= Decimal::ZERO {
            return Err(ConfigError::NonPositiveCapital(self.initial_capital));
        }
        if self.commission_per_share < Decimal::ZERO {
            return Err(ConfigError::NegativeCommission(self.commission_per_share));
        }
        if self.slippage_bps < Decimal::ZERO {
            return Err(ConfigError::NegativeSlippage(self.slippage_bps));
        }
        if self.symbols.is_empty() {
            return Err(ConfigError::EmptySymbolList);
        }
        if self.symbols.iter().any(|s| s.trim().is_empty()) {
            return Err(ConfigError::BlankSymbol);
        }
        Ok(())
    }
}

/// Terminal state of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Termination {
    /// Every time step was visited.
    Completed,
    /// The strategy faulted at `timestamp`; equity history and trades up
    /// to and including the prior step are preserved.
    Aborted { timestamp: i64, reason: String },
}

impl Termination {
    /// True when the run was cut short by a strategy fault.
    pub fn is_aborted(&self) -> bool {
        matches!(self, Termination::Aborted { .. })
    }
}

/// Outcome of one run: the final ledger state plus the terminal state.
#[derive(Debug)]
pub struct BacktestRun {
    pub ledger: Ledger,
    pub termination: Termination,
}

/// Drives one strategy over one dataset.
///
/// Owns the broker for its lifetime and builds a fresh ledger per run.
/// Steps are visited strictly in ascending timestamp order, exactly once:
/// each step's outcome can depend on the cumulative ledger and strategy
/// state of all prior steps, so ordering is a correctness invariant.
pub struct Backtester {
    config: BacktestConfig,
    dataset: Dataset,
    broker: Broker,
}

impl Backtester {
    /// Validate configuration and dataset, then build the engine.
    pub fn new(dataset: Dataset, config: BacktestConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        if dataset.is_empty() {
            return Err(DatasetError::Empty.into());
        }
        let broker = Broker::new(config.commission_per_share, config.slippage_bps)?;
        Ok(Self {
            config,
            dataset,
            broker,
        })
    }

    /// The configuration this engine was built with.
    pub fn config(&self) -> &BacktestConfig {
        &self.config
    }

    /// The dataset this engine iterates.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Run the simulation to completion or to the first strategy fault.
    ///
    /// Per step: invoke the strategy, then record equity at that step's
    /// closing prices. A fault aborts immediately; the faulted step's
    /// equity is not recorded and no step is ever retried.
    pub fn run(&self, strategy: &mut dyn Strategy) -> BacktestRun {
        let mut ledger = Ledger::new(self.config.initial_capital);

        info!(
            strategy = strategy.name(),
            steps = self.dataset.len(),
            "starting backtest"
        );

        for (timestamp, bars) in self.dataset.steps() {
            let mut ctx = ExecutionContext::new(&mut ledger, &self.broker, timestamp);
            if let Err(fault) = strategy.on_bar(timestamp, bars, &mut ctx) {
                error!(%fault, timestamp, "strategy fault, aborting run");
                return BacktestRun {
                    ledger,
                    termination: Termination::Aborted {
                        timestamp,
                        reason: fault.to_string(),
                    },
                };
            }

            let prices: HashMap<String, Decimal> = bars
                .iter()
                .filter_map(|(symbol, bar)| {
                    Decimal::try_from(bar.close)
                        .ok()
                        .map(|price| (symbol.to_string(), price))
                })
                .collect();
            ledger.record_equity(timestamp, &prices);
        }

        info!(
            trades = ledger.trades().len(),
            final_cash = %ledger.cash(),
            "backtest completed"
        );
        BacktestRun {
            ledger,
            termination: Termination::Completed,
        }
    }
}
