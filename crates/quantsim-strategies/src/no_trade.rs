//! Benchmark strategy that never trades.

use quantsim_core::{ExecutionContext, StepBars, Strategy, StrategyError};

/// Holds cash for the entire run. Useful as a baseline and for exercising
/// engine mechanics without any order flow.
#[derive(Debug, Default)]
pub struct NoTradeStrategy;

impl Strategy for NoTradeStrategy {
    fn name(&self) -> &str {
        "No Trade"
    }

    fn description(&self) -> &str {
        "Performs no trades; equity stays at initial capital"
    }

    fn on_bar(
        &mut self,
        _timestamp: i64,
        _bars: &StepBars,
        _ctx: &mut ExecutionContext<'_>,
    ) -> Result<(), StrategyError> {
        Ok(())
    }
}
