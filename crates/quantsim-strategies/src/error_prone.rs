//! Deliberately faulting strategy for exercising abort handling.

use serde::{Deserialize, Serialize};

use quantsim_core::{ExecutionContext, StepBars, Strategy, StrategyError};

/// Configuration for the error-prone strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorProneConfig {
    /// Number of steps to process before faulting
    #[serde(default = "default_fail_after")]
    pub fail_after: usize,
}

fn default_fail_after() -> usize {
    3
}

impl Default for ErrorProneConfig {
    fn default() -> Self {
        Self {
            fail_after: default_fail_after(),
        }
    }
}

impl ErrorProneConfig {
    pub fn validate(&self) -> Result<(), StrategyError> {
        Ok(())
    }
}

/// Processes `fail_after` steps, then faults on the next one. Exists to
/// test that the engine aborts cleanly and preserves partial results.
pub struct ErrorProneStrategy {
    config: ErrorProneConfig,
    steps_processed: usize,
}

impl ErrorProneStrategy {
    pub fn new(config: ErrorProneConfig) -> Self {
        Self {
            config,
            steps_processed: 0,
        }
    }
}

impl Strategy for ErrorProneStrategy {
    fn name(&self) -> &str {
        "Error Prone"
    }

    fn description(&self) -> &str {
        "Faults deliberately after a fixed number of steps"
    }

    fn on_bar(
        &mut self,
        _timestamp: i64,
        _bars: &StepBars,
        _ctx: &mut ExecutionContext<'_>,
    ) -> Result<(), StrategyError> {
        self.steps_processed += 1;
        if self.steps_processed > self.config.fail_after {
            return Err(StrategyError::Fault("simulated strategy error".into()));
        }
        Ok(())
    }
}
