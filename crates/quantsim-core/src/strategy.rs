//! Strategy trait: the polymorphism contract for decision rules.

use crate::broker::ExecutionContext;
use crate::error::StrategyError;
use crate::types::StepBars;

/// A trading decision rule driven by the simulation engine.
///
/// Implementations differ only in internal state and decision logic, never
/// in the contract: `on_bar` is invoked exactly once per time step,
/// synchronously, with all symbols' bars for that step presented together.
/// Strategy-private state persists across steps for the lifetime of one
/// run; resetting means constructing a new instance.
pub trait Strategy: Send {
    /// Stable display name of this strategy.
    fn name(&self) -> &str;

    /// Decide on one time step.
    ///
    /// The strategy may read ledger state and submit zero or more orders
    /// through the context; it cannot mutate the ledger directly. A
    /// returned error is a strategy fault: the engine aborts the run at
    /// this step boundary and preserves history up to the prior step.
    fn on_bar(
        &mut self,
        timestamp: i64,
        bars: &StepBars,
        ctx: &mut ExecutionContext<'_>,
    ) -> Result<(), StrategyError>;

    /// One-line description for listings.
    fn description(&self) -> &str {
        ""
    }
}
