//! Backtesting engine.
//!
//! Drives a [`quantsim_core::Strategy`] over a validated dataset in a
//! single ascending pass, then summarizes the finished equity curve.

mod engine;
pub mod metrics;
mod report;

pub use engine::{BacktestConfig, BacktestRun, Backtester, Termination};
pub use metrics::PerformanceSummary;
pub use report::BacktestReport;
