//! Core types and contracts for the simulation engine.
//!
//! This crate provides the foundational building blocks:
//! - Market data types ([`Bar`], [`StepBars`], [`Dataset`])
//! - The cash and position [`Ledger`] with its conservation rules
//! - The order execution model ([`Broker`], [`ExecutionContext`])
//! - The [`Strategy`] trait that decision rules implement
//! - The error taxonomy shared across the workspace

pub mod broker;
pub mod error;
pub mod ledger;
pub mod strategy;
pub mod types;

pub use broker::{Broker, ExecutionContext};
pub use error::{
    ConfigError, DataError, DatasetError, OrderError, SimulationError, StrategyError,
};
pub use ledger::{ApplyOutcome, EquityPoint, Ledger};
pub use strategy::Strategy;
pub use types::{Bar, Dataset, Fill, Position, Side, StepBars};
