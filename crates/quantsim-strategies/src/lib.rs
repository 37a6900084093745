//! Built-in strategies and the strategy registry.
//!
//! Every strategy implements [`quantsim_core::Strategy`] and is constructed
//! through [`StrategyRegistry`] from a JSON configuration. The registry is
//! the only place strategy names are bound to constructors.

mod buy_hold;
mod error_prone;
mod no_trade;
mod registry;
mod rsi;
mod sma_crossover;

pub use buy_hold::{BuyAndHoldConfig, BuyAndHoldStrategy};
pub use error_prone::{ErrorProneConfig, ErrorProneStrategy};
pub use no_trade::NoTradeStrategy;
pub use registry::{StrategyInfo, StrategyRegistry};
pub use rsi::{RsiConfig, RsiStrategy};
pub use sma_crossover::{SmaCrossoverConfig, SmaCrossoverStrategy};
