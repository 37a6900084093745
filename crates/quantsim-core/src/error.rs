//! Error types for the simulation engine.

use rust_decimal::Decimal;
use thiserror::Error;

/// Top-level simulation error.
#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid dataset: {0}")]
    Dataset(#[from] DatasetError),

    #[error("strategy error: {0}")]
    Strategy(#[from] StrategyError),

    #[error("data error: {0}")]
    Data(#[from] DataError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Malformed construction arguments. Always fatal at construction, never
/// recovered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("initial capital must be positive, got {0}")]
    NonPositiveCapital(Decimal),

    #[error("commission per share cannot be negative, got {0}")]
    NegativeCommission(Decimal),

    #[error("slippage basis points cannot be negative, got {0}")]
    NegativeSlippage(Decimal),

    #[error("symbol list must not be empty")]
    EmptySymbolList,

    #[error("symbol list contains a blank symbol")]
    BlankSymbol,
}

/// Malformed or empty input dataset. Fatal at construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DatasetError {
    #[error("dataset contains no bars")]
    Empty,

    #[error("duplicate bar for {symbol} at timestamp {timestamp}")]
    DuplicateBar { symbol: String, timestamp: i64 },

    #[error("non-finite OHLCV field for {symbol} at timestamp {timestamp}")]
    NonFinite { symbol: String, timestamp: i64 },
}

/// Malformed order request. Fatal to that specific order only; the caller
/// decides whether to continue the run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("order quantity cannot be negative, got {0}")]
    NegativeQuantity(Decimal),

    #[error("reference price cannot be negative, got {0}")]
    NegativePrice(Decimal),
}

/// Data source errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("no data available at {0}")]
    NoDataAvailable(String),

    #[error("no data file found for symbol {0}")]
    SymbolNotFound(String),

    #[error("parse error: {0}")]
    ParseError(String),
}

/// Strategy-side failures: bad parameters at construction, or a fault
/// raised while deciding, which aborts the run at the step boundary.
#[derive(Error, Debug)]
pub enum StrategyError {
    #[error("invalid strategy parameters: {0}")]
    InvalidConfig(String),

    #[error("strategy not found: {0}")]
    NotFound(String),

    #[error("order rejected: {0}")]
    Order(#[from] OrderError),

    #[error("strategy fault: {0}")]
    Fault(String),
}
