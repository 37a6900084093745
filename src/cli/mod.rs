//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "quantsim")]
#[command(author, version, about = "Event-driven backtesting engine for trading strategies")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level
    #[arg(short, long, default_value = "info")]
    pub log_level: LogLevel,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a backtest simulation
    Backtest(BacktestArgs),
    /// List available strategies
    Strategies,
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct BacktestArgs {
    /// Strategy to backtest
    #[arg(short, long)]
    pub strategy: String,

    /// Symbols to trade (comma-separated)
    #[arg(short = 'S', long, value_delimiter = ',', required = true)]
    pub symbols: Vec<String>,

    /// Initial capital (defaults from the config file)
    #[arg(long)]
    pub capital: Option<f64>,

    /// Commission per share (defaults from the config file)
    #[arg(long)]
    pub commission: Option<f64>,

    /// Slippage in basis points (defaults from the config file)
    #[arg(long)]
    pub slippage_bps: Option<f64>,

    /// Strategy parameters file (JSON)
    #[arg(long)]
    pub strategy_params: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub output: String,

    /// Save the full report to a file (JSON)
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Data file or directory (CSV)
    #[arg(long)]
    pub data: PathBuf,
}
