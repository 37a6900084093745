//! Backtest command implementation.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::path::Path;
use tracing::info;

use quantsim_backtest::{BacktestConfig, BacktestReport, Backtester};
use quantsim_config::AppConfig;
use quantsim_strategies::StrategyRegistry;

use crate::cli::BacktestArgs;

pub fn run(args: BacktestArgs, config_path: &Path) -> Result<()> {
    info!("Starting backtest for strategy: {}", args.strategy);

    // A missing config file is fine; the CLI works from built-in defaults
    let app_config = if config_path.exists() {
        quantsim_config::load_config(config_path).context("Failed to load configuration")?
    } else {
        AppConfig::default()
    };

    // Create strategy
    let registry = StrategyRegistry::new();
    let params = match &args.strategy_params {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&raw).context("Failed to parse strategy parameters")?
        }
        None => registry
            .get(&args.strategy)
            .map(|info| info.default_config.clone())
            .unwrap_or_default(),
    };
    let mut strategy = registry
        .create(&args.strategy, params, &args.symbols)
        .context("Failed to create strategy")?;

    // Load data
    let dataset = quantsim_data::load_dataset(&args.data, &args.symbols)
        .with_context(|| format!("Failed to load data from {}", args.data.display()))?;

    // Build the run configuration; CLI flags override file defaults
    let defaults = &app_config.backtest;
    let backtest_config = BacktestConfig {
        initial_capital: decimal_arg(args.capital, defaults.default_capital)?,
        commission_per_share: decimal_arg(args.commission, defaults.commission_per_share)?,
        slippage_bps: decimal_arg(args.slippage_bps, defaults.slippage_bps)?,
        symbols: args.symbols.clone(),
        risk_free_rate: defaults.risk_free_rate,
        periods_per_year: defaults.periods_per_year,
    };

    let engine = Backtester::new(dataset, backtest_config)?;
    let run = engine.run(strategy.as_mut());
    let report = BacktestReport::from_run(&run, engine.config());

    match args.output.as_str() {
        "json" => println!("{}", report.to_json()?),
        _ => println!("{}", report.summary_text()),
    }

    if let Some(save_path) = &args.save {
        std::fs::write(save_path, report.to_json()?)?;
        info!("Results saved to {}", save_path.display());
    }

    Ok(())
}

fn decimal_arg(arg: Option<f64>, default: Decimal) -> Result<Decimal> {
    match arg {
        Some(value) => {
            Decimal::try_from(value).with_context(|| format!("Invalid decimal value: {value}"))
        }
        None => Ok(default),
    }
}
