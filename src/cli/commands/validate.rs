//! Validate configuration command.

use anyhow::Result;
use quantsim_config::load_config;
use std::path::Path;

pub fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    match load_config(config_path) {
        Ok(config) => {
            println!("Configuration is valid!");
            println!();
            println!("App: {}", config.app.name);
            println!("Environment: {}", config.app.environment);
            println!("Log level: {}", config.logging.level);
            println!("Default capital: {}", config.backtest.default_capital);
            println!(
                "Commission per share: {}",
                config.backtest.commission_per_share
            );
            println!("Slippage: {} bps", config.backtest.slippage_bps);
            println!("Risk-free rate: {}", config.backtest.risk_free_rate);
        }
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
