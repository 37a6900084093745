//! Configuration management.

mod settings;

pub use settings::{AppConfig, AppSettings, BacktestSettings, LoggingConfig};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Load configuration from file and environment.
///
/// Environment variables prefixed `QUANTSIM__` override file values, with
/// `__` separating nesting levels (`QUANTSIM__LOGGING__LEVEL=debug`).
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(
            Environment::with_prefix("QUANTSIM")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.app.name, "quantsim");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.backtest.default_capital, dec!(100000));
        assert_eq!(config.backtest.periods_per_year, 252.0);
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[logging]\n\
             level = \"debug\"\n\
             format = \"json\"\n\
             \n\
             [backtest]\n\
             default_capital = 50000\n\
             commission_per_share = 0.01\n\
             slippage_bps = 5\n\
             risk_free_rate = 0.02\n\
             periods_per_year = 252.0\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.backtest.default_capital, dec!(50000));
        assert_eq!(config.backtest.slippage_bps, dec!(5));
        // section absent from the file falls back to defaults
        assert_eq!(config.app.name, "quantsim");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load_config(Path::new("/nonexistent/config.toml")).is_err());
    }
}
