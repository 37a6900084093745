//! Configuration structures.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub backtest: BacktestSettings,
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "quantsim".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

/// Backtest defaults, overridable per run from the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestSettings {
    pub default_capital: Decimal,
    pub commission_per_share: Decimal,
    pub slippage_bps: Decimal,
    pub risk_free_rate: f64,
    pub periods_per_year: f64,
}

impl Default for BacktestSettings {
    fn default() -> Self {
        use rust_decimal_macros::dec;
        Self {
            default_capital: dec!(100000),
            commission_per_share: Decimal::ZERO,
            slippage_bps: Decimal::ZERO,
            risk_free_rate: 0.0,
            periods_per_year: 252.0,
        }
    }
}
