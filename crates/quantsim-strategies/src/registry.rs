//! Static registry binding strategy names to constructors.
//!
//! Names registered here are stable identifiers: they appear in CLI
//! arguments and saved reports, so renaming one is a breaking change.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use quantsim_core::{Strategy, StrategyError};

use crate::{
    BuyAndHoldConfig, BuyAndHoldStrategy, ErrorProneConfig, ErrorProneStrategy, NoTradeStrategy,
    RsiConfig, RsiStrategy, SmaCrossoverConfig, SmaCrossoverStrategy,
};

/// Information about a registered strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyInfo {
    /// Display name
    pub name: String,
    /// One-line description
    pub description: String,
    /// Default configuration as JSON
    pub default_config: serde_json::Value,
}

/// Registry of the built-in strategies.
pub struct StrategyRegistry {
    strategies: HashMap<String, StrategyInfo>,
}

impl StrategyRegistry {
    /// Create a registry with all built-in strategies.
    pub fn new() -> Self {
        let mut strategies = HashMap::new();

        strategies.insert(
            "no_trade".to_string(),
            StrategyInfo {
                name: "No Trade".to_string(),
                description: "Performs no trades; equity stays at initial capital".to_string(),
                default_config: serde_json::Value::Object(Default::default()),
            },
        );

        strategies.insert(
            "buy_hold".to_string(),
            StrategyInfo {
                name: "Buy and Hold".to_string(),
                description: "Buys a fixed quantity once when affordable, then holds".to_string(),
                default_config: serde_json::to_value(BuyAndHoldConfig::default()).unwrap(),
            },
        );

        strategies.insert(
            "sma_crossover".to_string(),
            StrategyInfo {
                name: "SMA Crossover".to_string(),
                description: "Trades short/long simple moving average crossovers".to_string(),
                default_config: serde_json::to_value(SmaCrossoverConfig::default()).unwrap(),
            },
        );

        strategies.insert(
            "rsi".to_string(),
            StrategyInfo {
                name: "RSI".to_string(),
                description: "Trades RSI oversold/overbought threshold crossings".to_string(),
                default_config: serde_json::to_value(RsiConfig::default()).unwrap(),
            },
        );

        strategies.insert(
            "error_prone".to_string(),
            StrategyInfo {
                name: "Error Prone".to_string(),
                description: "Faults deliberately after a fixed number of steps".to_string(),
                default_config: serde_json::to_value(ErrorProneConfig::default()).unwrap(),
            },
        );

        Self { strategies }
    }

    /// List all available strategies.
    pub fn list(&self) -> Vec<&StrategyInfo> {
        self.strategies.values().collect()
    }

    /// Get strategy info by registry name.
    pub fn get(&self, name: &str) -> Option<&StrategyInfo> {
        self.strategies.get(name)
    }

    /// Check if a strategy exists.
    pub fn exists(&self, name: &str) -> bool {
        self.strategies.contains_key(name)
    }

    /// All registry names.
    pub fn names(&self) -> Vec<&String> {
        self.strategies.keys().collect()
    }

    /// Create a strategy instance from a JSON configuration.
    ///
    /// A configuration without an explicit symbol is bound to the first
    /// entry of `symbols`. Validation runs after that binding, so a
    /// symbol-less config with no symbols available is rejected.
    pub fn create(
        &self,
        name: &str,
        config: serde_json::Value,
        symbols: &[String],
    ) -> Result<Box<dyn Strategy>, StrategyError> {
        match name {
            "no_trade" => Ok(Box::new(NoTradeStrategy)),
            "buy_hold" => {
                let mut config: BuyAndHoldConfig = serde_json::from_value(config)
                    .map_err(|e| StrategyError::InvalidConfig(e.to_string()))?;
                if config.symbol.is_empty() {
                    config.symbol = symbols.first().cloned().unwrap_or_default();
                }
                config.validate()?;
                Ok(Box::new(BuyAndHoldStrategy::new(config)))
            }
            "sma_crossover" => {
                let mut config: SmaCrossoverConfig = serde_json::from_value(config)
                    .map_err(|e| StrategyError::InvalidConfig(e.to_string()))?;
                if config.symbol.is_empty() {
                    config.symbol = symbols.first().cloned().unwrap_or_default();
                }
                config.validate()?;
                Ok(Box::new(SmaCrossoverStrategy::new(config)))
            }
            "rsi" => {
                let mut config: RsiConfig = serde_json::from_value(config)
                    .map_err(|e| StrategyError::InvalidConfig(e.to_string()))?;
                if config.symbol.is_empty() {
                    config.symbol = symbols.first().cloned().unwrap_or_default();
                }
                config.validate()?;
                Ok(Box::new(RsiStrategy::new(config)))
            }
            "error_prone" => {
                let config: ErrorProneConfig = serde_json::from_value(config)
                    .map_err(|e| StrategyError::InvalidConfig(e.to_string()))?;
                config.validate()?;
                Ok(Box::new(ErrorProneStrategy::new(config)))
            }
            _ => Err(StrategyError::NotFound(name.to_string())),
        }
    }

    /// Create a strategy with its default configuration.
    pub fn create_default(
        &self,
        name: &str,
        symbols: &[String],
    ) -> Result<Box<dyn Strategy>, StrategyError> {
        let info = self
            .get(name)
            .ok_or_else(|| StrategyError::NotFound(name.to_string()))?;
        self.create(name, info.default_config.clone(), symbols)
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::new()
    }
}
