use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub reorder: ReorderConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct StoreConfig {
    /// Artificial delay applied to every repository call
    #[serde(default)]
    pub latency_ms: u64,
    pub products_seed: Option<String>,
    pub sales_seed: Option<String>,
    pub orders_seed: Option<String>,
}

impl StoreConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

/// Tuning for reorder suggestions. Defaults reproduce the standard policy.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ReorderConfig {
    /// Trailing window of sales history, in days
    pub window_days: u32,
    /// Reorder when stock runs out within this many days
    pub reorder_horizon_days: f64,
    /// Stock-outs within this many days are high priority
    pub urgent_horizon_days: f64,
    /// Days of demand a suggested order should cover
    pub coverage_days: f64,
}

impl Default for ReorderConfig {
    fn default() -> Self {
        Self {
            window_days: 30,
            reorder_horizon_days: 14.0,
            urgent_horizon_days: 7.0,
            coverage_days: 35.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DisplayConfig {
    pub top_suggestions: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { top_suggestions: 6 }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Add in the current environment file
            // Default to 'development' env
            // Note that this file is _optional_
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add in a local configuration file
            // This file shouldn't be checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Eg.. `STOCKWISE__STORE__LATENCY_MS=300` would set `store.latency_ms`
            .add_source(config::Environment::with_prefix("STOCKWISE").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    pub fn from_toml(contents: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(contents, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
