use crate::model::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const LISTINGS_URL: &str = "https://lm-models.s3.ir-thr-at1.arvanstorage.ir/cars.json";
pub const MARKET_PRICES_URL: &str = "https://lm-models.s3.ir-thr-at1.arvanstorage.ir/market_prices.json";
pub const CURRENCY_URL: &str = "https://baha24.com/api/v1/price";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub listings_url: String,
    pub market_prices_url: String,
    pub currency_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            listings_url: LISTINGS_URL.to_string(),
            market_prices_url: MARKET_PRICES_URL.to_string(),
            currency_url: CURRENCY_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoints: Endpoints,
    pub output_path: String,
    pub fetch_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            output_path: "cars_data.json".to_string(),
            fetch_timeout_secs: 30,
        }
    }
}

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}

/// Loads `path` when it exists, otherwise the built-in defaults are used.
pub fn load_config_or_default(path: &str) -> Result<AppConfig, ConfigError> {
    if Path::new(path).exists() {
        load_config(path)
    } else {
        Ok(AppConfig::default())
    }
}
