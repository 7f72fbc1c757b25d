use std::env;
use std::path::PathBuf;

use anyhow::Context;

use crate::models::DiscountStrategy;

pub const DEFAULT_DISCOUNT_RATE: f64 = 0.1;

#[derive(Debug, Clone)]
pub struct Config {
    /// `None` runs the shop without a discount.
    pub discount_rate: Option<f64>,
    pub catalog_path: Option<PathBuf>,
    pub log_level: String,
    pub environment: String,
}

impl Config {
    /// Loads `env_file` (or `.env` when present), then reads the process
    /// environment. Call [`Config::validate`] once command line overrides are
    /// applied.
    pub fn load(env_file: Option<&str>) -> anyhow::Result<Self> {
        match env_file {
            Some(path) => {
                dotenv::from_path(path)
                    .with_context(|| format!("Failed to load environment file {}", path))?;
            }
            None => {
                dotenv::dotenv().ok();
            }
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Config {
            discount_rate: parse_discount_rate(lookup("CART_DISCOUNT_RATE"))?,
            catalog_path: lookup("CART_CATALOG_PATH")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            log_level: lookup("LOG_LEVEL").unwrap_or("info".to_string()),
            environment: lookup("APP_ENV").unwrap_or("development".to_string()),
        };

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if let Some(rate) = self.discount_rate {
            DiscountStrategy::percentage(rate)?;
        }

        if let Some(path) = &self.catalog_path {
            if !path.is_file() {
                return Err(anyhow::anyhow!(
                    "CART_CATALOG_PATH does not point to a file: {}",
                    path.display()
                ));
            }
        }

        if self.log_level.trim().is_empty() {
            return Err(anyhow::anyhow!("LOG_LEVEL must not be empty"));
        }

        Ok(())
    }

    pub fn discount_strategy(&self) -> anyhow::Result<DiscountStrategy> {
        Ok(DiscountStrategy::from_rate(self.discount_rate)?)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            discount_rate: Some(DEFAULT_DISCOUNT_RATE),
            catalog_path: None,
            log_level: "info".to_string(),
            environment: "development".to_string(),
        }
    }
}

fn parse_discount_rate(raw: Option<String>) -> anyhow::Result<Option<f64>> {
    let Some(raw) = raw else {
        return Ok(Some(DEFAULT_DISCOUNT_RATE));
    };

    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("none") || raw.eq_ignore_ascii_case("off") {
        return Ok(None);
    }

    let rate = raw
        .parse::<f64>()
        .with_context(|| format!("CART_DISCOUNT_RATE must be a number, got '{}'", raw))?;
    Ok(Some(rate))
}
