//! Application configuration loaded from environment variables.
//!
//! Every knob has a default so the server starts with no environment at all;
//! deployments override what they need.

use anyhow::{Context, Result};
use std::env;

/// Tunables for the inventory and reminder calculations.
///
/// These were fixed literals in earlier iterations of the product; they are
/// configuration now so a deployment can tighten or loosen the alerting
/// behaviour without a code change.
#[derive(Debug, Clone)]
pub struct InventoryConfig {
    /// Stock-to-target ratio under which a group counts as low stock.
    pub low_stock_ratio: f64,
    /// Divisor applied to the yearly target to get a monthly average.
    pub monthly_divisor: u32,
    /// Length of the trailing usage window, in days.
    pub usage_window_days: u32,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            low_stock_ratio: 0.30,
            monthly_divisor: 12,
            usage_window_days: 30,
        }
    }
}

/// Top-level server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    pub bind_address: String,
    /// Origin allowed by the CORS layer.
    pub cors_origin: String,
    /// Base URL used when building shareable public profile links.
    pub public_base_url: String,
    pub inventory: InventoryConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
            cors_origin: "http://localhost:8080".to_string(),
            public_base_url: "https://laplapdiaper.app".to_string(),
            inventory: InventoryConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the environment, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        let defaults = AppConfig::default();
        let inventory_defaults = InventoryConfig::default();

        Ok(Self {
            bind_address: env_or("DIAPER_TRACKER_BIND", &defaults.bind_address),
            cors_origin: env_or("DIAPER_TRACKER_CORS_ORIGIN", &defaults.cors_origin),
            public_base_url: env_or("DIAPER_TRACKER_PUBLIC_URL", &defaults.public_base_url),
            inventory: InventoryConfig {
                low_stock_ratio: env_parsed(
                    "DIAPER_TRACKER_LOW_STOCK_RATIO",
                    inventory_defaults.low_stock_ratio,
                )?,
                monthly_divisor: env_parsed(
                    "DIAPER_TRACKER_MONTHLY_DIVISOR",
                    inventory_defaults.monthly_divisor,
                )?,
                usage_window_days: env_parsed(
                    "DIAPER_TRACKER_USAGE_WINDOW_DAYS",
                    inventory_defaults.usage_window_days,
                )?,
            },
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("invalid value for {}: {}", key, raw)),
        Err(_) => Ok(default),
    }
}
