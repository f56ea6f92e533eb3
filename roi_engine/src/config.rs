//! Configuration.
//!
//! [`RoiConfig`] gathers the constants the calculation depends on so
//! they can be varied without touching the engine.  [`ServerConfig`]
//! describes where the HTTP server binds and where it finds optional
//! override files; it is read from the environment.

use crate::booking::BookingPolicyKind;
use crate::error::{Result, RoiError};
use crate::models::ExpenseSchedule;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Multiplier applied to the base nightly rate on peak nights.
pub const DEFAULT_PEAK_PREMIUM: f64 = 1.20;

/// Tunable constants of the ROI calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoiConfig {
    pub peak_premium: f64,
    pub expenses: ExpenseSchedule,
    pub booking_policy: BookingPolicyKind,
}

impl Default for RoiConfig {
    fn default() -> Self {
        Self {
            peak_premium: DEFAULT_PEAK_PREMIUM,
            expenses: ExpenseSchedule::default(),
            booking_policy: BookingPolicyKind::default(),
        }
    }
}

impl RoiConfig {
    /// Read a JSON configuration file.  Fields left out keep their
    /// defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let config: RoiConfig = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.peak_premium.is_finite() || self.peak_premium <= 0.0 {
            return Err(RoiError::Config {
                message: format!("peak_premium must be positive, got {}", self.peak_premium),
            });
        }
        let lines = [
            ("insurance", self.expenses.insurance),
            ("maintenance", self.expenses.maintenance),
            ("utilities", self.expenses.utilities),
            ("cleaning", self.expenses.cleaning),
            ("council_rates", self.expenses.council_rates),
            ("marketing", self.expenses.marketing),
        ];
        if let Some((name, value)) = lines.iter().find(|(_, value)| !value.is_finite()) {
            return Err(RoiError::Config {
                message: format!("expense line {name} is not a number: {value}"),
            });
        }
        Ok(())
    }
}

/// Settings for the HTTP server binary.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// Optional JSON [`RoiConfig`] file.
    pub config_path: Option<PathBuf>,
    /// Optional directory of tier override files.
    pub tier_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            config_path: None,
            tier_dir: None,
        }
    }
}

impl ServerConfig {
    /// Read `ROI_BIND_ADDR`, `ROI_CONFIG_PATH` and `ROI_TIER_DIR`,
    /// after loading a `.env` file if one is present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Self {
            bind_addr: env::var("ROI_BIND_ADDR").unwrap_or(defaults.bind_addr),
            config_path: env::var("ROI_CONFIG_PATH").ok().map(PathBuf::from),
            tier_dir: env::var("ROI_TIER_DIR").ok().map(PathBuf::from),
        }
    }

    /// The calculation constants, from `config_path` if set.
    pub fn roi_config(&self) -> Result<RoiConfig> {
        match &self.config_path {
            Some(path) => RoiConfig::load(path),
            None => Ok(RoiConfig::default()),
        }
    }
}
