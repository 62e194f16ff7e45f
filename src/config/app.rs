//! Main application configuration
//!
//! This module defines the top-level configuration for the waitlist engine
//! host, including environment variable loading, TOML files and validation.

use crate::matching::MatchingConfig;
use crate::turnover::TurnoverConfig;
use crate::wait_time::EstimatorConfig;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub estimator: EstimatorConfig,
    pub matching: MatchingConfig,
    pub turnover: TurnoverConfig,
}

/// Service-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging and metrics
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "waitlist-engine".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Overwrite `target` with the parsed value of `name`, if it is set
fn env_override<T: FromStr>(target: &mut T, name: &str) -> Result<()> {
    if let Ok(raw) = env::var(name) {
        *target = raw
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid {} value: {}", name, raw))?;
    }
    Ok(())
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        // Service settings
        env_override(&mut config.service.name, "SERVICE_NAME")?;
        env_override(&mut config.service.log_level, "LOG_LEVEL")?;

        // Estimator settings
        let estimator = &mut config.estimator;
        env_override(&mut estimator.similarity_band, "ESTIMATOR_SIMILARITY_BAND")?;
        env_override(&mut estimator.no_capacity_minutes, "ESTIMATOR_NO_CAPACITY_MINUTES")?;
        env_override(&mut estimator.arrival_lead_minutes, "ESTIMATOR_ARRIVAL_LEAD_MINUTES")?;
        env_override(
            &mut estimator.high_confidence_max_queue,
            "ESTIMATOR_HIGH_CONFIDENCE_MAX_QUEUE",
        )?;
        env_override(&mut estimator.utc_offset_minutes, "ESTIMATOR_UTC_OFFSET_MINUTES")?;

        // Matching settings
        env_override(
            &mut config.matching.optimal_wasted_seats,
            "MATCHING_OPTIMAL_WASTED_SEATS",
        )?;
        env_override(
            &mut config.matching.default_turnover_minutes,
            "MATCHING_DEFAULT_TURNOVER_MINUTES",
        )?;

        // Turnover settings
        let turnover = &mut config.turnover;
        env_override(&mut turnover.min_valid_gap_minutes, "TURNOVER_MIN_VALID_GAP_MINUTES")?;
        env_override(&mut turnover.max_valid_gap_minutes, "TURNOVER_MAX_VALID_GAP_MINUTES")?;
        env_override(
            &mut turnover.high_confidence_samples,
            "TURNOVER_HIGH_CONFIDENCE_SAMPLES",
        )?;
        env_override(
            &mut turnover.medium_confidence_samples,
            "TURNOVER_MEDIUM_CONFIDENCE_SAMPLES",
        )?;
        env_override(
            &mut turnover.adjustment_threshold_percent,
            "TURNOVER_ADJUSTMENT_THRESHOLD_PERCENT",
        )?;

        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&raw)
            .with_context(|| format!("Failed to load config file {}", path.display()))
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        validate_config(&config)?;
        Ok(config)
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }

    config.estimator.validate()?;
    config.matching.validate()?;
    config.turnover.validate()?;

    Ok(())
}
