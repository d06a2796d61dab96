//! Main application configuration
//!
//! This module defines the top-level configuration for the riddle-rating
//! binary, including environment variable and TOML file loading and validation.

use crate::config::rating::RatingConfig;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub rating: RatingConfig,
}

/// Service-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "riddle-rating".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            config.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            config.service.log_level = log_level;
        }

        // Rating settings
        let rating = &mut config.rating;
        for (var, field) in [
            ("RATING_BASE_K", &mut rating.base_k),
            ("RATING_AMPLIFY", &mut rating.amplify),
            ("RATING_DAMPEN", &mut rating.dampen),
            ("RATING_DECAY_STEP", &mut rating.decay_step),
            ("RATING_INACTIVITY_RATE", &mut rating.inactivity_rate),
            ("RATING_EPSILON", &mut rating.epsilon),
            ("RATING_INITIAL_RATING", &mut rating.initial_rating),
            ("RATING_INITIAL_UNCERTAINTY", &mut rating.initial_uncertainty),
            (
                "RATING_DEFAULT_TIME_LIMIT_MINUTES",
                &mut rating.default_time_limit_minutes,
            ),
        ] {
            if let Ok(value) = env::var(var) {
                *field = value
                    .parse()
                    .map_err(|_| anyhow!("Invalid {} value: {}", var, value))?;
            }
        }
        if let Ok(frozen) = env::var("RATING_FROZEN") {
            rating.frozen = frozen
                .parse()
                .map_err(|_| anyhow!("Invalid RATING_FROZEN value: {}", frozen))?;
        }

        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&contents)
    }

    /// Parse configuration from TOML text; missing keys take their defaults
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(contents).map_err(|e| anyhow!("Invalid TOML configuration: {}", e))?;
        validate_config(&config)?;
        Ok(config)
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }

    config.rating.validate()
}
