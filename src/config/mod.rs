//! Configuration module - environment variable parsing

use std::env;
use std::str::FromStr;

/// Demo runner configuration loaded from environment variables.
///
/// Grapple tuning (pull speed, arrival radius, strafe factor) is fixed by
/// design and lives as constants next to the resolver, not here.
#[derive(Clone, Debug)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Number of simulated players in the demo scenario
    pub demo_players: u32,
    /// How many ticks the demo session runs
    pub demo_ticks: u64,
    /// Seed for the scripted scenario
    pub demo_seed: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),

            demo_players: parse_var("DEMO_PLAYERS", 4)?,
            demo_ticks: parse_var("DEMO_TICKS", 640)?,
            demo_seed: parse_var("DEMO_SEED", 1)?,
        })
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid(name)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
