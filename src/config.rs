// Copyright (c) 2025 - Cowboy AI, Inc.
//! Configuration and tracing setup
//!
//! Every setting has a working default; `from_env` overrides individual
//! settings from environment variables.

use thiserror::Error;

/// Default storage limit for event type tags
pub const DEFAULT_MAX_EVENT_TYPE_LEN: usize = 125;

const MAX_EVENT_TYPE_LEN_VAR: &str = "CIM_RESTAURANT_MAX_EVENT_TYPE_LEN";
const LOG_VAR: &str = "CIM_RESTAURANT_LOG";

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Environment variable holds a value that cannot be parsed
    #[error("Invalid value '{value}' for {var}")]
    InvalidValue { var: &'static str, value: String },
}

/// Event storage configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Longest type tag the storage accepts
    pub max_event_type_len: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_event_type_len: DEFAULT_MAX_EVENT_TYPE_LEN,
        }
    }
}

impl StoreConfig {
    /// Load from `CIM_RESTAURANT_MAX_EVENT_TYPE_LEN`, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let max_event_type_len = match lookup(MAX_EVENT_TYPE_LEN_VAR) {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                var: MAX_EVENT_TYPE_LEN_VAR,
                value,
            })?,
            None => DEFAULT_MAX_EVENT_TYPE_LEN,
        };

        Ok(Self { max_event_type_len })
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set
    pub default_filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default_filter: "cim_restaurant=info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Load from `CIM_RESTAURANT_LOG`, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        match lookup(LOG_VAR) {
            Some(filter) if !filter.trim().is_empty() => Self {
                default_filter: filter.trim().to_string(),
            },
            _ => Self::default(),
        }
    }
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` wins over the configured default filter. Calling this more than
/// once is harmless; later calls leave the first subscriber in place.
pub fn init_tracing(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.default_filter));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
