//! Booking service configuration.
//!
//! Configuration is loaded from environment variables with sensible
//! defaults; invalid values fail startup rather than being silently
//! clamped.

use std::collections::HashMap;
use std::env;
use thiserror::Error;

/// Default HTTP bind address.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Default confirmation window length in seconds (1 hour).
///
/// A waitlisted booking offered a freed seat must confirm within this
/// window or the offer lapses.
pub const DEFAULT_CONFIRMATION_WINDOW_SECONDS: u64 = 3600;

/// Booking service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (default: "0.0.0.0:8080").
    pub bind_address: String,

    /// Confirmation window length in seconds (default: 3600).
    pub confirmation_window_seconds: u64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid confirmation window configuration: {0}")]
    InvalidConfirmationWindow(String),
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        // Parse confirmation window with validation
        let confirmation_window_seconds =
            if let Some(value_str) = vars.get("CONFIRMATION_WINDOW_SECONDS") {
                let value: u64 = value_str.parse().map_err(|e| {
                    ConfigError::InvalidConfirmationWindow(format!(
                        "CONFIRMATION_WINDOW_SECONDS must be a valid positive integer, got '{}': {}",
                        value_str, e
                    ))
                })?;

                if value == 0 {
                    return Err(ConfigError::InvalidConfirmationWindow(
                        "CONFIRMATION_WINDOW_SECONDS must be greater than 0".to_string(),
                    ));
                }

                value
            } else {
                DEFAULT_CONFIRMATION_WINDOW_SECONDS
            };

        Ok(Config {
            bind_address,
            confirmation_window_seconds,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            confirmation_window_seconds: DEFAULT_CONFIRMATION_WINDOW_SECONDS,
        }
    }
}
