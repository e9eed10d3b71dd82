//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Trial length must be at least 1 day")]
    InvalidTrialLength,

    #[error("Premium duration must be at least 1 day")]
    InvalidPremiumDuration,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Storage data directory must not be empty")]
    InvalidDataDir,

    #[error("Invalid API base URL format")]
    InvalidBaseUrl,
}
