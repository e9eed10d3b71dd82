//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the `LESSONFORGE`
//! prefix and nested sections use `__` as separator.
//!
//! # Example
//!
//! ```no_run
//! use lessonforge::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod error;
mod membership;
mod storage;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use membership::MembershipConfig;
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Membership gating (trial length, premium duration)
    #[serde(default)]
    pub membership: MembershipConfig,

    /// AI generation service (Gemini)
    #[serde(default)]
    pub ai: AiConfig,

    /// Local storage (membership record location)
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` if present, then reads environment variables with the
    /// `LESSONFORGE` prefix, `__` separating nested values:
    ///
    /// - `LESSONFORGE__MEMBERSHIP__TRIAL_LENGTH_DAYS=3`
    /// - `LESSONFORGE__AI__GEMINI_API_KEY=...`
    /// - `LESSONFORGE__STORAGE__DATA_DIR=./data`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("LESSONFORGE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.membership.validate()?;
        self.ai.validate()?;
        self.storage.validate()?;
        Ok(())
    }
}
