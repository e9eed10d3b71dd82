//! Membership configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Membership gating configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MembershipConfig {
    /// Length of the free trial, in days
    #[serde(default = "default_trial_length_days")]
    pub trial_length_days: u32,

    /// Standard premium subscription length, in days
    #[serde(default = "default_premium_duration_days")]
    pub premium_duration_days: u32,
}

impl MembershipConfig {
    /// Validate membership configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.trial_length_days == 0 {
            return Err(ValidationError::InvalidTrialLength);
        }
        if self.premium_duration_days == 0 {
            return Err(ValidationError::InvalidPremiumDuration);
        }
        Ok(())
    }
}

impl Default for MembershipConfig {
    fn default() -> Self {
        Self {
            trial_length_days: default_trial_length_days(),
            premium_duration_days: default_premium_duration_days(),
        }
    }
}

fn default_trial_length_days() -> u32 {
    3
}

fn default_premium_duration_days() -> u32 {
    365
}
