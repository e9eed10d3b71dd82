//! Membership-specific error types.

use thiserror::Error;

use crate::domain::foundation::ValidationError;

/// Errors from membership state-changing operations.
///
/// Read paths (status queries) are infallible; these surface only from
/// `start_trial` / `activate_premium` and the initial load.
#[derive(Debug, Error)]
pub enum MembershipError {
    /// The persisted record could not be read or written.
    #[error("membership storage failed: {0}")]
    Infrastructure(String),

    /// An operation was given invalid input.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl MembershipError {
    pub fn infrastructure(message: impl Into<String>) -> Self {
        MembershipError::Infrastructure(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infrastructure_message_mentions_storage() {
        let err = MembershipError::infrastructure("disk full");
        assert!(err.to_string().contains("storage"));
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn validation_error_passes_through() {
        let err: MembershipError = ValidationError::out_of_range("duration_days", 1, 3650, 0).into();
        assert!(err.to_string().contains("duration_days"));
    }
}
