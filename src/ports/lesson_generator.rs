//! Lesson generator port: the external AI text-generation service.
//!
//! The core treats the service as opaque. Failures are classified for
//! user-facing messaging but all surface through
//! `GenerationFailure::ExternalService`; there is no retry policy at this
//! layer, and no timeout beyond what the adapter configures.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::generation::GenerationRequest;

/// Port for the external generation service.
///
/// `generate` is the orchestrator's sole suspension point. Implementations
/// return raw text; blank output is classified by the orchestrator, not here.
#[async_trait]
pub trait LessonGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GeneratorError>;
}

/// Generation service errors.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// API key missing or rejected.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Rate limited or out of quota.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// Service is down or returned a server error.
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),

    /// Could not parse the service response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The service rejected the request payload.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl GeneratorError {
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true if a later identical attempt could plausibly succeed.
    ///
    /// The core never retries; this classification is for callers.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GeneratorError::RateLimited { .. }
                | GeneratorError::Unavailable(_)
                | GeneratorError::Network(_)
        )
    }
}
