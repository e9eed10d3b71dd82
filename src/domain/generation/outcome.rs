//! Generation outcomes and the failure taxonomy.
//!
//! Every `process` call resolves to either a `GeneratedLesson` or exactly one
//! `GenerationFailure` variant. No failure here is fatal to the process; the
//! membership store and caller state stay consistent for a retry.

use thiserror::Error;

use crate::domain::foundation::ValidationError;
use crate::domain::membership::GatingAction;
use crate::ports::GeneratorError;

/// Non-blank generated lesson text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedLesson {
    text: String,
}

impl GeneratedLesson {
    /// Wraps generated text, returning None for blank output. A nominally
    /// successful call with no usable text is not a success.
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            None
        } else {
            Some(Self { text })
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// Why a generation request did not produce a lesson.
#[derive(Debug, Error)]
pub enum GenerationFailure {
    /// The request failed a local precondition. Never reaches the external
    /// service.
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),

    /// Membership policy blocked the request. Not a service failure; the
    /// carried action tells the UI which modal to show.
    #[error("access denied: {}", .0.user_message())]
    AccessDenied(GatingAction),

    /// The outward call itself failed (network, auth, quota). Single attempt
    /// per user action; never retried here.
    #[error("generation service failed: {0}")]
    ExternalService(#[from] GeneratorError),

    /// The call nominally succeeded but returned no usable text.
    #[error("generation service returned an empty result")]
    EmptyResult,
}

impl GenerationFailure {
    /// Actionable message for the user.
    ///
    /// `EmptyResult` reads like a service failure: from the user's side no
    /// output was produced either way.
    pub fn user_message(&self) -> String {
        match self {
            GenerationFailure::Validation(err) => {
                format!("Please fix the request: {}", err)
            }
            GenerationFailure::AccessDenied(action) => action.user_message().to_string(),
            GenerationFailure::ExternalService(err) => {
                format!("The generation service failed: {}. Please try again.", err)
            }
            GenerationFailure::EmptyResult => {
                "The service returned no content. Please try again with a clearer lesson file."
                    .to_string()
            }
        }
    }
}
