//! Mock lesson generator for testing.
//!
//! Configurable implementation of the LessonGenerator port so tests run
//! without calling the real Gemini API.
//!
//! # Features
//!
//! - Pre-configured responses (consumed in order)
//! - Error injection for failure-path testing
//! - Call tracking, so tests can assert the service was never reached
//!
//! # Example
//!
//! ```ignore
//! let generator = MockLessonGenerator::new()
//!     .with_response("Revised lesson plan");
//!
//! let text = generator.generate(&request).await?;
//! assert_eq!(text, "Revised lesson plan");
//! assert_eq!(generator.call_count(), 1);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::domain::generation::GenerationRequest;
use crate::ports::{GeneratorError, LessonGenerator};

/// A configured mock outcome.
#[derive(Debug, Clone)]
enum MockOutcome {
    Success(String),
    Error(MockError),
}

/// Mock error types for testing error handling.
#[derive(Debug, Clone)]
pub enum MockError {
    RateLimited { retry_after_secs: u32 },
    Unavailable { message: String },
    AuthenticationFailed,
    Network { message: String },
}

impl From<MockError> for GeneratorError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited { retry_after_secs } => {
                GeneratorError::rate_limited(retry_after_secs)
            }
            MockError::Unavailable { message } => GeneratorError::unavailable(message),
            MockError::AuthenticationFailed => GeneratorError::AuthenticationFailed,
            MockError::Network { message } => GeneratorError::network(message),
        }
    }
}

/// Mock lesson generator.
///
/// Responses are consumed in order; with no response queued, calls fail with
/// an unavailable error so a test cannot silently pass on an unexpected call.
#[derive(Debug, Clone, Default)]
pub struct MockLessonGenerator {
    outcomes: Arc<Mutex<VecDeque<MockOutcome>>>,
    calls: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl MockLessonGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::Success(text.into()));
        self
    }

    /// Queues an error.
    pub fn with_error(self, error: MockError) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::Error(error));
        self
    }

    /// Number of generate calls received.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Requests received, in call order.
    pub fn calls(&self) -> Vec<GenerationRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LessonGenerator for MockLessonGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GeneratorError> {
        self.calls.lock().unwrap().push(request.clone());

        let outcome = self.outcomes.lock().unwrap().pop_front();
        match outcome {
            Some(MockOutcome::Success(text)) => Ok(text),
            Some(MockOutcome::Error(err)) => Err(err.into()),
            None => Err(GeneratorError::unavailable(
                "no mock response configured".to_string(),
            )),
        }
    }
}
