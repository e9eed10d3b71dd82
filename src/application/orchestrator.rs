//! Generation orchestrator - one user action end to end.
//!
//! Gates on membership, validates the request, calls the generation service
//! once, and normalizes whatever comes back into a single outcome type. The
//! orchestrator never mutates membership state; a denied request leaves the
//! store exactly as it found it.

use std::sync::Arc;

use crate::domain::generation::{GeneratedLesson, GenerationFailure, GenerationRequest};
use crate::domain::membership::policy;
use crate::ports::LessonGenerator;

use super::MembershipStore;

/// Orchestrates a single generation request.
pub struct GenerationOrchestrator {
    generator: Arc<dyn LessonGenerator>,
}

impl GenerationOrchestrator {
    pub fn new(generator: Arc<dyn LessonGenerator>) -> Self {
        Self { generator }
    }

    /// Processes one request against the current membership state.
    ///
    /// Order matters: the access gate runs first on a freshly refreshed
    /// status, then local validation, and only then the outward call. A
    /// denied or invalid request never reaches the generation service.
    pub async fn process(
        &self,
        request: &GenerationRequest,
        store: &MembershipStore,
    ) -> Result<GeneratedLesson, GenerationFailure> {
        let snapshot = store.current_status().await;
        if !policy::can_access(&snapshot) {
            let action = policy::gating_action(&snapshot);
            tracing::debug!(status = ?snapshot.status, action = ?action, "Generation blocked");
            return Err(GenerationFailure::AccessDenied(action));
        }

        request.validate()?;

        tracing::info!(
            subject = ?request.subject,
            grade = request.grade.value(),
            analyze_only = request.options.analyze_only,
            "Dispatching generation request"
        );

        let text = self.generator.generate(request).await?;

        GeneratedLesson::new(text).ok_or(GenerationFailure::EmptyResult)
    }
}
