//! Membership store - the single stateful component of the application layer.
//!
//! Owns the in-memory membership record, refreshes it lazily against the
//! injected clock on every read, and persists through the storage port
//! whenever a state transition fires. Callers never see a stale status.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::MembershipConfig;
use crate::domain::foundation::ValidationError;
use crate::domain::membership::{MembershipError, MembershipRecord, MembershipSnapshot};
use crate::ports::{Clock, MembershipStorage};

/// Upper bound on a single premium purchase, in days. Ten years.
const MAX_PREMIUM_DAYS: u32 = 3650;

/// Stateful membership service over a storage backend and a clock.
pub struct MembershipStore {
    storage: Arc<dyn MembershipStorage>,
    clock: Arc<dyn Clock>,
    config: MembershipConfig,
    record: RwLock<MembershipRecord>,
}

impl MembershipStore {
    /// Creates a store with a fresh-install record. Call `load` before first
    /// use to hydrate from persistence.
    pub fn new(
        storage: Arc<dyn MembershipStorage>,
        clock: Arc<dyn Clock>,
        config: MembershipConfig,
    ) -> Self {
        Self {
            storage,
            clock,
            config,
            record: RwLock::new(MembershipRecord::default()),
        }
    }

    /// Hydrates the record from storage.
    ///
    /// A missing record is the fresh-install state, not an error. Expiry is
    /// applied immediately so a trial that ran out while the app was closed
    /// surfaces as `trial_expired` from the first read.
    pub async fn load(&self) -> Result<MembershipSnapshot, MembershipError> {
        let loaded = self
            .storage
            .load()
            .await
            .map_err(|e| MembershipError::infrastructure(e.to_string()))?
            .unwrap_or_default();

        let mut guard = self.record.write().await;
        *guard = loaded;

        let now = self.clock.now();
        if guard.refresh(now, self.config.trial_length_days) {
            self.persist_best_effort(&guard).await;
        }

        Ok(guard.snapshot(now, self.config.trial_length_days))
    }

    /// Starts the free trial.
    ///
    /// Idempotent: repeated calls, calls after expiry, and calls while
    /// premium never reset the trial clock. The resulting snapshot reflects
    /// whatever state the record settled in.
    pub async fn start_trial(&self) -> Result<MembershipSnapshot, MembershipError> {
        let now = self.clock.now();
        let mut guard = self.record.write().await;

        let mut candidate = guard.clone();
        candidate.refresh(now, self.config.trial_length_days);
        let started = candidate.start_trial(now);

        if candidate != *guard {
            if started {
                self.storage
                    .save(&candidate)
                    .await
                    .map_err(|e| MembershipError::infrastructure(e.to_string()))?;
            } else {
                // Only a lazy expiry fired; losing the write is recoverable.
                self.persist_best_effort(&candidate).await;
            }
            *guard = candidate;
        }

        if started {
            tracing::info!(trial_length_days = self.config.trial_length_days, "Trial started");
        } else {
            tracing::debug!(status = ?guard.status, "Trial start ignored");
        }

        Ok(guard.snapshot(now, self.config.trial_length_days))
    }

    /// Activates or extends premium for `duration_days`.
    ///
    /// Remaining premium time stacks; an expired or absent subscription runs
    /// from now. Zero-length purchases are rejected before any state changes.
    pub async fn activate_premium(
        &self,
        duration_days: u32,
    ) -> Result<MembershipSnapshot, MembershipError> {
        if duration_days == 0 || duration_days > MAX_PREMIUM_DAYS {
            return Err(ValidationError::out_of_range(
                "duration_days",
                1,
                MAX_PREMIUM_DAYS as i32,
                duration_days as i32,
            )
            .into());
        }

        let now = self.clock.now();
        let mut guard = self.record.write().await;

        let mut candidate = guard.clone();
        candidate.refresh(now, self.config.trial_length_days);
        candidate.activate_premium(duration_days, now);

        self.storage
            .save(&candidate)
            .await
            .map_err(|e| MembershipError::infrastructure(e.to_string()))?;
        *guard = candidate;

        tracing::info!(duration_days, expires_at = ?guard.premium_expires_at, "Premium activated");
        Ok(guard.snapshot(now, self.config.trial_length_days))
    }

    /// The effective status right now.
    ///
    /// Infallible: lazy expiry is applied in memory either way, and a failed
    /// persist of the expiry transition is only logged. The next successful
    /// write will store the same derived state.
    pub async fn current_status(&self) -> MembershipSnapshot {
        let now = self.clock.now();

        {
            let guard = self.record.read().await;
            let mut probe = guard.clone();
            if !probe.refresh(now, self.config.trial_length_days) {
                return guard.snapshot(now, self.config.trial_length_days);
            }
        }

        let mut guard = self.record.write().await;
        if guard.refresh(now, self.config.trial_length_days) {
            self.persist_best_effort(&guard).await;
        }
        guard.snapshot(now, self.config.trial_length_days)
    }

    async fn persist_best_effort(&self, record: &MembershipRecord) {
        if let Err(e) = self.storage.save(record).await {
            tracing::warn!(error = %e, "Failed to persist membership transition");
        }
    }
}
