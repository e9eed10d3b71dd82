//! Membership record aggregate.
//!
//! The single persisted membership record for this install. All expiry is
//! derived lazily by comparing stored timestamps against an injected "now";
//! nothing here polls or reads the wall clock directly.
//!
//! # Invariants
//!
//! - `trial_started_at` is set exactly once, when the trial track is entered,
//!   and never reset afterwards (no trial-restart abuse).
//! - `premium_expires_at` only moves forward: renewals extend from the current
//!   expiry while it is still in the future (additive stacking).
//! - `days_remaining` is derived, never stored, and always >= 0.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{StateMachine, Timestamp};

use super::MembershipStatus;

/// Persisted membership state. One record per install.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipRecord {
    /// Last persisted status. May be stale until `refresh` is applied.
    pub status: MembershipStatus,

    /// When the trial was started. Set once, immutable thereafter.
    pub trial_started_at: Option<Timestamp>,

    /// When premium access ends. Extended additively on renewal.
    pub premium_expires_at: Option<Timestamp>,
}

impl Default for MembershipRecord {
    fn default() -> Self {
        Self {
            status: MembershipStatus::None,
            trial_started_at: None,
            premium_expires_at: None,
        }
    }
}

/// Effective status with derived remaining time, computed at read time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipSnapshot {
    pub status: MembershipStatus,
    /// Whole 24-hour days remaining, floored. 0 on the last partial day;
    /// access is decided by `status`, never by this display value.
    pub days_remaining: u32,
}

impl MembershipRecord {
    /// Starts the free trial.
    ///
    /// Acts only when the state machine allows `none -> trial`; in every
    /// other state this is an idempotent no-op that never resets the trial
    /// clock. Returns true if the record changed.
    pub fn start_trial(&mut self, now: Timestamp) -> bool {
        if !self.status.can_transition_to(&MembershipStatus::Trial) {
            return false;
        }
        self.status = MembershipStatus::Trial;
        self.trial_started_at = Some(now);
        true
    }

    /// Activates or extends premium access for `duration_days`.
    ///
    /// Valid from any status. If premium time remains, the new period stacks
    /// on top of the current `premium_expires_at`; otherwise it runs from
    /// `now`. Callers validate `duration_days > 0`.
    pub fn activate_premium(&mut self, duration_days: u32, now: Timestamp) {
        let base = match self.premium_expires_at {
            Some(expires) if expires.is_after(&now) => expires,
            _ => now,
        };
        self.premium_expires_at = Some(base.add_days(duration_days as i64));
        self.status = MembershipStatus::Premium;
    }

    /// When the trial window ends, if a trial was ever started.
    pub fn trial_expires_at(&self, trial_length_days: u32) -> Option<Timestamp> {
        self.trial_started_at
            .map(|started| started.add_days(trial_length_days as i64))
    }

    /// Applies lazy expiry against `now`, returning true if the stored
    /// status transitioned.
    ///
    /// A stored `trial` past its window becomes `trial_expired`; a stored
    /// `premium` past its expiry becomes `premium_expired`. Guarded by the
    /// state machine, so expiry can only fire from the matching live state.
    pub fn refresh(&mut self, now: Timestamp, trial_length_days: u32) -> bool {
        if self.status.can_transition_to(&MembershipStatus::TrialExpired) {
            if let Some(expires) = self.trial_expires_at(trial_length_days) {
                if now >= expires {
                    self.status = MembershipStatus::TrialExpired;
                    return true;
                }
            }
        }

        if self
            .status
            .can_transition_to(&MembershipStatus::PremiumExpired)
        {
            if let Some(expires) = self.premium_expires_at {
                if now >= expires {
                    self.status = MembershipStatus::PremiumExpired;
                    return true;
                }
            }
        }

        false
    }

    /// Whole days remaining in the current period, floored, never negative.
    ///
    /// 0 for `none` and both expired states.
    pub fn days_remaining(&self, now: Timestamp, trial_length_days: u32) -> u32 {
        let expires = match self.status {
            MembershipStatus::Trial => self.trial_expires_at(trial_length_days),
            MembershipStatus::Premium => self.premium_expires_at,
            _ => None,
        };

        match expires {
            Some(expires) if expires.is_after(&now) => {
                expires.duration_since(&now).num_days().max(0) as u32
            }
            _ => 0,
        }
    }

    /// Effective status and remaining days. Assumes `refresh` has been
    /// applied for the same `now`.
    pub fn snapshot(&self, now: Timestamp, trial_length_days: u32) -> MembershipSnapshot {
        MembershipSnapshot {
            status: self.status,
            days_remaining: self.days_remaining(now, trial_length_days),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TRIAL_LEN: u32 = 3;

    fn t0() -> Timestamp {
        Timestamp::from_unix_secs(1_700_000_000)
    }

    #[test]
    fn default_record_is_fresh_install() {
        let record = MembershipRecord::default();
        assert_eq!(record.status, MembershipStatus::None);
        assert!(record.trial_started_at.is_none());
        assert!(record.premium_expires_at.is_none());
        assert_eq!(record.days_remaining(t0(), TRIAL_LEN), 0);
    }

    #[test]
    fn start_trial_sets_status_and_clock() {
        let mut record = MembershipRecord::default();
        assert!(record.start_trial(t0()));
        assert_eq!(record.status, MembershipStatus::Trial);
        assert_eq!(record.trial_started_at, Some(t0()));
    }

    #[test]
    fn start_trial_twice_never_resets_clock() {
        let mut record = MembershipRecord::default();
        record.start_trial(t0());

        let changed = record.start_trial(t0().add_days(1));
        assert!(!changed);
        assert_eq!(record.trial_started_at, Some(t0()));
    }

    #[test]
    fn start_trial_noop_after_expiry_and_while_premium() {
        let mut record = MembershipRecord::default();
        record.start_trial(t0());
        record.refresh(t0().add_days(TRIAL_LEN as i64), TRIAL_LEN);
        assert_eq!(record.status, MembershipStatus::TrialExpired);

        assert!(!record.start_trial(t0().add_days(5)));
        assert_eq!(record.trial_started_at, Some(t0()));

        let mut premium = MembershipRecord::default();
        premium.activate_premium(30, t0());
        assert!(!premium.start_trial(t0()));
        assert!(premium.trial_started_at.is_none());
    }

    #[test]
    fn trial_access_until_window_ends() {
        let mut record = MembershipRecord::default();
        record.start_trial(t0());

        let day2 = t0().add_days(2);
        assert!(!record.refresh(day2, TRIAL_LEN));
        assert_eq!(record.status, MembershipStatus::Trial);
        assert_eq!(record.days_remaining(day2, TRIAL_LEN), 1);

        let day3 = t0().add_days(3);
        assert!(record.refresh(day3, TRIAL_LEN));
        assert_eq!(record.status, MembershipStatus::TrialExpired);
        assert_eq!(record.days_remaining(day3, TRIAL_LEN), 0);
    }

    #[test]
    fn trial_last_partial_day_shows_zero_but_is_not_expired() {
        let mut record = MembershipRecord::default();
        record.start_trial(t0());

        // 2 days and 1 hour in: 23 hours remain, floored to 0 days.
        let late = t0().add_days(2).add_hours(1);
        assert!(!record.refresh(late, TRIAL_LEN));
        assert_eq!(record.status, MembershipStatus::Trial);
        assert_eq!(record.days_remaining(late, TRIAL_LEN), 0);
    }

    #[test]
    fn premium_activation_from_expired_trial() {
        let mut record = MembershipRecord::default();
        record.start_trial(t0());
        let later = t0().add_days(10);
        record.refresh(later, TRIAL_LEN);
        assert_eq!(record.status, MembershipStatus::TrialExpired);

        record.activate_premium(365, later);
        assert_eq!(record.status, MembershipStatus::Premium);
        assert_eq!(record.premium_expires_at, Some(later.add_days(365)));
        assert_eq!(record.days_remaining(later, TRIAL_LEN), 365);
        // Trial history is preserved.
        assert_eq!(record.trial_started_at, Some(t0()));
    }

    #[test]
    fn premium_renewal_stacks_on_remaining_time() {
        let mut record = MembershipRecord::default();
        record.activate_premium(30, t0());

        // 10 days in, 20 remain. Renewal extends from the current expiry.
        let now = t0().add_days(10);
        record.activate_premium(365, now);
        assert_eq!(record.premium_expires_at, Some(t0().add_days(30 + 365)));
        assert_eq!(record.days_remaining(now, TRIAL_LEN), 20 + 365);
    }

    #[test]
    fn premium_renewal_after_expiry_runs_from_now() {
        let mut record = MembershipRecord::default();
        record.activate_premium(30, t0());

        let now = t0().add_days(60);
        record.refresh(now, TRIAL_LEN);
        assert_eq!(record.status, MembershipStatus::PremiumExpired);

        record.activate_premium(30, now);
        assert_eq!(record.status, MembershipStatus::Premium);
        assert_eq!(record.premium_expires_at, Some(now.add_days(30)));
    }

    #[test]
    fn premium_expiry_is_lazy() {
        let mut record = MembershipRecord::default();
        record.activate_premium(30, t0());

        let after = t0().add_days(30);
        assert!(record.refresh(after, TRIAL_LEN));
        assert_eq!(record.status, MembershipStatus::PremiumExpired);
        assert_eq!(record.days_remaining(after, TRIAL_LEN), 0);
    }

    #[test]
    fn refresh_is_stable_once_expired() {
        let mut record = MembershipRecord::default();
        record.start_trial(t0());
        let later = t0().add_days(5);
        assert!(record.refresh(later, TRIAL_LEN));
        assert!(!record.refresh(later.add_days(1), TRIAL_LEN));
        assert_eq!(record.status, MembershipStatus::TrialExpired);
    }

    #[test]
    fn snapshot_reflects_status_and_days() {
        let mut record = MembershipRecord::default();
        record.start_trial(t0());
        let snap = record.snapshot(t0(), TRIAL_LEN);
        assert_eq!(snap.status, MembershipStatus::Trial);
        assert_eq!(snap.days_remaining, TRIAL_LEN);
    }

    #[test]
    fn record_roundtrips_through_yaml() {
        let mut record = MembershipRecord::default();
        record.start_trial(t0());
        record.activate_premium(365, t0().add_days(1));

        let yaml = serde_yaml::to_string(&record).unwrap();
        let back: MembershipRecord = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, record);
    }

    proptest! {
        #[test]
        fn premium_stacking_is_additive(d1 in 1u32..1000, d2 in 1u32..1000, offset in 0i64..500) {
            let mut record = MembershipRecord::default();
            record.activate_premium(d1, t0());

            let now = t0().add_days(offset);
            record.refresh(now, TRIAL_LEN);
            record.activate_premium(d2, now);

            let expected = if offset < d1 as i64 {
                // Time remained: d2 stacks on the original expiry.
                t0().add_days(d1 as i64 + d2 as i64)
            } else {
                now.add_days(d2 as i64)
            };
            prop_assert_eq!(record.premium_expires_at, Some(expected));
        }

        #[test]
        fn trial_start_is_immutable_under_repetition(offsets in prop::collection::vec(0i64..100, 1..10)) {
            let mut record = MembershipRecord::default();
            record.start_trial(t0());

            for offset in offsets {
                record.start_trial(t0().add_days(offset));
            }
            prop_assert_eq!(record.trial_started_at, Some(t0()));
        }

        #[test]
        fn days_remaining_zero_exactly_when_expired(hours in 0i64..(1000 * 24)) {
            let mut record = MembershipRecord::default();
            record.activate_premium(30, t0());

            let now = t0().add_hours(hours);
            record.refresh(now, TRIAL_LEN);
            let days = record.days_remaining(now, TRIAL_LEN);

            if hours >= 30 * 24 {
                prop_assert_eq!(record.status, MembershipStatus::PremiumExpired);
                prop_assert_eq!(days, 0);
            } else {
                prop_assert_eq!(record.status, MembershipStatus::Premium);
                prop_assert_eq!(days as i64, (30 * 24 - hours) / 24);
            }
        }
    }
}
