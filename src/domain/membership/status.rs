//! Membership status state machine.
//!
//! Two independent monotonic tracks: the trial track
//! (none → trial → trial_expired, never reset) and the premium track
//! (any status → premium → premium_expired → premium again on renewal).
//! A premium activation always wins from any status.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};

/// Membership licensing status.
///
/// This is the *stored* status; expiry is applied lazily at read time, so a
/// stored `Trial` may read as `TrialExpired` (see `MembershipRecord`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipStatus {
    /// Fresh install. Never started a trial, never paid.
    None,

    /// Time-boxed free access. Started once per install, non-renewable.
    Trial,

    /// Trial window has ended. No access until premium activation.
    TrialExpired,

    /// Paid subscription with an expiry timestamp, renewable additively.
    Premium,

    /// Subscription ended. No access until renewal.
    PremiumExpired,
}

impl MembershipStatus {
    /// Returns true if this status grants access to generation.
    ///
    /// Only effective (expiry-refreshed) `Trial` and `Premium` grant access;
    /// `None` and both expired states are denied.
    pub fn has_access(&self) -> bool {
        matches!(self, MembershipStatus::Trial | MembershipStatus::Premium)
    }

}

impl StateMachine for MembershipStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use MembershipStatus::*;
        matches!(
            (self, target),
            // Trial track
            (None, Trial)
                | (Trial, TrialExpired)
            // Premium activation wins from anywhere
                | (None, Premium)
                | (Trial, Premium)
                | (TrialExpired, Premium)
                | (Premium, Premium) // Renewal / extension
                | (PremiumExpired, Premium)
            // Premium expiry
                | (Premium, PremiumExpired)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use MembershipStatus::*;
        match self {
            None => vec![Trial, Premium],
            Trial => vec![TrialExpired, Premium],
            TrialExpired => vec![Premium],
            Premium => vec![Premium, PremiumExpired],
            PremiumExpired => vec![Premium],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [MembershipStatus; 5] = [
        MembershipStatus::None,
        MembershipStatus::Trial,
        MembershipStatus::TrialExpired,
        MembershipStatus::Premium,
        MembershipStatus::PremiumExpired,
    ];

    #[test]
    fn none_can_start_trial() {
        let result = MembershipStatus::None.transition_to(MembershipStatus::Trial);
        assert_eq!(result, Ok(MembershipStatus::Trial));
    }

    #[test]
    fn trial_can_expire() {
        let result = MembershipStatus::Trial.transition_to(MembershipStatus::TrialExpired);
        assert_eq!(result, Ok(MembershipStatus::TrialExpired));
    }

    #[test]
    fn trial_expired_cannot_restart_trial() {
        assert!(!MembershipStatus::TrialExpired.can_transition_to(&MembershipStatus::Trial));
        assert!(!MembershipStatus::TrialExpired.can_transition_to(&MembershipStatus::None));
    }

    #[test]
    fn premium_activation_allowed_from_every_status() {
        for status in ALL {
            assert!(
                status.can_transition_to(&MembershipStatus::Premium),
                "premium should be reachable from {:?}",
                status
            );
        }
    }

    #[test]
    fn premium_can_expire_and_renew() {
        assert!(MembershipStatus::Premium.can_transition_to(&MembershipStatus::PremiumExpired));
        assert!(MembershipStatus::PremiumExpired.can_transition_to(&MembershipStatus::Premium));
    }

    #[test]
    fn has_access_only_for_trial_and_premium() {
        assert!(MembershipStatus::Trial.has_access());
        assert!(MembershipStatus::Premium.has_access());

        assert!(!MembershipStatus::None.has_access());
        assert!(!MembershipStatus::TrialExpired.has_access());
        assert!(!MembershipStatus::PremiumExpired.has_access());
    }

    #[test]
    fn no_status_is_terminal() {
        // Premium activation is always possible, so nothing dead-ends.
        for status in ALL {
            assert!(!status.is_terminal(), "{:?} should not be terminal", status);
        }
    }

    #[test]
    fn valid_transitions_are_consistent_with_can_transition_to() {
        for status in ALL {
            for target in status.valid_transitions() {
                assert!(
                    status.can_transition_to(&target),
                    "can_transition_to should allow {:?} -> {:?}",
                    status,
                    target
                );
            }
        }
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&MembershipStatus::TrialExpired).unwrap();
        assert_eq!(json, "\"trial_expired\"");

        let json = serde_json::to_string(&MembershipStatus::None).unwrap();
        assert_eq!(json, "\"none\"");
    }
}
