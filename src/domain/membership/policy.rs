//! Access policy: pure gating decisions over a membership snapshot.
//!
//! The UI layer polls these after any membership-affecting action; nothing
//! here pushes events or performs I/O. Exactly one gating action applies to a
//! given status: `none` asks for the trial modal, expired states ask for the
//! subscription modal, live trial/premium proceed.

use serde::{Deserialize, Serialize};

use super::{MembershipSnapshot, MembershipStatus};

/// What the UI should do before a generation request may proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatingAction {
    /// Access granted; dispatch the request.
    Proceed,
    /// First-time user; offer the free trial.
    ShowTrialModal,
    /// Trial or subscription ran out; offer the paid upgrade.
    ShowSubscriptionModal,
}

impl GatingAction {
    /// User-facing message for the gating decision.
    pub fn user_message(&self) -> &'static str {
        match self {
            GatingAction::Proceed => "Access granted.",
            GatingAction::ShowTrialModal => {
                "Start your free trial to begin generating lesson plans."
            }
            GatingAction::ShowSubscriptionModal => {
                "Your access has expired. Upgrade to Premium to continue."
            }
        }
    }
}

/// True iff the snapshot grants access to generation.
///
/// The snapshot is expiry-refreshed, so `trial`/`premium` here already imply
/// time remaining; a trial on its last partial day (days_remaining rounded
/// down to 0) still counts.
pub fn can_access(snapshot: &MembershipSnapshot) -> bool {
    snapshot.status.has_access()
}

/// True iff the user has never started a trial (fresh install).
pub fn needs_trial_modal(snapshot: &MembershipSnapshot) -> bool {
    snapshot.status == MembershipStatus::None
}

/// True iff a previously granted access window has run out.
pub fn needs_subscription_modal(snapshot: &MembershipSnapshot) -> bool {
    matches!(
        snapshot.status,
        MembershipStatus::TrialExpired | MembershipStatus::PremiumExpired
    )
}

/// The single gating action for this snapshot.
pub fn gating_action(snapshot: &MembershipSnapshot) -> GatingAction {
    if needs_trial_modal(snapshot) {
        GatingAction::ShowTrialModal
    } else if needs_subscription_modal(snapshot) {
        GatingAction::ShowSubscriptionModal
    } else {
        GatingAction::Proceed
    }
}
