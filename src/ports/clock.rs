//! Clock port.
//!
//! All expiry computations go through an injected clock so the membership
//! state machine is deterministic under test. Nothing in the core calls
//! `Timestamp::now()` directly.

use crate::domain::foundation::Timestamp;

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_is_object_safe() {
        fn _accepts_dyn(_clock: &dyn Clock) {}
    }
}
