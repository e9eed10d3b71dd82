//! Clock adapters.
//!
//! `SystemClock` for production, `FixedClock` for deterministic tests of the
//! expiry state machine.

use std::sync::Mutex;

use crate::domain::foundation::Timestamp;
use crate::ports::Clock;

/// Wall-clock time.
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Settable clock for tests. Time only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<Timestamp>,
}

impl FixedClock {
    /// Creates a clock frozen at the given instant.
    pub fn at(now: Timestamp) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Moves the clock forward by whole days.
    pub fn advance_days(&self, days: i64) {
        let mut now = self.now.lock().expect("clock lock");
        *now = now.add_days(days);
    }

    /// Moves the clock forward by hours.
    pub fn advance_hours(&self, hours: i64) {
        let mut now = self.now.lock().expect("clock lock");
        *now = now.add_hours(hours);
    }

    /// Jumps the clock to an absolute instant.
    pub fn set(&self, now: Timestamp) {
        *self.now.lock().expect("clock lock") = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        *self.now.lock().expect("clock lock")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_tracks_wall_time() {
        let clock = SystemClock::new();
        let before = Timestamp::now();
        let now = clock.now();
        assert!(!now.is_before(&before));
    }

    #[test]
    fn fixed_clock_stays_put_until_advanced() {
        let start = Timestamp::from_unix_secs(1_700_000_000);
        let clock = FixedClock::at(start);
        assert_eq!(clock.now(), start);
        assert_eq!(clock.now(), start);

        clock.advance_days(2);
        assert_eq!(clock.now(), start.add_days(2));

        clock.advance_hours(3);
        assert_eq!(clock.now(), start.add_days(2).add_hours(3));
    }

    #[test]
    fn fixed_clock_can_jump() {
        let clock = FixedClock::at(Timestamp::from_unix_secs(0));
        let target = Timestamp::from_unix_secs(1_700_000_000);
        clock.set(target);
        assert_eq!(clock.now(), target);
    }
}
