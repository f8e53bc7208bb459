//! Clock abstraction
//!
//! Every date-dependent computation takes "now" as an explicit argument.
//! A [`Clock`] supplies that value at the outer call site: [`SystemClock`]
//! reads the wall clock, [`FixedClock`] pins it for tests and replays.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Source of the current instant
pub trait Clock {
    /// Current instant in UTC
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a given instant
///
/// # Example
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use tour_pricing_core::{Clock, FixedClock};
///
/// let start = Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap();
/// let mut clock = FixedClock::new(start);
/// assert_eq!(clock.now(), start);
///
/// clock.advance(Duration::days(2));
/// assert_eq!(clock.now(), start + Duration::days(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }

    /// Move the frozen instant forward (or backward for negative durations)
    pub fn advance(&mut self, by: Duration) {
        self.instant += by;
    }

    pub fn set(&mut self, instant: DateTime<Utc>) {
        self.instant = instant;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixed_clock_is_stable() {
        let instant = Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap();
        let clock = FixedClock::new(instant);
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn test_fixed_clock_set_and_rewind() {
        let instant = Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap();
        let mut clock = FixedClock::new(instant);
        clock.advance(Duration::hours(-3));
        assert_eq!(clock.now(), instant - Duration::hours(3));

        clock.set(instant);
        assert_eq!(clock.now(), instant);
    }

    #[test]
    fn test_system_clock_moves_forward() {
        let a = SystemClock.now();
        let b = SystemClock.now();
        assert!(b >= a);
    }
}
