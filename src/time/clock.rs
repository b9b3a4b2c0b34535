//! Clock sources for the defaulting operations.
//!
//! Every operation that substitutes "now" for a missing timestamp reads it
//! through a [`Clock`], so callers and tests can pin the current time.

use crate::time::timestamp::Timestamp;
use chrono::{DateTime, Local, NaiveDateTime};
use std::sync::atomic::{AtomicI64, Ordering};

/// Source of the current time.
///
/// Implementations must be thread-safe and must never return a value
/// earlier than one they returned before.
pub trait Clock: Send + Sync {
    /// Returns the current time at one-second resolution.
    fn now(&self) -> Timestamp;
}

/// Local wall-clock time, made monotonic.
///
/// Every reading takes the current wall clock and clamps it to the latest
/// value already returned. A backwards step (NTP, DST) holds the reported
/// time still until the wall clock catches up; forward steps and suspends
/// show up immediately.
#[derive(Debug)]
pub struct SystemClock {
    last: AtomicI64,
}

impl SystemClock {
    /// A clock that has not reported anything yet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last: AtomicI64::new(i64::MIN),
        }
    }

    fn advance(&self, wall: NaiveDateTime) -> Timestamp {
        let wall = Timestamp::saturating_from_naive(wall);
        let seconds = wall.as_naive().and_utc().timestamp();
        let previous = self.last.fetch_max(seconds, Ordering::AcqRel);
        if previous > seconds {
            DateTime::from_timestamp(previous, 0)
                .map_or(wall, |held| Timestamp::saturating_from_naive(held.naive_utc()))
        } else {
            wall
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SystemClock {
    fn clone(&self) -> Self {
        Self {
            last: AtomicI64::new(self.last.load(Ordering::Acquire)),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        self.advance(Local::now().naive_local())
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(Timestamp);

impl FixedClock {
    /// Creates a clock that always reports `at`.
    #[must_use]
    pub const fn new(at: Timestamp) -> Self {
        Self(at)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let mut previous = clock.now();
        for _ in 0..1000 {
            let current = clock.now();
            assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn test_system_clock_tracks_wall_clock() {
        let clock = SystemClock::new();
        let wall = Timestamp::saturating_from_naive(Local::now().naive_local());
        let drift = clock.now().since(&wall).abs().as_seconds();
        assert!(drift <= 1, "drift was {drift}s");
    }

    fn at(text: &str) -> NaiveDateTime {
        text.parse::<Timestamp>().unwrap().as_naive()
    }

    #[test]
    fn test_system_clock_holds_through_backwards_step() {
        let clock = SystemClock::new();
        assert_eq!(clock.advance(at("2025-01-20T13:00:10")).to_string(), "2025-01-20T13:00:10");
        assert_eq!(clock.advance(at("2025-01-20T12:59:00")).to_string(), "2025-01-20T13:00:10");
        assert_eq!(clock.advance(at("2025-01-20T13:00:11")).to_string(), "2025-01-20T13:00:11");
    }

    #[test]
    fn test_system_clock_follows_forward_step() {
        let clock = SystemClock::new();
        clock.advance(at("2025-01-20T13:00:00"));
        assert_eq!(clock.advance(at("2025-01-20T15:30:00")).to_string(), "2025-01-20T15:30:00");
        assert_eq!(clock.clone().advance(at("2025-01-20T15:00:00")).to_string(), "2025-01-20T15:30:00");
    }

    #[test]
    fn test_fixed_clock() {
        let at: Timestamp = "2025-01-20T13:00:00".parse().unwrap();
        let clock = FixedClock::new(at);
        assert_eq!(clock.now(), at);
        assert_eq!((&clock).now(), at);
        assert_eq!(std::sync::Arc::new(clock).now(), at);
    }
}
