//! ISO-8601 timestamp handling.
//!
//! Canonical timestamps are local wall-clock strings of the exact form
//! `YYYY-MM-DDTHH:MM:SS`. This module parses and validates them, fills in
//! the current time where a value is missing, shifts them by hours, minutes
//! and seconds, measures the distance between two of them and compares them
//! within a tolerance.
//!
//! The free functions that need "now" read it from one process-wide
//! [`Timekeeper`] on a monotonic [`SystemClock`].

pub mod clock;
pub mod keeper;
pub mod ops;
pub mod timestamp;
pub mod unit;

use crate::core::Arg;
use crate::error::TimeError;
use std::sync::LazyLock;

pub use clock::{Clock, FixedClock, SystemClock};
pub use keeper::{DEFAULT_TOLERANCE_SECS, Timekeeper};
pub use ops::{
    calculate_duration, confirm_timestamp, date_only_string, decrease, default_duration, format,
    increase, is_valid, validate,
};
pub use timestamp::{CANONICAL_FORMAT, Timestamp};
pub use unit::{DEFAULT_DURATION_MINUTES, Span, TimeUnit, default_duration_in};

static SYSTEM: LazyLock<Timekeeper> = LazyLock::new(Timekeeper::<SystemClock>::system);

/// The process-wide keeper behind the free functions.
#[must_use]
pub fn system() -> &'static Timekeeper {
    &SYSTEM
}

/// Current local time, truncated to whole seconds.
#[must_use]
pub fn now() -> Timestamp {
    SYSTEM.now()
}

/// Current local time in canonical form.
#[must_use]
pub fn now_string() -> String {
    SYSTEM.now_string()
}

/// See [`Timekeeper::parse`].
///
/// ```
/// use isostamp::time::parse;
///
/// assert_eq!(parse("2023-10-01T12:00:00").unwrap().to_string(), "2023-10-01T12:00:00");
/// assert!(parse(None::<&str>).is_ok());
/// assert!(parse(123).is_err());
/// ```
///
/// # Errors
///
/// See [`Timekeeper::parse`].
pub fn parse(text: impl Into<Arg>) -> Result<Timestamp, TimeError> {
    SYSTEM.parse(text)
}

/// See [`Timekeeper::timestamp_or_default`].
///
/// # Errors
///
/// See [`Timekeeper::timestamp_or_default`].
pub fn timestamp_or_default(text: impl Into<Arg>) -> Result<String, TimeError> {
    SYSTEM.timestamp_or_default(text)
}

/// See [`Timekeeper::start_or_default`].
///
/// # Errors
///
/// See [`Timekeeper::start_or_default`].
pub fn start_or_default(text: impl Into<Arg>) -> Result<String, TimeError> {
    SYSTEM.start_or_default(text)
}

/// See [`Timekeeper::stop_or_default`].
///
/// # Errors
///
/// See [`Timekeeper::stop_or_default`].
pub fn stop_or_default(stop: impl Into<Arg>, start: impl Into<Arg>) -> Result<String, TimeError> {
    SYSTEM.stop_or_default(stop, start)
}

/// Current local time in canonical form.
#[must_use]
pub fn default_start_time() -> String {
    SYSTEM.default_start_time()
}

/// See [`Timekeeper::default_stop_time`].
///
/// # Errors
///
/// See [`Timekeeper::default_stop_time`].
pub fn default_stop_time(start: impl Into<Arg>) -> Result<String, TimeError> {
    SYSTEM.default_stop_time(start)
}

/// See [`Timekeeper::approx_equal`].
///
/// # Errors
///
/// See [`Timekeeper::approx_equal_within`].
pub fn approx_equal(a: impl Into<Arg>, b: impl Into<Arg>) -> Result<bool, TimeError> {
    SYSTEM.approx_equal(a, b)
}

/// See [`Timekeeper::approx_equal_within`].
///
/// # Errors
///
/// See [`Timekeeper::approx_equal_within`].
pub fn approx_equal_within(
    a: impl Into<Arg>,
    b: impl Into<Arg>,
    tolerance: impl Into<Arg>,
) -> Result<bool, TimeError> {
    SYSTEM.approx_equal_within(a, b, tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_is_monotonic_and_canonical() {
        let mut previous = now();
        for _ in 0..100 {
            let current = now();
            assert!(current >= previous);
            previous = current;
        }
        assert!(validate(now_string()).unwrap());
    }

    #[test]
    fn test_facade_defaults_are_near_now() {
        let start = default_start_time();
        assert!(approx_equal(start.as_str(), now_string()).unwrap());
        let stop = default_stop_time(Arg::Null).unwrap();
        let minutes = calculate_duration(start.as_str(), stop.as_str(), "minutes").unwrap();
        assert!((minutes - 30.0).abs() <= 1.0 / 60.0 + f64::EPSILON);
    }

    #[test]
    fn test_system_keeper_is_shared() {
        assert!(std::ptr::eq(system(), system()));
    }
}
