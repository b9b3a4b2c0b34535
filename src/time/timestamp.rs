//! Canonical timestamp value.
//!
//! A [`Timestamp`] is a wall-clock date-time with whole-second resolution and
//! no timezone. Its only textual form is `YYYY-MM-DDTHH:MM:SS`, and every
//! value this module accepts formats back to exactly the text it came from.

use crate::error::TimeError;
use crate::time::unit::Span;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, SubsecRound, TimeDelta};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// `chrono` format string of the canonical representation.
pub const CANONICAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// `chrono` format string of the date-only representation.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Smallest representable year (four digits).
pub const MIN_YEAR: i32 = 0;

/// Largest representable year (four digits).
pub const MAX_YEAR: i32 = 9999;

/// A point in time at one-second resolution.
///
/// # Examples
///
/// ```
/// use isostamp::Timestamp;
///
/// let ts: Timestamp = "2025-01-31T23:30:00".parse().unwrap();
/// assert_eq!(ts.to_string(), "2025-01-31T23:30:00");
/// assert_eq!(ts.date_string(), "2025-01-31");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

#[allow(clippy::expect_used)]
fn canonical_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})T([0-9]{2}):([0-9]{2}):([0-9]{2})$")
            .expect("valid regex")
    })
}

impl Timestamp {
    /// Parses the canonical `YYYY-MM-DDTHH:MM:SS` form.
    ///
    /// # Errors
    ///
    /// [`TimeError::Format`] if `text` does not match the pattern, and
    /// [`TimeError::Range`] if it matches but names an impossible calendar
    /// date or clock time.
    pub fn parse(text: &str) -> Result<Self, TimeError> {
        let format_error = || TimeError::Format {
            value: text.to_string(),
        };
        let caps = canonical_pattern()
            .captures(text)
            .ok_or_else(format_error)?;
        let field = |i: usize| caps[i].parse::<u32>().map_err(|_| format_error());

        let year = caps[1].parse::<i32>().map_err(|_| format_error())?;
        let (month, day) = (field(2)?, field(3)?);
        let (hour, minute, second) = (field(4)?, field(5)?, field(6)?);

        let out_of_range = |what: &str| TimeError::range(format!("{what}: '{text}'"));
        if !(1..=12).contains(&month) {
            return Err(out_of_range("month must be in 1..12"));
        }
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| out_of_range("day is out of range for month"))?;
        if hour > 23 {
            return Err(out_of_range("hour must be in 0..23"));
        }
        if minute > 59 {
            return Err(out_of_range("minute must be in 0..59"));
        }
        let time = NaiveTime::from_hms_opt(hour, minute, second)
            .ok_or_else(|| out_of_range("second must be in 0..59"))?;

        Ok(Self(date.and_time(time)))
    }

    /// Wraps a `chrono` date-time, dropping sub-second precision.
    ///
    /// # Errors
    ///
    /// [`TimeError::Range`] if the year has more than four digits or is
    /// negative, since such values have no canonical form.
    pub fn from_naive(naive: NaiveDateTime) -> Result<Self, TimeError> {
        let year = naive.year();
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(TimeError::range(format!(
                "year {year} is out of range {MIN_YEAR}..{MAX_YEAR}"
            )));
        }
        Ok(Self(naive.trunc_subsecs(0)))
    }

    /// Like [`Timestamp::from_naive`] but clamps out-of-range values to the
    /// representable bounds.
    #[must_use]
    pub fn saturating_from_naive(naive: NaiveDateTime) -> Self {
        let lower = NaiveDate::from_ymd_opt(MIN_YEAR, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap_or(NaiveDateTime::MIN);
        let upper = NaiveDate::from_ymd_opt(MAX_YEAR, 12, 31)
            .and_then(|d| d.and_hms_opt(23, 59, 59))
            .unwrap_or(NaiveDateTime::MAX);
        Self(naive.clamp(lower, upper).trunc_subsecs(0))
    }

    /// Returns the underlying `chrono` value.
    #[must_use]
    pub const fn as_naive(&self) -> NaiveDateTime {
        self.0
    }

    /// Renders the `YYYY-MM-DD` date part.
    #[must_use]
    pub fn date_string(&self) -> String {
        self.0.format(DATE_FORMAT).to_string()
    }

    /// Adds a signed span.
    ///
    /// # Errors
    ///
    /// [`TimeError::Range`] if the result leaves the four-digit year range.
    pub fn checked_add(self, span: Span) -> Result<Self, TimeError> {
        let overflow = || TimeError::range(format!("{self} shifted by {span} is out of range"));
        let delta = TimeDelta::try_seconds(span.as_seconds()).ok_or_else(overflow)?;
        let shifted = self.0.checked_add_signed(delta).ok_or_else(overflow)?;
        Self::from_naive(shifted).map_err(|_| overflow())
    }

    /// Subtracts a signed span.
    ///
    /// # Errors
    ///
    /// [`TimeError::Range`] if the result leaves the four-digit year range.
    pub fn checked_sub(self, span: Span) -> Result<Self, TimeError> {
        let negated = span
            .checked_neg()
            .ok_or_else(|| TimeError::range(format!("cannot negate {span}")))?;
        self.checked_add(negated)
    }

    /// Signed span from `earlier` to `self`.
    #[must_use]
    pub fn since(&self, earlier: &Self) -> Span {
        Span::from_seconds((self.0 - earlier.0).num_seconds())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(CANONICAL_FORMAT))
    }
}

impl FromStr for Timestamp {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Timestamp {
    type Error = TimeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<NaiveDateTime> for Timestamp {
    type Error = TimeError;

    fn try_from(value: NaiveDateTime) -> Result<Self, Self::Error> {
        Self::from_naive(value)
    }
}

impl From<Timestamp> for NaiveDateTime {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    #[test]
    fn test_parse_and_format() {
        let t = ts("2023-10-01T12:00:00");
        assert_eq!(t.to_string(), "2023-10-01T12:00:00");
        assert_eq!(t.date_string(), "2023-10-01");
    }

    #[test]
    fn test_parse_rejects_other_layouts() {
        for text in [
            "invalid-date-string",
            "2023/10/01 12:00:00",
            "2023-10-01 12:00:00",
            "2023-10-01",
            "2023-10-01T12:00",
            "2023-10-01T12:00:00Z",
            "2023-10-01T12:00:00.5",
            " 2023-10-01T12:00:00",
            "",
        ] {
            let err = Timestamp::parse(text).unwrap_err();
            assert!(err.is_format(), "{text:?} gave {err:?}");
        }
    }

    #[test]
    fn test_parse_rejects_non_ascii_digits() {
        let err = Timestamp::parse("２０２３-10-01T12:00:00").unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_parse_range_errors() {
        for (text, needle) in [
            ("2023-02-30T12:00:00", "day is out of range"),
            ("2023-13-01T12:00:00", "month must be in 1..12"),
            ("2023-00-10T12:00:00", "month must be in 1..12"),
            ("2023-10-01T25:00:00", "hour must be in 0..23"),
            ("2023-10-01T24:00:00", "hour must be in 0..23"),
            ("2023-10-01T12:60:00", "minute must be in 0..59"),
            ("2023-10-01T12:00:60", "second must be in 0..59"),
        ] {
            let err = Timestamp::parse(text).unwrap_err();
            assert!(err.is_range(), "{text} gave {err:?}");
            assert!(err.to_string().contains(needle), "{err}");
        }
    }

    #[test]
    fn test_leap_day() {
        assert!(Timestamp::parse("2024-02-29T00:00:00").is_ok());
        assert!(Timestamp::parse("2023-02-29T00:00:00").unwrap_err().is_range());
    }

    #[test]
    fn test_small_years_keep_four_digits() {
        assert_eq!(ts("0099-01-01T00:00:00").to_string(), "0099-01-01T00:00:00");
        assert_eq!(ts("0000-01-01T00:00:00").to_string(), "0000-01-01T00:00:00");
    }

    #[test]
    fn test_checked_add_rollover() {
        let t = ts("2025-01-31T23:30:00");
        assert_eq!(
            t.checked_add(Span::from_seconds(3600)).unwrap().to_string(),
            "2025-02-01T00:30:00"
        );
        assert_eq!(
            t.checked_sub(Span::from_seconds(3600)).unwrap().to_string(),
            "2025-01-31T22:30:00"
        );
    }

    #[test]
    fn test_checked_add_out_of_range() {
        let t = ts("9999-12-31T23:59:59");
        assert!(t.checked_add(Span::from_seconds(1)).unwrap_err().is_range());
        let t = ts("0000-01-01T00:00:00");
        assert!(t.checked_sub(Span::from_seconds(1)).unwrap_err().is_range());
    }

    #[test]
    fn test_since_is_signed() {
        let a = ts("2023-10-01T12:00:00");
        let b = ts("2023-10-01T14:30:00");
        assert_eq!(b.since(&a).as_seconds(), 9000);
        assert_eq!(a.since(&b).as_seconds(), -9000);
    }

    #[test]
    fn test_from_naive_truncates_and_checks_year() {
        let naive = NaiveDate::from_ymd_opt(2024, 5, 6)
            .unwrap()
            .and_hms_milli_opt(7, 8, 9, 999)
            .unwrap();
        assert_eq!(
            Timestamp::from_naive(naive).unwrap().to_string(),
            "2024-05-06T07:08:09"
        );

        let far = NaiveDate::from_ymd_opt(10_000, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert!(Timestamp::from_naive(far).unwrap_err().is_range());
        assert_eq!(
            Timestamp::saturating_from_naive(far).to_string(),
            "9999-12-31T23:59:59"
        );
    }

    #[test]
    fn test_serde_as_string() {
        let t = ts("2025-01-20T13:00:00");
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "\"2025-01-20T13:00:00\"");
        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
        assert!(serde_json::from_str::<Timestamp>("\"2025-01-20\"").is_err());
    }

    #[test]
    fn test_ordering_follows_time() {
        assert!(ts("2025-01-20T13:00:00") < ts("2025-01-20T13:00:01"));
        assert!(ts("2024-12-31T23:59:59") < ts("2025-01-01T00:00:00"));
    }
}
