//! Clock-free timestamp operations over loosely typed arguments.
//!
//! These functions take [`Arg`] values so that a wrong runtime type is a
//! reportable [`TimeError::TypeMismatch`] instead of a compile error. The
//! error policy per argument class, across this module and
//! [`crate::time::Timekeeper`], is:
//!
//! | argument class                                 | `Null`       | other type   | `""`         | bad value    |
//! |------------------------------------------------|--------------|--------------|--------------|--------------|
//! | strict timestamp (`validate`, `increase`, ...) | TypeMismatch | TypeMismatch | Range        | Range        |
//! | defaulted timestamp (`start_or_default`, ...)  | now          | TypeMismatch | now          | Range        |
//! | lenient timestamp (`timestamp_or_default`)     | now          | now          | now          | Range        |
//! | parsed timestamp (`parse`)                     | now          | TypeMismatch | now          | Format/Range |
//! | numeric offset (`hours`, `minutes`, `seconds`) | TypeMismatch | TypeMismatch | TypeMismatch | Range        |
//! | tolerance (`approx_equal_within`)              | TypeMismatch | TypeMismatch | TypeMismatch | Range        |
//!
//! A bad offset or tolerance is a non-finite number; a tolerance is also
//! bad when negative.

use crate::core::Arg;
use crate::core::coerce::{mismatch, require_number};
use crate::error::TimeError;
use crate::time::timestamp::Timestamp;
use crate::time::unit::{DEFAULT_DURATION, Span, TimeUnit};

/// Parses a timestamp argument that must be a non-empty canonical string.
pub(crate) fn require_timestamp(value: &Arg) -> Result<Timestamp, TimeError> {
    match value {
        Arg::String(s) if s.is_empty() => Err(TimeError::range(
            "Invalid ISO datetime str value: empty string",
        )),
        Arg::String(s) => Timestamp::parse(s).map_err(TimeError::into_range),
        other => Err(mismatch("ISO datetime string", other)),
    }
}

/// True only for an already structured timestamp.
///
/// A string, even a valid canonical one, is not a timestamp.
#[must_use]
pub fn confirm_timestamp(value: &Arg) -> bool {
    matches!(value, Arg::Timestamp(_))
}

/// Raising validator for timestamp strings.
///
/// # Errors
///
/// [`TimeError::TypeMismatch`] for non-string input (including `Null`),
/// [`TimeError::Range`] for the empty string, a pattern mismatch or an
/// impossible date or time.
pub fn validate(text: impl Into<Arg>) -> Result<bool, TimeError> {
    require_timestamp(&text.into()).map(|_| true)
}

/// Non-raising probe: true when [`validate`] would succeed.
///
/// ```
/// use isostamp::time::is_valid;
///
/// assert!(is_valid("2025-01-20T13:00:00"));
/// assert!(!is_valid("2025-02-30T13:00:00"));
/// assert!(!is_valid(42));
/// ```
#[must_use]
pub fn is_valid(text: impl Into<Arg>) -> bool {
    require_timestamp(&text.into()).is_ok()
}

fn require_structured(value: &Arg) -> Result<Timestamp, TimeError> {
    match value {
        Arg::Timestamp(ts) => Ok(*ts),
        other => Err(mismatch("structured timestamp", other)),
    }
}

/// Renders a structured timestamp in canonical form.
///
/// # Errors
///
/// [`TimeError::TypeMismatch`] for anything but [`Arg::Timestamp`].
pub fn format(value: impl Into<Arg>) -> Result<String, TimeError> {
    require_structured(&value.into()).map(|ts| ts.to_string())
}

/// Renders the `YYYY-MM-DD` part of a structured timestamp.
///
/// # Errors
///
/// [`TimeError::TypeMismatch`] for anything but [`Arg::Timestamp`].
pub fn date_only_string(value: impl Into<Arg>) -> Result<String, TimeError> {
    require_structured(&value.into()).map(|ts| ts.date_string())
}

fn offset(hours: &Arg, minutes: &Arg, seconds: &Arg) -> Result<Span, TimeError> {
    let hours = require_number("numeric hours", hours)?;
    let minutes = require_number("numeric minutes", minutes)?;
    let seconds = require_number("numeric seconds", seconds)?;
    Span::from_parts(hours, minutes, seconds)
}

/// Adds hours, minutes and seconds to a timestamp string.
///
/// ```
/// use isostamp::time::increase;
///
/// assert_eq!(
///     increase("2025-01-31T23:30:00", 1, 0, 0).unwrap(),
///     "2025-02-01T00:30:00"
/// );
/// ```
///
/// # Errors
///
/// [`TimeError::TypeMismatch`] if `text` is not a string or an offset is
/// not numeric; [`TimeError::Range`] if `text` is empty or malformed, an
/// offset is not finite, or the result leaves the four-digit year range.
pub fn increase(
    text: impl Into<Arg>,
    hours: impl Into<Arg>,
    minutes: impl Into<Arg>,
    seconds: impl Into<Arg>,
) -> Result<String, TimeError> {
    let start = require_timestamp(&text.into())?;
    let span = offset(&hours.into(), &minutes.into(), &seconds.into())?;
    let shifted = start.checked_add(span)?;
    tracing::debug!(%start, %span, %shifted, "increased timestamp");
    Ok(shifted.to_string())
}

/// Subtracts hours, minutes and seconds from a timestamp string.
///
/// # Errors
///
/// Same as [`increase`].
pub fn decrease(
    text: impl Into<Arg>,
    hours: impl Into<Arg>,
    minutes: impl Into<Arg>,
    seconds: impl Into<Arg>,
) -> Result<String, TimeError> {
    let start = require_timestamp(&text.into())?;
    let span = offset(&hours.into(), &minutes.into(), &seconds.into())?;
    let shifted = start.checked_sub(span)?;
    tracing::debug!(%start, %span, %shifted, "decreased timestamp");
    Ok(shifted.to_string())
}

/// `stop - start` in `unit` (`"hours"`, `"minutes"` or `"seconds"`).
///
/// ```
/// use isostamp::time::calculate_duration;
///
/// let d = calculate_duration("2023-10-01T12:00:00", "2023-10-01T14:30:00", "hours");
/// assert_eq!(d.unwrap(), 2.5);
/// ```
///
/// # Errors
///
/// [`TimeError::Range`] for an unknown unit or an empty or malformed
/// string; [`TimeError::TypeMismatch`] for non-string timestamps.
pub fn calculate_duration(
    start: impl Into<Arg>,
    stop: impl Into<Arg>,
    unit: &str,
) -> Result<f64, TimeError> {
    let unit: TimeUnit = unit.parse()?;
    let start = require_timestamp(&start.into())?;
    let stop = require_timestamp(&stop.into())?;
    Ok(stop.since(&start).in_unit(unit))
}

/// The default duration (30 minutes) in `unit`.
///
/// An unrecognized unit yields `0.0` instead of an error, unlike every
/// other unit-taking operation; a warning is logged when that happens. Use
/// [`crate::time::default_duration_in`] for a typed, infallible variant.
#[must_use]
pub fn default_duration(unit: &str) -> f64 {
    unit.parse::<TimeUnit>().map_or_else(
        |_| {
            tracing::warn!(unit, "unrecognized unit for default duration, returning 0.0");
            0.0
        },
        |unit| DEFAULT_DURATION.in_unit(unit),
    )
}
