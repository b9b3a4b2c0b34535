//! Lenient conversions from [`Arg`] to plain values.

use crate::core::Arg;
use crate::error::TimeError;

pub(crate) fn mismatch(expected: &'static str, value: &Arg) -> TimeError {
    TimeError::TypeMismatch {
        expected,
        found: value.type_name(),
        value: value.to_string(),
    }
}

/// Converts to an integer.
///
/// Floats are rounded half away from zero and strings must hold an integer
/// literal.
///
/// ```
/// use isostamp::core::to_int;
///
/// assert_eq!(to_int(&1.5_f64.into()).unwrap(), 2);
/// assert_eq!(to_int(&"1".into()).unwrap(), 1);
/// assert!(to_int(&"1.8".into()).is_err());
/// ```
///
/// # Errors
///
/// [`TimeError::Range`] for strings that are not integer literals and for
/// non-finite or oversized floats; [`TimeError::TypeMismatch`] for every
/// other non-numeric type.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn to_int(value: &Arg) -> Result<i64, TimeError> {
    match value {
        Arg::Integer(n) => Ok(*n),
        Arg::Float(x) => {
            let rounded = x.round();
            if rounded.is_finite() && rounded.abs() < i64::MAX as f64 {
                Ok(rounded as i64)
            } else {
                Err(TimeError::range(format!("cannot convert {x} to an integer")))
            }
        }
        Arg::String(s) => s.trim().parse::<i64>().map_err(|_| {
            TimeError::range(format!("invalid literal for an integer: '{s}'"))
        }),
        other => Err(mismatch("integer, float or string", other)),
    }
}

/// Converts to a float.
///
/// # Errors
///
/// [`TimeError::Range`] for strings that do not parse as a number;
/// [`TimeError::TypeMismatch`] for every other non-numeric type.
#[allow(clippy::cast_precision_loss)]
pub fn to_float(value: &Arg) -> Result<f64, TimeError> {
    match value {
        Arg::Integer(n) => Ok(*n as f64),
        Arg::Float(x) => Ok(*x),
        Arg::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| TimeError::range(format!("could not convert string to float: '{s}'"))),
        other => Err(mismatch("integer, float or string", other)),
    }
}

/// True for a non-empty string. Whitespace counts as content.
#[must_use]
pub fn str_notempty(value: &Arg) -> bool {
    value.as_str().is_some_and(|s| !s.is_empty())
}

/// The string if it is non-empty, otherwise `None`.
#[must_use]
pub fn str_or_none(value: &Arg) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}

/// Requires a numeric argument, naming it in the error.
pub(crate) fn require_number(name: &'static str, value: &Arg) -> Result<f64, TimeError> {
    value.as_number().ok_or_else(|| mismatch(name, value))
}
