//! Duration units and signed spans.

use crate::error::TimeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

/// Default duration, in minutes, used when a stop time has to be invented.
pub const DEFAULT_DURATION_MINUTES: i64 = 30;

/// Default duration as a span.
pub const DEFAULT_DURATION: Span = Span::from_seconds(DEFAULT_DURATION_MINUTES * 60);

/// Largest offset accepted by arithmetic, comfortably wider than the
/// four-digit year range.
const MAX_SPAN_SECONDS: f64 = 400_000_000_000.0;

/// Unit a duration is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    /// 3600 seconds.
    Hours,
    /// 60 seconds.
    Minutes,
    /// 1 second.
    Seconds,
}

impl TimeUnit {
    /// All units, largest first.
    pub const ALL: [Self; 3] = [Self::Hours, Self::Minutes, Self::Seconds];

    /// Number of seconds in one of this unit.
    #[must_use]
    pub const fn seconds(self) -> i64 {
        match self {
            Self::Hours => 3600,
            Self::Minutes => 60,
            Self::Seconds => 1,
        }
    }

    /// Lowercase name as accepted by [`TimeUnit::from_str`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hours => "hours",
            Self::Minutes => "minutes",
            Self::Seconds => "seconds",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeUnit {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|unit| unit.as_str() == s)
            .ok_or_else(|| {
                TimeError::range(format!(
                    "invalid unit: '{s}', expected one of hours, minutes, seconds"
                ))
            })
    }
}

/// A signed number of whole seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    seconds: i64,
}

impl Span {
    /// The empty span.
    pub const ZERO: Self = Self::from_seconds(0);

    /// Creates a span from whole seconds.
    #[must_use]
    pub const fn from_seconds(seconds: i64) -> Self {
        Self { seconds }
    }

    /// Builds a span from fractional hours, minutes and seconds.
    ///
    /// The total is rounded to the nearest second, halves away from zero.
    ///
    /// # Errors
    ///
    /// [`TimeError::Range`] for non-finite inputs or totals beyond the
    /// representable range.
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_parts(hours: f64, minutes: f64, seconds: f64) -> Result<Self, TimeError> {
        let total = hours.mul_add(3600.0, minutes.mul_add(60.0, seconds));
        if !total.is_finite() {
            return Err(TimeError::range("time offset must be a finite number"));
        }
        let rounded = total.round();
        if rounded.abs() > MAX_SPAN_SECONDS {
            return Err(TimeError::range(format!(
                "time offset of {rounded} seconds is out of range"
            )));
        }
        Ok(Self::from_seconds(rounded as i64))
    }

    /// Whole seconds in the span.
    #[must_use]
    pub const fn as_seconds(self) -> i64 {
        self.seconds
    }

    /// The span expressed in `unit`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn in_unit(self, unit: TimeUnit) -> f64 {
        self.seconds as f64 / unit.seconds() as f64
    }

    /// Returns true for the empty span.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.seconds == 0
    }

    /// Absolute value, saturating at `i64::MAX`.
    #[must_use]
    pub const fn abs(self) -> Self {
        Self::from_seconds(self.seconds.saturating_abs())
    }

    /// Negation, `None` on overflow.
    #[must_use]
    pub const fn checked_neg(self) -> Option<Self> {
        match self.seconds.checked_neg() {
            Some(seconds) => Some(Self { seconds }),
            None => None,
        }
    }
}

impl Neg for Span {
    type Output = Self;

    fn neg(self) -> Self {
        Self::from_seconds(self.seconds.saturating_neg())
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.seconds)
    }
}

/// The fixed default duration in `unit`.
///
/// ```
/// use isostamp::time::{TimeUnit, default_duration_in};
///
/// assert_eq!(default_duration_in(TimeUnit::Hours), 0.5);
/// ```
#[must_use]
pub fn default_duration_in(unit: TimeUnit) -> f64 {
    DEFAULT_DURATION.in_unit(unit)
}
