//! Operations that read the current time.

use crate::core::Arg;
use crate::core::coerce::mismatch;
use crate::error::TimeError;
use crate::time::clock::{Clock, SystemClock};
use crate::time::ops::require_timestamp;
use crate::time::timestamp::Timestamp;
use crate::time::unit::DEFAULT_DURATION;

/// Default tolerance, in seconds, of [`Timekeeper::approx_equal`].
pub const DEFAULT_TOLERANCE_SECS: i64 = 5;

/// Defaulting, comparison and parsing bound to a [`Clock`].
///
/// The free functions in [`crate::time`] delegate to a process-wide keeper on
/// a [`SystemClock`]; build your own with [`Timekeeper::with_clock`] to pin
/// "now".
///
/// # Examples
///
/// ```
/// use isostamp::time::{FixedClock, Timekeeper};
///
/// let at = "2025-01-20T13:00:00".parse().unwrap();
/// let keeper = Timekeeper::with_clock(FixedClock::new(at));
/// assert_eq!(keeper.now_string(), "2025-01-20T13:00:00");
/// assert_eq!(keeper.default_stop_time("").unwrap(), "2025-01-20T13:30:00");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Timekeeper<C: Clock = SystemClock> {
    clock: C,
}

impl Timekeeper<SystemClock> {
    /// A keeper on a new system clock.
    #[must_use]
    pub fn system() -> Self {
        Self::with_clock(SystemClock::new())
    }
}

impl<C: Clock> Timekeeper<C> {
    /// A keeper reading time from `clock`.
    pub const fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// The underlying clock.
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Current local time at one-second resolution.
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// [`Timekeeper::now`] in canonical form.
    pub fn now_string(&self) -> String {
        self.now().to_string()
    }

    /// Parses a timestamp, substituting now for `Null` or `""`.
    ///
    /// # Errors
    ///
    /// [`TimeError::Format`] when a string does not match the canonical
    /// pattern, [`TimeError::Range`] when it names an impossible date or
    /// time and [`TimeError::TypeMismatch`] for any other non-string input.
    pub fn parse(&self, text: impl Into<Arg>) -> Result<Timestamp, TimeError> {
        let text = text.into();
        match &text {
            arg if arg.is_blank() => Ok(self.now()),
            Arg::String(s) => Timestamp::parse(s),
            other => Err(mismatch("ISO datetime string or null", other)),
        }
    }

    /// Returns `text` if it validates, otherwise now.
    ///
    /// Only a non-empty string that fails validation is an error: every
    /// non-string input, `Null` included, is replaced with now.
    ///
    /// # Errors
    ///
    /// [`TimeError::Range`] for a malformed non-empty string.
    pub fn timestamp_or_default(&self, text: impl Into<Arg>) -> Result<String, TimeError> {
        match text.into() {
            Arg::String(s) if !s.is_empty() => {
                Timestamp::parse(&s).map_err(TimeError::into_range)?;
                Ok(s)
            }
            other => {
                let now = self.now_string();
                tracing::debug!(%now, kind = other.type_name(), "forgiving non-timestamp input");
                Ok(now)
            }
        }
    }

    fn start_timestamp(&self, text: &Arg) -> Result<Timestamp, TimeError> {
        if text.is_blank() {
            let now = self.now();
            tracing::debug!(%now, "missing timestamp, using current time");
            Ok(now)
        } else {
            require_timestamp(text)
        }
    }

    /// Returns a valid start time unchanged, substituting now for `Null`
    /// or `""`.
    ///
    /// # Errors
    ///
    /// [`TimeError::Range`] for a malformed non-empty string and
    /// [`TimeError::TypeMismatch`] for any other type.
    pub fn start_or_default(&self, text: impl Into<Arg>) -> Result<String, TimeError> {
        self.start_timestamp(&text.into()).map(|ts| ts.to_string())
    }

    /// Returns a valid stop time unchanged, or the default stop after
    /// `start`.
    ///
    /// `start` is checked first with the rules of
    /// [`Timekeeper::start_or_default`], even when `stop` is usable.
    ///
    /// ```
    /// use isostamp::time::{FixedClock, Timekeeper};
    ///
    /// let keeper = Timekeeper::with_clock(FixedClock::new("2025-01-20T13:00:00".parse().unwrap()));
    /// assert_eq!(
    ///     keeper.stop_or_default("", "2023-10-01T12:00:00").unwrap(),
    ///     "2023-10-01T12:30:00"
    /// );
    /// ```
    ///
    /// # Errors
    ///
    /// [`TimeError::Range`] for a malformed non-empty string or a default
    /// stop past year 9999, [`TimeError::TypeMismatch`] for any other type.
    pub fn stop_or_default(
        &self,
        stop: impl Into<Arg>,
        start: impl Into<Arg>,
    ) -> Result<String, TimeError> {
        let start = self.start_timestamp(&start.into())?;
        let stop = stop.into();
        match &stop {
            arg if arg.is_blank() => Ok(start.checked_add(DEFAULT_DURATION)?.to_string()),
            Arg::String(s) => {
                require_timestamp(&stop)?;
                Ok(s.clone())
            }
            other => Err(mismatch("ISO datetime string or null", other)),
        }
    }

    /// Default start of an interval: now.
    pub fn default_start_time(&self) -> String {
        self.now_string()
    }

    /// Default stop of an interval starting at `start`: thirty minutes
    /// later.
    ///
    /// # Errors
    ///
    /// As [`Timekeeper::start_or_default`], plus [`TimeError::Range`] when
    /// the result passes year 9999.
    pub fn default_stop_time(&self, start: impl Into<Arg>) -> Result<String, TimeError> {
        let start = self.start_timestamp(&start.into())?;
        Ok(start.checked_add(DEFAULT_DURATION)?.to_string())
    }

    /// True if `a` and `b` are less than [`DEFAULT_TOLERANCE_SECS`] apart.
    ///
    /// # Errors
    ///
    /// As [`Timekeeper::approx_equal_within`].
    pub fn approx_equal(&self, a: impl Into<Arg>, b: impl Into<Arg>) -> Result<bool, TimeError> {
        self.approx_equal_within(a, b, DEFAULT_TOLERANCE_SECS)
    }

    /// True if `a` and `b` are strictly less than `tolerance` seconds apart.
    ///
    /// A gap of exactly `tolerance` does not count, so a zero tolerance
    /// never matches.
    ///
    /// `Null` or `""` for either timestamp means now. An explicit `Null`
    /// tolerance is not the same as leaving it out and is rejected.
    ///
    /// # Errors
    ///
    /// [`TimeError::TypeMismatch`] for a non-numeric tolerance or a
    /// non-string timestamp; [`TimeError::Range`] for a negative or
    /// non-finite tolerance or a malformed timestamp string.
    pub fn approx_equal_within(
        &self,
        a: impl Into<Arg>,
        b: impl Into<Arg>,
        tolerance: impl Into<Arg>,
    ) -> Result<bool, TimeError> {
        let tolerance = tolerance.into();
        let limit = tolerance
            .as_number()
            .ok_or_else(|| mismatch("numeric tolerance", &tolerance))?;
        if !limit.is_finite() || limit < 0.0 {
            return Err(TimeError::range(format!(
                "tolerance must be a non-negative number of seconds, got {limit}"
            )));
        }
        let a = self.start_timestamp(&a.into())?;
        let b = self.start_timestamp(&b.into())?;
        #[allow(clippy::cast_precision_loss)]
        let gap = a.since(&b).abs().as_seconds() as f64;
        Ok(gap < limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::clock::FixedClock;
    use serde_json::json;

    const NOW: &str = "2025-01-20T13:00:00";

    fn keeper() -> Timekeeper<FixedClock> {
        Timekeeper::with_clock(FixedClock::new(NOW.parse().unwrap()))
    }

    #[test]
    fn test_now() {
        let k = keeper();
        assert_eq!(k.now_string(), NOW);
        assert_eq!(k.default_start_time(), NOW);
        assert_eq!(k.clock().now().to_string(), NOW);
    }

    #[test]
    fn test_parse_defaults_and_errors() {
        let k = keeper();
        assert_eq!(k.parse(Arg::Null).unwrap().to_string(), NOW);
        assert_eq!(k.parse("").unwrap().to_string(), NOW);
        assert_eq!(
            k.parse("2023-10-01T12:00:00").unwrap().to_string(),
            "2023-10-01T12:00:00"
        );
        assert!(k.parse(123).unwrap_err().is_type_mismatch());
        assert!(k.parse("invalid-date-string").unwrap_err().is_format());
        assert!(k.parse("2023-02-30T12:00:00").unwrap_err().is_range());
    }

    #[test]
    fn test_timestamp_or_default() {
        let k = keeper();
        assert_eq!(
            k.timestamp_or_default("2025-01-20T13:00:00").unwrap(),
            "2025-01-20T13:00:00"
        );
        assert_eq!(k.timestamp_or_default(Arg::Null).unwrap(), NOW);
        assert_eq!(k.timestamp_or_default("").unwrap(), NOW);
        assert_eq!(k.timestamp_or_default(123).unwrap(), NOW);
        assert_eq!(k.timestamp_or_default(json!([])).unwrap(), NOW);
        assert!(k.timestamp_or_default("invalid-date").unwrap_err().is_range());
    }

    #[test]
    fn test_start_or_default() {
        let k = keeper();
        assert_eq!(
            k.start_or_default("2023-10-01T12:00:00").unwrap(),
            "2023-10-01T12:00:00"
        );
        assert_eq!(k.start_or_default(Arg::Null).unwrap(), NOW);
        assert_eq!(k.start_or_default("").unwrap(), NOW);

        let err = k.start_or_default("invalid-date").unwrap_err();
        assert!(err.is_range());
        assert!(err.to_string().contains("Invalid ISO datetime str value:"));
        assert!(k.start_or_default(json!([1, 2])).unwrap_err().is_type_mismatch());
        assert!(k.start_or_default(123).unwrap_err().is_type_mismatch());
    }

    #[test]
    fn test_stop_or_default() {
        let k = keeper();
        assert_eq!(
            k.stop_or_default("2023-10-01T14:00:00", Arg::Null).unwrap(),
            "2023-10-01T14:00:00"
        );
        assert_eq!(
            k.stop_or_default(Arg::Null, "2023-10-01T12:00:00").unwrap(),
            "2023-10-01T12:30:00"
        );
        assert_eq!(k.stop_or_default("", "").unwrap(), "2025-01-20T13:30:00");
        assert_eq!(
            k.stop_or_default(Arg::Null, Arg::Null).unwrap(),
            "2025-01-20T13:30:00"
        );
    }

    #[test]
    fn test_stop_or_default_errors() {
        let k = keeper();
        assert!(k.stop_or_default("invalid-date", Arg::Null).unwrap_err().is_range());
        assert!(k.stop_or_default(123, Arg::Null).unwrap_err().is_type_mismatch());
        assert!(k.stop_or_default(json!([]), Arg::Null).unwrap_err().is_type_mismatch());
        assert!(k.stop_or_default(Arg::Null, 123).unwrap_err().is_type_mismatch());
        assert!(k.stop_or_default("2023-10-01T14:00:00", "bogus").unwrap_err().is_range());
        assert!(k.stop_or_default("", "9999-12-31T23:59:00").unwrap_err().is_range());
    }

    #[test]
    fn test_default_stop_time() {
        let k = keeper();
        assert_eq!(k.default_stop_time(Arg::Null).unwrap(), "2025-01-20T13:30:00");
        assert_eq!(
            k.default_stop_time("2025-01-31T23:45:00").unwrap(),
            "2025-02-01T00:15:00"
        );
        assert!(k.default_stop_time(1.5_f64).unwrap_err().is_type_mismatch());
    }

    #[test]
    fn test_approx_equal() {
        let k = keeper();
        let a = "2023-10-01T12:00:00";
        assert!(k.approx_equal_within(a, "2023-10-01T12:00:05", 10).unwrap());
        assert!(!k.approx_equal(a, "2023-10-01T12:00:05").unwrap());
        assert!(k.approx_equal(a, "2023-10-01T12:00:04").unwrap());
        assert!(!k.approx_equal_within(a, "2023-10-01T12:00:10", 10).unwrap());
        assert!(k.approx_equal_within(a, "2023-10-01T12:00:09", 10).unwrap());
        assert!(k.approx_equal_within("2023-10-01T12:00:05", a, 5.5_f64).unwrap());
        assert!(!k.approx_equal_within(a, a, 0).unwrap());
        assert!(k.approx_equal_within(a, a, 0.5_f64).unwrap());
        assert!(k.approx_equal(Arg::Null, "").unwrap());
        assert!(k.approx_equal(NOW, Arg::Null).unwrap());
    }

    #[test]
    fn test_approx_equal_errors() {
        let k = keeper();
        let a = "2023-10-01T12:00:00";
        assert!(k.approx_equal_within(a, a, Arg::Null).unwrap_err().is_type_mismatch());
        assert!(k.approx_equal_within(a, a, "5").unwrap_err().is_type_mismatch());
        assert!(k.approx_equal_within(a, a, "").unwrap_err().is_type_mismatch());
        assert!(k.approx_equal_within(a, a, -1).unwrap_err().is_range());
        assert!(k.approx_equal_within(a, a, f64::INFINITY).unwrap_err().is_range());
        assert!(k.approx_equal(a, 42).unwrap_err().is_type_mismatch());
        assert!(k.approx_equal("2023-10-01 12:00:00", a).unwrap_err().is_range());
    }
}
