//! Elapsed-time measurement.

use std::fmt;
use std::time::{Duration, Instant};

/// A monotonic timer started on construction.
///
/// ```
/// use isostamp::Stopwatch;
///
/// let watch = Stopwatch::start();
/// assert!(watch.elapsed_string().ends_with(" seconds"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    started: Instant,
}

impl Stopwatch {
    /// Starts a new timer.
    #[must_use]
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Time since [`Stopwatch::start`].
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Seconds since [`Stopwatch::start`].
    #[must_use]
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }

    /// Elapsed time as `"{secs:.6} seconds"`.
    #[must_use]
    pub fn elapsed_string(&self) -> String {
        self.to_string()
    }

    /// Consumes the timer, returning its final reading.
    #[must_use]
    pub fn stop(self) -> String {
        let reading = self.elapsed_string();
        tracing::debug!(elapsed = %reading, "stopwatch stopped");
        reading
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Stopwatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6} seconds", self.elapsed_secs())
    }
}
