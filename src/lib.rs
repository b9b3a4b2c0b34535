//! # isostamp
//!
//! Canonical ISO-8601 timestamp utilities.
//!
//! isostamp works with local wall-clock timestamps in the exact form
//! `YYYY-MM-DDTHH:MM:SS`: strict parsing and validation, defaulting of
//! missing values to the current time, hour/minute/second arithmetic,
//! durations and approximate comparison.
//!
//! ## Features
//!
//! - **Strict format**: every accepted string formats back to itself
//! - **Typed failures**: type mismatch, format and range errors are distinct
//! - **Injectable clock**: pin "now" with [`time::FixedClock`]
//! - **Helpers**: coercions, stopwatches, error chains, file utilities
//!
//! ```
//! use isostamp::time;
//!
//! let later = time::increase("2025-01-31T23:30:00", 1, 0, 0).unwrap();
//! assert_eq!(later, "2025-02-01T00:30:00");
//! assert_eq!(time::calculate_duration("2025-01-31T23:30:00", later.as_str(), "minutes").unwrap(), 60.0);
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod core;
pub mod error;
pub mod support;
pub mod time;

// Re-export commonly used types at crate root
pub use error::{CommandError, Error, IoError, Result, TimeError};

// Re-export core value types
pub use crate::core::{Arg, str_notempty, str_or_none, to_float, to_int};

// Re-export timestamp operations
pub use time::{
    Clock, DEFAULT_DURATION_MINUTES, DEFAULT_TOLERANCE_SECS, FixedClock, Span, SystemClock,
    TimeUnit, Timekeeper, Timestamp, approx_equal, approx_equal_within, calculate_duration,
    confirm_timestamp, date_only_string, decrease, default_duration, default_duration_in,
    default_start_time, default_stop_time, format, increase, is_valid, now, now_string, parse,
    start_or_default, stop_or_default, timestamp_or_default, validate,
};

// Re-export support helpers
pub use support::{
    Stopwatch, check_file_locked, copy_backup, error_chain, error_chain_depth, is_file_locked,
    is_filename_only,
};

// Re-export CLI types
pub use cli::{Cli, Commands, OutputFormat};
