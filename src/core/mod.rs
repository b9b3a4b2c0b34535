//! Loosely typed arguments and lenient conversions.
//!
//! Pure value types with no I/O dependencies.

pub mod arg;
pub mod coerce;

pub use arg::Arg;
pub use coerce::{str_notempty, str_or_none, to_float, to_int};
