//! Small helpers that travel with the timestamp utilities.

pub mod chain;
pub mod fs;
pub mod stopwatch;

pub use chain::{error_chain, error_chain_depth};
pub use fs::{check_file_locked, copy_backup, is_file_locked, is_filename_only, read_text};
pub use stopwatch::Stopwatch;
