//! CLI layer for isostamp.
//!
//! Provides the command-line interface using clap, with one subcommand per
//! timestamp operation and an NDJSON `eval` surface for scripted callers.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::execute;
pub use output::OutputFormat;
pub use parser::{Cli, Commands};
