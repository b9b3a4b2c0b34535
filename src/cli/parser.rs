//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// isostamp: canonical ISO-8601 timestamp utilities.
///
/// Parses, validates, shifts and compares `YYYY-MM-DDTHH:MM:SS` local
/// timestamps.
#[derive(Parser, Debug)]
#[command(name = "isostamp")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output format (text, json).
    #[arg(long, default_value = "text", env = "ISOSTAMP_FORMAT", global = true)]
    pub format: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the current local time.
    Now,

    /// Parse a timestamp; a missing or empty value means now.
    Parse {
        /// Timestamp text.
        text: Option<String>,
    },

    /// Validate a timestamp, failing if it is not canonical.
    Validate {
        /// Timestamp text.
        text: String,
    },

    /// Report whether a timestamp is valid without failing.
    Check {
        /// Timestamp text.
        text: String,
    },

    /// Add hours, minutes and seconds to a timestamp.
    Increase {
        /// Timestamp text.
        text: String,

        #[command(flatten)]
        offset: Offset,
    },

    /// Subtract hours, minutes and seconds from a timestamp.
    Decrease {
        /// Timestamp text.
        text: String,

        #[command(flatten)]
        offset: Offset,
    },

    /// Signed duration from START to STOP.
    Duration {
        /// Start timestamp.
        start: String,

        /// Stop timestamp.
        stop: String,

        /// Unit (hours, minutes, seconds).
        #[arg(short, long, default_value = "hours")]
        unit: String,
    },

    /// The default interval length.
    #[command(name = "default-duration")]
    DefaultDuration {
        /// Unit (hours, minutes, seconds).
        #[arg(short, long, default_value = "minutes")]
        unit: String,
    },

    /// Compare two timestamps within a tolerance.
    Approx {
        /// First timestamp (empty means now).
        a: String,

        /// Second timestamp (empty means now).
        b: String,

        /// Tolerance in seconds (default: 5).
        #[arg(short, long, allow_negative_numbers = true)]
        tolerance: Option<f64>,
    },

    /// Return a valid timestamp unchanged, or now.
    #[command(name = "or-default")]
    OrDefault {
        /// Timestamp text.
        text: Option<String>,
    },

    /// Return a valid stop time, or the default stop after START.
    Stop {
        /// Stop timestamp.
        stop: Option<String>,

        /// Start timestamp (default: now).
        #[arg(short, long)]
        start: Option<String>,
    },

    /// Evaluate newline-delimited JSON calls.
    ///
    /// Each input line is `{"op": "...", "args": [...]}`; each output line
    /// is `{"ok": value}` or `{"error": {"kind": ..., "message": ...}}`.
    Eval {
        /// Input file (default: stdin).
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

/// Offset flags shared by `increase` and `decrease`.
#[derive(clap::Args, Debug, Clone, Copy, Default)]
pub struct Offset {
    /// Hours to shift by.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub hours: f64,

    /// Minutes to shift by.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub minutes: f64,

    /// Seconds to shift by.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub seconds: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_increase_flags() {
        let cli = Cli::try_parse_from([
            "isostamp",
            "increase",
            "2025-01-20T13:00:00",
            "--hours",
            "-1.5",
            "--seconds",
            "30",
        ])
        .unwrap();
        match cli.command {
            Commands::Increase { text, offset } => {
                assert_eq!(text, "2025-01-20T13:00:00");
                assert!((offset.hours + 1.5).abs() < f64::EPSILON);
                assert!(offset.minutes.abs() < f64::EPSILON);
                assert!((offset.seconds - 30.0).abs() < f64::EPSILON);
            }
            other => unreachable!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["isostamp", "now", "-vv", "--format", "json"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.format, "json");
    }

    #[test]
    fn test_optional_positionals() {
        let cli = Cli::try_parse_from(["isostamp", "stop", "--start", "2025-01-20T13:00:00"])
            .unwrap();
        match cli.command {
            Commands::Stop { stop, start } => {
                assert!(stop.is_none());
                assert_eq!(start.as_deref(), Some("2025-01-20T13:00:00"));
            }
            other => unreachable!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_unit_defaults() {
        let cli = Cli::try_parse_from(["isostamp", "default-duration"]).unwrap();
        match cli.command {
            Commands::DefaultDuration { unit } => assert_eq!(unit, "minutes"),
            other => unreachable!("unexpected command: {other:?}"),
        }

        let cli = Cli::try_parse_from(["isostamp", "duration", "2025-01-20T13:00:00", ""]).unwrap();
        match cli.command {
            Commands::Duration { unit, .. } => assert_eq!(unit, "hours"),
            other => unreachable!("unexpected command: {other:?}"),
        }
    }
}
