//! Output formatting for CLI commands.
//!
//! Supports text and JSON output formats.

use crate::error::{Error, Result};
use crate::time::Timestamp;
use serde::Serialize;
use serde_json::{Value, json};
use std::fmt::{Display, Write};

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Parses format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Formats a parsed timestamp with its date part.
#[must_use]
pub fn format_timestamp(ts: &Timestamp, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            let _ = writeln!(output, "Timestamp: {ts}");
            let _ = writeln!(output, "Date:      {}", ts.date_string());
            output
        }
        OutputFormat::Json => pretty(&json!({
            "timestamp": ts.to_string(),
            "date": ts.date_string(),
        })),
    }
}

/// Formats a single named result.
///
/// Text output is the bare value; JSON output is `{"<key>": value}`.
///
/// # Errors
///
/// [`crate::error::CommandError::OutputFormat`] if `value` cannot be
/// serialized.
pub fn format_value<T: Serialize + Display>(
    key: &str,
    value: &T,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(format!("{value}\n")),
        OutputFormat::Json => {
            let mut object = serde_json::Map::new();
            object.insert(key.to_string(), serde_json::to_value(value)?);
            Ok(pretty(&Value::Object(object)))
        }
    }
}

/// Formats a duration together with its unit.
#[must_use]
pub fn format_duration(value: f64, unit: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("{value} {unit}\n"),
        OutputFormat::Json => pretty(&json!({ "duration": value, "unit": unit })),
    }
}

/// Formats an error for display.
#[must_use]
pub fn format_error(error: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => error.to_string(),
        OutputFormat::Json => pretty(&error_body(error)),
    }
}

fn error_body(error: &Error) -> Value {
    json!({
        "error": {
            "kind": error.kind(),
            "message": error.to_string(),
        }
    })
}

/// One `eval` answer line for a successful call.
#[must_use]
pub fn format_eval_ok(value: &Value) -> String {
    let mut line = json!({ "ok": value }).to_string();
    line.push('\n');
    line
}

/// One `eval` answer line for a failed call.
#[must_use]
pub fn format_eval_error(error: &Error) -> String {
    let mut line = error_body(error).to_string();
    line.push('\n');
    line
}

fn pretty(value: &Value) -> String {
    format!("{value:#}\n")
}
