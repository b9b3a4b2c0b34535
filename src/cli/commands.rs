//! CLI command implementations.
//!
//! Contains the business logic for each CLI command.

use crate::cli::output::{
    OutputFormat, format_duration, format_eval_error, format_eval_ok, format_timestamp,
    format_value,
};
use crate::cli::parser::{Cli, Commands, Offset};
use crate::core::coerce::mismatch;
use crate::core::{Arg, str_notempty, str_or_none, to_float, to_int};
use crate::error::{CommandError, Error, Result};
use crate::support::{is_filename_only, read_text};
use crate::time::{self, Timekeeper};
use serde::Deserialize;
use serde_json::Value;
use std::io::{self, Read};
use std::path::Path;

/// Executes the CLI command.
///
/// # Arguments
///
/// * `cli` - Parsed CLI arguments.
///
/// # Returns
///
/// Result with output string on success.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);
    let keeper = time::system();
    tracing::debug!(command = ?cli.command, "executing");

    match &cli.command {
        Commands::Now => format_value("now", &keeper.now_string(), format),
        Commands::Parse { text } => cmd_parse(keeper, text.as_deref(), format),
        Commands::Validate { text } => cmd_validate(text, format),
        Commands::Check { text } => format_value("valid", &time::is_valid(text), format),
        Commands::Increase { text, offset } => cmd_shift(text, *offset, false, format),
        Commands::Decrease { text, offset } => cmd_shift(text, *offset, true, format),
        Commands::Duration { start, stop, unit } => cmd_duration(start, stop, unit, format),
        Commands::DefaultDuration { unit } => Ok(format_duration(
            time::default_duration(unit),
            unit,
            format,
        )),
        Commands::Approx { a, b, tolerance } => cmd_approx(keeper, a, b, *tolerance, format),
        Commands::OrDefault { text } => {
            let value = keeper.timestamp_or_default(text.as_deref())?;
            format_value("timestamp", &value, format)
        }
        Commands::Stop { stop, start } => {
            let value = keeper.stop_or_default(stop.as_deref(), start.as_deref())?;
            format_value("stop", &value, format)
        }
        Commands::Eval { input } => cmd_eval(keeper, input.as_deref()),
    }
}

fn cmd_parse(keeper: &Timekeeper, text: Option<&str>, format: OutputFormat) -> Result<String> {
    let ts = keeper.parse(text)?;
    Ok(format_timestamp(&ts, format))
}

fn cmd_validate(text: &str, format: OutputFormat) -> Result<String> {
    time::validate(text)?;
    match format {
        OutputFormat::Text => Ok("valid\n".to_string()),
        OutputFormat::Json => format_value("valid", &true, format),
    }
}

fn cmd_shift(text: &str, offset: Offset, backwards: bool, format: OutputFormat) -> Result<String> {
    let Offset {
        hours,
        minutes,
        seconds,
    } = offset;
    let shifted = if backwards {
        time::decrease(text, hours, minutes, seconds)?
    } else {
        time::increase(text, hours, minutes, seconds)?
    };
    format_value("timestamp", &shifted, format)
}

fn cmd_duration(start: &str, stop: &str, unit: &str, format: OutputFormat) -> Result<String> {
    let value = time::calculate_duration(start, stop, unit)?;
    Ok(format_duration(value, unit, format))
}

fn cmd_approx(
    keeper: &Timekeeper,
    a: &str,
    b: &str,
    tolerance: Option<f64>,
    format: OutputFormat,
) -> Result<String> {
    let equal = match tolerance {
        Some(tolerance) => keeper.approx_equal_within(a, b, tolerance)?,
        None => keeper.approx_equal(a, b)?,
    };
    format_value("equal", &equal, format)
}

/// One `eval` request line.
#[derive(Debug, Deserialize)]
struct Call {
    op: String,
    #[serde(default)]
    args: Vec<Value>,
}

fn cmd_eval(keeper: &Timekeeper, input: Option<&Path>) -> Result<String> {
    let source = match input {
        Some(path) => read_text(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map_err(|e| {
                CommandError::ExecutionFailed(format!("Failed to read from stdin: {e}"))
            })?;
            buffer
        }
    };
    Ok(eval_lines(keeper, &source))
}

/// Answers every non-blank NDJSON line of `source`, one line each.
pub(crate) fn eval_lines<C: time::Clock>(keeper: &Timekeeper<C>, source: &str) -> String {
    let mut output = String::new();
    for (number, line) in source.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let answer = serde_json::from_str::<Call>(line)
            .map_err(|e| {
                Error::from(CommandError::InvalidArgument(format!(
                    "line {}: {e}",
                    number + 1
                )))
            })
            .and_then(|call| {
                let args: Vec<Arg> = call.args.into_iter().map(Arg::from).collect();
                dispatch(keeper, &call.op, &args)
            });
        match answer {
            Ok(value) => output.push_str(&format_eval_ok(&value)),
            Err(e) => {
                tracing::debug!(line = number + 1, error = %e, "eval call failed");
                output.push_str(&format_eval_error(&e));
            }
        }
    }
    output
}

/// Positional arguments of one `eval` call.
struct CallArgs<'a> {
    op: &'a str,
    args: &'a [Arg],
}

impl<'a> CallArgs<'a> {
    fn new(op: &'a str, args: &'a [Arg], max: usize) -> Result<Self> {
        if args.len() > max {
            return Err(CommandError::InvalidArgument(format!(
                "{op} takes at most {max} arguments, got {}",
                args.len()
            ))
            .into());
        }
        Ok(Self { op, args })
    }

    /// The `i`th argument, `Null` when omitted.
    fn get(&self, i: usize) -> Arg {
        self.args.get(i).cloned().unwrap_or_default()
    }

    /// The `i`th argument, or `default` when omitted.
    fn get_or(&self, i: usize, default: impl Into<Arg>) -> Arg {
        self.args.get(i).cloned().unwrap_or_else(|| default.into())
    }

    fn is_given(&self, i: usize) -> bool {
        i < self.args.len()
    }

    /// The `i`th argument as a unit name, `default` when omitted.
    fn unit(&self, i: usize, default: &str) -> Result<String> {
        match self.args.get(i) {
            None => Ok(default.to_string()),
            Some(Arg::String(s)) => Ok(s.clone()),
            Some(other) => Err(mismatch("unit name string", other).into()),
        }
    }

    fn unknown(&self) -> Error {
        CommandError::UnknownOperation(self.op.to_string()).into()
    }
}

fn ok<T: Into<Value>>(value: T) -> Result<Value> {
    Ok(value.into())
}

#[allow(clippy::too_many_lines)]
fn dispatch<C: time::Clock>(keeper: &Timekeeper<C>, op: &str, args: &[Arg]) -> Result<Value> {
    match op {
        "now" | "now_string" | "default_start_time" => {
            CallArgs::new(op, args, 0)?;
            ok(keeper.now_string())
        }
        "parse" => {
            let a = CallArgs::new(op, args, 1)?;
            ok(keeper.parse(a.get(0))?.to_string())
        }
        "validate" => {
            let a = CallArgs::new(op, args, 1)?;
            ok(time::validate(a.get(0))?)
        }
        "is_valid" => {
            let a = CallArgs::new(op, args, 1)?;
            ok(time::is_valid(a.get(0)))
        }
        "confirm_timestamp" => {
            let a = CallArgs::new(op, args, 1)?;
            ok(time::confirm_timestamp(&a.get(0)))
        }
        "format" => {
            let a = CallArgs::new(op, args, 1)?;
            ok(time::format(a.get(0))?)
        }
        "date_only_string" => {
            let a = CallArgs::new(op, args, 1)?;
            ok(time::date_only_string(a.get(0))?)
        }
        "increase" | "decrease" => {
            let a = CallArgs::new(op, args, 4)?;
            let (hours, minutes, seconds) = (a.get_or(1, 0), a.get_or(2, 0), a.get_or(3, 0));
            let shifted = if op == "increase" {
                time::increase(a.get(0), hours, minutes, seconds)?
            } else {
                time::decrease(a.get(0), hours, minutes, seconds)?
            };
            ok(shifted)
        }
        "calculate_duration" => {
            let a = CallArgs::new(op, args, 3)?;
            ok(time::calculate_duration(a.get(0), a.get(1), &a.unit(2, "hours")?)?)
        }
        "default_duration" => {
            let a = CallArgs::new(op, args, 1)?;
            ok(time::default_duration(&a.unit(0, "minutes")?))
        }
        "approx_equal" => {
            let a = CallArgs::new(op, args, 3)?;
            let equal = if a.is_given(2) {
                keeper.approx_equal_within(a.get(0), a.get(1), a.get(2))?
            } else {
                keeper.approx_equal(a.get(0), a.get(1))?
            };
            ok(equal)
        }
        "timestamp_or_default" => {
            let a = CallArgs::new(op, args, 1)?;
            ok(keeper.timestamp_or_default(a.get(0))?)
        }
        "start_or_default" => {
            let a = CallArgs::new(op, args, 1)?;
            ok(keeper.start_or_default(a.get(0))?)
        }
        "stop_or_default" => {
            let a = CallArgs::new(op, args, 2)?;
            ok(keeper.stop_or_default(a.get(0), a.get(1))?)
        }
        "default_stop_time" => {
            let a = CallArgs::new(op, args, 1)?;
            ok(keeper.default_stop_time(a.get(0))?)
        }
        "to_int" => {
            let a = CallArgs::new(op, args, 1)?;
            ok(to_int(&a.get(0))?)
        }
        "to_float" => {
            let a = CallArgs::new(op, args, 1)?;
            ok(to_float(&a.get(0))?)
        }
        "str_notempty" => {
            let a = CallArgs::new(op, args, 1)?;
            ok(str_notempty(&a.get(0)))
        }
        "str_or_none" => {
            let a = CallArgs::new(op, args, 1)?;
            ok(str_or_none(&a.get(0)).map(str::to_string))
        }
        "is_filename_only" => {
            let a = CallArgs::new(op, args, 1)?;
            ok(is_filename_only(a.get(0))?)
        }
        _ => Err(CallArgs { op, args }.unknown()),
    }
}
