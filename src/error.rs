//! Error types for isostamp operations.
//!
//! This module provides the error hierarchy using `thiserror` for timestamp
//! handling, file helpers and CLI commands.

use thiserror::Error;

/// Result type alias for isostamp operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Timestamp parsing, validation or arithmetic errors.
    #[error(transparent)]
    Time(#[from] TimeError),

    /// I/O errors (file operations).
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// CLI command errors.
    #[error("command error: {0}")]
    Command(#[from] CommandError),
}

impl Error {
    /// Returns a stable, machine-readable tag for the error.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Time(err) => err.kind(),
            Self::Io(_) => "io",
            Self::Command(_) => "command",
        }
    }

    /// Returns the inner timestamp error, if this is one.
    #[must_use]
    pub const fn as_time(&self) -> Option<&TimeError> {
        match self {
            Self::Time(err) => Some(err),
            _ => None,
        }
    }
}

/// The three error kinds of the timestamp utility group.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeError {
    /// An argument's runtime type is incompatible with the operation.
    #[error("type mismatch: expected {expected}, got type({found}), value = '{value}'")]
    TypeMismatch {
        /// What the operation accepts.
        expected: &'static str,
        /// Type name of the offending argument.
        found: &'static str,
        /// Rendering of the offending argument.
        value: String,
    },

    /// A string does not match the canonical `YYYY-MM-DDTHH:MM:SS` pattern.
    #[error("invalid timestamp literal: '{value}'")]
    Format {
        /// The rejected text.
        value: String,
    },

    /// A value is well-formed but out of range, or an option is unknown.
    #[error("{reason}")]
    Range {
        /// Description of the violated range.
        reason: String,
    },
}

impl TimeError {
    /// Returns a stable tag for the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::TypeMismatch { .. } => "type_mismatch",
            Self::Format { .. } => "format",
            Self::Range { .. } => "range",
        }
    }

    /// Creates a range error from any displayable reason.
    pub fn range(reason: impl Into<String>) -> Self {
        Self::Range {
            reason: reason.into(),
        }
    }

    /// Folds a format error into a range error for operations that report
    /// every unusable string the same way.
    #[must_use]
    pub fn into_range(self) -> Self {
        match self {
            Self::Format { value } => Self::Range {
                reason: format!("Invalid ISO datetime str value: '{value}'"),
            },
            other => other,
        }
    }

    /// Returns true for [`TimeError::TypeMismatch`].
    #[must_use]
    pub const fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. })
    }

    /// Returns true for [`TimeError::Format`].
    #[must_use]
    pub const fn is_format(&self) -> bool {
        matches!(self, Self::Format { .. })
    }

    /// Returns true for [`TimeError::Range`].
    #[must_use]
    pub const fn is_range(&self) -> bool {
        matches!(self, Self::Range { .. })
    }
}

/// I/O-specific errors for file operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path to the file that was not found.
        path: String,
    },

    /// Failed to read file.
    #[error("failed to read file: {path}: {reason}")]
    ReadFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Failed to write file.
    #[error("failed to write file: {path}: {reason}")]
    WriteFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Directory creation error.
    #[error("failed to create directory: {path}: {reason}")]
    DirectoryFailed {
        /// Path to the directory.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Generic I/O error wrapper.
    #[error("I/O error: {0}")]
    Generic(String),
}

/// CLI command-specific errors.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Invalid argument provided.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Operation name not known to the `eval` surface.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// Command execution failed.
    #[error("command execution failed: {0}")]
    ExecutionFailed(String),

    /// Output format error.
    #[error("output format error: {0}")]
    OutputFormat(String),
}

impl From<serde_json::Error> for CommandError {
    fn from(err: serde_json::Error) -> Self {
        Self::OutputFormat(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Command(err.into())
    }
}
