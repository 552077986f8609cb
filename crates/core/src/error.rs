//! Error types for the test harness
//!
//! Every failure a test can communicate to its runner is an [`Error`].
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Errors are grouped into coarse categories by [`ErrorKind`]. The kind is
//! what `assert_raises` matches against, so wrapping variants report the kind
//! of the error they wrap rather than their own.

use std::fmt;
use std::io;
use thiserror::Error;

/// Result type alias for harness operations
pub type Result<T> = std::result::Result<T, Error>;

/// Why a name was rejected by the alias resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidNameReason {
    /// The name is the empty string
    Empty,
    /// The name begins or ends with a separator
    Boundary,
    /// Two separators appear next to each other
    DoubleSeparator,
}

impl fmt::Display for InvalidNameReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidNameReason::Empty => write!(f, "cannot transform an empty name"),
            InvalidNameReason::Boundary => {
                write!(f, "cannot transform when name begins or ends with separator")
            }
            InvalidNameReason::DoubleSeparator => write!(f, "double separators not allowed"),
        }
    }
}

/// Matchable category of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed assertion name
    InvalidName,
    /// A failed assertion, including `fail()`
    AssertionFailure,
    /// An override scope could not mutate its target
    TargetNotWritable,
    /// A value or argument was not acceptable
    InvalidValue,
    /// The test asked to be skipped
    Skipped,
    /// Settings or catalog file could not be parsed
    Config,
    /// I/O error
    Io,
}

impl ErrorKind {
    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidName => "InvalidName",
            ErrorKind::AssertionFailure => "AssertionFailure",
            ErrorKind::TargetNotWritable => "TargetNotWritable",
            ErrorKind::InvalidValue => "InvalidValue",
            ErrorKind::Skipped => "Skipped",
            ErrorKind::Config => "Config",
            ErrorKind::Io => "Io",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error types for the test harness
#[derive(Debug, Error)]
pub enum Error {
    /// Name cannot be turned into an alias
    #[error("invalid name '{name}': {reason}")]
    InvalidName {
        /// The rejected name
        name: String,
        /// Which rule it broke
        reason: InvalidNameReason,
    },

    /// An assertion did not hold
    #[error("assertion failed: {0}")]
    AssertionFailure(String),

    /// `assert_raises` observed an error of the wrong kind
    #[error("expected {expected} error, got {actual}: {message}")]
    UnexpectedErrorKind {
        /// Kind the caller expected
        expected: ErrorKind,
        /// Kind that was actually raised
        actual: ErrorKind,
        /// Display of the raised error
        message: String,
    },

    /// Target refused a set or delete
    #[error("target not writable: cannot modify '{attribute}'")]
    TargetNotWritable {
        /// Attribute that could not be modified
        attribute: String,
    },

    /// Unacceptable value or argument
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// Test skipped on purpose
    #[error("skipped: {0}")]
    Skipped(String),

    /// Settings or catalog parse failure
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A primary failure followed by failed releases
    #[error("{primary} (and {} cleanup failure(s) after it)", cleanup.len())]
    WithCleanupFailures {
        /// The error the test body raised
        primary: Box<Error>,
        /// Errors raised while releasing scopes afterwards
        cleanup: Vec<Error>,
    },
}

impl Error {
    /// Build an assertion failure from anything displayable
    pub fn assertion(message: impl Into<String>) -> Self {
        Error::AssertionFailure(message.into())
    }

    /// Build an invalid-value error
    pub fn invalid_value(message: impl Into<String>) -> Self {
        Error::InvalidValue(message.into())
    }

    /// Build a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }

    /// Category used for matching
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidName { .. } => ErrorKind::InvalidName,
            Error::AssertionFailure(_) | Error::UnexpectedErrorKind { .. } => {
                ErrorKind::AssertionFailure
            }
            Error::TargetNotWritable { .. } => ErrorKind::TargetNotWritable,
            Error::InvalidValue(_) => ErrorKind::InvalidValue,
            Error::Skipped(_) => ErrorKind::Skipped,
            Error::Config(_) => ErrorKind::Config,
            Error::Io(_) => ErrorKind::Io,
            Error::WithCleanupFailures { primary, .. } => primary.kind(),
        }
    }

    /// Errors raised by releases that ran after the primary failure
    pub fn cleanup_failures(&self) -> &[Error] {
        match self {
            Error::WithCleanupFailures { cleanup, .. } => cleanup,
            _ => &[],
        }
    }

    /// Merge the outcome of a scoped body with the errors of the releases
    /// that ran after it.
    ///
    /// The body's own error always stays in front: cleanup errors are attached
    /// to it, never substituted for it. A successful body with failed releases
    /// reports the first release error.
    pub fn with_cleanup<T>(outcome: Result<T>, cleanup: Vec<Error>) -> Result<T> {
        if cleanup.is_empty() {
            return outcome;
        }
        match outcome {
            Ok(_) => {
                let mut rest = cleanup;
                let first = rest.remove(0);
                if rest.is_empty() {
                    Err(first)
                } else {
                    Err(Error::WithCleanupFailures {
                        primary: Box::new(first),
                        cleanup: rest,
                    })
                }
            }
            Err(Error::WithCleanupFailures {
                primary,
                cleanup: mut earlier,
            }) => {
                earlier.extend(cleanup);
                Err(Error::WithCleanupFailures {
                    primary,
                    cleanup: earlier,
                })
            }
            Err(primary) => Err(Error::WithCleanupFailures {
                primary: Box::new(primary),
                cleanup,
            }),
        }
    }
}
