//! Error types and result alias for nofmt.
//!
//! Every error here is fatal: the first one raised aborts the whole run.
//! Line numbers in messages are 1-indexed, matching the `--lines` convention
//! of the formatter.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone)]
pub enum Error {
    /// An input path named on the command line does not exist
    #[error("missing input file: {path}")]
    MissingFile { path: PathBuf },

    /// A directive was found but its range arguments could not be resolved
    #[error("malformed directive on line {line}: `{directive}`: {reason}")]
    MalformedDirective {
        /// 1-indexed line carrying the directive
        line: usize,
        directive: String,
        reason: String,
    },

    /// Two excluded ranges overlap or touch after sorting
    #[error("conflicting directives: excluded lines {first} and {second} overlap")]
    RangeOverlap { first: String, second: String },

    /// A configuration value is unusable
    #[error("invalid configuration: {message}")]
    Config { message: String },

    /// Reading a source or configuration file failed
    #[error("failed to read {path}: {message}")]
    Read { path: PathBuf, message: String },

    /// Writing the annotated scratch copy failed
    #[error("failed to write {path}: {message}")]
    Write { path: PathBuf, message: String },

    /// The formatter executable could not be spawned
    #[error("failed to run `{program}`: {message}")]
    Formatter { program: String, message: String },
}

impl Error {
    #[must_use]
    pub fn missing_file(path: impl Into<PathBuf>) -> Self {
        Self::MissingFile { path: path.into() }
    }

    /// Build a malformed-directive error from a 0-indexed line number
    #[must_use]
    pub fn malformed(line_index: usize, directive: &str, reason: impl Into<String>) -> Self {
        Self::MalformedDirective {
            line: line_index + 1,
            directive: directive.to_string(),
            reason: reason.into(),
        }
    }

    /// Build an overlap error from two 0-indexed inclusive ranges
    #[must_use]
    pub fn overlap(first: (usize, usize), second: (usize, usize)) -> Self {
        Self::RangeOverlap {
            first: format!("{}:{}", first.0 + 1, first.1 + 1),
            second: format!("{}:{}", second.0 + 1, second.1 + 1),
        }
    }

    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn read(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            message: err.to_string(),
        }
    }

    #[must_use]
    pub fn write(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            message: err.to_string(),
        }
    }

    #[must_use]
    pub fn formatter(program: impl Into<String>, err: &std::io::Error) -> Self {
        Self::Formatter {
            program: program.into(),
            message: err.to_string(),
        }
    }
}
