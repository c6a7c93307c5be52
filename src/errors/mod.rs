//! Error handling utilities for the daybook application.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the application, the
//! `HistoryError` type raised by the version-control query layer, and the
//! convenience aliases `AppResult` and `HistoryResult`.

use chrono::NaiveDate;
use std::io;
use thiserror::Error;

/// Represents the failure modes of a version-control query.
///
/// Only `Unavailable` is always fatal. The diff extractor recovers from every
/// variant by falling back to a stat summary; any other query propagates them.
///
/// # Examples
///
/// ```
/// use daybook::errors::HistoryError;
///
/// let error = HistoryError::OutputTooLarge { limit: 1024 };
/// assert!(format!("{}", error).contains("1024 bytes"));
///
/// let error = HistoryError::Unavailable {
///     program: "git".to_string(),
///     reason: "not a git repository".to_string(),
/// };
/// assert!(format!("{}", error).contains("git"));
/// ```
#[derive(Debug, Error)]
pub enum HistoryError {
    /// The binary is missing or the working directory is not a repository.
    #[error("History unavailable via '{program}': {reason}. Check that the tool is installed and that the working directory is a repository.")]
    Unavailable {
        /// The version-control program that was invoked
        program: String,
        /// Why the history could not be reached
        reason: String,
    },

    /// The command produced more output than the configured ceiling.
    #[error("Command output exceeded the {limit} bytes capture limit")]
    OutputTooLarge {
        /// The ceiling that was exceeded
        limit: u64,
    },

    /// The command did not finish within the configured timeout.
    #[error("Command did not finish within {seconds} seconds")]
    Timeout {
        /// The timeout that elapsed
        seconds: u64,
    },

    /// The command ran but exited unsuccessfully.
    #[error("Command '{command}' failed (exit code {exit_code}): {stderr}")]
    CommandFailed {
        /// The command line that failed
        command: String,
        /// The exit code, or -1 when the process was terminated by a signal
        exit_code: i32,
        /// Captured standard error
        stderr: String,
    },
}

/// Represents all possible errors that can occur in the daybook application.
///
/// # Examples
///
/// Creating a configuration error:
/// ```
/// use daybook::errors::AppError;
///
/// let error = AppError::Config("Git command cannot be empty".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Git command cannot be empty");
/// ```
///
/// Converting from an IO error:
/// ```
/// use daybook::errors::AppError;
/// use std::io::{self, ErrorKind};
///
/// let io_error = io::Error::new(ErrorKind::NotFound, "file not found");
/// let app_error: AppError = io_error.into();
///
/// match app_error {
///     AppError::Io(inner) => assert_eq!(inner.kind(), ErrorKind::NotFound),
///     _ => panic!("Expected Io variant"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem operations not tied to one journal date.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The single-date entry point received a malformed or impossible date.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// The version-control history could not be queried.
    #[error("History error: {0}")]
    History(#[from] HistoryError),

    /// Persisting the journal for a specific date failed.
    #[error("Failed to write journal for {date}: {source}. Please check permissions and free space in the journal directory.")]
    Store {
        /// The date whose journal could not be written
        date: NaiveDate,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
///
/// # Examples
///
/// ```
/// use daybook::errors::{AppResult, AppError};
///
/// fn might_fail() -> AppResult<String> {
///     if false {
///         return Err(AppError::InvalidDate("2024-13-40".to_string()));
///     }
///     Ok("Operation succeeded".to_string())
/// }
/// ```
pub type AppResult<T> = Result<T, AppError>;

/// A type alias for results of version-control queries.
pub type HistoryResult<T> = Result<T, HistoryError>;
