use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish a failed run from
/// a misuse of the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - the diff was computed and rendered
    Success = 0,
    /// Application error (unreadable SBOM, bad config, write failure, etc.)
    ApplicationError = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::ApplicationError => write!(f, "Application Error (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
        }
    }
}

/// Application-specific errors.
///
/// `InvalidConfiguration` and `Precondition` form the configuration tier of the
/// scanner contract: they signal misuse and are returned immediately, never
/// recorded as a diagnostic.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiffusedError {
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Precondition failed: {message}")]
    Precondition { message: String },

    #[error("Failed to read SBOM file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    SbomReadError { path: PathBuf, details: String },

    #[error("Failed to parse SBOM file: {path}\nDetails: {details}\n\n💡 Hint: Only SPDX JSON documents are supported")]
    SbomParseError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("{message}\n\n💡 Hint: {hint}")]
    InvalidInput { message: String, hint: String },
}

impl DiffusedError {
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        DiffusedError::InvalidConfiguration {
            message: message.into(),
        }
    }

    pub fn precondition(message: impl Into<String>) -> Self {
        DiffusedError::Precondition {
            message: message.into(),
        }
    }
}

/// Operational failures of a scan backend.
///
/// These never escape a scanner operation as an `Err`: they are rendered into
/// the scanner's diagnostic and handed back inside a `StageOutcome`.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("process exited with {}: {stderr}", describe_status(.status))]
    ProcessFailure { status: Option<i32>, stderr: String },

    #[error("timed out after {}s", .timeout.as_secs())]
    Timeout { timeout: Duration },

    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed output: {details}")]
    MalformedOutput { details: String },

    #[error("{details}")]
    Unexpected { details: String },
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}

/// Result of a scanner stage that passed its configuration checks.
#[derive(Debug)]
pub enum StageOutcome {
    Completed,
    Failed(ScanError),
}

impl StageOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, StageOutcome::Completed)
    }

    pub fn error(&self) -> Option<&ScanError> {
        match self {
            StageOutcome::Completed => None,
            StageOutcome::Failed(err) => Some(err),
        }
    }
}
