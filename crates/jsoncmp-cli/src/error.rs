//! CLI error types with associated exit codes.
//!
//! Every variant maps to a stable exit code via [`CliError::exit_code`]:
//!
//! - Exit code **2** — input failure: an argument file could not be read or
//!   parsed, or the weight specification is malformed. These terminate before
//!   any comparison runs.
//! - Exit code **1** — logical failure: the comparison ran to completion and
//!   found differences.

use std::fmt;
use std::path::PathBuf;

/// All error conditions the `jsoncmp` CLI can produce.
#[derive(Debug)]
pub enum CliError {
    // --- Exit code 2: input failures ---
    /// A file argument could not be read.
    ReadFailed {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error message.
        detail: String,
    },

    /// A file argument is not valid JSON.
    ParseFailed {
        /// The path that failed to parse.
        path: PathBuf,
        /// The underlying parse error message.
        detail: String,
    },

    /// The weight specification file is malformed.
    InvalidWeights {
        /// The weight-specification error message.
        detail: String,
    },

    /// Writing the configured report file failed.
    ReportWriteFailed {
        /// The underlying report error message.
        detail: String,
    },

    /// Writing to stdout failed.
    IoError {
        /// The underlying I/O error message.
        detail: String,
    },

    // --- Exit code 1: logical failures ---
    /// The comparison found differences.
    ///
    /// The report has already been printed; this variant exists so `main`
    /// can exit with code 1 cleanly.
    DifferencesFound,
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::DifferencesFound => 1,
            CliError::ReadFailed { .. }
            | CliError::ParseFailed { .. }
            | CliError::InvalidWeights { .. }
            | CliError::ReportWriteFailed { .. }
            | CliError::IoError { .. } => 2,
        }
    }

    /// Returns the message to print to stderr before exiting, or `None` when
    /// the condition has already been reported.
    pub fn message(&self) -> Option<String> {
        match self {
            CliError::ReadFailed { path, detail } => {
                Some(format!("cannot read {}: {detail}", path.display()))
            }
            CliError::ParseFailed { path, detail } => {
                Some(format!("cannot parse {}: {detail}", path.display()))
            }
            CliError::InvalidWeights { detail } => Some(detail.clone()),
            CliError::ReportWriteFailed { detail } => Some(detail.clone()),
            CliError::IoError { detail } => Some(format!("write failed: {detail}")),
            CliError::DifferencesFound => None,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message() {
            Some(msg) => write!(f, "{msg}"),
            None => write!(f, "differences found"),
        }
    }
}

impl std::error::Error for CliError {}
