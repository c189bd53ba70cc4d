//! Top-level error type for llm-caller.
//!
//! Each component has its own error enum; [`CallerError`] wraps them so the
//! binary can print any failure as a single `Error: <message>` line.

use crate::config::ConfigError;
use crate::executor::RequestError;
use crate::extractor::ExtractError;
use crate::template::TemplateError;
use crate::variables::VariableError;
use std::path::PathBuf;
use thiserror::Error;

/// Process exit code for successful runs.
pub const EXIT_SUCCESS: u8 = 0;

/// Process exit code for failures during an invocation.
pub const EXIT_FAILURE: u8 = 1;

/// Process exit code for invalid command-line usage.
pub const EXIT_USAGE: u8 = 2;

/// Any error that ends an invocation.
#[derive(Error, Debug)]
pub enum CallerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Variable(#[from] VariableError),

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error("failed to extract response content: {0}")]
    Extract(#[from] ExtractError),

    /// The command line is inconsistent (e.g. no template source given).
    #[error("{0}")]
    Usage(String),

    #[error("failed to write output to '{}': {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write to stdout: {0}")]
    Stdout(#[source] std::io::Error),
}

impl CallerError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CallerError::Usage(_) => EXIT_USAGE,
            _ => EXIT_FAILURE,
        }
    }
}

/// Result type alias for llm-caller operations.
pub type Result<T> = std::result::Result<T, CallerError>;
