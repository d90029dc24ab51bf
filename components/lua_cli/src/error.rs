//! Error types for the CLI.

use core_types::Diagnostic;
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// A source file could not be read
    #[error("could not read '{path}': {source}")]
    Io {
        /// Path of the file
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The source failed to parse; the diagnostic is fully rendered and
    /// ready for display
    #[error("{}", .0.message)]
    Parse(Diagnostic),

    /// REPL line editing failed
    #[error("readline error: {0}")]
    Repl(String),
}

impl CliError {
    /// The parse diagnostic, when this is a parse error.
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            CliError::Parse(diagnostic) => Some(diagnostic),
            _ => None,
        }
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
