use thiserror::Error;

use picon_xref_core::XrefError;
use picon_xref_sources::SourceError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Fetching or reading an input failed
    #[error("{0}")]
    Source(#[from] SourceError),

    /// A service reference given on the command line did not normalize
    #[error("{0}")]
    Reference(#[from] XrefError),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
