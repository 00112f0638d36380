use thiserror::Error;

use crate::catalog::SourceTag;

/// Errors and notices produced by the reconciliation core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XrefError {
    /// A service reference did not decompose into exactly ten fields
    #[error("Malformed service reference '{text}': {reason}")]
    MalformedKey { text: String, reason: String },

    /// A satellite position string did not match `<digits>.<digits>[EW]`
    #[error("Invalid satellite position: {0}")]
    InvalidSatellite(String),

    /// One of the input sequences was empty
    #[error("{0} source is empty, nothing to reconcile")]
    EmptySource(SourceTag),
}

impl XrefError {
    pub fn malformed_key(text: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedKey {
            text: text.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_satellite(text: impl Into<String>) -> Self {
        Self::InvalidSatellite(text.into())
    }
}
