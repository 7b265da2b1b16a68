//! Error types for cogscreen.
//!
//! Malformed participant input is never an error: scorers degrade it to
//! "incorrect". The only hard failures are inconsistent configuration and a
//! broken input channel.

use thiserror::Error;

/// Errors raised by task setup and the participant I/O collaborators.
#[derive(Debug, Error)]
pub enum CogError {
    /// Task parameters are internally inconsistent (e.g. more words than the bank holds).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The input collaborator failed to deliver a line.
    #[error("input error: {0}")]
    Input(String),
}

impl CogError {
    /// Shorthand for building an [`CogError::InvalidConfiguration`].
    pub fn config(message: impl Into<String>) -> Self {
        CogError::InvalidConfiguration(message.into())
    }

    /// Returns `true` if this error comes from configuration validation.
    pub fn is_configuration(&self) -> bool {
        matches!(self, CogError::InvalidConfiguration(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_errors_are_classified() {
        let err = CogError::config("n_words (50) exceeds word bank size (43)");
        assert!(err.is_configuration());
        assert_eq!(
            err.to_string(),
            "invalid configuration: n_words (50) exceeds word bank size (43)"
        );
        assert!(!CogError::Input("stdin closed".into()).is_configuration());
    }
}
