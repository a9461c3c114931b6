//! Errors raised when turning directives into renderer calls.

use thiserror::Error;

/// Failure reported by the external rendering backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("backend call '{function}' failed: {message}")]
pub struct BackendError {
    /// The backend function that was invoked
    pub function: String,
    /// Backend-provided description
    pub message: String,
}

impl BackendError {
    /// Creates a backend error for the given function.
    pub fn new(function: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            message: message.into(),
        }
    }
}

/// Error returned when building or submitting renderer requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// The directive's verb has no renderer function
    #[error("unsupported verb '{verb}'")]
    UnsupportedVerb { verb: String },
    /// The backend rejected the call
    #[error(transparent)]
    Backend(#[from] BackendError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_verb_display() {
        let err = RequestError::UnsupportedVerb {
            verb: "mfoo".to_string(),
        };
        assert_eq!(err.to_string(), "unsupported verb 'mfoo'");
    }

    #[test]
    fn test_backend_error_is_transparent() {
        let err: RequestError = BackendError::new("mcont", "no display").into();
        let msg = err.to_string();
        assert!(msg.contains("mcont"));
        assert!(msg.contains("no display"));
    }
}
