//! Gateway error taxonomy.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur when calling the shop backend.
///
/// The gateway never retries; every failure is surfaced to the immediate
/// caller. [`GatewayError::NotFound`] is kept distinct from the generic
/// status error because the session bootstrapper treats a missing user
/// record as a recovery signal rather than a terminal failure.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// No response arrived within the category's configured deadline.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The resource does not exist (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// The backend answered with a non-2xx status.
    #[error("backend returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, verbatim.
        body: String,
    },

    /// Transport-level failure (connection, DNS, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be decoded.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl GatewayError {
    /// Whether this error is the distinguished missing-resource case.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = GatewayError::NotFound("user 42".to_string());
        assert_eq!(err.to_string(), "not found: user 42");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_status_display() {
        let err = GatewayError::Status {
            status: 401,
            body: "{\"detail\":\"unauthorized\"}".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "backend returned 401: {\"detail\":\"unauthorized\"}"
        );
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_timeout_display() {
        let err = GatewayError::Timeout(Duration::from_secs(30));
        assert_eq!(err.to_string(), "request timed out after 30s");
    }
}
