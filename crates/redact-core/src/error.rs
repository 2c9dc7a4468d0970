//! Errors surfaced by requests to the privacy service.

/// Errors that can occur while talking to the privacy service.
///
/// Every variant renders as a single user-visible message. Only
/// [`ApiError::Network`] is treated specially, and only on preview.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (offline, CORS,
    /// DNS, connection refused).
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a non-success status.
    #[error("request failed: {status} - {body}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
        /// Response body text, as returned.
        body: String,
    },

    /// A response arrived but its body could not be read or was not the
    /// expected JSON.
    #[error("invalid response: {0}")]
    Decode(String),

    /// A browser API call failed while building or sending the request.
    #[error("browser API error: {0}")]
    Browser(String),
}

impl ApiError {
    /// The response headers arrived with `status` but reading the body
    /// failed with `detail`.
    #[must_use]
    pub fn unreadable_body(status: u16, detail: &str) -> Self {
        Self::Decode(format!("{status} response body could not be read: {detail}"))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_includes_code_and_body() {
        let err = ApiError::UnexpectedStatus {
            status: 422,
            body: "blur_strength must be an integer".into(),
        };
        assert_eq!(
            err.to_string(),
            "request failed: 422 - blur_strength must be an integer"
        );
    }

    #[test]
    fn body_read_failure_is_not_a_network_error() {
        let err = ApiError::unreadable_body(200, "stream aborted");
        assert!(matches!(err, ApiError::Decode(_)));
        assert_eq!(
            err.to_string(),
            "invalid response: 200 response body could not be read: stream aborted"
        );
    }
}
