//! REST client error types

use thiserror::Error;

/// Message shown for any transport-level failure.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";

/// Errors that can occur when talking to the backend
#[derive(Error, Debug)]
pub enum ApiError {
    /// Backend did not answer within the configured timeout
    #[error("Request timeout")]
    Timeout,

    /// Connection to the backend could not be established
    #[error("Backend unavailable")]
    Unavailable,

    /// Any other transport failure
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// A positions call was attempted without a session token
    #[error("Not signed in")]
    Unauthenticated,

    /// Body is not JSON, or a success body does not match the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Classify a reqwest failure the same way for every call site.
    pub(crate) fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else if e.is_connect() {
            ApiError::Unavailable
        } else {
            ApiError::Request(e)
        }
    }

    /// The plain string a view renders for this failure.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Timeout
            | ApiError::Unavailable
            | ApiError::Request(_)
            | ApiError::InvalidResponse(_) => NETWORK_ERROR_MESSAGE.to_string(),
            ApiError::Api { message, .. } => message.clone(),
            ApiError::Unauthenticated => "Please sign in first".to_string(),
        }
    }

    /// HTTP status, when the backend produced one
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for client operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message_is_backend_text() {
        let err = ApiError::Api {
            status: 401,
            message: "Invalid credentials".to_string(),
        };
        assert_eq!(err.user_message(), "Invalid credentials");
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.to_string(), "API error 401: Invalid credentials");
    }

    #[test]
    fn test_transport_errors_render_network_message() {
        assert_eq!(ApiError::Timeout.user_message(), NETWORK_ERROR_MESSAGE);
        assert_eq!(ApiError::Unavailable.user_message(), NETWORK_ERROR_MESSAGE);
        assert_eq!(ApiError::Timeout.status(), None);

        let garbled = ApiError::InvalidResponse("expected value at line 1".to_string());
        assert_eq!(garbled.user_message(), NETWORK_ERROR_MESSAGE);
    }
}
