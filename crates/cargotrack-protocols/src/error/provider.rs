//! LLM provider errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Rate limited: retry after {retry_after_seconds} seconds")]
    RateLimited { retry_after_seconds: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Empty response: {0}")]
    EmptyResponse(String),

    #[error("Network error: {0}")]
    Network(String),
}

impl ProviderError {
    /// Map an HTTP status and message from a provider API into an error.
    pub fn from_api_response(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => ProviderError::AuthenticationFailed(message),
            429 => ProviderError::RateLimited {
                retry_after_seconds: 60,
            },
            400 => ProviderError::InvalidRequest(message),
            _ => ProviderError::ApiError { status, message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_api_error() {
        let err = ProviderError::ApiError {
            status: 500,
            message: "Internal Server Error".to_string(),
        };
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("Internal Server Error"));
    }

    #[test]
    fn test_from_api_response_auth() {
        let err = ProviderError::from_api_response(401, "bad key");
        assert!(matches!(err, ProviderError::AuthenticationFailed(_)));

        let err = ProviderError::from_api_response(403, "forbidden");
        assert!(matches!(err, ProviderError::AuthenticationFailed(_)));
    }

    #[test]
    fn test_from_api_response_rate_limited() {
        let err = ProviderError::from_api_response(429, "slow down");
        assert!(err.to_string().contains("Rate limited"));
    }

    #[test]
    fn test_from_api_response_bad_request() {
        let err = ProviderError::from_api_response(400, "missing contents");
        assert!(matches!(err, ProviderError::InvalidRequest(ref m) if m == "missing contents"));
    }

    #[test]
    fn test_from_api_response_other() {
        let err = ProviderError::from_api_response(503, "unavailable");
        match err {
            ProviderError::ApiError { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "unavailable");
            }
            other => panic!("Expected ApiError, got {:?}", other),
        }
    }

    #[test]
    fn test_provider_error_network() {
        let err = ProviderError::Network("Connection refused".to_string());
        assert!(err.to_string().contains("Network error"));
    }
}
