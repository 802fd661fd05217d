//! CDP error types.

use thiserror::Error;

/// Errors from the DevTools connection and page commands.
#[derive(Debug, Error)]
pub enum CdpError {
    /// `/json/version` did not answer; Chrome is down or lacks remote debugging.
    #[error("Chrome not reachable at {0}")]
    ChromeNotAvailable(String),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Writing a command to the socket failed.
    #[error("Failed to send command: {0}")]
    Send(#[from] tokio_tungstenite::tungstenite::Error),

    /// Chrome answered a command with an error object.
    #[error("CDP error {code}: {message}")]
    Protocol { code: i64, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// A page script threw.
    #[error("JavaScript error: {0}")]
    JavaScript(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Session closed")]
    SessionClosed,

    /// A reply lacked a field the caller needs.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<url::ParseError> for CdpError {
    fn from(e: url::ParseError) -> Self {
        CdpError::NavigationFailed(format!("Invalid URL: {}", e))
    }
}
