//! Agent errors.

use thiserror::Error;

use super::{ProviderError, ToolError};

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Browser session failed: {0}")]
    Browser(String),

    #[error("Agent execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Provider error: {0}")]
    ProviderError(#[from] ProviderError),

    #[error("Tool error: {0}")]
    ToolError(#[from] ToolError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_error_browser() {
        let err = AgentError::Browser("Chrome not found".to_string());
        assert!(err.to_string().contains("Browser session failed"));
        assert!(err.to_string().contains("Chrome not found"));
    }

    #[test]
    fn test_agent_error_from_provider() {
        let err: AgentError = ProviderError::Network("down".to_string()).into();
        assert!(matches!(err, AgentError::ProviderError(_)));
        assert!(err.to_string().contains("down"));
    }

    #[test]
    fn test_agent_error_from_tool() {
        let err: AgentError = ToolError::NotFound("browser_fly".to_string()).into();
        assert!(err.to_string().contains("browser_fly"));
    }
}
