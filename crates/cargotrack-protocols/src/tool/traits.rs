//! Tool trait definition.

use async_trait::async_trait;

use super::{ToolDefinition, ToolResult};
use crate::error::ToolError;

/// An action the browser agent can invoke.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the tool definition.
    fn definition(&self) -> &ToolDefinition;

    /// Execute the tool with the given parameters.
    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, ToolError>;
}
