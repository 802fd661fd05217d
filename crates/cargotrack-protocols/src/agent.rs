//! Agent protocol.

use async_trait::async_trait;

use crate::error::AgentError;

/// Runs a natural-language tracking task.
///
/// The returned value is deliberately opaque: it may be a JSON object, a
/// string with JSON embedded in prose, plain prose, or `null`. Shaping it
/// into a record is the normalizer's job.
#[async_trait]
pub trait TrackingAgent: Send + Sync {
    /// Execute `task` to completion.
    async fn run(&self, task: &str) -> Result<serde_json::Value, AgentError>;
}

/// Name of the tool an agent calls to hand back its final result.
pub const DONE_TOOL: &str = "done";
