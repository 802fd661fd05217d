//! Completion tool.
//!
//! The agent loop intercepts calls to this tool and ends the run with the
//! `result` argument; `execute` only runs when it is invoked directly.

use async_trait::async_trait;
use serde_json::json;

use cargotrack_protocols::{DONE_TOOL, Tool, ToolDefinition, ToolError, ToolResult};

/// Signals that the tracking data has been extracted.
pub struct DoneTool {
    definition: ToolDefinition,
}

impl DoneTool {
    pub fn new() -> Self {
        Self {
            definition: ToolDefinition::new(
                DONE_TOOL,
                "Done",
                "Finish the task and return the extracted tracking data",
            )
            .with_parameters_schema(json!({
                "type": "object",
                "properties": {
                    "result": {
                        "type": "object",
                        "description": "Tracking data with vessel, ports and schedule objects",
                        "properties": {
                            "vessel": {
                                "type": "object",
                                "properties": {
                                    "name": {"type": "string"},
                                    "number": {"type": "string"}
                                }
                            },
                            "ports": {
                                "type": "object",
                                "properties": {
                                    "loading": {"type": "string"},
                                    "discharge": {"type": "string"}
                                }
                            },
                            "schedule": {
                                "type": "object",
                                "properties": {
                                    "eta": {"type": "string"},
                                    "status": {"type": "string"}
                                }
                            }
                        }
                    }
                },
                "required": ["result"]
            })),
        }
    }
}

impl Default for DoneTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for DoneTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, ToolError> {
        let result = params
            .get("result")
            .ok_or_else(|| ToolError::InvalidParameters("missing 'result'".to_string()))?;
        Ok(ToolResult::success(result.to_string()))
    }
}
