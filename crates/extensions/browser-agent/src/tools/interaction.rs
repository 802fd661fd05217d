//! Interaction tools: click and type.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use cargotrack_protocols::{Tool, ToolDefinition, ToolError, ToolResult};

use super::parse_params;
use crate::cdp::PageSession;

#[derive(Debug, Deserialize)]
pub struct ClickParams {
    pub selector: String,
}

/// Click element tool.
pub struct ClickTool {
    definition: ToolDefinition,
    page: Arc<PageSession>,
}

impl ClickTool {
    pub fn new(page: Arc<PageSession>) -> Self {
        Self {
            definition: ToolDefinition::new(
                "browser_click",
                "Browser Click",
                "Click an element on the page using a CSS selector",
            )
            .with_parameters_schema(json!({
                "type": "object",
                "properties": {
                    "selector": {"type": "string", "description": "CSS selector of the element"}
                },
                "required": ["selector"]
            })),
            page,
        }
    }
}

#[async_trait]
impl Tool for ClickTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, ToolError> {
        let params: ClickParams = parse_params(params)?;

        match self.page.click(&params.selector).await {
            Ok(()) => {
                debug!("Clicked {}", params.selector);
                Ok(ToolResult::success(format!("Clicked {}", params.selector)))
            }
            Err(e) => Ok(ToolResult::error(e.to_string())),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TypeParams {
    pub selector: String,
    pub text: String,
}

/// Fill input tool.
pub struct TypeTool {
    definition: ToolDefinition,
    page: Arc<PageSession>,
}

impl TypeTool {
    pub fn new(page: Arc<PageSession>) -> Self {
        Self {
            definition: ToolDefinition::new(
                "browser_type",
                "Browser Type",
                "Set the value of an input, or pick an option of a select element by its label",
            )
            .with_parameters_schema(json!({
                "type": "object",
                "properties": {
                    "selector": {"type": "string", "description": "CSS selector of the input or select"},
                    "text": {"type": "string", "description": "Text to enter or option label to choose"}
                },
                "required": ["selector", "text"]
            })),
            page,
        }
    }
}

#[async_trait]
impl Tool for TypeTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, ToolError> {
        let params: TypeParams = parse_params(params)?;

        match self.page.type_text(&params.selector, &params.text).await {
            Ok(()) => {
                debug!("Filled {}", params.selector);
                Ok(ToolResult::success(format!(
                    "Entered '{}' into {}",
                    params.text, params.selector
                )))
            }
            Err(e) => Ok(ToolResult::error(e.to_string())),
        }
    }
}
