//! Navigation tool.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use cargotrack_protocols::{Tool, ToolDefinition, ToolError, ToolResult};

use super::parse_params;
use crate::cdp::{CdpError, PageSession};

#[derive(Debug, Deserialize)]
pub struct NavigateParams {
    pub url: String,
}

/// Navigate to URL tool.
pub struct NavigateTool {
    definition: ToolDefinition,
    page: Arc<PageSession>,
}

impl NavigateTool {
    pub fn new(page: Arc<PageSession>) -> Self {
        Self {
            definition: ToolDefinition::new(
                "browser_navigate",
                "Browser Navigate",
                "Navigate the browser page to a URL and wait for it to load",
            )
            .with_parameters_schema(json!({
                "type": "object",
                "properties": {
                    "url": {"type": "string", "description": "Absolute http(s) URL"}
                },
                "required": ["url"]
            })),
            page,
        }
    }
}

/// Check that `raw` is an absolute http(s) URL.
pub(crate) fn validate_url(raw: &str) -> Result<url::Url, CdpError> {
    let parsed = url::Url::parse(raw)?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(CdpError::NavigationFailed(format!(
            "Unsupported scheme: {}",
            other
        ))),
    }
}

#[async_trait]
impl Tool for NavigateTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, ToolError> {
        let params: NavigateParams = parse_params(params)?;

        let url = match validate_url(&params.url) {
            Ok(url) => url,
            Err(e) => return Ok(ToolResult::error(e.to_string())),
        };

        if let Err(e) = self.page.navigate(url.as_str()).await {
            return Ok(ToolResult::error(e.to_string()));
        }

        debug!("Navigated to {}", url);
        Ok(ToolResult::success(format!("Navigated to {}", url)))
    }
}
