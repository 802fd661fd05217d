//! Page content tool.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use cargotrack_protocols::{Tool, ToolDefinition, ToolError, ToolResult};

use crate::cdp::{CdpError, PageSession};

/// Longest page text handed to the model.
const MAX_TEXT_CHARS: usize = 15_000;

/// Read page text tool.
pub struct GetContentTool {
    definition: ToolDefinition,
    page: Arc<PageSession>,
}

impl GetContentTool {
    pub fn new(page: Arc<PageSession>) -> Self {
        Self {
            definition: ToolDefinition::new(
                "browser_get_content",
                "Browser Get Content",
                "Read the current URL, title, visible text and form controls of the page",
            )
            .with_parameters_schema(json!({"type": "object", "properties": {}})),
            page,
        }
    }

    async fn snapshot(&self) -> Result<String, CdpError> {
        let url = self.page.url().await?;
        let title = self.page.title().await?;
        let text = self.page.text_content().await?;
        let controls = self.page.form_controls().await?;
        Ok(format_snapshot(&url, &title, &text, &controls))
    }
}

pub(crate) fn format_snapshot(url: &str, title: &str, text: &str, controls: &[String]) -> String {
    let mut out = format!("URL: {}\nTitle: {}\n", url, title);

    if !controls.is_empty() {
        out.push_str("\nForm controls:\n");
        for control in controls {
            out.push_str("- ");
            out.push_str(control);
            out.push('\n');
        }
    }

    out.push_str("\nText:\n");
    let total = text.chars().count();
    if total > MAX_TEXT_CHARS {
        out.extend(text.chars().take(MAX_TEXT_CHARS));
        out.push_str(&format!("\n[truncated, {} more characters]", total - MAX_TEXT_CHARS));
    } else {
        out.push_str(text);
    }
    out
}

#[async_trait]
impl Tool for GetContentTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, _params: serde_json::Value) -> Result<ToolResult, ToolError> {
        match self.snapshot().await {
            Ok(snapshot) => Ok(ToolResult::success(snapshot)),
            Err(e) => Ok(ToolResult::error(e.to_string())),
        }
    }
}
