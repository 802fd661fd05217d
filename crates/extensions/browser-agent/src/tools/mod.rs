//! Tools exposed to the model.

mod content;
mod done;
mod interaction;
mod navigation;

use std::sync::Arc;

use serde::de::DeserializeOwned;

use cargotrack_protocols::{Tool, ToolError};

use crate::cdp::PageSession;

pub use content::GetContentTool;
pub use done::DoneTool;
pub use interaction::{ClickTool, TypeTool};
pub use navigation::NavigateTool;

/// The full tool set bound to `page`.
pub fn browser_tools(page: Arc<PageSession>) -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(NavigateTool::new(page.clone())),
        Arc::new(ClickTool::new(page.clone())),
        Arc::new(TypeTool::new(page.clone())),
        Arc::new(GetContentTool::new(page)),
        Arc::new(DoneTool::new()),
    ]
}

pub(crate) fn parse_params<T: DeserializeOwned>(params: serde_json::Value) -> Result<T, ToolError> {
    serde_json::from_value(params).map_err(|e| ToolError::InvalidParameters(e.to_string()))
}
