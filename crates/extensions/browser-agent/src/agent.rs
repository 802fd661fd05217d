//! The tracking agent loop.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};

use cargotrack_protocols::types::{Message, ToolCall};
use cargotrack_protocols::{
    AgentError, CompletionRequest, DONE_TOOL, LLMProvider, Tool, ToolDefinition, TrackingAgent,
};

use crate::manager::{BrowserManager, BrowserManagerConfig};
use crate::tools::browser_tools;

const SYSTEM_PROMPT: &str = "You control a web browser through tools. \
Start by navigating to the site named in the task, then use browser_get_content \
to see the page text and the available form controls before clicking or typing. \
Use the CSS selectors listed under form controls. \
When you have the requested data, or are certain it cannot be found, \
call the done tool with the result. Never invent values.";

/// Configuration for the agent loop.
#[derive(Debug, Clone)]
pub struct AgentLoopConfig {
    pub model: String,
    pub max_turns: u32,
    pub temperature: f32,
}

impl Default for AgentLoopConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash".to_string(),
            max_turns: 30,
            temperature: 0.0,
        }
    }
}

/// Turn-bounded tool-calling loop against an LLM provider.
pub struct ToolLoop {
    provider: Arc<dyn LLMProvider>,
    tools: Vec<Arc<dyn Tool>>,
    config: AgentLoopConfig,
}

impl ToolLoop {
    pub fn new(
        provider: Arc<dyn LLMProvider>,
        tools: Vec<Arc<dyn Tool>>,
        config: AgentLoopConfig,
    ) -> Self {
        Self {
            provider,
            tools,
            config,
        }
    }

    fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.definition().clone()).collect()
    }

    /// Run `task` until the model calls `done`, answers in plain text, or
    /// runs out of turns.
    pub async fn run(&self, task: &str) -> Result<Value, AgentError> {
        let mut messages = vec![Message::system(SYSTEM_PROMPT), Message::user(task)];
        let definitions = self.definitions();
        let mut last_text: Option<String> = None;

        for turn in 1..=self.config.max_turns {
            debug!("Agent loop turn {}", turn);

            let request = CompletionRequest::new(&self.config.model, messages.clone())
                .with_tools(definitions.clone())
                .with_temperature(self.config.temperature);
            let response = self.provider.complete(request).await?;
            let message = response.message;

            if !message.content.trim().is_empty() {
                last_text = Some(message.content.clone());
            }

            if message.tool_calls.is_empty() {
                info!("Agent answered without tools after {} turns", turn);
                return Ok(text_result(&message.content));
            }

            let calls = message.tool_calls.clone();
            messages.push(message);

            for call in &calls {
                if call.name == DONE_TOOL {
                    info!("Agent completed after {} turns", turn);
                    return Ok(done_result(&call.arguments));
                }

                let output = self.execute_tool(call).await;
                messages.push(Message::tool(call, output));
            }
        }

        warn!(
            "Agent did not finish within {} turns",
            self.config.max_turns
        );
        Ok(last_text.map(Value::String).unwrap_or(Value::Null))
    }

    async fn execute_tool(&self, call: &ToolCall) -> String {
        let Some(tool) = self.tools.iter().find(|t| t.definition().id == call.name) else {
            return format!("Error: Tool not found: {}", call.name);
        };

        debug!("Executing {} with {}", call.name, call.arguments);
        match tool.execute(call.arguments.clone()).await {
            Ok(result) => result.to_model_text(),
            Err(e) => format!("Error: {}", e),
        }
    }
}

fn text_result(text: &str) -> Value {
    if text.trim().is_empty() {
        Value::Null
    } else {
        Value::String(text.to_string())
    }
}

/// The `result` argument of a `done` call; the whole argument object when
/// the model put the fields at the top level.
fn done_result(arguments: &Value) -> Value {
    match arguments.get("result") {
        Some(result) => result.clone(),
        None => arguments.clone(),
    }
}

/// [`TrackingAgent`] that drives a real browser.
///
/// Each run gets its own browser session, which is torn down on every exit
/// path.
pub struct BrowserAgent {
    provider: Arc<dyn LLMProvider>,
    browser: BrowserManagerConfig,
    config: AgentLoopConfig,
}

impl BrowserAgent {
    pub fn new(
        provider: Arc<dyn LLMProvider>,
        browser: BrowserManagerConfig,
        config: AgentLoopConfig,
    ) -> Self {
        Self {
            provider,
            browser,
            config,
        }
    }

    async fn drive(&self, manager: &BrowserManager, task: &str) -> Result<Value, AgentError> {
        manager
            .connect()
            .await
            .map_err(|e| AgentError::Browser(e.to_string()))?;
        let page = manager
            .open_page()
            .await
            .map_err(|e| AgentError::Browser(e.to_string()))?;

        ToolLoop::new(self.provider.clone(), browser_tools(page), self.config.clone())
            .run(task)
            .await
    }
}

#[async_trait]
impl TrackingAgent for BrowserAgent {
    async fn run(&self, task: &str) -> Result<Value, AgentError> {
        let manager = BrowserManager::new(self.browser.clone());
        let result = self.drive(&manager, task).await;
        manager.shutdown().await;
        result
    }
}

#[cfg(test)]
#[path = "agent_tests.rs"]
mod tests;
