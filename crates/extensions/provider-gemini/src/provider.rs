//! Gemini LLM provider implementation.

use async_trait::async_trait;
use tracing::debug;

use cargotrack_protocols::provider::{CompletionRequest, CompletionResponse, LLMProvider};
use cargotrack_protocols::types::{Message, MessageRole, StopReason, ToolCall, Usage};
use cargotrack_protocols::ProviderError;

use crate::client::{BASE_URL, GeminiClient};
use crate::types::*;

/// Model used when the configuration does not name one.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Gemini LLM provider.
pub struct GeminiProvider {
    client: GeminiClient,
}

impl GeminiProvider {
    /// Create a provider against the public Gemini API.
    pub fn new(api_key: String) -> Result<Self, ProviderError> {
        Self::with_url(api_key, BASE_URL.to_string())
    }

    /// Create a provider against a custom endpoint.
    pub fn with_url(api_key: String, base_url: String) -> Result<Self, ProviderError> {
        Ok(Self {
            client: GeminiClient::new(api_key, base_url)?,
        })
    }

    fn convert_messages(&self, messages: &[Message]) -> Vec<Content> {
        messages
            .iter()
            .filter(|m| m.role != MessageRole::System)
            .map(|msg| {
                let role = match msg.role {
                    MessageRole::Assistant => "model",
                    _ => "user",
                };

                let parts = if msg.role == MessageRole::Tool {
                    vec![Part::FunctionResponse {
                        function_response: FunctionResponse {
                            name: msg.name.clone().unwrap_or_default(),
                            response: serde_json::json!({ "result": msg.content }),
                        },
                    }]
                } else if !msg.tool_calls.is_empty() {
                    msg.tool_calls
                        .iter()
                        .map(|tc| Part::FunctionCall {
                            function_call: FunctionCall {
                                name: tc.name.clone(),
                                args: tc.arguments.clone(),
                            },
                        })
                        .collect()
                } else {
                    vec![Part::Text {
                        text: msg.content.clone(),
                    }]
                };

                Content {
                    role: role.to_string(),
                    parts,
                }
            })
            .collect()
    }

    fn convert_system(&self, messages: &[Message]) -> Option<Content> {
        messages
            .iter()
            .find(|m| m.role == MessageRole::System)
            .map(|msg| Content {
                role: "user".to_string(),
                parts: vec![Part::Text {
                    text: msg.content.clone(),
                }],
            })
    }

    fn convert_tools(&self, request: &CompletionRequest) -> Option<Vec<GeminiTool>> {
        if request.tools.is_empty() {
            return None;
        }

        Some(vec![GeminiTool {
            function_declarations: request
                .tools
                .iter()
                .map(|tool| FunctionDeclaration {
                    name: tool.id.clone(),
                    description: tool.description.clone(),
                    parameters: tool.parameters_or_empty(),
                })
                .collect(),
        }])
    }

    fn convert_response(
        &self,
        response: GenerateContentResponse,
        model: &str,
    ) -> Result<CompletionResponse, ProviderError> {
        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::EmptyResponse("no candidates returned".to_string()))?;

        let mut text_parts = Vec::new();
        let mut tool_calls = Vec::new();

        for part in candidate.content.map(|c| c.parts).unwrap_or_default() {
            match part {
                Part::Text { text } => text_parts.push(text),
                Part::FunctionCall { function_call } => {
                    tool_calls.push(ToolCall {
                        id: format!("call_{}", uuid::Uuid::new_v4()),
                        name: function_call.name,
                        arguments: function_call.args,
                    });
                }
                Part::FunctionResponse { .. } => {}
            }
        }

        let stop_reason = if !tool_calls.is_empty() {
            StopReason::ToolUse
        } else {
            match candidate.finish_reason.as_deref() {
                Some("MAX_TOKENS") => StopReason::MaxTokens,
                _ => StopReason::EndTurn,
            }
        };

        let mut message = Message::assistant(text_parts.join(""));
        message.tool_calls = tool_calls;

        let usage = response
            .usage_metadata
            .map(|u| Usage {
                prompt_tokens: u.prompt_token_count,
                completion_tokens: u.candidates_token_count,
                total_tokens: u.total_token_count,
            })
            .unwrap_or_default();

        Ok(CompletionResponse {
            model: model.to_string(),
            message,
            stop_reason,
            usage,
        })
    }
}

#[async_trait]
impl LLMProvider for GeminiProvider {
    fn id(&self) -> &str {
        "gemini"
    }

    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        debug!(
            "Gemini complete: model={}, messages={}",
            request.model,
            request.messages.len()
        );

        let gemini_request = GenerateContentRequest {
            contents: self.convert_messages(&request.messages),
            system_instruction: self.convert_system(&request.messages),
            generation_config: Some(GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
            }),
            tools: self.convert_tools(&request),
        };

        let response = self
            .client
            .generate_content(&request.model, &gemini_request)
            .await?;
        self.convert_response(response, &request.model)
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
