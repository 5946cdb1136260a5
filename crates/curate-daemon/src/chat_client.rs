// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The one concrete [`ChatClient`] this workspace ships: an Azure OpenAI
//! chat-completions adapter using function calling for tool dispatch.
//! Grounded on `original_source`'s `AzureOpenAIChatClient` usage throughout
//! `agent_stack/agents/*.py` — same backend, reimplemented directly against
//! the REST wire format instead of vendoring an SDK.

use async_trait::async_trait;
use curate_agent::AgentError;
use curate_core::TokenUsage;
use curate_pipeline::chat::{ChatClient, ChatMessage, ChatResponse, ChatRole, ToolCall, ToolSchema};
use serde_json::{json, Value as Json};

const API_VERSION: &str = "2024-06-01";

pub struct AzureOpenAiChatClient {
    http: reqwest::Client,
    endpoint: String,
    deployment: String,
    api_key: String,
}

impl AzureOpenAiChatClient {
    pub fn new(endpoint: impl Into<String>, deployment: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            deployment: deployment.into(),
            api_key: api_key.into(),
        }
    }

    fn url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={API_VERSION}",
            self.endpoint.trim_end_matches('/'),
            self.deployment,
        )
    }

    fn body(&self, messages: &[ChatMessage], tools: &[ToolSchema]) -> Json {
        let messages: Vec<Json> = messages.iter().map(message_to_wire).collect();
        let tools: Vec<Json> = tools
            .iter()
            .map(|t| {
                json!({
                    "type": "function",
                    "function": {
                        "name": t.name,
                        "description": t.description,
                        "parameters": t.parameters,
                    }
                })
            })
            .collect();

        let mut body = json!({ "messages": messages });
        if !tools.is_empty() {
            body["tools"] = Json::Array(tools);
        }
        body
    }
}

fn message_to_wire(message: &ChatMessage) -> Json {
    let role = match message.role {
        ChatRole::System => "system",
        ChatRole::User => "user",
        ChatRole::Assistant => "assistant",
        ChatRole::Tool => "tool",
    };
    let mut wire = json!({ "role": role, "content": message.content });
    if let Some(tool_call_id) = &message.tool_call_id {
        wire["tool_call_id"] = json!(tool_call_id);
    }
    wire
}

#[async_trait]
impl ChatClient for AzureOpenAiChatClient {
    async fn complete(&self, messages: &[ChatMessage], tools: &[ToolSchema]) -> Result<ChatResponse, AgentError> {
        let response = self
            .http
            .post(self.url())
            .header("api-key", &self.api_key)
            .json(&self.body(messages, tools))
            .send()
            .await
            .map_err(|e| AgentError::Invocation(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AgentError::Invocation(format!("azure openai returned {status}: {text}")));
        }

        let payload: Json = response.json().await.map_err(|e| AgentError::Invocation(e.to_string()))?;
        parse_response(&payload)
    }
}

fn parse_response(payload: &Json) -> Result<ChatResponse, AgentError> {
    let choice = payload
        .get("choices")
        .and_then(|c| c.get(0))
        .ok_or_else(|| AgentError::Invocation("azure openai response had no choices".to_string()))?;
    let message = choice
        .get("message")
        .ok_or_else(|| AgentError::Invocation("azure openai choice had no message".to_string()))?;

    if let Some(calls) = message.get("tool_calls").and_then(Json::as_array).filter(|c| !c.is_empty()) {
        let calls = calls
            .iter()
            .map(|call| {
                let id = call.get("id").and_then(Json::as_str).unwrap_or_default().to_string();
                let function = call.get("function").cloned().unwrap_or(Json::Null);
                let name = function.get("name").and_then(Json::as_str).unwrap_or_default().to_string();
                let arguments = function
                    .get("arguments")
                    .and_then(Json::as_str)
                    .and_then(|s| serde_json::from_str(s).ok())
                    .unwrap_or(Json::Null);
                ToolCall { id, name, arguments }
            })
            .collect();
        return Ok(ChatResponse::ToolCalls(calls));
    }

    let text = message.get("content").and_then(Json::as_str).unwrap_or_default().to_string();
    let usage = payload.get("usage").map(|u| TokenUsage {
        input_tokens: u.get("prompt_tokens").and_then(Json::as_u64).unwrap_or(0),
        output_tokens: u.get("completion_tokens").and_then(Json::as_u64).unwrap_or(0),
        total_tokens: u.get("total_tokens").and_then(Json::as_u64).unwrap_or(0),
    });
    Ok(ChatResponse::Final { text, usage })
}

#[cfg(test)]
#[path = "chat_client_tests.rs"]
mod tests;
