// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The boundary to whatever chat-completion service backs the orchestrator
//! agent. `ChatClient` is deliberately thin: one `complete` call given the
//! running transcript and the tool schemas currently on offer, returning
//! either a final answer or a batch of tool calls to dispatch and feed back.
//! No concrete network-backed implementation ships here — wiring a real
//! deployment's chat-completions endpoint behind this trait is a
//! deployment-time adapter, the same way the teacher workspace never
//! vendors the agent binary its own adapter trait talks to.

use async_trait::async_trait;
use curate_agent::AgentError;
use curate_core::TokenUsage;
use serde_json::Value as Json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    System,
    User,
    Assistant,
    Tool,
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    /// Set only on a `Tool` message: which call this is the result of.
    pub tool_call_id: Option<String>,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
            tool_call_id: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
            tool_call_id: None,
        }
    }

    pub fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Tool,
            content: content.into(),
            tool_call_id: Some(tool_call_id.into()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ToolSchema {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Json,
}

#[derive(Debug, Clone)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: Json,
}

#[derive(Debug, Clone)]
pub enum ChatResponse {
    ToolCalls(Vec<ToolCall>),
    Final { text: String, usage: Option<TokenUsage> },
}

#[async_trait]
pub trait ChatClient: Send + Sync + 'static {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolSchema],
    ) -> Result<ChatResponse, AgentError>;
}

#[cfg(test)]
#[path = "chat_tests.rs"]
mod tests;
