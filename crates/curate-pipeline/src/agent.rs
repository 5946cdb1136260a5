// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ToolCallingAgent`: the concrete [`ExternalAgent`] handed to the stage
//! executor. Drives a bounded tool-calling loop against a [`ChatClient`],
//! dispatching tool calls through a [`ToolDispatch`] built once per
//! invocation from the orchestrator's current trigger context.

use crate::chat::{ChatClient, ChatMessage, ChatResponse, ToolSchema};
use crate::stage::DRAFT_CORRECTIVE_FOLLOWUP;
use crate::tools::ToolDispatch;
use async_trait::async_trait;
use curate_agent::{AgentError, AgentOutcome, ExternalAgent};
use serde_json::Value as Json;

/// Bounds the tool-calling loop so a misbehaving agent can't spin forever
/// issuing tool calls without ever producing a final answer.
pub const MAX_TOOL_ITERATIONS: u32 = 8;

pub struct ToolCallingAgent<C: ChatClient> {
    client: C,
    tools: ToolDispatch,
    schemas: Vec<ToolSchema>,
    system_prompt: String,
}

impl<C: ChatClient> ToolCallingAgent<C> {
    pub fn new(
        client: C,
        tools: ToolDispatch,
        schemas: Vec<ToolSchema>,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            client,
            tools,
            schemas,
            system_prompt: system_prompt.into(),
        }
    }
}

#[async_trait]
impl<C: ChatClient> ExternalAgent for ToolCallingAgent<C> {
    async fn invoke(&self, input: Json) -> Result<AgentOutcome, AgentError> {
        let prompt = input
            .get("prompt")
            .and_then(Json::as_str)
            .ok_or_else(|| AgentError::Invocation("input missing \"prompt\"".to_string()))?;

        let mut messages = vec![ChatMessage::system(&self.system_prompt), ChatMessage::user(prompt)];
        let mut draft_stage_started = false;
        let mut draft_called = false;
        let mut corrective_issued = false;

        for _ in 0..MAX_TOOL_ITERATIONS {
            match self.client.complete(&messages, &self.schemas).await? {
                ChatResponse::Final { text, usage } => {
                    if draft_stage_started && !draft_called && !corrective_issued {
                        corrective_issued = true;
                        messages.push(ChatMessage::user(DRAFT_CORRECTIVE_FOLLOWUP));
                        continue;
                    }
                    return Ok(AgentOutcome { text, usage });
                }
                ChatResponse::ToolCalls(calls) => {
                    for call in calls {
                        if call.name == "record_stage_start" && call.arguments.get("stage").and_then(Json::as_str) == Some("draft") {
                            draft_stage_started = true;
                        }
                        if call.name == "draft" {
                            draft_called = true;
                        }
                        let result = match self.tools.get(call.name.as_str()) {
                            Some(handler) => handler.call(call.arguments).await,
                            None => serde_json::json!({ "error": format!("unknown tool: {}", call.name) }),
                        };
                        messages.push(ChatMessage::tool_result(call.id, result.to_string()));
                    }
                }
            }
        }

        Err(AgentError::Invocation(format!(
            "tool-calling loop exceeded {MAX_TOOL_ITERATIONS} iterations without a final response"
        )))
    }
}

#[cfg(test)]
#[path = "agent_tests.rs"]
mod tests;
