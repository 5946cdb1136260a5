// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake [`ChatClient`] for deterministic tool-calling tests — a scripted
//! sequence of responses played back in order, one per `complete` call.

use crate::chat::{ChatClient, ChatMessage, ChatResponse, ToolSchema};
use async_trait::async_trait;
use curate_agent::AgentError;
use parking_lot::Mutex;
use std::collections::VecDeque;

#[derive(Default)]
pub struct FakeChatClient {
    scripted: Mutex<VecDeque<Result<ChatResponse, AgentError>>>,
}

impl FakeChatClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the response returned by the next `complete` call (FIFO).
    pub fn push(&self, response: Result<ChatResponse, AgentError>) {
        self.scripted.lock().push_back(response);
    }
}

#[async_trait]
impl ChatClient for FakeChatClient {
    async fn complete(
        &self,
        _messages: &[ChatMessage],
        _tools: &[ToolSchema],
    ) -> Result<ChatResponse, AgentError> {
        self.scripted
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(AgentError::Invocation("FakeChatClient exhausted".to_string())))
    }
}

#[cfg(test)]
#[path = "fake_chat_tests.rs"]
mod tests;
