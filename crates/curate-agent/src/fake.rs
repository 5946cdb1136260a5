// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake external agent for deterministic testing — records every call and
//! allows programmatic control over responses and failures.

use crate::agent::{AgentOutcome, ExternalAgent};
use crate::error::AgentError;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value as Json;
use std::collections::VecDeque;

#[derive(Default)]
struct FakeAgentState {
    calls: Vec<Json>,
    responses: VecDeque<Result<AgentOutcome, AgentError>>,
    default_response: Option<Result<AgentOutcome, AgentError>>,
}

/// Programmable [`ExternalAgent`]. Without any queued response, `invoke`
/// echoes the input's `"prompt"` field back as `text` with no usage.
#[derive(Clone, Default)]
pub struct FakeAgent {
    inner: std::sync::Arc<Mutex<FakeAgentState>>,
}

impl FakeAgent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response to return on the next `invoke` call (FIFO).
    pub fn push_response(&self, response: Result<AgentOutcome, AgentError>) {
        self.inner.lock().responses.push_back(response);
    }

    /// Set the response returned once queued responses are exhausted.
    pub fn set_default_response(&self, response: Result<AgentOutcome, AgentError>) {
        self.inner.lock().default_response = Some(response);
    }

    pub fn calls(&self) -> Vec<Json> {
        self.inner.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.inner.lock().calls.len()
    }
}

#[async_trait]
impl ExternalAgent for FakeAgent {
    async fn invoke(&self, input: Json) -> Result<AgentOutcome, AgentError> {
        let mut inner = self.inner.lock();
        inner.calls.push(input.clone());

        if let Some(response) = inner.responses.pop_front() {
            return response;
        }
        if let Some(response) = inner.default_response.clone() {
            return response;
        }

        Ok(AgentOutcome {
            text: input
                .get("prompt")
                .and_then(Json::as_str)
                .unwrap_or_default()
                .to_string(),
            usage: None,
        })
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
