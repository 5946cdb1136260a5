// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The external agent collaborator: a fallible async callable with no
//! knowledge of stage semantics ("a pure wrapper around a
//! fallible async call").

use crate::error::AgentError;
use async_trait::async_trait;
use curate_core::TokenUsage;
use serde_json::Value as Json;

/// One successful agent response.
#[derive(Debug, Clone)]
pub struct AgentOutcome {
    pub text: String,
    pub usage: Option<TokenUsage>,
}

/// A callable external agent: `(input) -> {response_text?, usage?}`.
#[async_trait]
pub trait ExternalAgent: Send + Sync + 'static {
    async fn invoke(&self, input: Json) -> Result<AgentOutcome, AgentError>;
}

#[cfg(test)]
#[path = "agent_tests.rs"]
mod tests;
