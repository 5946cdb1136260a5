// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// Error returned by one invocation of an [`ExternalAgent`](crate::agent::ExternalAgent).
#[derive(Debug, Error, Clone)]
pub enum AgentError {
    #[error("agent invocation failed: {0}")]
    Invocation(String),
}
