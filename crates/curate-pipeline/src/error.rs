// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy for the orchestration layer.

use curate_agent::AgentError;
use curate_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("agent error: {0}")]
    Agent(#[from] AgentError),

    #[error("record not found: {kind} {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("tool-calling loop exceeded {0} iterations without a final response")]
    ToolLoopExhausted(u32),
}
