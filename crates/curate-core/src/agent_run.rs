// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `AgentRun` document — a ledger record for a single stage or
//! orchestrator invocation.
//!
//! Partitioned by `/trigger_id` (the link id or feedback id that caused the
//! run), per the explicit resolution of the partition-key open question:
//! the older `agent_stack` layout used `/trigger_id`, the newer `curate_*`
//! layout used `/edition_id`. This implementation keeps `/trigger_id`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

crate::define_id! {
    /// Unique identifier for an agent run.
    pub struct AgentRunId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStage {
    Orchestrator,
    Fetch,
    Review,
    Draft,
    Edit,
    Publish,
}

impl AgentStage {
    pub fn as_str(self) -> &'static str {
        match self {
            AgentStage::Orchestrator => "orchestrator",
            AgentStage::Fetch => "fetch",
            AgentStage::Review => "review",
            AgentStage::Draft => "draft",
            AgentStage::Edit => "edit",
            AgentStage::Publish => "publish",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "orchestrator" => AgentStage::Orchestrator,
            "fetch" => AgentStage::Fetch,
            "review" => AgentStage::Review,
            "draft" => AgentStage::Draft,
            "edit" => AgentStage::Edit,
            "publish" => AgentStage::Publish,
            _ => return None,
        })
    }
}

impl std::fmt::Display for AgentStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRunStatus {
    Running,
    Completed,
    Failed,
}

impl AgentRunStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, AgentRunStatus::Completed | AgentRunStatus::Failed)
    }
}

impl std::fmt::Display for AgentRunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AgentRunStatus::Running => "running",
            AgentRunStatus::Completed => "completed",
            AgentRunStatus::Failed => "failed",
        };
        write!(f, "{s}")
    }
}

/// Normalized token usage. Framework-returned dicts use
/// `input_token_count`/`output_token_count`/`total_token_count`; the ledger
/// always stores this normalized shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

impl TokenUsage {
    /// Build from the framework's raw field names, computing `total` when absent.
    pub fn normalize(input_tokens: u64, output_tokens: u64, total_tokens: Option<u64>) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens: total_tokens.unwrap_or(input_tokens + output_tokens),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRun {
    pub id: String,
    pub stage: AgentStage,
    pub trigger_id: String,
    pub status: AgentRunStatus,
    #[serde(default)]
    pub input: Json,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Json>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
    pub started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl AgentRun {
    pub fn new(
        id: impl Into<String>,
        stage: AgentStage,
        trigger_id: impl Into<String>,
        input: Json,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            stage,
            trigger_id: trigger_id.into(),
            status: AgentRunStatus::Running,
            input,
            output: None,
            usage: None,
            started_at: now,
            completed_at: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

crate::impl_document!(
    AgentRun,
    container = "agent_runs",
    partition_key = |r| r.trigger_id.as_str()
);

#[cfg(any(test, feature = "test-support"))]
impl AgentRun {
    pub fn builder(id: impl Into<String>, trigger_id: impl Into<String>) -> Self {
        Self::new(
            id,
            AgentStage::Orchestrator,
            trigger_id,
            serde_json::json!({}),
            DateTime::UNIX_EPOCH,
        )
    }
}

#[cfg(test)]
#[path = "agent_run_tests.rs"]
mod tests;
