// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event types fanned out by the event publisher (`curate-events`) to UI
//! subscribers and, optionally, an external bus.

use crate::agent_run::{AgentStage, AgentRunStatus, TokenUsage};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

/// Payload shared by `agent-run-start` and `agent-run-complete`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRunEventData {
    pub id: String,
    pub stage: AgentStage,
    pub trigger_id: String,
    pub status: AgentRunStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Json>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
    pub started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// A typed pipeline event. New types can be added as new enum variants
/// without changing the wire shape consumers already understand — every
/// variant flattens to `{event_type, data}` on the wire (see
/// [`PipelineEvent::event_type`] / [`PipelineEvent::data_json`]). The wire
/// shape is produced explicitly rather than derived, since the `Custom`
/// escape hatch (carrying its own `event_type` string) doesn't fit serde's
/// internally-tagged representation.
#[derive(Debug, Clone)]
pub enum PipelineEvent {
    AgentRunStart(AgentRunEventData),
    AgentRunComplete(AgentRunEventData),
    /// HTML fragment for an out-of-band UI swap of a single link's table row.
    LinkUpdate { html: String },
    /// Escape hatch for event types not named above; the publisher's wire
    /// contract tolerates unknown `event_type` strings.
    Custom { event_type: String, data: Json },
}

impl PipelineEvent {
    pub fn event_type(&self) -> &str {
        match self {
            PipelineEvent::AgentRunStart(_) => "agent-run-start",
            PipelineEvent::AgentRunComplete(_) => "agent-run-complete",
            PipelineEvent::LinkUpdate { .. } => "link-update",
            PipelineEvent::Custom { event_type, .. } => event_type,
        }
    }

    /// Render the event's data payload as it would go out over the wire:
    /// either an HTML/plain string, or a JSON object.
    pub fn data_json(&self) -> Json {
        match self {
            PipelineEvent::AgentRunStart(d) | PipelineEvent::AgentRunComplete(d) => {
                serde_json::to_value(d).unwrap_or(Json::Null)
            }
            PipelineEvent::LinkUpdate { html } => Json::String(html.clone()),
            PipelineEvent::Custom { data, .. } => data.clone(),
        }
    }

    /// Render the `data` payload the way it travels the wire: a JSON string,
    /// never a nested object.
    pub fn data_string(&self) -> String {
        match self.data_json() {
            Json::String(s) => s,
            other => other.to_string(),
        }
    }

    /// Render the full `{event, data}` envelope sent over SSE / the bus.
    pub fn to_envelope(&self) -> Json {
        serde_json::json!({
            "event": self.event_type(),
            "data": self.data_string(),
        })
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
