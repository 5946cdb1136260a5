// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Orchestrator tools. The agent calls these by name during a single
//! `invoke()`; each one validates its own JSON arguments and returns either
//! a JSON string result or a `{"error": ...}` payload — the tool-calling
//! loop never panics on malformed agent output, it hands the error back to
//! the agent as a tool result so it can retry.

use crate::ledger::RunLedger;
use crate::rendering::render_link_row;
use crate::revisions::RevisionRecorder;
use async_trait::async_trait;
use curate_core::{
    AgentRunStatus, AgentStage, Clock, Edition, Feedback, IdGen, Link, LinkStatus, RevisionSource, TokenUsage,
};
use curate_events::EventPublisher;
use curate_store::Repository;
use serde_json::Value as Json;
use std::collections::HashMap;
use std::sync::Arc;

#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn call(&self, args: Json) -> Json;
}

pub type ToolDispatch = HashMap<&'static str, Arc<dyn ToolHandler>>;

fn error_payload(message: impl Into<String>) -> Json {
    serde_json::json!({ "error": message.into() })
}

fn required_str<'a>(args: &'a Json, field: &str) -> Result<&'a str, Json> {
    args.get(field)
        .and_then(Json::as_str)
        .ok_or_else(|| error_payload(format!("missing or non-string field: {field}")))
}

pub struct GetLinkStatusTool<C: Clock> {
    pub links: Repository<Link, C>,
}

#[async_trait]
impl<C: Clock> ToolHandler for GetLinkStatusTool<C> {
    async fn call(&self, args: Json) -> Json {
        let (link_id, edition_id) = match (
            required_str(&args, "link_id"),
            required_str(&args, "edition_id"),
        ) {
            (Ok(l), Ok(e)) => (l, e),
            (Err(e), _) | (_, Err(e)) => return e,
        };

        match self.links.get(link_id, edition_id).await {
            Ok(Some(link)) => serde_json::json!({
                "id": link.id,
                "url": link.url,
                "title": link.title,
                "status": link.status,
                "has_content": link.content.is_some(),
                "has_review": link.review.is_some(),
                "edition_id": link.edition_id,
            }),
            Ok(None) => error_payload("Link not found"),
            Err(e) => error_payload(e.to_string()),
        }
    }
}

pub struct GetEditionStatusTool<C: Clock> {
    pub editions: Repository<Edition, C>,
}

#[async_trait]
impl<C: Clock> ToolHandler for GetEditionStatusTool<C> {
    async fn call(&self, args: Json) -> Json {
        let edition_id = match required_str(&args, "edition_id") {
            Ok(e) => e,
            Err(e) => return e,
        };

        match self.editions.get(edition_id, edition_id).await {
            Ok(Some(edition)) => serde_json::json!({
                "id": edition.id,
                "status": edition.status,
                "link_count": edition.link_ids.len(),
                "has_content": !edition.content.is_empty(),
            }),
            Ok(None) => error_payload("Edition not found"),
            Err(e) => error_payload(e.to_string()),
        }
    }
}

pub struct RecordStageStartTool<I: IdGen, C: Clock> {
    pub ledger: Arc<RunLedger<I, C>>,
    pub events: Arc<EventPublisher>,
}

#[async_trait]
impl<I: IdGen, C: Clock> ToolHandler for RecordStageStartTool<I, C> {
    async fn call(&self, args: Json) -> Json {
        let (stage_str, trigger_id) = match (
            required_str(&args, "stage"),
            required_str(&args, "trigger_id"),
        ) {
            (Ok(s), Ok(t)) => (s, t),
            (Err(e), _) | (_, Err(e)) => return e,
        };
        let Some(stage) = AgentStage::parse(stage_str) else {
            return error_payload(format!("unknown stage: {stage_str}"));
        };

        match self.ledger.record_stage_start(stage, trigger_id).await {
            Ok(run) => {
                self.events
                    .publish(curate_core::PipelineEvent::AgentRunStart(
                        curate_core::AgentRunEventData {
                            id: run.id.clone(),
                            stage: run.stage,
                            trigger_id: run.trigger_id.clone(),
                            status: run.status,
                            output: None,
                            usage: None,
                            started_at: run.started_at,
                            completed_at: None,
                        },
                    ))
                    .await;
                serde_json::json!({ "run_id": run.id, "stage": stage_str, "status": "running" })
            }
            Err(e) => error_payload(e.to_string()),
        }
    }
}

pub struct RecordStageCompleteTool<I: IdGen, C: Clock> {
    pub ledger: Arc<RunLedger<I, C>>,
    pub events: Arc<EventPublisher>,
    pub links: Repository<Link, C>,
}

#[async_trait]
impl<I: IdGen, C: Clock> ToolHandler for RecordStageCompleteTool<I, C> {
    async fn call(&self, args: Json) -> Json {
        let (run_id, trigger_id, status_str) = match (
            required_str(&args, "run_id"),
            required_str(&args, "trigger_id"),
            required_str(&args, "status"),
        ) {
            (Ok(r), Ok(t), Ok(s)) => (r, t, s),
            (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => return e,
        };
        let status = if status_str == "completed" {
            AgentRunStatus::Completed
        } else {
            AgentRunStatus::Failed
        };
        let error = args.get("error").and_then(Json::as_str).filter(|s| !s.is_empty()).map(str::to_string);
        let input_tokens = args.get("input_tokens").and_then(Json::as_u64).unwrap_or(0);
        let output_tokens = args.get("output_tokens").and_then(Json::as_u64).unwrap_or(0);
        let total_tokens = args.get("total_tokens").and_then(Json::as_u64);
        let usage = if input_tokens > 0 || output_tokens > 0 || total_tokens.is_some() {
            Some(TokenUsage::normalize(input_tokens, output_tokens, total_tokens))
        } else {
            None
        };

        let run = match self
            .ledger
            .record_stage_complete(run_id, trigger_id, status, error, usage)
            .await
        {
            Ok(Some(run)) => run,
            Ok(None) => return error_payload("Run not found"),
            Err(e) => return error_payload(e.to_string()),
        };

        self.events
            .publish(curate_core::PipelineEvent::AgentRunComplete(
                curate_core::AgentRunEventData {
                    id: run.id.clone(),
                    stage: run.stage,
                    trigger_id: run.trigger_id.clone(),
                    status: run.status,
                    output: run.output.clone(),
                    usage: run.usage,
                    started_at: run.started_at,
                    completed_at: run.completed_at,
                },
            ))
            .await;

        if let Ok(matches) = self
            .links
            .query(
                "SELECT * FROM c WHERE c.id = @id",
                &[("@id", Json::from(trigger_id))],
            )
            .await
        {
            if let Some(link) = matches.into_iter().next() {
                if let Ok(runs) = self.ledger.get_by_trigger(trigger_id).await {
                    self.events
                        .publish(curate_core::PipelineEvent::LinkUpdate {
                            html: render_link_row(&link, &runs),
                        })
                        .await;
                }
            }
        }

        serde_json::json!({ "run_id": run_id, "status": status_str, "completed": true })
    }
}

/// Writes drafted content onto the edition, attaches the link, transitions
/// it to `drafted`, and records the content as a new revision. Grounded on
/// `draft.py`'s `save_draft` tool.
pub struct DraftTool<I: IdGen, C: Clock> {
    pub editions: Repository<Edition, C>,
    pub links: Repository<Link, C>,
    pub revisions: Arc<RevisionRecorder<I, C>>,
}

#[async_trait]
impl<I: IdGen, C: Clock> ToolHandler for DraftTool<I, C> {
    async fn call(&self, args: Json) -> Json {
        let (edition_id, link_id) = match (
            required_str(&args, "edition_id"),
            required_str(&args, "link_id"),
        ) {
            (Ok(e), Ok(l)) => (e, l),
            (Err(e), _) | (_, Err(e)) => return e,
        };
        let Some(content) = args.get("content").cloned() else {
            return error_payload("missing field: content");
        };

        let edition = match self.editions.get(edition_id, edition_id).await {
            Ok(Some(edition)) => edition,
            Ok(None) => return error_payload("Edition not found"),
            Err(e) => return error_payload(e.to_string()),
        };
        let Some(content_map) = content.as_object().cloned() else {
            return error_payload("content must be a JSON object");
        };

        let mut edition = edition;
        edition.content = content_map;
        edition.attach_link(link_id);
        if let Err(e) = self.editions.update(edition).await {
            return error_payload(e.to_string());
        }

        if let Ok(Some(mut link)) = self.links.get(link_id, edition_id).await {
            link.status = LinkStatus::Drafted;
            if let Err(e) = self.links.update(link).await {
                return error_payload(e.to_string());
            }
        }

        match self
            .revisions
            .record(edition_id, RevisionSource::Draft, link_id, content, "Draft saved")
            .await
        {
            Ok(revision) => serde_json::json!({
                "status": "drafted",
                "edition_id": edition_id,
                "sequence": revision.sequence,
            }),
            Err(e) => error_payload(e.to_string()),
        }
    }
}

/// Writes refined content onto the edition and records a revision.
/// Grounded on `edit.py`'s `save_edit` tool.
pub struct EditTool<I: IdGen, C: Clock> {
    pub editions: Repository<Edition, C>,
    pub revisions: Arc<RevisionRecorder<I, C>>,
}

#[async_trait]
impl<I: IdGen, C: Clock> ToolHandler for EditTool<I, C> {
    async fn call(&self, args: Json) -> Json {
        let edition_id = match required_str(&args, "edition_id") {
            Ok(e) => e,
            Err(e) => return e,
        };
        let Some(content) = args.get("content").cloned() else {
            return error_payload("missing field: content");
        };
        let Some(content_map) = content.as_object().cloned() else {
            return error_payload("content must be a JSON object");
        };
        let trigger_id = args
            .get("trigger_id")
            .and_then(Json::as_str)
            .unwrap_or(edition_id);

        let edition = match self.editions.get(edition_id, edition_id).await {
            Ok(Some(edition)) => edition,
            Ok(None) => return error_payload("Edition not found"),
            Err(e) => return error_payload(e.to_string()),
        };
        let mut edition = edition;
        edition.content = content_map;
        if let Err(e) = self.editions.update(edition).await {
            return error_payload(e.to_string());
        }

        match self
            .revisions
            .record(edition_id, RevisionSource::Edit, trigger_id, content, "Edit saved")
            .await
        {
            Ok(revision) => serde_json::json!({
                "status": "edited",
                "edition_id": edition_id,
                "sequence": revision.sequence,
            }),
            Err(e) => error_payload(e.to_string()),
        }
    }
}

/// Marks a feedback item resolved. Grounded on `edit.py`'s `resolve_feedback` tool.
pub struct ResolveFeedbackTool<C: Clock> {
    pub feedback: Repository<Feedback, C>,
}

#[async_trait]
impl<C: Clock> ToolHandler for ResolveFeedbackTool<C> {
    async fn call(&self, args: Json) -> Json {
        let (feedback_id, edition_id) = match (
            required_str(&args, "feedback_id"),
            required_str(&args, "edition_id"),
        ) {
            (Ok(f), Ok(e)) => (f, e),
            (Err(e), _) | (_, Err(e)) => return e,
        };

        let item = match self.feedback.get(feedback_id, edition_id).await {
            Ok(Some(item)) => item,
            Ok(None) => return error_payload("Feedback not found"),
            Err(e) => return error_payload(e.to_string()),
        };
        let mut item = item;
        item.resolved = true;
        match self.feedback.update(item).await {
            Ok(_) => serde_json::json!({ "status": "resolved", "feedback_id": feedback_id }),
            Err(e) => error_payload(e.to_string()),
        }
    }
}

#[cfg(test)]
#[path = "tools_tests.rs"]
mod tests;
