// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The pipeline orchestrator: routes link and feedback changes from the
//! change-feed processor (§4.G) to a single orchestrator-agent invocation
//! each, recording the run and refreshing the link's UI fragment. Grounded
//! on `original_source/src/agent_stack/pipeline/orchestrator.py`
//! (`handle_link_change`, `handle_feedback_change`, `_render_link_row`).

use crate::concurrency::{ClaimSet, EditionLocks};
use crate::context::{with_feedback_context, FeedbackContext};
use crate::ledger::RunLedger;
use crate::rendering::render_link_row;
use crate::stage;
use curate_agent::{ExternalAgent, StageExecutor, StageOutcome};
use curate_core::{
    AgentRunEventData, AgentRunStatus, Clock, Edition, Feedback, IdGen, Link, LinkStatus, PipelineEvent,
    UNATTACHED_PARTITION,
};
use curate_events::EventPublisher;
use curate_store::{Repository, StoreError};
use serde_json::{json, Value as Json};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub struct PipelineOrchestrator<A, I, C>
where
    A: ExternalAgent,
    I: IdGen,
    C: Clock,
{
    links: Repository<Link, C>,
    editions: Repository<Edition, C>,
    feedback: Repository<Feedback, C>,
    ledger: Arc<RunLedger<I, C>>,
    events: Arc<EventPublisher>,
    claims: ClaimSet,
    edition_locks: EditionLocks,
    executor: StageExecutor<A>,
}

impl<A, I, C> PipelineOrchestrator<A, I, C>
where
    A: ExternalAgent,
    I: IdGen,
    C: Clock,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        links: Repository<Link, C>,
        editions: Repository<Edition, C>,
        feedback: Repository<Feedback, C>,
        ledger: Arc<RunLedger<I, C>>,
        events: Arc<EventPublisher>,
        claims: ClaimSet,
        edition_locks: EditionLocks,
        agent: A,
    ) -> Self {
        Self {
            links,
            editions,
            feedback,
            ledger,
            events,
            claims,
            edition_locks,
            executor: StageExecutor::new(agent),
        }
    }

    fn start_event(run: &curate_core::AgentRun) -> PipelineEvent {
        PipelineEvent::AgentRunStart(AgentRunEventData {
            id: run.id.clone(),
            stage: run.stage,
            trigger_id: run.trigger_id.clone(),
            status: run.status,
            output: None,
            usage: None,
            started_at: run.started_at,
            completed_at: None,
        })
    }

    fn complete_event(run: &curate_core::AgentRun) -> PipelineEvent {
        PipelineEvent::AgentRunComplete(AgentRunEventData {
            id: run.id.clone(),
            stage: run.stage,
            trigger_id: run.trigger_id.clone(),
            status: run.status,
            output: run.output.clone(),
            usage: run.usage,
            started_at: run.started_at,
            completed_at: run.completed_at,
        })
    }

    /// Runs the orchestrator agent once and finalizes the resulting
    /// `AgentRun`, returning the run's terminal status. Shared by the
    /// link, feedback, and publish paths — they differ only in claiming,
    /// prompt construction, and post-run fix-up.
    async fn run_and_finalize(
        &self,
        run_id: &str,
        trigger_id: &str,
        prompt: String,
    ) -> Result<AgentRunStatus, StoreError> {
        let cancel = CancellationToken::new();
        let outcome = self.executor.execute(json!({ "prompt": prompt }), &cancel).await;

        match outcome {
            Some(StageOutcome::Success { text, usage }) => {
                let run = self
                    .ledger
                    .record_completion(
                        run_id,
                        trigger_id,
                        AgentRunStatus::Completed,
                        Some(json!({ "content": text })),
                        usage,
                    )
                    .await?;
                if let Some(run) = run {
                    self.events.publish(Self::complete_event(&run)).await;
                }
                Ok(AgentRunStatus::Completed)
            }
            Some(StageOutcome::Failed { error }) => {
                tracing::warn!(trigger_id, error = %error, "orchestrator run failed");
                let run = self
                    .ledger
                    .record_stage_complete(
                        run_id,
                        trigger_id,
                        AgentRunStatus::Failed,
                        Some("Orchestrator failed".to_string()),
                        None,
                    )
                    .await?;
                if let Some(run) = run {
                    self.events.publish(Self::complete_event(&run)).await;
                }
                Ok(AgentRunStatus::Failed)
            }
            None => {
                // Cancelled before a result was produced; the run stays
                // `running` and will be picked up by orphan recovery.
                Ok(AgentRunStatus::Running)
            }
        }
    }

    /// Step 1-8 of the link-change algorithm: claim, record, invoke,
    /// finalize, post-run fix-up, UI refresh, release.
    pub async fn handle_link_change(&self, doc: &Json) -> Result<(), StoreError> {
        let Some(link_id) = doc.get("id").and_then(Json::as_str) else {
            return Ok(());
        };
        let edition_id = doc.get("edition_id").and_then(Json::as_str);
        let Some(status_str) = doc.get("status").and_then(Json::as_str) else {
            return Ok(());
        };
        let Ok(event_status) = serde_json::from_value::<LinkStatus>(Json::String(status_str.to_string())) else {
            return Ok(());
        };

        let partition = edition_id.unwrap_or(UNATTACHED_PARTITION);
        let Some(link) = self.links.get(link_id, partition).await? else {
            return Ok(());
        };

        let Some(token) = self.claims.claim(&link, event_status) else {
            return Ok(());
        };

        let input = json!({ "url": link.url, "edition_id": link.edition_id, "status": link.status });
        let run = self.ledger.create_orchestrator_run(link_id, input).await?;
        self.events.publish(Self::start_event(&run)).await;

        let prompt = stage::link_change_prompt(&link);
        self.run_and_finalize(&run.id, link_id, prompt).await?;

        // Post-run fix-up: a link still `submitted` means the agent never
        // even got past the fetch stage. Fail it directly rather than
        // leaving it to be retried indefinitely by the next change event.
        if let Some(mut link) = self.links.get(link_id, partition).await? {
            if link.status == LinkStatus::Submitted {
                link.status = LinkStatus::Failed;
                link = self.links.update(link).await?;
            }
            let runs = self.ledger.get_by_trigger(link_id).await?;
            self.events
                .publish(PipelineEvent::LinkUpdate {
                    html: render_link_row(&link, &runs),
                })
                .await;
        }

        self.claims.release(token);
        Ok(())
    }

    /// Steps 1-6 of the feedback-change algorithm: edition mutex, record,
    /// task-local context, invoke, finalize, release.
    pub async fn handle_feedback_change(&self, doc: &Json) -> Result<(), StoreError> {
        let Some(feedback_id) = doc.get("id").and_then(Json::as_str) else {
            return Ok(());
        };
        let Some(edition_id) = doc.get("edition_id").and_then(Json::as_str) else {
            return Ok(());
        };
        let resolved = doc.get("resolved").and_then(Json::as_bool).unwrap_or(false);
        if resolved {
            return Ok(());
        }
        let Some(feedback) = self.feedback.get(feedback_id, edition_id).await? else {
            return Ok(());
        };

        let lock = self.edition_locks.get(edition_id);
        let _guard = lock.lock().await;

        let input = json!({
            "edition_id": feedback.edition_id,
            "section": feedback.section,
            "comment": feedback.comment,
        });
        let run = self.ledger.create_orchestrator_run(feedback_id, input).await?;
        self.events.publish(Self::start_event(&run)).await;

        let context = FeedbackContext {
            skip_memory_capture: !feedback.learn_from_feedback,
            section: feedback.section.clone(),
            comment: feedback.comment.clone(),
        };
        let prompt = stage::feedback_change_prompt(&feedback, feedback.learn_from_feedback);

        with_feedback_context(context, self.run_and_finalize(&run.id, feedback_id, prompt)).await?;

        Ok(())
    }

    /// Invoked by the front-end's publish command; same shape as the
    /// feedback path but without edition locking (publish is terminal).
    pub async fn handle_publish(&self, edition_id: &str) -> Result<(), StoreError> {
        let Some(_edition) = self.editions.get(edition_id, edition_id).await? else {
            return Ok(());
        };

        let input = json!({ "edition_id": edition_id });
        let run = self.ledger.create_orchestrator_run(edition_id, input).await?;
        self.events.publish(Self::start_event(&run)).await;

        let prompt = stage::publish_prompt(edition_id);
        self.run_and_finalize(&run.id, edition_id, prompt).await?;
        Ok(())
    }
}

/// Stage mapping table (informational; enforced by the agent's own tool
/// calls, not the orchestrator): which sub-stage a link's current status
/// implies comes next, if any.
pub fn determine_stage_for_link(status: LinkStatus) -> Option<curate_core::AgentStage> {
    match status {
        LinkStatus::Submitted => Some(curate_core::AgentStage::Fetch),
        LinkStatus::Fetching => Some(curate_core::AgentStage::Review),
        LinkStatus::Reviewed => Some(curate_core::AgentStage::Draft),
        LinkStatus::Drafted | LinkStatus::Failed => None,
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
