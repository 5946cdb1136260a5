// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `RunLedger`: typed operations over the `AgentRun` container layered on
//! top of the generic repository, plus the accessors used by the UI and
//! crash-recovery path.

use curate_core::{AgentRun, AgentRunStatus, AgentStage, Clock, IdGen, SystemClock, TokenUsage};
use curate_store::{Repository, StoreError};
use serde_json::Value as Json;

pub struct RunLedger<I, C = SystemClock>
where
    I: IdGen,
    C: Clock,
{
    repo: Repository<AgentRun, C>,
    ids: I,
    clock: C,
}

impl<I: IdGen> RunLedger<I, SystemClock> {
    pub fn new(repo: Repository<AgentRun, SystemClock>, ids: I) -> Self {
        Self {
            repo,
            ids,
            clock: SystemClock,
        }
    }
}

impl<I: IdGen, C: Clock> RunLedger<I, C> {
    pub fn with_clock(repo: Repository<AgentRun, C>, ids: I, clock: C) -> Self {
        Self { repo, ids, clock }
    }

    pub async fn create_orchestrator_run(
        &self,
        trigger_id: &str,
        input: Json,
    ) -> Result<AgentRun, StoreError> {
        let run = AgentRun::new(
            self.ids.next(),
            AgentStage::Orchestrator,
            trigger_id,
            input,
            self.clock.now(),
        );
        self.repo.create(run).await
    }

    pub async fn record_stage_start(
        &self,
        stage: AgentStage,
        trigger_id: &str,
    ) -> Result<AgentRun, StoreError> {
        let run = AgentRun::new(
            self.ids.next(),
            stage,
            trigger_id,
            serde_json::json!({ "stage": stage.as_str() }),
            self.clock.now(),
        );
        self.repo.create(run).await
    }

    pub async fn record_stage_complete(
        &self,
        run_id: &str,
        trigger_id: &str,
        status: AgentRunStatus,
        error: Option<String>,
        usage: Option<TokenUsage>,
    ) -> Result<Option<AgentRun>, StoreError> {
        let output = error.map(|error| serde_json::json!({ "error": error }));
        self.record_completion(run_id, trigger_id, status, output, usage).await
    }

    /// General form of [`Self::record_stage_complete`] for callers that need
    /// to attach an arbitrary `output` payload (e.g. `{content: text}` on a
    /// successful orchestrator run) rather than just an error string.
    pub async fn record_completion(
        &self,
        run_id: &str,
        trigger_id: &str,
        status: AgentRunStatus,
        output: Option<Json>,
        usage: Option<TokenUsage>,
    ) -> Result<Option<AgentRun>, StoreError> {
        let Some(mut run) = self.repo.get(run_id, trigger_id).await? else {
            return Ok(None);
        };
        run.status = status;
        run.completed_at = Some(self.clock.now());
        if output.is_some() {
            run.output = output;
        }
        if usage.is_some() {
            run.usage = usage;
        }
        let run = self.repo.update(run).await?;
        Ok(Some(run))
    }

    pub async fn get(&self, run_id: &str, trigger_id: &str) -> Result<Option<AgentRun>, StoreError> {
        self.repo.get(run_id, trigger_id).await
    }

    pub async fn get_by_trigger(&self, trigger_id: &str) -> Result<Vec<AgentRun>, StoreError> {
        self.repo
            .query(
                "SELECT * FROM c WHERE c.trigger_id = @trigger_id AND NOT IS_DEFINED(c.deleted_at) ORDER BY c.started_at ASC",
                &[("@trigger_id", Json::from(trigger_id))],
            )
            .await
    }

    /// Finds runs left `running` with no `completed_at` (crash mid-stage)
    /// across every partition, fails them, and returns how many were fixed.
    pub async fn recover_orphaned_runs(&self) -> Result<usize, StoreError> {
        let orphans: Vec<AgentRun> = self
            .repo
            .query(
                "SELECT * FROM c WHERE c.status = @status AND NOT IS_DEFINED(c.completed_at) AND NOT IS_DEFINED(c.deleted_at)",
                &[("@status", Json::from(AgentRunStatus::Running.to_string()))],
            )
            .await?;

        let now = self.clock.now();
        let count = orphans.len();
        for mut run in orphans {
            run.status = AgentRunStatus::Failed;
            run.completed_at = Some(now);
            run.output = Some(serde_json::json!({ "error": "Recovered after process restart" }));
            self.repo.update(run).await?;
        }
        Ok(count)
    }

    /// Sums token usage across the `limit` most recently started runs.
    pub async fn aggregate_token_usage(&self, limit: u32) -> Result<TokenUsage, StoreError> {
        let runs: Vec<AgentRun> = self
            .repo
            .query(
                "SELECT TOP @limit * FROM c WHERE NOT IS_DEFINED(c.deleted_at) ORDER BY c.started_at DESC",
                &[("@limit", Json::from(limit))],
            )
            .await?;

        let mut total = TokenUsage::default();
        for run in &runs {
            if let Some(usage) = run.usage {
                total.input_tokens += usage.input_tokens;
                total.output_tokens += usage.output_tokens;
                total.total_tokens += usage.total_tokens;
            }
        }
        Ok(total)
    }

    pub async fn list_recent_failures(&self, limit: u32) -> Result<Vec<AgentRun>, StoreError> {
        self.repo
            .query(
                "SELECT TOP @limit * FROM c WHERE c.status = @status AND NOT IS_DEFINED(c.deleted_at) ORDER BY c.started_at DESC",
                &[
                    ("@limit", Json::from(limit)),
                    ("@status", Json::from(AgentRunStatus::Failed.to_string())),
                ],
            )
            .await
    }
}

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod tests;
