use super::*;
use curate_core::{AgentRunStatus, FakeClock, SequentialIdGen};
use curate_store::InMemoryStore;
use std::sync::Arc;

fn ledger() -> (RunLedger<SequentialIdGen, FakeClock>, FakeClock) {
    let clock = FakeClock::new();
    let store: Arc<dyn curate_store::DocumentStore> = Arc::new(InMemoryStore::new());
    let repo = Repository::with_clock(store, clock.clone());
    (
        RunLedger::with_clock(repo, SequentialIdGen::new("run"), clock.clone()),
        clock,
    )
}

#[tokio::test]
async fn create_orchestrator_run_persists_running_status() {
    let (ledger, _clock) = ledger();
    let run = ledger
        .create_orchestrator_run("link-1", serde_json::json!({"url": "https://a"}))
        .await
        .unwrap();

    assert_eq!(run.status, AgentRunStatus::Running);
    assert_eq!(run.stage, AgentStage::Orchestrator);

    let fetched = ledger.get(&run.id, "link-1").await.unwrap().unwrap();
    assert_eq!(fetched.id, run.id);
}

#[tokio::test]
async fn record_stage_complete_sets_terminal_status_and_usage() {
    let (ledger, _clock) = ledger();
    let run = ledger.record_stage_start(AgentStage::Fetch, "link-1").await.unwrap();

    let usage = TokenUsage::normalize(10, 20, None);
    let completed = ledger
        .record_stage_complete(&run.id, "link-1", AgentRunStatus::Completed, None, Some(usage))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(completed.status, AgentRunStatus::Completed);
    assert!(completed.completed_at.is_some());
    assert_eq!(completed.usage.unwrap().total_tokens, 30);
}

#[tokio::test]
async fn record_stage_complete_on_unknown_run_returns_none() {
    let (ledger, _clock) = ledger();
    let result = ledger
        .record_stage_complete("missing", "link-1", AgentRunStatus::Failed, None, None)
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn recover_orphaned_runs_fails_stuck_running_runs() {
    let (ledger, _clock) = ledger();
    ledger.record_stage_start(AgentStage::Fetch, "link-1").await.unwrap();
    ledger.record_stage_start(AgentStage::Review, "link-2").await.unwrap();
    let run3 = ledger.record_stage_start(AgentStage::Draft, "link-3").await.unwrap();
    ledger
        .record_stage_complete(&run3.id, "link-3", AgentRunStatus::Completed, None, None)
        .await
        .unwrap();

    let recovered = ledger.recover_orphaned_runs().await.unwrap();
    assert_eq!(recovered, 2);

    let failures = ledger.list_recent_failures(10).await.unwrap();
    assert_eq!(failures.len(), 2);
    assert!(failures.iter().all(|r| r.status == AgentRunStatus::Failed));
    assert!(failures
        .iter()
        .all(|r| r.output.as_ref().unwrap()["error"] == "Recovered after process restart"));
}

#[tokio::test]
async fn aggregate_token_usage_sums_recent_runs() {
    let (ledger, _clock) = ledger();
    for (trigger, in_tok, out_tok) in [("l1", 5, 5), ("l2", 10, 10), ("l3", 1, 1)] {
        let run = ledger.record_stage_start(AgentStage::Fetch, trigger).await.unwrap();
        ledger
            .record_stage_complete(
                &run.id,
                trigger,
                AgentRunStatus::Completed,
                None,
                Some(TokenUsage::normalize(in_tok, out_tok, None)),
            )
            .await
            .unwrap();
    }

    let total = ledger.aggregate_token_usage(10).await.unwrap();
    assert_eq!(total.input_tokens, 16);
    assert_eq!(total.output_tokens, 16);
    assert_eq!(total.total_tokens, 32);
}

#[tokio::test]
async fn get_by_trigger_returns_runs_in_start_order() {
    let (ledger, clock) = ledger();
    ledger.record_stage_start(AgentStage::Fetch, "link-1").await.unwrap();
    clock.advance(chrono::Duration::seconds(1));
    ledger.record_stage_start(AgentStage::Review, "link-1").await.unwrap();

    let runs = ledger.get_by_trigger("link-1").await.unwrap();
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0].stage, AgentStage::Fetch);
    assert_eq!(runs[1].stage, AgentStage::Review);
}
