use super::*;
use crate::error::AgentError;
use crate::fake::FakeAgent;
use serde_json::json;

#[tokio::test]
async fn success_returns_text_and_usage() {
    let agent = FakeAgent::new();
    agent.push_response(Ok(AgentOutcome {
        text: "done".into(),
        usage: Some(TokenUsage {
            input_tokens: 10,
            output_tokens: 5,
            total_tokens: 15,
        }),
    }));
    let executor = StageExecutor::new(agent);
    let cancel = CancellationToken::new();

    let outcome = executor
        .execute(json!({}), &cancel)
        .await
        .expect("not cancelled");
    match outcome {
        StageOutcome::Success { text, usage } => {
            assert_eq!(text, "done");
            assert_eq!(usage.unwrap().total_tokens, 15);
        }
        StageOutcome::Failed { .. } => panic!("expected success"),
    }
}

#[tokio::test(start_paused = true)]
async fn exhausted_retries_surface_as_failed_not_err() {
    let agent = FakeAgent::new();
    agent.set_default_response(Err(AgentError::Invocation("boom".into())));
    let executor =
        StageExecutor::with_policy(agent.clone(), 2, Duration::from_millis(1), Duration::from_millis(5));
    let cancel = CancellationToken::new();

    let outcome = executor
        .execute(json!({}), &cancel)
        .await
        .expect("not cancelled");
    assert!(matches!(outcome, StageOutcome::Failed { .. }));
    assert_eq!(agent.call_count(), 3);
}

#[tokio::test]
async fn cancellation_yields_none() {
    let agent = FakeAgent::new();
    agent.set_default_response(Err(AgentError::Invocation("boom".into())));
    let executor = StageExecutor::new(agent);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let outcome = executor.execute(json!({}), &cancel).await;
    assert!(outcome.is_none());
}
