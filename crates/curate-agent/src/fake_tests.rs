use super::*;
use serde_json::json;

#[tokio::test]
async fn default_behavior_echoes_prompt() {
    let agent = FakeAgent::new();
    let outcome = agent
        .invoke(json!({"prompt": "hello"}))
        .await
        .expect("invoke");
    assert_eq!(outcome.text, "hello");
    assert_eq!(agent.call_count(), 1);
}

#[tokio::test]
async fn queued_responses_are_returned_in_order() {
    let agent = FakeAgent::new();
    agent.push_response(Ok(AgentOutcome {
        text: "first".into(),
        usage: None,
    }));
    agent.push_response(Err(AgentError::Invocation("boom".into())));

    let first = agent.invoke(json!({})).await.expect("first");
    assert_eq!(first.text, "first");

    let second = agent.invoke(json!({})).await;
    assert!(second.is_err());

    // Falls back to default echo behavior once the queue is drained.
    let third = agent.invoke(json!({"prompt": "p"})).await.expect("third");
    assert_eq!(third.text, "p");
}

#[tokio::test]
async fn default_response_applies_after_queue_drains() {
    let agent = FakeAgent::new();
    agent.set_default_response(Err(AgentError::Invocation("always fails".into())));
    let result = agent.invoke(json!({})).await;
    assert!(result.is_err());
    let result = agent.invoke(json!({})).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn records_every_call() {
    let agent = FakeAgent::new();
    agent.invoke(json!({"n": 1})).await.expect("invoke");
    agent.invoke(json!({"n": 2})).await.expect("invoke");
    assert_eq!(agent.calls(), vec![json!({"n": 1}), json!({"n": 2})]);
}
