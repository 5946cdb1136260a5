use super::*;
use crate::concurrency::{ClaimSet, EditionLocks};
use crate::ledger::RunLedger;
use curate_agent::{AgentOutcome, FakeAgent};
use curate_core::{Edition, Feedback, FakeClock, Link, LinkBuilder, LinkStatus, SequentialIdGen};
use curate_events::{EventPublisher, ExternalBus};
use curate_store::InMemoryStore;
use proptest::prelude::*;
use std::time::Duration;

fn store() -> Arc<dyn DocumentStore> {
    Arc::new(InMemoryStore::new())
}

fn processor(store: Arc<dyn DocumentStore>, agent: FakeAgent) -> ChangeFeedProcessor<FakeAgent, SequentialIdGen, FakeClock> {
    let links = Repository::with_clock(store.clone(), FakeClock::new());
    let editions = Repository::with_clock(store.clone(), FakeClock::new());
    let feedback = Repository::with_clock(store.clone(), FakeClock::new());
    let ledger = Arc::new(RunLedger::with_clock(
        Repository::with_clock(store.clone(), FakeClock::new()),
        SequentialIdGen::new("run"),
        FakeClock::new(),
    ));
    let events = Arc::new(EventPublisher::new(ExternalBus::disabled()));
    let orchestrator = Arc::new(PipelineOrchestrator::new(
        links,
        editions,
        feedback,
        ledger,
        events,
        ClaimSet::new(),
        EditionLocks::new(),
        agent,
    ));
    let tokens = Repository::with_clock(store.clone(), FakeClock::new());
    ChangeFeedProcessor::new(store, tokens, orchestrator, HandlerSemaphore::new(4), FakeClock::new())
}

#[tokio::test]
async fn poll_container_dispatches_a_link_item_and_returns_a_resumable_token() {
    let store = store();
    let links: Repository<Link, FakeClock> = Repository::with_clock(store.clone(), FakeClock::new());
    links
        .create(LinkBuilder::new("l1").status(LinkStatus::Submitted).edition_id("e1").build())
        .await
        .unwrap();

    let agent = FakeAgent::new();
    agent.push_response(Ok(AgentOutcome {
        text: "advanced".to_string(),
        usage: None,
    }));
    let processor = processor(store.clone(), agent);

    let mut handlers = JoinSet::new();
    let token = processor.poll_container(LINKS_CONTAINER, None, &mut handlers).await.unwrap();
    assert!(!token.is_empty());
    while handlers.join_next().await.is_some() {}

    let runs = Repository::<curate_core::AgentRun, FakeClock>::with_clock(store, FakeClock::new())
        .query("SELECT * FROM c WHERE c.trigger_id = @trigger_id", &[("@trigger_id", serde_json::json!("l1"))])
        .await
        .unwrap();
    assert_eq!(runs.len(), 1);
}

#[tokio::test]
async fn poll_container_on_an_empty_feed_returns_a_stable_token_and_spawns_nothing() {
    let processor = processor(store(), FakeAgent::new());
    let mut handlers = JoinSet::new();
    let token = processor.poll_container(LINKS_CONTAINER, None, &mut handlers).await.unwrap();
    assert!(!token.is_empty());
    assert_eq!(handlers.len(), 0);
}

#[tokio::test]
async fn save_token_then_load_token_round_trips() {
    let processor = processor(store(), FakeAgent::new());
    processor.save_token(LINKS_CONTAINER, "42").await.unwrap();
    assert_eq!(processor.load_token(LINKS_CONTAINER).await.unwrap(), Some("42".to_string()));
}

#[tokio::test]
async fn save_token_twice_updates_rather_than_duplicating() {
    let processor = processor(store(), FakeAgent::new());
    processor.save_token(LINKS_CONTAINER, "1").await.unwrap();
    processor.save_token(LINKS_CONTAINER, "2").await.unwrap();
    assert_eq!(processor.load_token(LINKS_CONTAINER).await.unwrap(), Some("2".to_string()));
}

#[tokio::test]
async fn load_token_for_an_unseen_container_is_none() {
    let processor = processor(store(), FakeAgent::new());
    assert_eq!(processor.load_token(FEEDBACK_CONTAINER).await.unwrap(), None);
}

#[test]
fn backoff_delay_doubles_and_caps_at_max() {
    assert_eq!(backoff_delay(1), Duration::from_secs(2));
    assert_eq!(backoff_delay(2), Duration::from_secs(4));
    assert_eq!(backoff_delay(10), MAX_BACKOFF);
}

#[tokio::test]
async fn run_processes_a_pending_feedback_item_then_stops_on_cancellation() {
    let store = store();
    let editions: Repository<Edition, FakeClock> = Repository::with_clock(store.clone(), FakeClock::new());
    editions.create(Edition::builder("e1")).await.unwrap();
    let feedback: Repository<Feedback, FakeClock> = Repository::with_clock(store.clone(), FakeClock::new());
    feedback.create(Feedback::builder("fb1", "e1")).await.unwrap();

    let agent = FakeAgent::new();
    agent.push_response(Ok(AgentOutcome {
        text: "edited".to_string(),
        usage: None,
    }));
    let processor = processor(store.clone(), agent);

    let cancel = CancellationToken::new();
    let run_cancel = cancel.clone();
    let handle = tokio::spawn(async move { processor.run(&run_cancel).await });

    tokio::time::sleep(Duration::from_millis(50)).await;
    cancel.cancel();
    handle.await.unwrap();

    let runs = Repository::<curate_core::AgentRun, FakeClock>::with_clock(store, FakeClock::new())
        .query("SELECT * FROM c WHERE c.trigger_id = @trigger_id", &[("@trigger_id", serde_json::json!("fb1"))])
        .await
        .unwrap();
    assert_eq!(runs.len(), 1);
}

proptest! {
    /// Whatever number of links land in the container between polls, the
    /// continuation token returned never moves backwards — each poll's
    /// token is always >= the one it resumed from.
    #[test]
    fn continuation_token_never_regresses_across_successive_polls(batch_sizes in proptest::collection::vec(0usize..5, 1..8)) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async {
            let store = store();
            let links: Repository<Link, FakeClock> = Repository::with_clock(store.clone(), FakeClock::new());
            let processor = processor(store.clone(), FakeAgent::new());

            let mut token: Option<String> = None;
            let mut last_numeric: u64 = 0;
            let mut counter = 0usize;
            for batch in batch_sizes {
                for _ in 0..batch {
                    links
                        .create(LinkBuilder::new(format!("token-l{counter}")).status(LinkStatus::Submitted).edition_id("e1").build())
                        .await
                        .unwrap();
                    counter += 1;
                }

                let mut handlers = JoinSet::new();
                let next = processor.poll_container(LINKS_CONTAINER, token.clone(), &mut handlers).await.unwrap();
                while handlers.join_next().await.is_some() {}

                let numeric: u64 = next.parse().unwrap_or(last_numeric);
                prop_assert!(numeric >= last_numeric);
                last_numeric = numeric;
                token = Some(next);
            }
            Ok(())
        })?;
    }
}
