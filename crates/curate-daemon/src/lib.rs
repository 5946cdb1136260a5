// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! curate-daemon: wires the document store, event publisher, pipeline
//! orchestrator, and change-feed processor into one long-lived process,
//! the same role `oj-daemon` plays for its own engine loop.

pub mod chat_client;
pub mod config;
pub mod error;
pub mod health;

pub use chat_client::AzureOpenAiChatClient;
pub use config::Settings;
pub use error::DaemonError;
pub use health::HealthState;

use azure_data_cosmos::CosmosClient;
use curate_agent::ExternalAgent;
use curate_core::{ContinuationToken, Edition, Feedback, Link, Revision, SystemClock, UuidIdGen};
use curate_events::{EventPublisher, ExternalBus};
use curate_pipeline::agent::ToolCallingAgent;
use curate_pipeline::revisions::RevisionRecorder;
use curate_pipeline::stage;
use curate_pipeline::tools::{
    DraftTool, EditTool, GetEditionStatusTool, GetLinkStatusTool, RecordStageCompleteTool, RecordStageStartTool,
    ResolveFeedbackTool, ToolDispatch,
};
use curate_pipeline::{ChangeFeedProcessor, ClaimSet, EditionLocks, HandlerSemaphore, PipelineOrchestrator, RunLedger};
use curate_store::{CosmosStore, DocumentStore, Repository, TracedStore};
use std::sync::Arc;
use tokio::signal::unix::{signal, SignalKind};
use tokio_util::sync::CancellationToken;

/// Builds the document store from `settings`, wrapped in latency tracing
/// exactly as every `DocumentStore` consumer in this workspace expects.
fn build_store(settings: &Settings) -> Result<Arc<dyn DocumentStore>, DaemonError> {
    let client = CosmosClient::with_key(&settings.cosmos_endpoint, settings.cosmos_key.clone(), None)?;
    let cosmos = CosmosStore::new(client, settings.cosmos_database.clone());
    Ok(Arc::new(TracedStore::new(cosmos, settings.slow_repository_ms)))
}

/// The run ledger and event publisher are the two pieces shared between the
/// orchestrator's own wiring (in [`serve`]) and the tool dispatch (in
/// [`build_tool_dispatch`]) — they must be the *same* instances in both
/// places, or a `record_stage_start` tool call and the orchestrator's own
/// completion bookkeeping would publish onto two disconnected event buses.
struct Core {
    ledger: Arc<RunLedger<UuidIdGen, SystemClock>>,
    events: Arc<EventPublisher>,
}

async fn build_core(settings: &Settings, store: Arc<dyn DocumentStore>) -> Core {
    let bus = ExternalBus::connect(settings.bus_connection_string.as_deref()).await;
    let events = Arc::new(EventPublisher::with_capacity(bus, settings.event_queue_maxsize));
    let ledger = Arc::new(RunLedger::new(Repository::new(store), UuidIdGen));
    Core { ledger, events }
}

/// Registers every orchestrator tool against repositories backed by `store`,
/// sharing `ledger` and `events` with the orchestrator itself.
fn build_tool_dispatch(
    store: Arc<dyn DocumentStore>,
    ledger: Arc<RunLedger<UuidIdGen, SystemClock>>,
    events: Arc<EventPublisher>,
) -> ToolDispatch {
    let revisions = Arc::new(RevisionRecorder::new(
        Repository::<Revision, SystemClock>::new(store.clone()),
        Repository::<Edition, SystemClock>::new(store.clone()),
        UuidIdGen,
        SystemClock,
    ));

    let mut tools: ToolDispatch = ToolDispatch::new();
    tools.insert(
        "get_link_status",
        Arc::new(GetLinkStatusTool { links: Repository::new(store.clone()) }),
    );
    tools.insert(
        "get_edition_status",
        Arc::new(GetEditionStatusTool { editions: Repository::new(store.clone()) }),
    );
    tools.insert(
        "record_stage_start",
        Arc::new(RecordStageStartTool { ledger: ledger.clone(), events: events.clone() }),
    );
    tools.insert(
        "record_stage_complete",
        Arc::new(RecordStageCompleteTool {
            ledger,
            events,
            links: Repository::new(store.clone()),
        }),
    );
    tools.insert(
        "draft",
        Arc::new(DraftTool {
            editions: Repository::new(store.clone()),
            links: Repository::new(store.clone()),
            revisions: revisions.clone(),
        }),
    );
    tools.insert(
        "edit",
        Arc::new(EditTool { editions: Repository::new(store.clone()), revisions }),
    );
    tools.insert(
        "resolve_feedback",
        Arc::new(ResolveFeedbackTool { feedback: Repository::new(store) }),
    );
    tools
}

/// Wires the store into repositories, the orchestrator, and the change-feed
/// processor, runs orphan recovery, and drives the poll loop until `cancel`
/// fires. Split out from [`run`] so it can be exercised in tests against an
/// [`curate_store::InMemoryStore`] instead of a live Cosmos connection, with
/// `ledger` and `events` passed in rather than constructed here so
/// production callers can share them with a tool-calling agent built from
/// the same store.
pub async fn serve<A: ExternalAgent>(
    settings: &Settings,
    store: Arc<dyn DocumentStore>,
    ledger: Arc<RunLedger<UuidIdGen, SystemClock>>,
    events: Arc<EventPublisher>,
    agent: A,
    health: HealthState,
    cancel: CancellationToken,
) -> Result<(), DaemonError> {
    let links: Repository<Link, SystemClock> = Repository::new(store.clone());
    let editions: Repository<Edition, SystemClock> = Repository::new(store.clone());
    let feedback: Repository<Feedback, SystemClock> = Repository::new(store.clone());
    let tokens: Repository<ContinuationToken, SystemClock> = Repository::new(store.clone());

    let recovered = ledger.recover_orphaned_runs().await?;
    if recovered > 0 {
        tracing::warn!(recovered, "recovered orphaned agent runs left over from a prior crash");
    }

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

    let processor = ChangeFeedProcessor::new(
        store,
        tokens,
        orchestrator,
        HandlerSemaphore::new(settings.max_concurrent_handlers),
        SystemClock,
    )
    .with_page_size(settings.change_feed_page_size);

    health.mark_ready();
    tracing::info!("daemon ready");
    processor.run(&cancel).await;
    tracing::info!("daemon stopped");
    Ok(())
}

/// Runs the production daemon until SIGTERM or SIGINT arrives: builds the
/// Cosmos-backed store, wires every orchestrator tool against it, and drives
/// an [`AzureOpenAiChatClient`]-backed [`ToolCallingAgent`] through [`serve`].
pub async fn run(settings: Settings, health: HealthState) -> Result<(), DaemonError> {
    let store = build_store(&settings)?;
    let core = build_core(&settings, store.clone()).await;
    let tools = build_tool_dispatch(store.clone(), core.ledger.clone(), core.events.clone());

    let client = AzureOpenAiChatClient::new(
        settings.azure_openai_endpoint.clone().unwrap_or_default(),
        settings.azure_openai_deployment.clone().unwrap_or_default(),
        settings.azure_openai_key.clone().unwrap_or_default(),
    );
    let agent = ToolCallingAgent::new(client, tools, stage::tool_schemas(), stage::ORCHESTRATOR_SYSTEM_PROMPT);

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    let signal_task = tokio::spawn(async move {
        tokio::select! {
            _ = sigterm.recv() => tracing::info!("received SIGTERM, shutting down"),
            _ = sigint.recv() => tracing::info!("received SIGINT, shutting down"),
        }
        signal_cancel.cancel();
    });

    serve(&settings, store, core.ledger, core.events, agent, health, cancel).await?;
    signal_task.abort();
    Ok(())
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
