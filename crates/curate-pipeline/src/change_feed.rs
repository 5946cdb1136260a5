// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The change-feed processor: a single long-lived task that polls the
//! `links` and `feedback` containers and fans each item out to a bounded
//! handler task on [`PipelineOrchestrator`]. Grounded on
//! `original_source/packages/curate-worker/src/curate_worker/pipeline/change_feed.py`
//! (`_poll_loop`, `_process_container`, continuation-token persistence).

use crate::concurrency::HandlerSemaphore;
use crate::orchestrator::PipelineOrchestrator;
use curate_agent::ExternalAgent;
use curate_core::{Clock, ContinuationToken, IdGen};
use curate_store::{DocumentStore, Repository, StoreError};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// Max documents requested per `change_feed` call.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

const LINKS_CONTAINER: &str = "links";
const FEEDBACK_CONTAINER: &str = "feedback";

const POLL_INTERVAL: Duration = Duration::from_secs(1);
const MAX_BACKOFF: Duration = Duration::from_secs(30);

pub struct ChangeFeedProcessor<A, I, C>
where
    A: ExternalAgent,
    I: IdGen,
    C: Clock,
{
    store: Arc<dyn DocumentStore>,
    tokens: Repository<ContinuationToken, C>,
    orchestrator: Arc<PipelineOrchestrator<A, I, C>>,
    semaphore: HandlerSemaphore,
    clock: C,
    page_size: u32,
}

impl<A, I, C> ChangeFeedProcessor<A, I, C>
where
    A: ExternalAgent,
    I: IdGen,
    C: Clock,
{
    pub fn new(
        store: Arc<dyn DocumentStore>,
        tokens: Repository<ContinuationToken, C>,
        orchestrator: Arc<PipelineOrchestrator<A, I, C>>,
        semaphore: HandlerSemaphore,
        clock: C,
    ) -> Self {
        Self {
            store,
            tokens,
            orchestrator,
            semaphore,
            clock,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    async fn load_token(&self, container: &str) -> Result<Option<String>, StoreError> {
        let id = ContinuationToken::id_for(container);
        Ok(self.tokens.get(&id, &id).await?.map(|t| t.token))
    }

    async fn save_token(&self, container: &str, token: &str) -> Result<(), StoreError> {
        let id = ContinuationToken::id_for(container);
        match self.tokens.get(&id, &id).await? {
            Some(mut existing) => {
                existing.token = token.to_string();
                self.tokens.update(existing).await?;
            }
            None => {
                self.tokens
                    .create(ContinuationToken::new(container, token, self.clock.now()))
                    .await?;
            }
        }
        Ok(())
    }

    /// Polls one container once, spawning a handler task per item into
    /// `handlers`. Returns the page's continuation token so the caller can
    /// persist it, or an error if the underlying store call failed.
    async fn poll_container(
        &self,
        container: &str,
        continuation: Option<String>,
        handlers: &mut JoinSet<()>,
    ) -> Result<String, StoreError> {
        let page = self.store.change_feed(container, continuation.as_deref(), self.page_size).await?;

        for item in page.items {
            let orchestrator = self.orchestrator.clone();
            let semaphore = self.semaphore.clone();
            let container = container.to_string();
            handlers.spawn(async move {
                let _permit = semaphore.acquire().await;
                let result = if container == LINKS_CONTAINER {
                    orchestrator.handle_link_change(&item).await
                } else {
                    orchestrator.handle_feedback_change(&item).await
                };
                if let Err(error) = result {
                    tracing::warn!(container = %container, %error, "change feed handler failed");
                }
            });
        }

        Ok(page.next_token.or(continuation).unwrap_or_default())
    }

    /// Runs the poll loop until `cancel` fires. Never returns an error;
    /// store failures are retried with backoff per the processor's own
    /// resilience policy rather than propagated to the caller.
    pub async fn run(&self, cancel: &CancellationToken) {
        let mut links_token = match self.load_token(LINKS_CONTAINER).await {
            Ok(token) => token,
            Err(error) => {
                tracing::error!(%error, "failed to load links continuation token; starting from the beginning");
                None
            }
        };
        let mut feedback_token = match self.load_token(FEEDBACK_CONTAINER).await {
            Ok(token) => token,
            Err(error) => {
                tracing::error!(%error, "failed to load feedback continuation token; starting from the beginning");
                None
            }
        };

        let mut handlers = JoinSet::new();
        let mut consecutive_errors: u32 = 0;

        loop {
            if cancel.is_cancelled() {
                break;
            }

            let mut tick_failed = false;

            match self.poll_container(LINKS_CONTAINER, links_token.clone(), &mut handlers).await {
                Ok(token) => {
                    if let Err(error) = self.save_token(LINKS_CONTAINER, &token).await {
                        tracing::warn!(%error, "failed to persist links continuation token");
                    }
                    links_token = Some(token);
                }
                Err(error) => {
                    log_poll_error(consecutive_errors, "links", &error);
                    tick_failed = true;
                }
            }

            match self.poll_container(FEEDBACK_CONTAINER, feedback_token.clone(), &mut handlers).await {
                Ok(token) => {
                    if let Err(error) = self.save_token(FEEDBACK_CONTAINER, &token).await {
                        tracing::warn!(%error, "failed to persist feedback continuation token");
                    }
                    feedback_token = Some(token);
                }
                Err(error) => {
                    log_poll_error(consecutive_errors, "feedback", &error);
                    tick_failed = true;
                }
            }

            // Reap completed handler tasks without blocking the poll loop.
            while handlers.try_join_next().is_some() {}

            let sleep = if tick_failed {
                consecutive_errors += 1;
                backoff_delay(consecutive_errors)
            } else {
                consecutive_errors = 0;
                POLL_INTERVAL
            };

            tokio::select! {
                _ = tokio::time::sleep(sleep) => {}
                _ = cancel.cancelled() => break,
            }
        }

        // Shutdown: cancel and drain every in-flight handler task, ignoring
        // join errors (a cancelled task reports as such, which is expected).
        handlers.abort_all();
        while handlers.join_next().await.is_some() {}
    }
}

fn log_poll_error(consecutive_errors: u32, container: &str, error: &StoreError) {
    if consecutive_errors == 0 {
        tracing::error!(container, %error, "change feed poll failed");
    } else {
        tracing::warn!(container, %error, consecutive_errors, "change feed poll still failing");
    }
}

fn backoff_delay(consecutive_errors: u32) -> Duration {
    let scaled = POLL_INTERVAL.saturating_mul(1u32.checked_shl(consecutive_errors).unwrap_or(u32::MAX));
    scaled.min(MAX_BACKOFF)
}

#[cfg(test)]
#[path = "change_feed_tests.rs"]
mod tests;
