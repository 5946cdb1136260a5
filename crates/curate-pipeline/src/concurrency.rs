// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Concurrency primitives guarding the pipeline against three hazards:
//! replayed change events (claim set), interleaved edits on one edition
//! (edition mutex map), and unbounded task growth under a burst (handler
//! semaphore).

use curate_core::{Link, LinkStatus};
use parking_lot::Mutex as SyncMutex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::{Mutex as AsyncMutex, OwnedSemaphorePermit, Semaphore};

/// Default bound on concurrent in-flight handler tasks.
pub const DEFAULT_MAX_CONCURRENT_HANDLERS: usize = 25;

/// Held while a link is being processed by a handler; dropping it (or
/// calling [`ClaimSet::release`]) frees the link for the next event.
pub struct ClaimToken {
    link_id: String,
}

impl ClaimToken {
    pub fn link_id(&self) -> &str {
        &self.link_id
    }
}

/// Guards against concurrent handlers racing on the same link, and against
/// replayed/stale change events re-triggering a stage that already ran.
#[derive(Default)]
pub struct ClaimSet {
    claimed: SyncMutex<HashSet<String>>,
}

impl ClaimSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `link_id` if the link exists, is not in a terminal status,
    /// the incoming event status matches the link's current status (i.e.
    /// the event isn't stale), and no handler already holds the claim.
    pub fn claim(&self, link: &Link, event_status: LinkStatus) -> Option<ClaimToken> {
        if link.status.is_terminal() {
            return None;
        }
        if link.status != event_status {
            return None;
        }

        let mut claimed = self.claimed.lock();
        if !claimed.insert(link.id.clone()) {
            return None;
        }
        Some(ClaimToken {
            link_id: link.id.clone(),
        })
    }

    pub fn release(&self, token: ClaimToken) {
        self.claimed.lock().remove(&token.link_id);
    }
}

/// Lazily creates (and hands back) one async mutex per edition id, itself
/// guarded by a sync mutex over the map. Used to serialize feedback-driven
/// edits against the same edition's content.
#[derive(Default)]
pub struct EditionLocks {
    locks: SyncMutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl EditionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, edition_id: &str) -> Arc<AsyncMutex<()>> {
        let mut locks = self.locks.lock();
        locks
            .entry(edition_id.to_string())
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }
}

/// Bounds concurrent handler tasks. Wraps `tokio::sync::Semaphore` in an
/// `Arc` so permits can outlive the borrow that acquired them.
#[derive(Clone)]
pub struct HandlerSemaphore {
    inner: Arc<Semaphore>,
}

impl HandlerSemaphore {
    pub fn new(max_concurrent: usize) -> Self {
        Self {
            inner: Arc::new(Semaphore::new(max_concurrent)),
        }
    }

    #[allow(clippy::expect_used)]
    pub async fn acquire(&self) -> OwnedSemaphorePermit {
        self.inner
            .clone()
            .acquire_owned()
            .await
            .expect("semaphore is never closed")
    }
}

impl Default for HandlerSemaphore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONCURRENT_HANDLERS)
    }
}

#[cfg(test)]
#[path = "concurrency_tests.rs"]
mod tests;
