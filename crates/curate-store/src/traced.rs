// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Latency logging for any [`DocumentStore`] implementation:
//! "every operation records latency; operations exceeding a configured
//! threshold are logged at warning level with duration and operation name").

use crate::error::StoreError;
use crate::store::{ChangeFeedPage, DocumentStore, QueryParam};
use async_trait::async_trait;
use serde_json::Value as Json;
use std::time::Instant;

/// Wraps a [`DocumentStore`], logging each operation's duration and
/// escalating to `warn` past `slow_operation_ms`.
pub struct TracedStore<S> {
    inner: S,
    slow_operation_ms: u64,
}

impl<S: DocumentStore> TracedStore<S> {
    pub fn new(inner: S, slow_operation_ms: u64) -> Self {
        Self {
            inner,
            slow_operation_ms,
        }
    }

    fn log(&self, container: &str, operation: &str, started_at: Instant, outcome: &str) {
        let duration_ms = started_at.elapsed().as_secs_f64() * 1000.0;
        if duration_ms >= self.slow_operation_ms as f64 {
            tracing::warn!(
                container,
                operation,
                duration_ms,
                outcome,
                "slow repository operation"
            );
        } else {
            tracing::debug!(
                container,
                operation,
                duration_ms,
                outcome,
                "repository operation"
            );
        }
    }
}

#[async_trait]
impl<S: DocumentStore> DocumentStore for TracedStore<S> {
    async fn create(
        &self,
        container: &str,
        partition_key: &str,
        body: Json,
    ) -> Result<Json, StoreError> {
        let started_at = Instant::now();
        let result = self.inner.create(container, partition_key, body).await;
        self.log(
            container,
            "create",
            started_at,
            if result.is_ok() { "created" } else { "error" },
        );
        result
    }

    async fn get(
        &self,
        container: &str,
        id: &str,
        partition_key: &str,
    ) -> Result<Option<Json>, StoreError> {
        let started_at = Instant::now();
        let result = self.inner.get(container, id, partition_key).await;
        let outcome = match &result {
            Ok(Some(_)) => "found",
            Ok(None) => "not_found",
            Err(_) => "error",
        };
        self.log(container, "get", started_at, outcome);
        result
    }

    async fn replace(
        &self,
        container: &str,
        id: &str,
        partition_key: &str,
        body: Json,
    ) -> Result<Json, StoreError> {
        let started_at = Instant::now();
        let result = self.inner.replace(container, id, partition_key, body).await;
        self.log(
            container,
            "replace",
            started_at,
            if result.is_ok() { "updated" } else { "error" },
        );
        result
    }

    async fn query(
        &self,
        container: &str,
        template: &str,
        params: &[QueryParam<'_>],
    ) -> Result<Vec<Json>, StoreError> {
        let started_at = Instant::now();
        let result = self.inner.query(container, template, params).await;
        self.log(
            container,
            "query",
            started_at,
            if result.is_ok() { "ok" } else { "error" },
        );
        result
    }

    async fn change_feed(
        &self,
        container: &str,
        continuation: Option<&str>,
        max_item_count: u32,
    ) -> Result<ChangeFeedPage, StoreError> {
        let started_at = Instant::now();
        let result = self
            .inner
            .change_feed(container, continuation, max_item_count)
            .await;
        self.log(
            container,
            "change_feed",
            started_at,
            if result.is_ok() { "ok" } else { "error" },
        );
        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
