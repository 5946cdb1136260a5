// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `DocumentStore`: the generic, partitioned JSON document store contract.
//! Operates on raw `serde_json::Value` bodies; typed access is
//! layered on top by [`crate::repository::Repository`].

use crate::error::StoreError;
use async_trait::async_trait;
use serde_json::Value as Json;

/// One named parameter substituted into a query template, e.g. `("@trigger_id", json!("l1"))`.
pub type QueryParam<'a> = (&'a str, Json);

/// A page of change-feed results plus the continuation token to resume from.
#[derive(Debug, Clone)]
pub struct ChangeFeedPage {
    pub items: Vec<Json>,
    pub next_token: Option<String>,
}

/// Generic operations over a partitioned, JSON document store.
///
/// `get` returns `Ok(None)` on not-found; it must never surface the
/// underlying transport error for that case. Every other operation
/// surfaces a [`StoreError`] on I/O failure — the caller chooses retry
/// policy.
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    /// Create a new document in `container`. `body` must already contain
    /// `id` and the value at `partition_key`.
    async fn create(
        &self,
        container: &str,
        partition_key: &str,
        body: Json,
    ) -> Result<Json, StoreError>;

    /// Point read by id and partition key. Returns `None` on not-found *or*
    /// when the document's `deleted_at` is set (data model invariant 5).
    async fn get(
        &self,
        container: &str,
        id: &str,
        partition_key: &str,
    ) -> Result<Option<Json>, StoreError>;

    /// Replace a document wholesale.
    async fn replace(
        &self,
        container: &str,
        id: &str,
        partition_key: &str,
        body: Json,
    ) -> Result<Json, StoreError>;

    /// Run a parameterized query, filtering out soft-deleted documents.
    /// `template` uses `@name` placeholders bound by `params`.
    async fn query(
        &self,
        container: &str,
        template: &str,
        params: &[QueryParam<'_>],
    ) -> Result<Vec<Json>, StoreError>;

    /// Read one bounded page of the container's change feed since `continuation`.
    async fn change_feed(
        &self,
        container: &str,
        continuation: Option<&str>,
        max_item_count: u32,
    ) -> Result<ChangeFeedPage, StoreError>;
}
