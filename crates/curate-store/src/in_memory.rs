// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! An in-process [`DocumentStore`] backed by `parking_lot`-guarded maps.
//! Exists for tests: mirrors Cosmos DB semantics (soft-delete filtering,
//! change feed with continuation tokens) closely enough to exercise the
//! pipeline without a live Cosmos account.

use crate::error::StoreError;
use crate::query::{self, TopLimit};
use crate::store::{ChangeFeedPage, DocumentStore, QueryParam};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value as Json;
use std::collections::HashMap;

#[derive(Default)]
struct Container {
    documents: HashMap<String, Json>,
    /// Append-only log of ids in write order, mirroring a change feed.
    change_log: Vec<String>,
}

/// In-memory [`DocumentStore`]. Cheap to clone (`Arc` internally via the
/// caller wrapping it), cheap to construct — every test gets a fresh one.
#[derive(Default)]
pub struct InMemoryStore {
    containers: Mutex<HashMap<String, Container>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn doc_id(body: &Json) -> Result<String, StoreError> {
        body.get("id")
            .and_then(Json::as_str)
            .map(str::to_string)
            .ok_or_else(|| StoreError::MalformedQuery("document missing \"id\"".to_string()))
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn create(
        &self,
        container: &str,
        _partition_key: &str,
        body: Json,
    ) -> Result<Json, StoreError> {
        let id = Self::doc_id(&body)?;
        let mut containers = self.containers.lock();
        let entry = containers.entry(container.to_string()).or_default();
        entry.documents.insert(id.clone(), body.clone());
        entry.change_log.push(id);
        Ok(body)
    }

    async fn get(
        &self,
        container: &str,
        id: &str,
        _partition_key: &str,
    ) -> Result<Option<Json>, StoreError> {
        let containers = self.containers.lock();
        let doc = containers
            .get(container)
            .and_then(|c| c.documents.get(id))
            .cloned();
        Ok(doc.filter(|d| {
            d.get("deleted_at")
                .map(|v| v.is_null())
                .unwrap_or(true)
        }))
    }

    async fn replace(
        &self,
        container: &str,
        id: &str,
        _partition_key: &str,
        body: Json,
    ) -> Result<Json, StoreError> {
        let mut containers = self.containers.lock();
        let entry = containers.entry(container.to_string()).or_default();
        entry.documents.insert(id.to_string(), body.clone());
        entry.change_log.push(id.to_string());
        Ok(body)
    }

    async fn query(
        &self,
        container: &str,
        template: &str,
        params: &[QueryParam<'_>],
    ) -> Result<Vec<Json>, StoreError> {
        let parsed = query::parse(template)?;
        let indexed = query::index_params(params);

        let containers = self.containers.lock();
        let mut matched: Vec<Json> = containers
            .get(container)
            .map(|c| c.documents.values().cloned().collect())
            .unwrap_or_default();
        matched.retain(|doc| {
            query::matches_all(doc, &parsed.predicate_clauses, &indexed).unwrap_or(false)
        });

        if let Some((field, desc)) = &parsed.order_by {
            matched.sort_by(|a, b| {
                let av = a.get(field).cloned().unwrap_or(Json::Null);
                let bv = b.get(field).cloned().unwrap_or(Json::Null);
                let ordering = format!("{av}").cmp(&format!("{bv}"));
                if *desc {
                    ordering.reverse()
                } else {
                    ordering
                }
            });
        }

        if let Some(top) = &parsed.top {
            let limit = match top {
                TopLimit::Literal(n) => *n,
                TopLimit::Param(name) => indexed
                    .get(name.as_str())
                    .and_then(|v| v.as_u64())
                    .ok_or_else(|| StoreError::MalformedQuery(format!("unbound TOP param {name}")))?
                    as usize,
            };
            matched.truncate(limit);
        }

        Ok(matched)
    }

    async fn change_feed(
        &self,
        container: &str,
        continuation: Option<&str>,
        max_item_count: u32,
    ) -> Result<ChangeFeedPage, StoreError> {
        let containers = self.containers.lock();
        let Some(c) = containers.get(container) else {
            return Ok(ChangeFeedPage {
                items: vec![],
                next_token: continuation.map(str::to_string),
            });
        };

        let start: usize = match continuation {
            Some(token) => token
                .parse()
                .map_err(|_| StoreError::MalformedQuery(format!("bad continuation token {token}")))?,
            None => 0,
        };

        let end = (start + max_item_count as usize).min(c.change_log.len());
        let ids = &c.change_log[start.min(c.change_log.len())..end];
        let items = ids
            .iter()
            .filter_map(|id| c.documents.get(id).cloned())
            .collect();

        Ok(ChangeFeedPage {
            items,
            next_token: Some(end.to_string()),
        })
    }
}

#[cfg(test)]
#[path = "in_memory_tests.rs"]
mod tests;
