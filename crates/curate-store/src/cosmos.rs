// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cosmos DB-backed [`DocumentStore`].
//!
//! Every operation is timed and logged by [`crate::traced::TracedStore`];
//! this module only talks to the wire.

use crate::error::StoreError;
use crate::store::{ChangeFeedPage, DocumentStore, QueryParam};
use async_trait::async_trait;
use azure_data_cosmos::{CosmosClient, PartitionKey};
use futures::StreamExt;
use serde_json::Value as Json;

/// Thin wrapper over [`azure_data_cosmos::CosmosClient`] scoped to one database.
pub struct CosmosStore {
    client: CosmosClient,
    database: String,
}

impl CosmosStore {
    pub fn new(client: CosmosClient, database: impl Into<String>) -> Self {
        Self {
            client,
            database: database.into(),
        }
    }

    fn container(&self, name: &str) -> azure_data_cosmos::ContainerClient {
        self.client.database_client(&self.database).container_client(name)
    }
}

#[async_trait]
impl DocumentStore for CosmosStore {
    async fn create(
        &self,
        container: &str,
        partition_key: &str,
        body: Json,
    ) -> Result<Json, StoreError> {
        self.container(container)
            .create_item(PartitionKey::from(partition_key), body.clone(), None)
            .await
            .map_err(|e| StoreError::transport("create", e))?;
        Ok(body)
    }

    async fn get(
        &self,
        container: &str,
        id: &str,
        partition_key: &str,
    ) -> Result<Option<Json>, StoreError> {
        let result = self
            .container(container)
            .read_item::<Json>(PartitionKey::from(partition_key), id, None)
            .await;

        let body = match result {
            Ok(response) => response.into_body().await.map_err(|e| StoreError::transport("get", e))?,
            Err(e) if e.http_status() == Some(404) => return Ok(None),
            Err(e) => return Err(StoreError::transport("get", e)),
        };

        if body.get("deleted_at").map(|v| !v.is_null()).unwrap_or(false) {
            return Ok(None);
        }
        Ok(Some(body))
    }

    async fn replace(
        &self,
        container: &str,
        id: &str,
        partition_key: &str,
        body: Json,
    ) -> Result<Json, StoreError> {
        self.container(container)
            .replace_item(PartitionKey::from(partition_key), id, body.clone(), None)
            .await
            .map_err(|e| StoreError::transport("replace", e))?;
        Ok(body)
    }

    async fn query(
        &self,
        container: &str,
        template: &str,
        params: &[QueryParam<'_>],
    ) -> Result<Vec<Json>, StoreError> {
        let query = azure_data_cosmos::Query::from(template).with_parameters(
            params
                .iter()
                .map(|(name, value)| ((*name).to_string(), value.clone())),
        );

        let mut pager = self
            .container(container)
            .query_items::<Json>(query, None, None)
            .map_err(|e| StoreError::transport("query", e))?;

        let mut items = Vec::new();
        while let Some(page) = pager.next().await {
            let page = page.map_err(|e| StoreError::transport("query", e))?;
            for item in page.into_body().await.map_err(|e| StoreError::transport("query", e))? {
                if item.get("deleted_at").map(|v| v.is_null()).unwrap_or(true) {
                    items.push(item);
                }
            }
        }
        Ok(items)
    }

    async fn change_feed(
        &self,
        container: &str,
        continuation: Option<&str>,
        max_item_count: u32,
    ) -> Result<ChangeFeedPage, StoreError> {
        let mut request = self.container(container).query_change_feed(None);
        request = request.with_max_item_count(max_item_count);
        if let Some(token) = continuation {
            request = request.with_continuation(token);
        }

        let mut pager = request;
        let mut items = Vec::new();
        let mut next_token = continuation.map(str::to_string);

        match pager.next().await {
            Some(Ok(page)) => {
                next_token = page.continuation().or(next_token);
                items = page
                    .into_body()
                    .await
                    .map_err(|e| StoreError::transport("change_feed", e))?;
            }
            Some(Err(e)) => {
                // The Cosmos DB emulator returns a malformed "304 Not Modified"
                // that the transport layer surfaces as a response parse error
                // rather than a clean empty page. Treat it as "no changes".
                if e.to_string().contains("Expected HTTP/") {
                    return Ok(ChangeFeedPage {
                        items: vec![],
                        next_token: continuation.map(str::to_string),
                    });
                }
                return Err(StoreError::transport("change_feed", e));
            }
            None => {}
        }

        Ok(ChangeFeedPage { items, next_token })
    }
}
