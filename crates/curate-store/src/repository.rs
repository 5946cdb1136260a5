// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed access on top of [`DocumentStore`], mirroring the role of the
//! original `BaseRepository[T]` generic: one `Repository<D>` per record
//! type, injected with a [`Clock`] so `updated_at`/`deleted_at` stamping is
//! testable.

use crate::error::StoreError;
use crate::store::{DocumentStore, QueryParam};
use curate_core::{Clock, Document, SystemClock};
use std::marker::PhantomData;
use std::sync::Arc;

pub struct Repository<D, C = SystemClock> {
    store: Arc<dyn DocumentStore>,
    clock: C,
    _marker: PhantomData<fn() -> D>,
}

impl<D> Repository<D, SystemClock>
where
    D: Document + serde::Serialize + serde::de::DeserializeOwned + Send + Sync,
{
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self::with_clock(store, SystemClock::default())
    }
}

impl<D, C> Repository<D, C>
where
    D: Document + serde::Serialize + serde::de::DeserializeOwned + Send + Sync,
    C: Clock,
{
    pub fn with_clock(store: Arc<dyn DocumentStore>, clock: C) -> Self {
        Self {
            store,
            clock,
            _marker: PhantomData,
        }
    }

    fn to_json(doc: &D) -> Result<serde_json::Value, StoreError> {
        serde_json::to_value(doc).map_err(StoreError::from)
    }

    fn from_json(value: serde_json::Value) -> Result<D, StoreError> {
        serde_json::from_value(value).map_err(StoreError::from)
    }

    pub async fn create(&self, doc: D) -> Result<D, StoreError> {
        let partition_key = doc.partition_key().to_string();
        let body = Self::to_json(&doc)?;
        let created = self.store.create(D::CONTAINER, &partition_key, body).await?;
        Self::from_json(created)
    }

    pub async fn get(&self, id: &str, partition_key: &str) -> Result<Option<D>, StoreError> {
        match self.store.get(D::CONTAINER, id, partition_key).await? {
            Some(body) => Ok(Some(Self::from_json(body)?)),
            None => Ok(None),
        }
    }

    pub async fn update(&self, mut doc: D) -> Result<D, StoreError> {
        doc.set_updated_at(self.clock.now());
        let id = doc.id().to_string();
        let partition_key = doc.partition_key().to_string();
        let body = Self::to_json(&doc)?;
        let updated = self
            .store
            .replace(D::CONTAINER, &id, &partition_key, body)
            .await?;
        Self::from_json(updated)
    }

    pub async fn soft_delete(&self, mut doc: D) -> Result<D, StoreError> {
        let now = self.clock.now();
        doc.set_deleted_at(now);
        doc.set_updated_at(now);
        let id = doc.id().to_string();
        let partition_key = doc.partition_key().to_string();
        let body = Self::to_json(&doc)?;
        let deleted = self
            .store
            .replace(D::CONTAINER, &id, &partition_key, body)
            .await?;
        Self::from_json(deleted)
    }

    pub async fn query(
        &self,
        template: &str,
        params: &[QueryParam<'_>],
    ) -> Result<Vec<D>, StoreError> {
        let rows = self.store.query(D::CONTAINER, template, params).await?;
        rows.into_iter().map(Self::from_json).collect()
    }
}

#[cfg(test)]
#[path = "repository_tests.rs"]
mod tests;
