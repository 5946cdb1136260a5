// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! curate-store: the document store adapter — a generic,
//! partitioned JSON document store contract, a Cosmos DB-backed
//! implementation, an in-memory test double, latency tracing, and the
//! typed [`repository::Repository`] layered on top.

pub mod cosmos;
pub mod error;
#[cfg(any(test, feature = "test-support"))]
pub mod in_memory;
mod query;
pub mod repository;
pub mod store;
pub mod traced;

pub use cosmos::CosmosStore;
pub use error::StoreError;
#[cfg(any(test, feature = "test-support"))]
pub use in_memory::InMemoryStore;
pub use repository::Repository;
pub use store::{ChangeFeedPage, DocumentStore, QueryParam};
pub use traced::TracedStore;
