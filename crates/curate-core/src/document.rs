// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared document semantics: partition keys and soft-delete.
//!
//! Every record stored in the document store shares the same envelope —
//! an id, `created_at`/`updated_at`, and an optional `deleted_at` tombstone.
//! `DocumentStore` (in `curate-store`) is generic over this trait rather
//! than over any one entity type.

use chrono::{DateTime, Utc};

/// A record that can be stored in a partitioned document container.
pub trait Document: Clone + Send + Sync + serde::Serialize + serde::de::DeserializeOwned {
    /// The container this document's type lives in (e.g. `"links"`).
    const CONTAINER: &'static str;

    /// Document id, unique within the container.
    fn id(&self) -> &str;

    /// Partition key value for this document.
    fn partition_key(&self) -> &str;

    fn created_at(&self) -> DateTime<Utc>;
    fn updated_at(&self) -> DateTime<Utc>;
    fn set_updated_at(&mut self, at: DateTime<Utc>);

    fn deleted_at(&self) -> Option<DateTime<Utc>>;
    fn set_deleted_at(&mut self, at: DateTime<Utc>);

    /// Soft-deleted records are invisible to all reads (data model invariant 5).
    fn is_deleted(&self) -> bool {
        self.deleted_at().is_some()
    }
}

/// Implements the boilerplate `Document` accessors for a struct that has
/// `id: String`, `created_at: DateTime<Utc>`, `updated_at: DateTime<Utc>`,
/// and `deleted_at: Option<DateTime<Utc>>` fields, given an expression for
/// the partition key and the container name.
#[macro_export]
macro_rules! impl_document {
    ($ty:ty, container = $container:expr, partition_key = |$self_:ident| $pk:expr) => {
        impl $crate::document::Document for $ty {
            const CONTAINER: &'static str = $container;

            fn id(&self) -> &str {
                &self.id
            }

            fn partition_key(&self) -> &str {
                let $self_ = self;
                $pk
            }

            fn created_at(&self) -> chrono::DateTime<chrono::Utc> {
                self.created_at
            }

            fn updated_at(&self) -> chrono::DateTime<chrono::Utc> {
                self.updated_at
            }

            fn set_updated_at(&mut self, at: chrono::DateTime<chrono::Utc>) {
                self.updated_at = at;
            }

            fn deleted_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
                self.deleted_at
            }

            fn set_deleted_at(&mut self, at: chrono::DateTime<chrono::Utc>) {
                self.deleted_at = Some(at);
            }
        }
    };
}
