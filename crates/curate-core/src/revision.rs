// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `Revision` document — a content snapshot of an edition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

crate::define_id! {
    /// Unique identifier for a revision.
    pub struct RevisionId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevisionSource {
    Draft,
    Edit,
    Revert,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Revision {
    pub id: String,
    pub edition_id: String,
    /// Strictly monotonically increasing per `edition_id` (data model invariant 6).
    pub sequence: u64,
    pub source: RevisionSource,
    pub trigger_id: String,
    pub content: Json,
    #[serde(default)]
    pub summary: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Revision {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        edition_id: impl Into<String>,
        sequence: u64,
        source: RevisionSource,
        trigger_id: impl Into<String>,
        content: Json,
        summary: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            edition_id: edition_id.into(),
            sequence,
            source,
            trigger_id: trigger_id.into(),
            content,
            summary: summary.into(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }
}

crate::impl_document!(
    Revision,
    container = "revisions",
    partition_key = |r| r.edition_id.as_str()
);

#[cfg(test)]
#[path = "revision_tests.rs"]
mod tests;
