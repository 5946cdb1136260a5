// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `Edition` document — the living newsletter assembled from reviewed links.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

crate::define_id! {
    /// Unique identifier for an edition.
    pub struct EditionId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditionStatus {
    Created,
    Drafting,
    InReview,
    Published,
}

impl EditionStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, EditionStatus::Published)
    }
}

impl std::fmt::Display for EditionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EditionStatus::Created => "created",
            EditionStatus::Drafting => "drafting",
            EditionStatus::InReview => "in_review",
            EditionStatus::Published => "published",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edition {
    pub id: String,
    pub status: EditionStatus,
    #[serde(default)]
    pub content: serde_json::Map<String, Json>,
    #[serde(default)]
    pub link_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Edition {
    pub fn new(id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            status: EditionStatus::Created,
            content: serde_json::Map::new(),
            link_ids: Vec::new(),
            published_at: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Attach a link id, enforcing data model invariant 4 (no duplicates).
    pub fn attach_link(&mut self, link_id: impl Into<String>) {
        let link_id = link_id.into();
        if !self.link_ids.contains(&link_id) {
            self.link_ids.push(link_id);
        }
    }
}

crate::impl_document!(
    Edition,
    container = "editions",
    partition_key = |e| e.id.as_str()
);

#[cfg(any(test, feature = "test-support"))]
impl Edition {
    pub fn builder(id: impl Into<String>) -> Self {
        Self::new(id, DateTime::UNIX_EPOCH)
    }
}

#[cfg(test)]
#[path = "edition_tests.rs"]
mod tests;
