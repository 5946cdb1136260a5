// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `Link` document — a submitted URL tracked through the pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

crate::define_id! {
    /// Unique identifier for a link.
    pub struct LinkId;
}

/// Partition key used for links that have not yet been attached to an edition.
pub const UNATTACHED_PARTITION: &str = "unattached";

/// Lifecycle status of a link as it advances through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkStatus {
    Submitted,
    Fetching,
    Reviewed,
    Drafted,
    Failed,
}

impl LinkStatus {
    /// Terminal statuses never advance further from change events
    /// (data model invariant 1).
    pub fn is_terminal(self) -> bool {
        matches!(self, LinkStatus::Drafted | LinkStatus::Failed)
    }
}

impl std::fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LinkStatus::Submitted => "submitted",
            LinkStatus::Fetching => "fetching",
            LinkStatus::Reviewed => "reviewed",
            LinkStatus::Drafted => "drafted",
            LinkStatus::Failed => "failed",
        };
        write!(f, "{s}")
    }
}

/// Review notes captured by the review stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinkReview {
    pub summary: String,
    #[serde(default)]
    pub relevance_score: Option<f32>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub id: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub status: LinkStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<LinkReview>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edition_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Link {
    pub fn new(id: impl Into<String>, url: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            title: None,
            status: LinkStatus::Submitted,
            content: None,
            review: None,
            edition_id: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Partition key: `edition_id` when attached, else the unattached sentinel.
    pub fn partition_key_value(&self) -> &str {
        self.edition_id.as_deref().unwrap_or(UNATTACHED_PARTITION)
    }
}

crate::impl_document!(
    Link,
    container = "links",
    partition_key = |l| l.partition_key_value()
);

#[cfg(any(test, feature = "test-support"))]
pub struct LinkBuilder {
    link: Link,
}

#[cfg(any(test, feature = "test-support"))]
impl LinkBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            link: Link::new(id, "https://example.com/article", DateTime::UNIX_EPOCH),
        }
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.link.url = url.into();
        self
    }

    pub fn status(mut self, status: LinkStatus) -> Self {
        self.link.status = status;
        self
    }

    pub fn edition_id(mut self, edition_id: impl Into<String>) -> Self {
        self.link.edition_id = Some(edition_id.into());
        self
    }

    pub fn build(self) -> Link {
        self.link
    }
}

#[cfg(any(test, feature = "test-support"))]
impl Link {
    pub fn builder(id: impl Into<String>) -> LinkBuilder {
        LinkBuilder::new(id)
    }
}

#[cfg(test)]
#[path = "link_tests.rs"]
mod tests;
