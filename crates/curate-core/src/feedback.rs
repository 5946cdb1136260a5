// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `Feedback` document — a reviewer comment on a section of an edition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

crate::define_id! {
    /// Unique identifier for a feedback item.
    pub struct FeedbackId;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    pub id: String,
    pub edition_id: String,
    pub section: String,
    pub comment: String,
    #[serde(default)]
    pub resolved: bool,
    #[serde(default)]
    pub learn_from_feedback: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Feedback {
    pub fn new(
        id: impl Into<String>,
        edition_id: impl Into<String>,
        section: impl Into<String>,
        comment: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            edition_id: edition_id.into(),
            section: section.into(),
            comment: comment.into(),
            resolved: false,
            learn_from_feedback: true,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }
}

crate::impl_document!(
    Feedback,
    container = "feedback",
    partition_key = |f| f.edition_id.as_str()
);

#[cfg(any(test, feature = "test-support"))]
impl Feedback {
    pub fn builder(id: impl Into<String>, edition_id: impl Into<String>) -> Self {
        Self::new(id, edition_id, "intro", "tighten the opening", DateTime::UNIX_EPOCH)
    }
}

#[cfg(test)]
#[path = "feedback_tests.rs"]
mod tests;
