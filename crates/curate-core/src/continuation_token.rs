// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `ContinuationToken` document — persisted change-feed resume state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContinuationToken {
    pub id: String,
    pub token: String,
    pub container: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl ContinuationToken {
    /// Document id for a given container's token, e.g. `change-feed-token-links`.
    pub fn id_for(container: &str) -> String {
        format!("change-feed-token-{container}")
    }

    pub fn new(container: impl Into<String>, token: impl Into<String>, now: DateTime<Utc>) -> Self {
        let container = container.into();
        Self {
            id: Self::id_for(&container),
            token: token.into(),
            container,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }
}

crate::impl_document!(
    ContinuationToken,
    container = "metadata",
    partition_key = |t| t.id.as_str()
);

#[cfg(test)]
#[path = "continuation_token_tests.rs"]
mod tests;
