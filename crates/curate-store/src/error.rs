// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Store-level error taxonomy.
//!
//! Not-found is not an error: `get` returns `Ok(None)`. Everything else
//! that reaches the caller is a transport error; retry policy is the
//! caller's decision.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("transport error during {operation}: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: azure_core::Error,
    },

    #[error("failed to (de)serialize document: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("malformed query template: {0}")]
    MalformedQuery(String),
}

impl StoreError {
    pub fn transport(operation: &'static str, source: azure_core::Error) -> Self {
        Self::Transport { operation, source }
    }
}
