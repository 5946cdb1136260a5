// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::config::ConfigError;
use curate_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to connect to cosmos: {0}")]
    CosmosConnect(#[from] azure_core::Error),

    #[error("store error during startup: {0}")]
    Store(#[from] StoreError),

    #[error("failed to install signal handler: {0}")]
    Signal(#[from] std::io::Error),
}
