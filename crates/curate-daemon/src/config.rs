// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Daemon configuration, populated from environment variables at startup.
/// No config-file layer — every setting is a direct env var, matching the
/// daemon's own `OJ_*` convention.
#[derive(Debug, Clone)]
pub struct Settings {
    pub cosmos_endpoint: String,
    pub cosmos_key: String,
    pub cosmos_database: String,
    pub bus_connection_string: Option<String>,
    pub slow_repository_ms: u64,
    pub max_concurrent_handlers: usize,
    pub event_queue_maxsize: usize,
    pub change_feed_page_size: u32,
    pub azure_openai_endpoint: Option<String>,
    pub azure_openai_key: Option<String>,
    pub azure_openai_deployment: Option<String>,
}

const DEFAULT_SLOW_REPOSITORY_MS: u64 = 500;
const DEFAULT_MAX_CONCURRENT_HANDLERS: usize = 25;
const DEFAULT_EVENT_QUEUE_MAXSIZE: usize = 200;
const DEFAULT_CHANGE_FEED_PAGE_SIZE: u32 = 100;

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self {
            cosmos_endpoint: required("CURATE_COSMOS_ENDPOINT")?,
            cosmos_key: required("CURATE_COSMOS_KEY")?,
            cosmos_database: env_or("CURATE_COSMOS_DATABASE", "curate"),
            bus_connection_string: std::env::var("CURATE_BUS_CONNECTION_STRING").ok(),
            slow_repository_ms: parsed_or("CURATE_SLOW_REPOSITORY_MS", DEFAULT_SLOW_REPOSITORY_MS)?,
            max_concurrent_handlers: parsed_or("CURATE_MAX_CONCURRENT_HANDLERS", DEFAULT_MAX_CONCURRENT_HANDLERS)?,
            event_queue_maxsize: parsed_or("CURATE_EVENT_QUEUE_MAXSIZE", DEFAULT_EVENT_QUEUE_MAXSIZE)?,
            change_feed_page_size: parsed_or("CURATE_CHANGE_FEED_PAGE_SIZE", DEFAULT_CHANGE_FEED_PAGE_SIZE)?,
            azure_openai_endpoint: std::env::var("CURATE_AZURE_OPENAI_ENDPOINT").ok(),
            azure_openai_key: std::env::var("CURATE_AZURE_OPENAI_KEY").ok(),
            azure_openai_deployment: std::env::var("CURATE_AZURE_OPENAI_DEPLOYMENT").ok(),
        })
    }

    pub fn slow_repository_threshold(&self) -> Duration {
        Duration::from_millis(self.slow_repository_ms)
    }
}

fn env_or(name: &'static str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::Missing(name))
}

fn parsed_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value.parse().map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
