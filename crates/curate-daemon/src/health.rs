// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Minimal readiness probe state. Wiring this to an actual `GET /healthz`
//! HTTP endpoint is a front-end concern; this struct is the state that
//! endpoint would read.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct HealthState {
    ready: Arc<AtomicBool>,
}

impl HealthState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flipped once after orphan recovery completes and the first poll
    /// iteration of the change-feed processor succeeds.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }
}

#[cfg(test)]
#[path = "health_tests.rs"]
mod tests;
