// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `StageExecutor`: wraps one [`ExternalAgent`] invocation with retry,
//! cancellation, and result capture. Has no knowledge of stage
//! semantics — per-stage side effects are the orchestrator's job.

use crate::agent::{AgentOutcome, ExternalAgent};
use crate::retry::{retry_with_backoff, RetryOutcome};
use curate_core::TokenUsage;
use serde_json::Value as Json;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Default retry policy: 2 retries (3 total attempts), 500ms base delay
/// doubling up to a 30s ceiling.
pub const DEFAULT_MAX_RETRIES: u32 = 2;
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(500);
pub const DEFAULT_CEILING: Duration = Duration::from_secs(30);

/// Result of running a stage to completion: either it produced text (and
/// optionally usage), or it failed terminally and carries an error message.
#[derive(Debug, Clone)]
pub enum StageOutcome {
    Success {
        text: String,
        usage: Option<TokenUsage>,
    },
    Failed {
        error: String,
    },
}

pub struct StageExecutor<A> {
    agent: A,
    max_retries: u32,
    base_delay: Duration,
    ceiling: Duration,
}

impl<A: ExternalAgent> StageExecutor<A> {
    pub fn new(agent: A) -> Self {
        Self {
            agent,
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: DEFAULT_BASE_DELAY,
            ceiling: DEFAULT_CEILING,
        }
    }

    pub fn with_policy(agent: A, max_retries: u32, base_delay: Duration, ceiling: Duration) -> Self {
        Self {
            agent,
            max_retries,
            base_delay,
            ceiling,
        }
    }

    /// Run one stage invocation. Returns `None` if cancelled before or
    /// between attempts — the caller must propagate cancellation rather
    /// than treat it as a stage failure.
    pub async fn execute(&self, input: Json, cancel: &CancellationToken) -> Option<StageOutcome> {
        let outcome = retry_with_backoff(
            cancel,
            self.max_retries,
            self.base_delay,
            self.ceiling,
            || self.agent.invoke(input.clone()),
        )
        .await;

        match outcome {
            RetryOutcome::Succeeded(AgentOutcome { text, usage }) => {
                Some(StageOutcome::Success { text, usage })
            }
            RetryOutcome::ExhaustedRetries(error) => {
                tracing::warn!(error = %error, "stage failed after exhausting retries");
                Some(StageOutcome::Failed {
                    error: error.to_string(),
                })
            }
            RetryOutcome::Cancelled => None,
        }
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
