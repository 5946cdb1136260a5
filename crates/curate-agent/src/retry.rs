// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Retry-with-backoff helper ("implement as a small helper
//! `retry(ctx, max_attempts, base_delay, op)`"), honoring cancellation
//! between attempts rather than after the whole call.

use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Outcome of [`retry_with_backoff`]: either the wrapped operation
/// eventually succeeded, it failed on every attempt, or cancellation was
/// observed before or between attempts.
#[derive(Debug)]
pub enum RetryOutcome<T, E> {
    Succeeded(T),
    ExhaustedRetries(E),
    Cancelled,
}

/// Run `op` up to `max_retries + 1` times, doubling `base_delay` after each
/// failure up to `ceiling`. Returns as soon as `op` succeeds, as soon as
/// `cancel` fires, or once retries are exhausted.
pub async fn retry_with_backoff<T, E, F, Fut>(
    cancel: &CancellationToken,
    max_retries: u32,
    base_delay: Duration,
    ceiling: Duration,
    mut op: F,
) -> RetryOutcome<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt = 0u32;
    loop {
        if cancel.is_cancelled() {
            return RetryOutcome::Cancelled;
        }

        match op().await {
            Ok(value) => return RetryOutcome::Succeeded(value),
            Err(error) => {
                if attempt >= max_retries {
                    return RetryOutcome::ExhaustedRetries(error);
                }
                let delay = base_delay.saturating_mul(1 << attempt).min(ceiling);
                tokio::select! {
                    _ = tokio::time::sleep(delay) => {}
                    () = cancel.cancelled() => return RetryOutcome::Cancelled,
                }
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;
