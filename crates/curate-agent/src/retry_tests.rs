use super::*;
use std::sync::atomic::{AtomicU32, Ordering};

#[tokio::test]
async fn succeeds_immediately_without_retrying() {
    let cancel = CancellationToken::new();
    let calls = AtomicU32::new(0);
    let result = retry_with_backoff(
        &cancel,
        2,
        Duration::from_millis(1),
        Duration::from_millis(10),
        || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok::<_, &str>("ok") }
        },
    )
    .await;

    assert!(matches!(result, RetryOutcome::Succeeded("ok")));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn retries_up_to_max_then_exhausts() {
    let cancel = CancellationToken::new();
    let calls = AtomicU32::new(0);
    let result = retry_with_backoff(
        &cancel,
        2,
        Duration::from_millis(10),
        Duration::from_millis(100),
        || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<&str, _>("boom") }
        },
    )
    .await;

    assert!(matches!(result, RetryOutcome::ExhaustedRetries("boom")));
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn cancellation_before_first_attempt_short_circuits() {
    let cancel = CancellationToken::new();
    cancel.cancel();
    let calls = AtomicU32::new(0);
    let result = retry_with_backoff(
        &cancel,
        2,
        Duration::from_millis(1),
        Duration::from_millis(10),
        || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok::<_, &str>("ok") }
        },
    )
    .await;

    assert!(matches!(result, RetryOutcome::Cancelled));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn cancellation_between_attempts_stops_retrying() {
    let cancel = CancellationToken::new();

    let cancel_clone = cancel.clone();
    let handle = tokio::spawn(async move {
        retry_with_backoff(
            &cancel_clone,
            5,
            Duration::from_millis(50),
            Duration::from_millis(500),
            || async { Err::<&str, _>("boom") },
        )
        .await
    });

    tokio::time::advance(Duration::from_millis(10)).await;
    cancel.cancel();
    let result = handle.await.expect("join");
    assert!(matches!(result, RetryOutcome::Cancelled));
}
