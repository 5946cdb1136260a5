use super::*;

#[tokio::test]
async fn current_is_none_outside_a_scope() {
    assert!(current().is_none());
}

#[tokio::test]
async fn current_reflects_the_scoped_context() {
    let ctx = FeedbackContext {
        skip_memory_capture: true,
        section: "intro".into(),
        comment: "tighten this".into(),
    };
    let seen = with_feedback_context(ctx, async { current() }).await;
    assert!(seen.unwrap().skip_memory_capture);
}

#[tokio::test]
async fn context_is_cleared_after_the_scope_ends() {
    let ctx = FeedbackContext {
        skip_memory_capture: false,
        section: "body".into(),
        comment: "clarify".into(),
    };
    with_feedback_context(ctx, async {}).await;
    assert!(current().is_none());
}

#[tokio::test]
async fn context_is_cleared_even_when_the_scoped_future_is_cancelled() {
    let ctx = FeedbackContext {
        skip_memory_capture: false,
        section: "body".into(),
        comment: "clarify".into(),
    };
    let handle = tokio::spawn(with_feedback_context(ctx, async {
        tokio::time::sleep(std::time::Duration::from_secs(60)).await;
    }));
    tokio::task::yield_now().await;
    handle.abort();
    let _ = handle.await;
    assert!(current().is_none());
}
