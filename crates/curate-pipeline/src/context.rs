// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-run feedback context: the edit stage needs to know whether the
//! triggering feedback opted out of memory capture and what section/comment
//! prompted the edit, without threading that state through every call in
//! between. Scoped to the feedback handler's future via `tokio::task_local!`
//! rather than a global, so concurrent feedback runs on different editions
//! never see each other's context.

use tokio::task_local;

#[derive(Debug, Clone)]
pub struct FeedbackContext {
    pub skip_memory_capture: bool,
    pub section: String,
    pub comment: String,
}

task_local! {
    static FEEDBACK_CONTEXT: FeedbackContext;
}

/// Runs `fut` with `context` available to [`current`] for its whole
/// lifetime, including cancellation — `task_local!` scopes clear
/// themselves when the scoped future is dropped, covering every exit path.
pub async fn with_feedback_context<F, T>(context: FeedbackContext, fut: F) -> T
where
    F: std::future::Future<Output = T>,
{
    FEEDBACK_CONTEXT.scope(context, fut).await
}

/// Reads the context set by the innermost enclosing [`with_feedback_context`].
/// Returns `None` outside a feedback handler (e.g. the link-change path,
/// which never sets one).
pub fn current() -> Option<FeedbackContext> {
    FEEDBACK_CONTEXT.try_with(|c| c.clone()).ok()
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
