use super::*;
use yare::parameterized;

#[test]
fn usage_computes_total_when_absent() {
    let usage = TokenUsage::normalize(10, 5, None);
    assert_eq!(usage.total_tokens, 15);
}

#[test]
fn usage_prefers_reported_total() {
    let usage = TokenUsage::normalize(10, 5, Some(20));
    assert_eq!(usage.total_tokens, 20);
}

#[parameterized(
    running = { AgentRunStatus::Running, false },
    completed = { AgentRunStatus::Completed, true },
    failed = { AgentRunStatus::Failed, true },
)]
fn terminal_status(status: AgentRunStatus, expected: bool) {
    assert_eq!(status.is_terminal(), expected);
}

#[test]
fn stage_round_trips_through_str() {
    for stage in [
        AgentStage::Orchestrator,
        AgentStage::Fetch,
        AgentStage::Review,
        AgentStage::Draft,
        AgentStage::Edit,
        AgentStage::Publish,
    ] {
        assert_eq!(AgentStage::parse(stage.as_str()), Some(stage));
    }
    assert_eq!(AgentStage::parse("bogus"), None);
}
