use super::*;

fn sample_data() -> AgentRunEventData {
    AgentRunEventData {
        id: "run1".into(),
        stage: AgentStage::Fetch,
        trigger_id: "link1".into(),
        status: AgentRunStatus::Running,
        output: None,
        usage: None,
        started_at: DateTime::UNIX_EPOCH,
        completed_at: None,
    }
}

#[test]
fn event_type_matches_spec_strings() {
    assert_eq!(
        PipelineEvent::AgentRunStart(sample_data()).event_type(),
        "agent-run-start"
    );
    assert_eq!(
        PipelineEvent::AgentRunComplete(sample_data()).event_type(),
        "agent-run-complete"
    );
    assert_eq!(
        PipelineEvent::LinkUpdate { html: String::new() }.event_type(),
        "link-update"
    );
}

#[test]
fn custom_event_carries_its_own_type() {
    let event = PipelineEvent::Custom {
        event_type: "edition-published".into(),
        data: serde_json::json!({"edition_id": "ed1"}),
    };
    assert_eq!(event.event_type(), "edition-published");
    assert_eq!(event.data_json()["edition_id"], "ed1");
}

#[test]
fn envelope_has_event_and_data_keys() {
    let envelope = PipelineEvent::LinkUpdate { html: "<tr></tr>".into() }.to_envelope();
    assert_eq!(envelope["event"], "link-update");
    assert_eq!(envelope["data"], "<tr></tr>");
}

#[test]
fn envelope_data_is_always_a_string_even_for_object_payloads() {
    let envelope = PipelineEvent::AgentRunStart(sample_data()).to_envelope();
    let data = envelope["data"].as_str().expect("data is a string");
    let parsed: serde_json::Value = serde_json::from_str(data).expect("valid json");
    assert_eq!(parsed["id"], "run1");
}
