use super::*;
use chrono::DateTime;
use curate_core::{Feedback, LinkBuilder, LinkStatus};

#[test]
fn tool_schemas_covers_every_dispatch_table_entry() {
    let names: Vec<_> = tool_schemas().iter().map(|s| s.name).collect();
    for expected in [
        "get_link_status",
        "get_edition_status",
        "record_stage_start",
        "record_stage_complete",
        "draft",
        "edit",
        "resolve_feedback",
    ] {
        assert!(names.contains(&expected), "missing schema for {expected}");
    }
}

#[test]
fn link_change_prompt_includes_identifying_fields() {
    let link = LinkBuilder::new("l1")
        .edition_id("e1")
        .status(LinkStatus::Submitted)
        .url("https://example.com/a")
        .build();
    let prompt = link_change_prompt(&link);
    assert!(prompt.contains("l1"));
    assert!(prompt.contains("https://example.com/a"));
    assert!(prompt.contains("e1"));
}

#[test]
fn link_change_prompt_handles_unattached_link() {
    let link = LinkBuilder::new("l1").build();
    let prompt = link_change_prompt(&link);
    assert!(prompt.contains("(unattached)"));
}

#[test]
fn feedback_change_prompt_withholds_comment_when_learning_is_off() {
    let feedback = Feedback::new("fb1", "e1", "intro", "please tighten this up", DateTime::UNIX_EPOCH);
    let prompt = feedback_change_prompt(&feedback, false);
    assert!(!prompt.contains("please tighten this up"));
    assert!(prompt.contains("intro"));
}

#[test]
fn feedback_change_prompt_includes_comment_when_learning_is_on() {
    let feedback = Feedback::new("fb1", "e1", "intro", "please tighten this up", DateTime::UNIX_EPOCH);
    let prompt = feedback_change_prompt(&feedback, true);
    assert!(prompt.contains("please tighten this up"));
}

#[test]
fn publish_prompt_includes_edition_id() {
    assert!(publish_prompt("e1").contains("e1"));
}
