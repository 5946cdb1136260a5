// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Prompt construction for the orchestrator agent: the instruction text and
//! tool schemas handed to [`crate::agent::ToolCallingAgent`] for each kind
//! of triggering change. One orchestrator invocation advances a link or
//! edition through whichever of fetch/review/draft/edit/publish applies;
//! the agent itself decides which sub-stage tools to call and in what
//! order, grounded on the per-agent `instructions`/tool lists of
//! `original_source/src/agent_stack/agents/{fetch,review,draft,edit,publish}.py`.

use crate::chat::ToolSchema;
use curate_core::{Feedback, Link};
use serde_json::json;

pub const ORCHESTRATOR_SYSTEM_PROMPT: &str = "\
You are the orchestrator for a newsletter curation pipeline. Advance the \
triggering document through its pipeline one stage at a time, calling \
record_stage_start before each sub-stage and record_stage_complete \
immediately after, recording token usage on every completion. Use \
get_link_status and get_edition_status to check current state before \
acting. Never skip record_stage_complete, even on failure.";

/// Corrective follow-up issued when the draft stage completes without
/// having called `draft`. Sent exactly once; a second empty attempt fails
/// the run (the resolved open question on auto-retry behavior).
pub const DRAFT_CORRECTIVE_FOLLOWUP: &str =
    "You did not call draft; do so now before finishing, or call record_stage_complete with status=failed.";

/// Schemas for every tool in the orchestrator's dispatch table, built once
/// and handed to the chat client alongside the transcript on every turn.
pub fn tool_schemas() -> Vec<ToolSchema> {
    vec![
        ToolSchema {
            name: "get_link_status",
            description: "Read a link's current status, title, and whether it has content or a review.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "link_id": {"type": "string"},
                    "edition_id": {"type": "string"},
                },
                "required": ["link_id", "edition_id"],
            }),
        },
        ToolSchema {
            name: "get_edition_status",
            description: "Read an edition's current status, link count, and whether it has content.",
            parameters: json!({
                "type": "object",
                "properties": {"edition_id": {"type": "string"}},
                "required": ["edition_id"],
            }),
        },
        ToolSchema {
            name: "record_stage_start",
            description: "Record the start of a sub-stage run before doing its work. Returns a run_id.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "stage": {"type": "string", "enum": ["fetch", "review", "draft", "edit", "publish"]},
                    "trigger_id": {"type": "string"},
                },
                "required": ["stage", "trigger_id"],
            }),
        },
        ToolSchema {
            name: "record_stage_complete",
            description: "Record the completion (or failure) of a sub-stage run started with record_stage_start.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "run_id": {"type": "string"},
                    "trigger_id": {"type": "string"},
                    "status": {"type": "string", "enum": ["completed", "failed"]},
                    "error": {"type": "string"},
                    "input_tokens": {"type": "integer"},
                    "output_tokens": {"type": "integer"},
                    "total_tokens": {"type": "integer"},
                },
                "required": ["run_id", "trigger_id", "status"],
            }),
        },
        ToolSchema {
            name: "draft",
            description: "Write drafted newsletter content for a reviewed link, attaching it to the edition.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "edition_id": {"type": "string"},
                    "link_id": {"type": "string"},
                    "content": {"type": "object"},
                },
                "required": ["edition_id", "link_id", "content"],
            }),
        },
        ToolSchema {
            name: "edit",
            description: "Overwrite the edition's content with a refined version, addressing any feedback.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "edition_id": {"type": "string"},
                    "content": {"type": "object"},
                    "trigger_id": {"type": "string"},
                },
                "required": ["edition_id", "content"],
            }),
        },
        ToolSchema {
            name: "resolve_feedback",
            description: "Mark a feedback item as resolved once it has been addressed.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "feedback_id": {"type": "string"},
                    "edition_id": {"type": "string"},
                },
                "required": ["feedback_id", "edition_id"],
            }),
        },
    ]
}

/// Prompt for a link-driven run: advance the link from whatever stage its
/// status implies. Mirrors the per-agent `run()` message construction in
/// `fetch.py`/`review.py`/`draft.py` (`"...\nLink ID: ...\nEdition ID:
/// ..."`), generalized to a single multi-stage instruction.
pub fn link_change_prompt(link: &Link) -> String {
    format!(
        "Advance this link through the pipeline.\nLink ID: {}\nURL: {}\nCurrent status: {}\nEdition ID: {}",
        link.id,
        link.url,
        link.status,
        link.edition_id.as_deref().unwrap_or("(unattached)"),
    )
}

/// Prompt for a feedback-driven run, mirroring `edit.py`'s `run()` message.
/// When `include_comment` is false (learn_from_feedback=false), the comment
/// text itself is withheld from the prompt; only the section is named.
pub fn feedback_change_prompt(feedback: &Feedback, include_comment: bool) -> String {
    if include_comment {
        format!(
            "Edit and refine the current edition. Address this feedback.\n\
             Edition ID: {}\nSection: {}\nComment: {}",
            feedback.edition_id, feedback.section, feedback.comment,
        )
    } else {
        format!(
            "Edit and refine the current edition. Address unresolved feedback \
             on this section, but do not retain its text for future learning.\n\
             Edition ID: {}\nSection: {}",
            feedback.edition_id, feedback.section,
        )
    }
}

/// Prompt for a publish-driven run, mirroring `publish.py`'s `run()` message.
pub fn publish_prompt(edition_id: &str) -> String {
    format!("Render and publish the edition.\nEdition ID: {edition_id}")
}

#[cfg(test)]
#[path = "stage_tests.rs"]
mod tests;
