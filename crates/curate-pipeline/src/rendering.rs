// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTML fragment rendering for the `link-update` out-of-band UI swap.

use curate_core::{AgentRun, AgentRunStatus, Link};

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Renders an `<tr hx-swap-oob="true">` fragment for one link, reflecting
/// its current status and the most recent run in its history.
pub fn render_link_row(link: &Link, runs: &[AgentRun]) -> String {
    let url = escape(&link.url);
    let display_url = if link.url.len() > 50 {
        format!("{}...", escape(&link.url[..47.min(link.url.len())]))
    } else {
        url.clone()
    };
    let title = link.title.as_deref().map(escape).unwrap_or_else(|| "\u{2014}".to_string());
    let status = escape(&link.status.to_string());
    let created = link.created_at.format("%Y-%m-%d %H:%M").to_string();

    let progress = match runs.last() {
        Some(latest) => {
            let run_status = escape(&latest.status.to_string());
            let run_stage = escape(latest.stage.as_str());
            let count = runs.len();
            let suffix = if count != 1 { "s" } else { "" };
            format!(
                r#"<span class="agent-indicator"><span class="agent-indicator-dot agent-indicator-dot-{run_status}"></span><span class="stage-{run_stage}">{run_stage}</span></span> ({count} run{suffix})"#
            )
        }
        None => r#"<span class="agent-indicator" style="color: var(--text-muted);">&mdash;</span>"#.to_string(),
    };

    format!(
        r#"<tr id="link-{id}" hx-swap-oob="true"><td><a href="{url}" target="_blank" style="color: var(--accent);">{display_url}</a></td><td>{title}</td><td><span class="badge badge-{status}">{status}</span></td><td>{progress}</td><td style="color: var(--text-muted);">{created}</td></tr>"#,
        id = escape(&link.id),
    )
}

/// `true` if the most recent run for this link's trigger id hasn't reached
/// a terminal status — used by the orchestrator to decide whether the
/// progress indicator shown to the reviewer is still live.
pub fn latest_run_is_running(runs: &[AgentRun]) -> bool {
    runs.last().is_some_and(|r| r.status == AgentRunStatus::Running)
}

#[cfg(test)]
#[path = "rendering_tests.rs"]
mod tests;
