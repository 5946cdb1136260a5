use super::*;
use curate_core::{AgentRun, AgentStage, LinkBuilder, LinkStatus};

#[test]
fn renders_row_with_no_run_history() {
    let link = LinkBuilder::new("l1").status(LinkStatus::Submitted).build();
    let html = render_link_row(&link, &[]);
    assert!(html.contains(r#"id="link-l1""#));
    assert!(html.contains("badge-submitted"));
    assert!(html.contains("text-muted"));
}

#[test]
fn renders_progress_from_latest_run() {
    let link = LinkBuilder::new("l1").status(LinkStatus::Fetching).build();
    let run = AgentRun::builder("run-1", "l1");
    let html = render_link_row(&link, std::slice::from_ref(&run));
    assert!(html.contains("stage-orchestrator"));
    assert!(html.contains("(1 run)"));
}

#[test]
fn escapes_url_and_title() {
    let mut link = LinkBuilder::new("l1").url("https://x/?a=1&b=2").build();
    link.title = Some("<script>".to_string());
    let html = render_link_row(&link, &[]);
    assert!(!html.contains("<script>"));
    assert!(html.contains("&amp;b=2"));
}

#[test]
fn truncates_long_urls() {
    let long_url = format!("https://example.com/{}", "a".repeat(60));
    let link = LinkBuilder::new("l1").url(long_url).build();
    let html = render_link_row(&link, &[]);
    assert!(html.contains("..."));
}

#[test]
fn latest_run_is_running_detects_in_flight_run() {
    let run = AgentRun::builder("run-1", "l1");
    assert!(latest_run_is_running(std::slice::from_ref(&run)));
    assert!(!latest_run_is_running(&[]));
}
