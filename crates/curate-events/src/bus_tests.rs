use super::*;
use curate_core::PipelineEvent;

#[tokio::test]
async fn disabled_bus_is_not_enabled_and_send_is_a_noop() {
    let bus = ExternalBus::disabled();
    assert!(!bus.is_enabled());
    bus.send(&PipelineEvent::LinkUpdate { html: "<tr></tr>".into() })
        .await;
}

#[tokio::test]
async fn connect_with_no_connection_string_yields_disabled_bus() {
    let bus = ExternalBus::connect(None).await;
    assert!(!bus.is_enabled());
}

#[tokio::test]
async fn connect_with_empty_connection_string_yields_disabled_bus() {
    let bus = ExternalBus::connect(Some("")).await;
    assert!(!bus.is_enabled());
}
