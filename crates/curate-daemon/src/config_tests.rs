use super::*;
use serial_test::serial;

fn clear_all() {
    for var in [
        "CURATE_COSMOS_ENDPOINT",
        "CURATE_COSMOS_KEY",
        "CURATE_COSMOS_DATABASE",
        "CURATE_BUS_CONNECTION_STRING",
        "CURATE_SLOW_REPOSITORY_MS",
        "CURATE_MAX_CONCURRENT_HANDLERS",
        "CURATE_EVENT_QUEUE_MAXSIZE",
        "CURATE_CHANGE_FEED_PAGE_SIZE",
        "CURATE_AZURE_OPENAI_ENDPOINT",
        "CURATE_AZURE_OPENAI_KEY",
        "CURATE_AZURE_OPENAI_DEPLOYMENT",
    ] {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn missing_cosmos_endpoint_is_rejected() {
    clear_all();
    std::env::set_var("CURATE_COSMOS_KEY", "key");
    let result = Settings::load();
    assert!(matches!(result, Err(ConfigError::Missing("CURATE_COSMOS_ENDPOINT"))));
}

#[test]
#[serial]
fn unset_optional_settings_fall_back_to_documented_defaults() {
    clear_all();
    std::env::set_var("CURATE_COSMOS_ENDPOINT", "https://example.documents.azure.com");
    std::env::set_var("CURATE_COSMOS_KEY", "key");
    let settings = Settings::load().unwrap();
    assert_eq!(settings.cosmos_database, "curate");
    assert_eq!(settings.slow_repository_ms, DEFAULT_SLOW_REPOSITORY_MS);
    assert_eq!(settings.max_concurrent_handlers, DEFAULT_MAX_CONCURRENT_HANDLERS);
    assert_eq!(settings.event_queue_maxsize, DEFAULT_EVENT_QUEUE_MAXSIZE);
    assert_eq!(settings.change_feed_page_size, DEFAULT_CHANGE_FEED_PAGE_SIZE);
    assert!(settings.bus_connection_string.is_none());
}

#[test]
#[serial]
fn a_malformed_integer_override_is_rejected_with_its_name() {
    clear_all();
    std::env::set_var("CURATE_COSMOS_ENDPOINT", "https://example.documents.azure.com");
    std::env::set_var("CURATE_COSMOS_KEY", "key");
    std::env::set_var("CURATE_MAX_CONCURRENT_HANDLERS", "not-a-number");
    let result = Settings::load();
    assert!(matches!(result, Err(ConfigError::Invalid { name: "CURATE_MAX_CONCURRENT_HANDLERS", .. })));
}

#[test]
#[serial]
fn slow_repository_threshold_converts_ms_to_a_duration() {
    clear_all();
    std::env::set_var("CURATE_COSMOS_ENDPOINT", "https://example.documents.azure.com");
    std::env::set_var("CURATE_COSMOS_KEY", "key");
    std::env::set_var("CURATE_SLOW_REPOSITORY_MS", "750");
    let settings = Settings::load().unwrap();
    assert_eq!(settings.slow_repository_threshold(), Duration::from_millis(750));
}
