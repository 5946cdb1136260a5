use super::*;
use crate::in_memory::InMemoryStore;
use serde_json::json;

#[tokio::test]
async fn delegates_create_and_get_to_inner_store() {
    let traced = TracedStore::new(InMemoryStore::new(), 250);

    traced
        .create("links", "pk", json!({"id": "l1"}))
        .await
        .expect("create");
    let fetched = traced.get("links", "l1", "pk").await.expect("get");
    assert_eq!(fetched, Some(json!({"id": "l1"})));
}

#[tokio::test]
async fn slow_threshold_of_zero_still_returns_results() {
    let traced = TracedStore::new(InMemoryStore::new(), 0);
    traced
        .create("links", "pk", json!({"id": "l1"}))
        .await
        .expect("create");
    let fetched = traced.get("links", "l1", "pk").await.expect("get");
    assert!(fetched.is_some());
}
