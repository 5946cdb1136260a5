use super::*;
use serde_json::json;

#[tokio::test]
async fn create_then_get_round_trips() {
    let store = InMemoryStore::new();
    let body = json!({"id": "l1", "trigger_id": "t1"});
    store
        .create("links", "unattached", body.clone())
        .await
        .expect("create");

    let fetched = store.get("links", "l1", "unattached").await.expect("get");
    assert_eq!(fetched, Some(body));
}

#[tokio::test]
async fn get_returns_none_for_missing_document() {
    let store = InMemoryStore::new();
    let fetched = store.get("links", "missing", "pk").await.expect("get");
    assert!(fetched.is_none());
}

#[tokio::test]
async fn soft_deleted_document_is_invisible_to_get() {
    let store = InMemoryStore::new();
    store
        .create("links", "pk", json!({"id": "l1", "deleted_at": null}))
        .await
        .expect("create");
    store
        .replace(
            "links",
            "l1",
            "pk",
            json!({"id": "l1", "deleted_at": "2026-01-01T00:00:00Z"}),
        )
        .await
        .expect("replace");

    let fetched = store.get("links", "l1", "pk").await.expect("get");
    assert!(fetched.is_none());
}

#[tokio::test]
async fn query_filters_by_equality_and_excludes_deleted() {
    let store = InMemoryStore::new();
    store
        .create("links", "pk", json!({"id": "l1", "trigger_id": "t1"}))
        .await
        .expect("create");
    store
        .create(
            "links",
            "pk",
            json!({"id": "l2", "trigger_id": "t1", "deleted_at": "2026-01-01T00:00:00Z"}),
        )
        .await
        .expect("create");
    store
        .create("links", "pk", json!({"id": "l3", "trigger_id": "t2"}))
        .await
        .expect("create");

    let results = store
        .query(
            "links",
            "SELECT * FROM c WHERE c.trigger_id = @trigger_id AND NOT IS_DEFINED(c.deleted_at)",
            &[("@trigger_id", json!("t1"))],
        )
        .await
        .expect("query");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["id"], json!("l1"));
}

#[tokio::test]
async fn change_feed_pages_forward_with_continuation() {
    let store = InMemoryStore::new();
    for i in 0..5 {
        store
            .create("agent_runs", "pk", json!({"id": format!("r{i}")}))
            .await
            .expect("create");
    }

    let page1 = store
        .change_feed("agent_runs", None, 2)
        .await
        .expect("page1");
    assert_eq!(page1.items.len(), 2);
    assert_eq!(page1.items[0]["id"], json!("r0"));

    let page2 = store
        .change_feed("agent_runs", page1.next_token.as_deref(), 2)
        .await
        .expect("page2");
    assert_eq!(page2.items.len(), 2);
    assert_eq!(page2.items[0]["id"], json!("r2"));
}

#[tokio::test]
async fn change_feed_on_unknown_container_is_empty() {
    let store = InMemoryStore::new();
    let page = store.change_feed("nope", None, 10).await.expect("page");
    assert!(page.items.is_empty());
}
