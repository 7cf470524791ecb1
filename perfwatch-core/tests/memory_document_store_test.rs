use perfwatch_core::traits::{FindQuery, IDocumentStore, SortOrder};
use perfwatch_core::{MemoryDocumentStore, StoreError};
use serde_json::json;

#[tokio::test]
async fn create_then_get_returns_document() {
    let store = MemoryDocumentStore::new();
    store
        .create("alerts", "a1", json!({"timestamp": 1}), false)
        .await
        .unwrap();
    let doc = store.get("alerts", "a1").await.unwrap();
    assert_eq!(doc["timestamp"], 1);
}

#[tokio::test]
async fn create_without_overwrite_conflicts() {
    let store = MemoryDocumentStore::new();
    store.create("alerts", "a1", json!({}), false).await.unwrap();
    let err = store.create("alerts", "a1", json!({}), false).await.unwrap_err();
    assert!(matches!(err, StoreError::Conflict { .. }));
    store
        .create("alerts", "a1", json!({"v": 2}), true)
        .await
        .unwrap();
    assert_eq!(store.get("alerts", "a1").await.unwrap()["v"], 2);
}

#[tokio::test]
async fn get_missing_is_not_found() {
    let store = MemoryDocumentStore::new();
    let err = store.get("alerts", "nope").await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}

#[tokio::test]
async fn update_merges_shallowly() {
    let store = MemoryDocumentStore::new();
    store
        .create("alerts", "a1", json!({"resolved": false, "value": 9}), false)
        .await
        .unwrap();
    store
        .update("alerts", "a1", json!({"resolved": true, "resolved_at": 5}))
        .await
        .unwrap();
    let doc = store.get("alerts", "a1").await.unwrap();
    assert_eq!(doc["resolved"], true);
    assert_eq!(doc["resolved_at"], 5);
    assert_eq!(doc["value"], 9);
}

#[tokio::test]
async fn update_missing_is_not_found() {
    let store = MemoryDocumentStore::new();
    let err = store.update("alerts", "a1", json!({})).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}

#[tokio::test]
async fn non_object_documents_are_rejected() {
    let store = MemoryDocumentStore::new();
    let err = store.create("alerts", "a1", json!([1, 2]), false).await.unwrap_err();
    assert!(matches!(err, StoreError::InvalidDocument { .. }));
}

#[tokio::test]
async fn find_sorts_and_pages() {
    let store = MemoryDocumentStore::new();
    for ts in [3, 1, 5, 2, 4] {
        store
            .create("alerts", &format!("a{ts}"), json!({"timestamp": ts}), false)
            .await
            .unwrap();
    }

    let page = store
        .find(FindQuery::new("alerts", 3).sorted_by("timestamp", SortOrder::Desc))
        .await
        .unwrap();
    assert_eq!(page.total, 5);
    let stamps: Vec<i64> = page.items.iter().map(|d| d["timestamp"].as_i64().unwrap()).collect();
    assert_eq!(stamps, vec![5, 4, 3]);

    let asc = store
        .find(FindQuery::new("alerts", 10).sorted_by("timestamp", SortOrder::Asc))
        .await
        .unwrap();
    assert_eq!(asc.items[0]["timestamp"], 1);
}

#[tokio::test]
async fn find_on_unknown_collection_is_empty() {
    let store = MemoryDocumentStore::new();
    let page = store.find(FindQuery::new("nothing", 10)).await.unwrap();
    assert_eq!(page.total, 0);
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn delete_removes_document() {
    let store = MemoryDocumentStore::new();
    store.create("alerts", "a1", json!({}), false).await.unwrap();
    store.delete("alerts", "a1").await.unwrap();
    assert!(store.is_empty("alerts"));
    assert!(store.delete("alerts", "a1").await.is_err());
}
