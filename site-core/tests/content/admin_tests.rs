//! Tests for admin content edits
//!
//! Scenarios from site-content.feature:
//! - Saving content refreshes the cache
//! - Save errors reach the admin editor

use std::sync::Arc;

use serde_json::json;
use site_core::content::{ContentResolver, ContentStore};
use site_core::remote::{MemoryStore, RemoteError};

#[tokio::test]
async fn test_save_updates_store_and_cache() {
    let remote = Arc::new(MemoryStore::new());
    remote.insert_content("news", json!({"items": []}));
    let resolver = ContentResolver::new(remote.clone(), Arc::new(ContentStore::new()));
    resolver.resolve("news").await;

    let saved = resolver
        .save("news", json!({"items": [{"headline_en": "New brand acquired"}]}))
        .await
        .unwrap();

    assert_eq!(saved["items"][0]["headline_en"], "New brand acquired");
    assert_eq!(resolver.cached("news"), Some(saved));
    assert_eq!(remote.content_updates(), 1);
}

#[tokio::test]
async fn test_save_to_missing_section_fails() {
    let remote = Arc::new(MemoryStore::new());
    let resolver = ContentResolver::new(remote.clone(), Arc::new(ContentStore::new()));

    let err = resolver.save("unknown", json!({})).await.unwrap_err();
    assert!(matches!(err, RemoteError::NotFound(_)));
    assert_eq!(resolver.cached("unknown"), None);
}

#[tokio::test]
async fn test_save_while_offline_fails_and_keeps_cache() {
    let remote = Arc::new(MemoryStore::new());
    remote.insert_content("news", json!({"items": []}));
    let resolver = ContentResolver::new(remote.clone(), Arc::new(ContentStore::new()));
    resolver.resolve("news").await;

    remote.set_offline(true);
    let err = resolver.save("news", json!({"items": [1]})).await.unwrap_err();

    assert!(matches!(err, RemoteError::Unavailable(_)));
    assert_eq!(resolver.cached("news"), Some(json!({"items": []})));
}
