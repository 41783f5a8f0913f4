// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tests for the content resolver
//!
//! Scenarios from site-content.feature:
//! - Cached content is served without a network call
//! - Concurrent requests share one fetch
//! - Missing sections fall back to defaults
//! - Forced refetch overwrites the cache

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::channel::oneshot;
use futures::executor::block_on;
use proptest::prelude::*;
use serde::Deserialize;
use serde_json::{json, Value};
use site_core::content::{ContentBlock, ContentResolver, ContentStore};
use site_core::design::DesignPreset;
use site_core::remote::{MemoryStore, RemoteError, RemoteStore};

fn setup() -> (Arc<MemoryStore>, ContentResolver) {
    let remote = Arc::new(MemoryStore::new());
    remote.insert_content(
        "founder_highlight",
        json!({"title_en": "Our Founder", "title_ka": "ჩვენი დამფუძნებელი"}),
    );
    remote.insert_content(
        "careers_page",
        json!({"positions": [{"title": "Analyst"}, {"title": "Engineer"}]}),
    );
    let resolver = ContentResolver::new(remote.clone(), Arc::new(ContentStore::new()));
    (remote, resolver)
}

#[tokio::test]
async fn test_resolve_returns_content() {
    let (_, resolver) = setup();

    let content = resolver.resolve("founder_highlight").await.unwrap();
    assert_eq!(content["title_en"], "Our Founder");
}

#[tokio::test]
async fn test_sequential_resolves_fetch_once() {
    let (remote, resolver) = setup();

    let first = resolver.resolve("careers_page").await;
    assert_eq!(remote.content_fetches(), 1);

    // Served from the cache synchronously
    assert_eq!(resolver.cached("careers_page"), first);
    let second = resolver.resolve("careers_page").await;

    assert_eq!(first, second);
    assert_eq!(remote.content_fetches(), 1);
}

#[tokio::test]
async fn test_concurrent_resolves_share_one_fetch() {
    let (remote, resolver) = setup();

    let (a, b, c) = tokio::join!(
        resolver.resolve("careers_page"),
        resolver.resolve("careers_page"),
        resolver.resolve("careers_page"),
    );

    assert!(a.is_some());
    assert_eq!(a, b);
    assert_eq!(b, c);
    assert_eq!(remote.content_fetches(), 1);
    assert_eq!(resolver.store().in_flight(), 0);
}

#[tokio::test]
async fn test_concurrent_resolves_for_different_keys_fetch_each() {
    let (remote, resolver) = setup();

    let (a, b) = tokio::join!(
        resolver.resolve("careers_page"),
        resolver.resolve("founder_highlight"),
    );

    assert!(a.is_some());
    assert!(b.is_some());
    assert_eq!(remote.content_fetches(), 2);
}

#[tokio::test]
async fn test_concurrent_misses_share_one_fetch() {
    let (remote, resolver) = setup();

    let (a, b) = tokio::join!(resolver.resolve("nope"), resolver.resolve("nope"));

    assert_eq!(a, None);
    assert_eq!(b, None);
    assert_eq!(remote.content_fetches(), 1);
}

#[tokio::test]
async fn test_missing_section_is_none_and_not_cached() {
    let (remote, resolver) = setup();

    assert_eq!(resolver.resolve("not_a_section").await, None);
    assert_eq!(resolver.cached("not_a_section"), None);
    assert_eq!(resolver.store().in_flight(), 0);

    // A failure is not remembered: the next call tries again
    assert_eq!(resolver.resolve("not_a_section").await, None);
    assert_eq!(remote.content_fetches(), 2);
}

#[tokio::test]
async fn test_network_failure_is_none() {
    let (remote, resolver) = setup();
    remote.set_offline(true);

    assert_eq!(resolver.resolve("careers_page").await, None);
    assert_eq!(resolver.store().in_flight(), 0);
}

#[tokio::test]
async fn test_invalidate_and_refetch_always_fetches() {
    let (remote, resolver) = setup();
    resolver.resolve("founder_highlight").await;

    remote.insert_content("founder_highlight", json!({"title_en": "Founder & Chair"}));

    // Cached value is still the old one
    assert_eq!(
        resolver.resolve("founder_highlight").await.unwrap()["title_en"],
        "Our Founder"
    );

    let refreshed = resolver.invalidate_and_refetch("founder_highlight").await;
    assert_eq!(refreshed.unwrap()["title_en"], "Founder & Chair");
    assert_eq!(
        resolver.cached("founder_highlight").unwrap()["title_en"],
        "Founder & Chair"
    );
    assert_eq!(remote.content_fetches(), 2);
}

#[tokio::test]
async fn test_failed_refetch_clears_cache() {
    let (remote, resolver) = setup();
    resolver.resolve("careers_page").await;
    assert!(resolver.cached("careers_page").is_some());

    remote.set_offline(true);
    assert_eq!(resolver.invalidate_and_refetch("careers_page").await, None);
    assert_eq!(resolver.cached("careers_page"), None);
}

#[tokio::test]
async fn test_resolve_during_forced_refetch_joins_it() {
    let (remote, resolver) = setup();
    resolver.resolve("careers_page").await;
    resolver.invalidate("careers_page");

    let (forced, joined) = tokio::join!(
        resolver.invalidate_and_refetch("careers_page"),
        resolver.resolve("careers_page"),
    );

    assert_eq!(forced, joined);
    assert_eq!(remote.content_fetches(), 2);
}

#[tokio::test]
async fn test_invalidate_all_drops_every_entry() {
    let (remote, resolver) = setup();
    resolver.resolve("careers_page").await;
    resolver.resolve("founder_highlight").await;
    assert_eq!(resolver.store().len(), 2);

    resolver.invalidate_all();
    assert!(resolver.store().is_empty());

    resolver.resolve("careers_page").await;
    assert_eq!(remote.content_fetches(), 3);
}

#[tokio::test]
async fn test_resolvers_share_the_store() {
    let (remote, resolver) = setup();
    let other = ContentResolver::new(remote.clone(), resolver.store().clone());

    resolver.resolve("careers_page").await;
    assert!(other.cached("careers_page").is_some());

    other.invalidate("careers_page");
    assert!(resolver.cached("careers_page").is_none());
}

#[derive(Debug, Deserialize, PartialEq)]
struct Careers {
    positions: Vec<Position>,
}

#[derive(Debug, Deserialize, PartialEq)]
struct Position {
    title: String,
}

#[tokio::test]
async fn test_resolve_as_decodes() {
    let (_, resolver) = setup();

    let careers: Careers = resolver.resolve_as("careers_page").await.unwrap();
    assert_eq!(careers.positions.len(), 2);
    assert_eq!(careers.positions[1].title, "Engineer");
}

#[tokio::test]
async fn test_resolve_as_wrong_shape_is_none() {
    let (_, resolver) = setup();

    let careers: Option<Careers> = resolver.resolve_as("founder_highlight").await;
    assert!(careers.is_none());
}

proptest! {
    #[test]
    fn prop_unknown_sections_resolve_to_none(key in "[a-z_]{1,24}") {
        let remote = Arc::new(MemoryStore::new());
        let resolver = ContentResolver::new(remote.clone(), Arc::new(ContentStore::new()));

        prop_assert_eq!(block_on(resolver.resolve(&key)), None);
        prop_assert_eq!(remote.content_fetches(), 1);
    }
}

/// Remote whose first content fetch waits for a release signal and then
/// fails; every later fetch answers at once with fresh content.
struct SlowFailingStore {
    fetches: AtomicUsize,
    release: Mutex<Option<oneshot::Receiver<()>>>,
}

impl SlowFailingStore {
    fn new() -> (oneshot::Sender<()>, Arc<Self>) {
        let (tx, rx) = oneshot::channel();
        let store = Arc::new(Self {
            fetches: AtomicUsize::new(0),
            release: Mutex::new(Some(rx)),
        });
        (tx, store)
    }
}

#[async_trait]
impl RemoteStore for SlowFailingStore {
    async fn fetch_content(&self, section_key: &str) -> Result<ContentBlock, RemoteError> {
        if self.fetches.fetch_add(1, Ordering::SeqCst) == 0 {
            let release = self.release.lock().unwrap().take();
            if let Some(release) = release {
                let _ = release.await;
            }
            return Err(RemoteError::Unavailable("connection reset".into()));
        }

        Ok(ContentBlock {
            section_key: section_key.to_string(),
            content: json!({"v": "new"}),
            updated_at: None,
        })
    }

    async fn fetch_design_presets(&self) -> Result<Vec<DesignPreset>, RemoteError> {
        Ok(Vec::new())
    }

    async fn fetch_setting(&self, key: &str) -> Result<String, RemoteError> {
        Err(RemoteError::NotFound(key.to_string()))
    }

    async fn update_content(&self, _section_key: &str, _content: &Value) -> Result<(), RemoteError> {
        Ok(())
    }
}

#[tokio::test]
async fn test_late_failed_resolve_keeps_newer_cache_entry() {
    let (release, remote) = SlowFailingStore::new();
    let resolver = ContentResolver::new(remote, Arc::new(ContentStore::new()));
    let forced = &resolver;

    let (stale, fresh) = tokio::join!(resolver.resolve("hero"), async move {
        let fresh = forced.invalidate_and_refetch("hero").await;
        release.send(()).unwrap();
        fresh
    });

    assert_eq!(stale, None);
    assert_eq!(fresh, Some(json!({"v": "new"})));
    assert_eq!(resolver.cached("hero"), fresh);
    assert_eq!(resolver.store().in_flight(), 0);
}

#[tokio::test]
async fn test_late_failed_refetch_keeps_newer_cache_entry() {
    let (release, remote) = SlowFailingStore::new();
    let resolver = ContentResolver::new(remote, Arc::new(ContentStore::new()));
    let newer = &resolver;

    let (older, fresh) = tokio::join!(resolver.invalidate_and_refetch("hero"), async move {
        let fresh = newer.invalidate_and_refetch("hero").await;
        release.send(()).unwrap();
        fresh
    });

    assert_eq!(older, None);
    assert_eq!(resolver.cached("hero"), fresh);
    assert_eq!(resolver.cached("hero"), Some(json!({"v": "new"})));
}
