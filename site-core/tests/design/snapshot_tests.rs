//! Tests for the persisted design snapshot
//!
//! Scenarios from site-design.feature:
//! - Cold start renders built-in defaults
//! - Warm start renders the last snapshot before the network answers
//! - A stale snapshot is superseded by refresh

use std::sync::Arc;

use site_core::design::{section_default_palette, ColorPalette, DesignPreset, DesignResolver, StyleSheet};
use site_core::local::{FileStorage, LocalStorage, MemoryStorage, DESIGN_SNAPSHOT_KEY};
use site_core::remote::MemoryStore;
use tempfile::TempDir;

use super::sample_presets;

#[test]
fn test_cold_start_uses_defaults_without_network() {
    let remote = Arc::new(MemoryStore::new());
    let resolver = DesignResolver::new(
        remote.clone(),
        Arc::new(MemoryStorage::new()),
        Arc::new(StyleSheet::new()),
    );

    assert!(resolver.sections().is_empty());
    assert_eq!(
        Some(resolver.active_colors("about")),
        section_default_palette("about")
    );
    assert_eq!(resolver.active_layout("about"), "split");
    assert_eq!(remote.design_fetches(), 0);
}

#[test]
fn test_corrupt_snapshot_is_a_cold_start() {
    let local = Arc::new(MemoryStorage::new());
    local.set_item(DESIGN_SNAPSHOT_KEY, "{broken").unwrap();

    let resolver = DesignResolver::new(
        Arc::new(MemoryStore::new()),
        local,
        Arc::new(StyleSheet::new()),
    );
    assert!(resolver.sections().is_empty());
}

#[tokio::test]
async fn test_snapshot_reproduces_resolution_offline() {
    let temp = TempDir::new().unwrap();
    let remote = Arc::new(MemoryStore::new());
    remote.set_presets(sample_presets());

    let online = DesignResolver::new(
        remote,
        Arc::new(FileStorage::new(temp.path()).unwrap()),
        Arc::new(StyleSheet::new()),
    );
    assert!(online.refresh().await);

    // New process, no network
    let offline_remote = Arc::new(MemoryStore::new());
    offline_remote.set_offline(true);
    let offline = DesignResolver::new(
        offline_remote.clone(),
        Arc::new(FileStorage::new(temp.path()).unwrap()),
        Arc::new(StyleSheet::new()),
    );

    assert_eq!(offline.sections(), online.sections());
    for section in online.sections() {
        assert_eq!(offline.active_colors(&section), online.active_colors(&section));
        assert_eq!(offline.active_layout(&section), online.active_layout(&section));
        assert_eq!(offline.presets(&section), online.presets(&section));
    }
    assert_eq!(offline_remote.design_fetches(), 0);
}

#[tokio::test]
async fn test_warm_start_stale_snapshot_superseded_by_refresh() {
    let local = Arc::new(MemoryStorage::new());
    let remote = Arc::new(MemoryStore::new());
    remote.set_presets(sample_presets());

    DesignResolver::new(remote.clone(), local.clone(), Arc::new(StyleSheet::new()))
        .refresh()
        .await;

    // Admin switches the news preset while the client is away
    remote.set_presets(vec![
        DesignPreset::new("news", 1).with_layout("list"),
        DesignPreset::new("news", 2)
            .active()
            .with_colors(ColorPalette::from_pairs(&[("bg", "#eeeeee")]))
            .with_layout("masonry"),
    ]);

    let resolver = DesignResolver::new(remote, local.clone(), Arc::new(StyleSheet::new()));

    // Phase 1: stale snapshot
    assert_eq!(resolver.active_layout("news"), "list");
    assert_eq!(resolver.active_colors("news").get("bg"), Some("#fafafa"));

    // Phase 2: refresh replaces it
    assert!(resolver.refresh().await);
    assert_eq!(resolver.active_layout("news"), "masonry");
    assert_eq!(resolver.active_colors("news").get("bg"), Some("#eeeeee"));
    assert!(resolver.presets("header").is_empty());

    // And the new snapshot is what the next start sees
    let next = DesignResolver::new(
        Arc::new(MemoryStore::new()),
        local,
        Arc::new(StyleSheet::new()),
    );
    assert_eq!(next.active_layout("news"), "masonry");
}

#[tokio::test]
async fn test_cached_background_paints_before_refresh() {
    let local = Arc::new(MemoryStorage::new());
    let remote = Arc::new(MemoryStore::new());
    remote.set_presets(sample_presets());
    DesignResolver::new(remote.clone(), local.clone(), Arc::new(StyleSheet::new()))
        .refresh()
        .await;

    let style = Arc::new(StyleSheet::new());
    let resolver = DesignResolver::new(remote.clone(), local, style.clone());

    assert_eq!(resolver.paint_cached_background().as_deref(), Some("#0a1628"));
    assert_eq!(style.background().as_deref(), Some("#0a1628"));
    assert_eq!(remote.design_fetches(), 1);
}

#[test]
fn test_no_cached_background_paints_nothing() {
    let style = Arc::new(StyleSheet::new());
    let resolver = DesignResolver::new(
        Arc::new(MemoryStore::new()),
        Arc::new(MemoryStorage::new()),
        style.clone(),
    );

    assert_eq!(resolver.paint_cached_background(), None);
    assert_eq!(style.background(), None);
}
