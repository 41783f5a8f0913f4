//! Process-wide content cache
//!
//! Holds the cached content per section and the table of fetches still in
//! flight. It is built once at process start and handed to every resolver
//! by `Arc`; only tests reset it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use futures::future::{BoxFuture, Shared};
use serde_json::Value;

use super::types::CachedContent;

/// A fetch other callers can join. Resolves to `None` on failure.
pub(crate) type PendingFetch = Shared<BoxFuture<'static, Option<Value>>>;

/// Shared cache and in-flight table for content blocks
#[derive(Default)]
pub struct ContentStore {
    entries: Mutex<HashMap<String, CachedContent>>,
    pending: Mutex<HashMap<String, (u64, PendingFetch)>>,
    generation: AtomicU64,
}

impl ContentStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, CachedContent>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn pending_table(&self) -> MutexGuard<'_, HashMap<String, (u64, PendingFetch)>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cached entry for a section, if any.
    pub fn get(&self, section_key: &str) -> Option<CachedContent> {
        self.entries().get(section_key).cloned()
    }

    /// Stores content, replacing any previous entry.
    pub fn insert(&self, section_key: &str, content: Value) {
        let generation = self.next_generation();
        self.entries()
            .insert(section_key.to_string(), CachedContent::new(content, generation));
    }

    /// Drops a single cached entry. Returns true if one existed.
    pub fn remove(&self, section_key: &str) -> bool {
        self.entries().remove(section_key).is_some()
    }

    /// Drops every cached entry. In-flight fetches are left alone.
    pub fn clear(&self) {
        self.entries().clear();
    }

    /// Number of cached sections.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of fetches currently in flight.
    pub fn in_flight(&self) -> usize {
        self.pending_table().len()
    }

    /// Drops cached entries and forgets in-flight fetches.
    pub fn reset(&self) {
        self.clear();
        self.pending_table().clear();
    }

    pub(crate) fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::Relaxed)
    }

    pub(crate) fn pending(&self, section_key: &str) -> Option<PendingFetch> {
        self.pending_table()
            .get(section_key)
            .map(|(_, fetch)| fetch.clone())
    }

    pub(crate) fn register_pending(&self, section_key: &str, generation: u64, fetch: PendingFetch) {
        self.pending_table()
            .insert(section_key.to_string(), (generation, fetch));
    }

    /// Caches the result of fetch `generation`, unless a newer fetch already
    /// wrote the entry. Returns true if the entry was written.
    pub(crate) fn settle_success(&self, section_key: &str, generation: u64, content: Value) -> bool {
        let mut entries = self.entries();
        if matches!(entries.get(section_key), Some(entry) if entry.generation > generation) {
            return false;
        }
        entries.insert(section_key.to_string(), CachedContent::new(content, generation));
        true
    }

    /// Clears the entry after forced fetch `generation` failed, unless a
    /// newer fetch wrote it. Returns true if an entry was removed.
    pub(crate) fn settle_failure(&self, section_key: &str, generation: u64) -> bool {
        let mut entries = self.entries();
        match entries.get(section_key) {
            Some(entry) if entry.generation <= generation => {
                entries.remove(section_key);
                true
            }
            _ => false,
        }
    }

    /// Removes the in-flight entry, unless a newer fetch has replaced it.
    pub(crate) fn finish_pending(&self, section_key: &str, generation: u64) {
        let mut pending = self.pending_table();
        if matches!(pending.get(section_key), Some((current, _)) if *current == generation) {
            pending.remove(section_key);
        }
    }
}
