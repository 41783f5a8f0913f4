// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Content resolver
//!
//! Resolution order for a section:
//! 1. cached content (no network)
//! 2. the fetch already in flight for that section
//! 3. a new single-row fetch
//!
//! Reads never fail. A missing row or a transport error is logged and
//! reported as `None`, which consumers treat as "use the built-in default".

use std::sync::Arc;

use futures::FutureExt;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::store::{ContentStore, PendingFetch};
use crate::remote::{RemoteError, RemoteStore};

/// Resolves content blocks through the shared [`ContentStore`]
#[derive(Clone)]
pub struct ContentResolver {
    remote: Arc<dyn RemoteStore>,
    store: Arc<ContentStore>,
}

impl ContentResolver {
    /// Creates a resolver over the given remote store and shared cache.
    pub fn new(remote: Arc<dyn RemoteStore>, store: Arc<ContentStore>) -> Self {
        Self { remote, store }
    }

    /// The shared cache this resolver reads and writes.
    pub fn store(&self) -> &Arc<ContentStore> {
        &self.store
    }

    /// Returns the content of a section, or `None` if it could not be fetched.
    pub async fn resolve(&self, section_key: &str) -> Option<Value> {
        if let Some(cached) = self.cached(section_key) {
            debug!(section_key, "content cache hit");
            return Some(cached);
        }

        if let Some(pending) = self.store.pending(section_key) {
            debug!(section_key, "joining in-flight content fetch");
            return pending.await;
        }

        self.start_fetch(section_key, false).await
    }

    /// Returns cached content without touching the network.
    pub fn cached(&self, section_key: &str) -> Option<Value> {
        self.store.get(section_key).map(|entry| entry.content)
    }

    /// Resolves a section and decodes it into a typed structure.
    ///
    /// Content that does not match `T` is logged and treated as absent.
    pub async fn resolve_as<T: DeserializeOwned>(&self, section_key: &str) -> Option<T> {
        let content = self.resolve(section_key).await?;
        match serde_json::from_value(content) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(section_key, error = %e, "content does not match expected shape");
                None
            }
        }
    }

    /// Fetches a section unconditionally and overwrites its cache entry.
    ///
    /// On failure the cache entry is cleared and `None` is returned.
    pub async fn invalidate_and_refetch(&self, section_key: &str) -> Option<Value> {
        self.start_fetch(section_key, true).await
    }

    /// Drops the cached content of one section.
    pub fn invalidate(&self, section_key: &str) {
        self.store.remove(section_key);
    }

    /// Drops every cached section.
    pub fn invalidate_all(&self) {
        self.store.clear();
    }

    /// Writes new content for a section and refreshes the cache from the
    /// store. Used by the admin editor, the one caller that sees errors.
    pub async fn save(&self, section_key: &str, content: Value) -> Result<Value, RemoteError> {
        self.remote.update_content(section_key, &content).await?;
        info!(section_key, "content block saved");

        Ok(self
            .invalidate_and_refetch(section_key)
            .await
            .unwrap_or(content))
    }

    /// Starts a fetch and registers it as the in-flight fetch for the section.
    ///
    /// Results only land in the cache if no newer fetch has written the
    /// entry. A failed plain fetch leaves the cache alone; a failed forced
    /// fetch clears the entry.
    fn start_fetch(&self, section_key: &str, forced: bool) -> PendingFetch {
        let generation = self.store.next_generation();
        let remote = Arc::clone(&self.remote);
        let store = Arc::clone(&self.store);
        let key = section_key.to_string();

        let fetch = async move {
            let result = match remote.fetch_content(&key).await {
                Ok(block) => {
                    if !store.settle_success(&key, generation, block.content.clone()) {
                        debug!(section_key = %key, "newer content already cached");
                    }
                    Some(block.content)
                }
                Err(e) => {
                    warn!(section_key = %key, error = %e, "content fetch failed");
                    if forced {
                        store.settle_failure(&key, generation);
                    }
                    None
                }
            };
            store.finish_pending(&key, generation);
            result
        }
        .boxed()
        .shared();

        self.store
            .register_pending(section_key, generation, fetch.clone());
        fetch
    }
}
