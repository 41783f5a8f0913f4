//! In-memory remote store
//!
//! Mirrors the hosted tables in process memory. Every call yields to the
//! executor once before answering, so concurrent callers interleave the way
//! they would around a real network round trip. Call counters and failure
//! injection make it the workhorse of the resolver tests.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::task::Poll;

use async_trait::async_trait;
use serde_json::Value;

use super::{RemoteError, RemoteStore};
use crate::content::ContentBlock;
use crate::design::DesignPreset;

#[derive(Default)]
struct Tables {
    content: HashMap<String, ContentBlock>,
    presets: Vec<DesignPreset>,
    settings: HashMap<String, String>,
    offline: bool,
}

/// Remote store backed by process memory
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    content_fetches: AtomicUsize,
    design_fetches: AtomicUsize,
    setting_fetches: AtomicUsize,
    content_updates: AtomicUsize,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Inserts or replaces a content block.
    pub fn insert_content(&self, section_key: &str, content: Value) {
        self.tables().content.insert(
            section_key.to_string(),
            ContentBlock {
                section_key: section_key.to_string(),
                content,
                updated_at: Some(chrono::Utc::now().to_rfc3339()),
            },
        );
    }

    /// Deletes a content block.
    pub fn remove_content(&self, section_key: &str) {
        self.tables().content.remove(section_key);
    }

    /// Replaces every design preset.
    pub fn set_presets(&self, presets: Vec<DesignPreset>) {
        self.tables().presets = presets;
    }

    /// Inserts or replaces a settings value.
    pub fn set_setting(&self, key: &str, value: &str) {
        self.tables()
            .settings
            .insert(key.to_string(), value.to_string());
    }

    /// Deletes a settings value.
    pub fn remove_setting(&self, key: &str) {
        self.tables().settings.remove(key);
    }

    /// Makes every call fail with [`RemoteError::Unavailable`] until reset.
    pub fn set_offline(&self, offline: bool) {
        self.tables().offline = offline;
    }

    /// Number of content fetches served (including failures).
    pub fn content_fetches(&self) -> usize {
        self.content_fetches.load(Ordering::SeqCst)
    }

    /// Number of design preset fetches served (including failures).
    pub fn design_fetches(&self) -> usize {
        self.design_fetches.load(Ordering::SeqCst)
    }

    /// Number of settings fetches served (including failures).
    pub fn setting_fetches(&self) -> usize {
        self.setting_fetches.load(Ordering::SeqCst)
    }

    /// Number of content updates attempted.
    pub fn content_updates(&self) -> usize {
        self.content_updates.load(Ordering::SeqCst)
    }

    fn check_online(&self) -> Result<(), RemoteError> {
        if self.tables().offline {
            Err(RemoteError::Unavailable("memory store is offline".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn fetch_content(&self, section_key: &str) -> Result<ContentBlock, RemoteError> {
        self.content_fetches.fetch_add(1, Ordering::SeqCst);
        round_trip().await;
        self.check_online()?;

        self.tables()
            .content
            .get(section_key)
            .cloned()
            .ok_or_else(|| RemoteError::NotFound(format!("site_content/{}", section_key)))
    }

    async fn fetch_design_presets(&self) -> Result<Vec<DesignPreset>, RemoteError> {
        self.design_fetches.fetch_add(1, Ordering::SeqCst);
        round_trip().await;
        self.check_online()?;

        let mut presets = self.tables().presets.clone();
        presets.sort_by_key(|p| p.preset_number);
        Ok(presets)
    }

    async fn fetch_setting(&self, key: &str) -> Result<String, RemoteError> {
        self.setting_fetches.fetch_add(1, Ordering::SeqCst);
        round_trip().await;
        self.check_online()?;

        self.tables()
            .settings
            .get(key)
            .cloned()
            .ok_or_else(|| RemoteError::NotFound(format!("site_settings/{}", key)))
    }

    async fn update_content(&self, section_key: &str, content: &Value) -> Result<(), RemoteError> {
        self.content_updates.fetch_add(1, Ordering::SeqCst);
        round_trip().await;
        self.check_online()?;

        let mut tables = self.tables();
        let block = tables
            .content
            .get_mut(section_key)
            .ok_or_else(|| RemoteError::NotFound(format!("site_content/{}", section_key)))?;
        block.content = content.clone();
        block.updated_at = Some(chrono::Utc::now().to_rfc3339());
        Ok(())
    }
}

/// Pending exactly once, then ready.
///
/// Runtime agnostic, so `block_on` callers can still interleave with
/// concurrent resolves.
fn round_trip() -> impl Future<Output = ()> {
    let mut yielded = false;
    futures::future::poll_fn(move |cx| {
        if yielded {
            Poll::Ready(())
        } else {
            yielded = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    })
}
