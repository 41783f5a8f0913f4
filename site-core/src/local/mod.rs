// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Durable Local Storage
//!
//! Key/value string storage that survives restarts, standing in for the
//! browser's local storage. Writes are best-effort from the resolvers'
//! point of view: callers log failures and carry on.

mod file;
mod memory;

use std::io;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Last-seen cache generation token.
pub const CACHE_VERSION_KEY: &str = "_cache_version";

/// Header background colour for first paint (`{"bg": ...}`).
pub const BACKGROUND_CACHE_KEY: &str = "_d_cache";

/// Full design preset snapshot grouped by section.
pub const DESIGN_SNAPSHOT_KEY: &str = "_d_all_cache";

/// Admin dashboard session (`{"user": ..., "expiry": ...}`).
pub const ADMIN_SESSION_KEY: &str = "admin_session";

/// Trait for durable local key/value storage.
///
/// Implementations must be safe to share between resolvers. Concurrent
/// writers to the same key resolve as last-write-wins.
pub trait LocalStorage: Send + Sync {
    /// Reads a value. Returns `None` if the key has never been written.
    fn get_item(&self, key: &str) -> Result<Option<String>, LocalStorageError>;

    /// Writes a value, replacing any previous one.
    fn set_item(&self, key: &str, value: &str) -> Result<(), LocalStorageError>;

    /// Removes a value. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<(), LocalStorageError>;
}

/// Reads and decodes a JSON value.
///
/// Missing keys and undecodable values both come back as `Ok(None)`; only
/// storage failures are errors.
pub fn read_json<T: DeserializeOwned>(
    storage: &dyn LocalStorage,
    key: &str,
) -> Result<Option<T>, LocalStorageError> {
    let Some(raw) = storage.get_item(key)? else {
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding undecodable local value");
            Ok(None)
        }
    }
}

/// Encodes and writes a JSON value.
pub fn write_json<T: Serialize + ?Sized>(
    storage: &dyn LocalStorage,
    key: &str,
    value: &T,
) -> Result<(), LocalStorageError> {
    let data = serde_json::to_string(value)?;
    storage.set_item(key, &data)
}

/// Errors that can occur with local storage
#[derive(Debug, Error)]
pub enum LocalStorageError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Storage quota exhausted
    #[error("Quota exceeded: {needed} bytes needed (quota {quota})")]
    QuotaExceeded {
        /// Bytes the store would hold after the write
        needed: usize,
        /// Configured quota in bytes
        quota: usize,
    },
}
