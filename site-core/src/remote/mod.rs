// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Remote data store
//!
//! The hosted database is the source of truth for content blocks, design
//! presets and site settings. Resolvers only ever see it through the
//! [`RemoteStore`] trait, so the same code runs against the PostgREST
//! endpoint in production and an in-memory store in tests.

mod memory;
mod rest;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::content::ContentBlock;
use crate::design::DesignPreset;

pub use memory::MemoryStore;
pub use rest::RestStore;

/// Settings row holding the cache generation token.
pub const CACHE_VERSION_SETTING: &str = "cache_version";

/// Row-level access to the hosted database.
///
/// Logical queries:
/// - `SELECT * FROM site_content WHERE section_key = :key LIMIT 1`
/// - `SELECT * FROM site_design ORDER BY preset_number`
/// - `SELECT value FROM site_settings WHERE key = :key LIMIT 1`
/// - `UPDATE site_content SET content = :new, updated_at = now() WHERE section_key = :key`
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Fetches a single content block. A missing row is [`RemoteError::NotFound`].
    async fn fetch_content(&self, section_key: &str) -> Result<ContentBlock, RemoteError>;

    /// Fetches every design preset of every section, ascending by preset number.
    async fn fetch_design_presets(&self) -> Result<Vec<DesignPreset>, RemoteError>;

    /// Fetches a single settings value by key.
    async fn fetch_setting(&self, key: &str) -> Result<String, RemoteError>;

    /// Replaces a content block's content and stamps `updated_at`.
    async fn update_content(&self, section_key: &str, content: &Value) -> Result<(), RemoteError>;
}

/// Errors that can occur talking to the remote store
#[derive(Debug, Error)]
pub enum RemoteError {
    /// HTTP error with status code
    #[error("HTTP error: {0}")]
    Http(u16),

    /// Network/request error
    #[cfg(feature = "remote")]
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The requested row does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Store could not be reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Remote store feature is not enabled
    #[error("Remote store feature is not enabled")]
    FeatureDisabled,
}

impl RemoteError {
    /// Returns true for a missing row as opposed to a transport failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RemoteError::NotFound(_))
    }
}
