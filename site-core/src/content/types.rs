// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Content block definitions

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::SystemTime;

/// A named, admin-editable bundle of structured data rendered by one
/// page section.
///
/// The shape of `content` belongs to the consuming section; the resolver
/// never inspects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    /// Stable section identifier (e.g. "founder_highlight", "careers_page")
    pub section_key: String,
    /// Arbitrary field name to value mapping
    pub content: Value,
    /// Timestamp of the last write, as reported by the store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// A cached copy of a content block's content
#[derive(Debug, Clone)]
pub struct CachedContent {
    /// The content mapping
    pub content: Value,
    /// When it was fetched
    pub fetched_at: SystemTime,
    /// Fetch generation that wrote this entry
    pub generation: u64,
}

impl CachedContent {
    /// Wraps content fetched by the given generation.
    pub fn new(content: Value, generation: u64) -> Self {
        Self {
            content,
            fetched_at: SystemTime::now(),
            generation,
        }
    }
}
