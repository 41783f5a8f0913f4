// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Content resolution
//!
//! Fetches named content blocks from the remote store and keeps a
//! process-wide copy of each one. Concurrent requests for the same section
//! share a single fetch. A failed fetch yields no content and every
//! consumer falls back to its built-in default.

mod resolver;
mod store;
mod types;

pub use resolver::ContentResolver;
pub use store::ContentStore;
pub use types::{CachedContent, ContentBlock};
