// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Site Core Library
//!
//! Client-side data layer of the holding group website. Content blocks and
//! design presets live in a hosted database; this crate resolves them with
//! process-wide caching, persisted snapshots and built-in fallbacks, and
//! purges stale client assets when the deployed cache generation changes.

pub mod config;
pub mod content;
pub mod design;
pub mod error;
pub mod gate;
pub mod local;
pub mod remote;
pub mod session;
pub mod site;

pub use config::SiteConfig;
pub use content::{ContentBlock, ContentResolver, ContentStore};
pub use design::{ColorPalette, DesignPreset, DesignResolver, StyleSheet, StyleSurface};
pub use error::{SiteError, SiteResult};
pub use gate::{AssetHost, CacheGenerationGate, GateOutcome};
pub use local::{LocalStorage, LocalStorageError};
pub use remote::{RemoteError, RemoteStore};
pub use session::AdminSession;
pub use site::Site;
