// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Site runtime
//!
//! Wires the remote store, local storage and asset host into the content
//! resolver, design resolver and cache generation gate. One `Site` lives
//! for the whole process; [`Site::start`] is the startup step the entry
//! point calls exactly once.

use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crate::config::SiteConfig;
use crate::content::{ContentResolver, ContentStore};
use crate::design::{validate_palette, DesignPreset, DesignResolver, StyleSheet};
use crate::error::SiteResult;
use crate::gate::{AssetHost, CacheGenerationGate, DirectoryAssetHost, GateOutcome};
use crate::local::{FileStorage, LocalStorage};
use crate::remote::{RemoteStore, RestStore};
use crate::session::AdminSession;

/// The running site and its resolvers
pub struct Site {
    config: SiteConfig,
    remote: Arc<dyn RemoteStore>,
    local: Arc<dyn LocalStorage>,
    host: Arc<dyn AssetHost>,
    gate: CacheGenerationGate,
    style: Arc<StyleSheet>,
    content: ContentResolver,
    design: DesignResolver,
}

impl Site {
    /// Opens a site against the configured REST store, file storage and
    /// on-disk asset host.
    pub fn open(config: SiteConfig) -> SiteResult<Self> {
        let remote: Arc<dyn RemoteStore> = Arc::new(RestStore::new(&config)?);
        let local: Arc<dyn LocalStorage> = Arc::new(FileStorage::new(&config.storage_path)?);
        let host: Arc<dyn AssetHost> = Arc::new(DirectoryAssetHost::new(&config.storage_path));
        Ok(Self::from_parts(config, remote, local, host))
    }

    /// Builds a site from explicit collaborators.
    pub fn from_parts(
        config: SiteConfig,
        remote: Arc<dyn RemoteStore>,
        local: Arc<dyn LocalStorage>,
        host: Arc<dyn AssetHost>,
    ) -> Self {
        let gate =
            CacheGenerationGate::new(Arc::clone(&remote), Arc::clone(&local), Arc::clone(&host));
        let style = Arc::new(StyleSheet::new());
        let content = ContentResolver::new(Arc::clone(&remote), Arc::new(ContentStore::new()));
        let design = DesignResolver::new(Arc::clone(&remote), Arc::clone(&local), style.clone());

        Self {
            config,
            remote,
            local,
            host,
            gate,
            style,
            content,
            design,
        }
    }

    /// Runs the cache generation gate, then paints the cached background.
    ///
    /// When the asset host has a reload pending, every resolver is rebuilt
    /// from local state as a freshly loaded page would be.
    pub async fn start(&mut self) -> GateOutcome {
        let outcome = self.gate.run().await;
        if self.host.take_reload_request() {
            info!("reload requested, rebuilding resolvers");
            self.rebuild();
        }
        self.design.paint_cached_background();
        outcome
    }

    fn rebuild(&mut self) {
        self.style = Arc::new(StyleSheet::new());
        self.content =
            ContentResolver::new(Arc::clone(&self.remote), Arc::new(ContentStore::new()));
        self.design = DesignResolver::new(
            Arc::clone(&self.remote),
            Arc::clone(&self.local),
            self.style.clone(),
        );
    }

    /// Site configuration.
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Content resolver.
    pub fn content(&self) -> &ContentResolver {
        &self.content
    }

    /// Design resolver.
    pub fn design(&self) -> &DesignResolver {
        &self.design
    }

    /// Page-wide style variables applied so far.
    pub fn style(&self) -> &StyleSheet {
        &self.style
    }

    /// Durable local storage.
    pub fn local(&self) -> &dyn LocalStorage {
        self.local.as_ref()
    }

    /// Saves a content block on behalf of the admin editor.
    pub async fn save_content(&self, section_key: &str, content: Value) -> SiteResult<Value> {
        Ok(self.content.save(section_key, content).await?)
    }

    /// Validates a preset's colours before it is handed to the store.
    pub fn check_preset(&self, preset: &DesignPreset) -> SiteResult<()> {
        validate_palette(&preset.colors)?;
        Ok(())
    }

    /// Current admin session, if one is stored and unexpired.
    pub fn admin_session(&self) -> SiteResult<Option<AdminSession>> {
        Ok(AdminSession::load(self.local.as_ref())?)
    }

    /// Records a signed-in admin for the configured session lifetime.
    pub fn begin_admin_session(&self, user: &str) -> SiteResult<AdminSession> {
        let session = AdminSession::start(user, self.config.session_ttl)?;
        session.store(self.local.as_ref())?;
        Ok(session)
    }

    /// Signs the admin out.
    pub fn end_admin_session(&self) -> SiteResult<()> {
        Ok(AdminSession::clear(self.local.as_ref())?)
    }
}
