// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Design resolver
//!
//! Loads in two phases. Construction reads the last persisted snapshot so
//! sections can render styled before the network answers; [`refresh`]
//! fetches every preset in one request, replaces the in-memory state
//! wholesale and re-persists it.
//!
//! [`refresh`]: DesignResolver::refresh

use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::defaults::{
    global_default_palette, section_default_layout, section_default_palette, DEFAULT_LAYOUT,
};
use super::style::{apply_palette, StyleSurface};
use super::types::{active_preset, group_by_section, ColorPalette, DesignPreset, PresetGroups};
use crate::local::{
    read_json, write_json, LocalStorage, BACKGROUND_CACHE_KEY, DESIGN_SNAPSHOT_KEY,
};
use crate::remote::RemoteStore;

/// Section whose active preset drives the page-wide style variables.
pub const HEADER_SECTION: &str = "header";

/// Persisted first-paint background
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedBackground {
    /// Header background colour
    pub bg: String,
}

/// Colours for a section.
///
/// Order: the first active preset's colours, then the section's built-in
/// palette, then the global palette. An active preset whose colours are
/// null, empty or all blank counts as having none.
pub fn resolve_colors(presets: Option<&[DesignPreset]>, section_key: &str) -> ColorPalette {
    presets
        .and_then(active_preset)
        .map(|preset| &preset.colors)
        .filter(|colors| colors.has_values())
        .cloned()
        .or_else(|| section_default_palette(section_key))
        .unwrap_or_else(global_default_palette)
}

/// Layout for a section.
///
/// Order: the first active preset's layout, then the section's built-in
/// layout, then [`DEFAULT_LAYOUT`].
pub fn resolve_layout(presets: Option<&[DesignPreset]>, section_key: &str) -> String {
    presets
        .and_then(active_preset)
        .and_then(|preset| preset.layout.as_deref())
        .filter(|layout| !layout.trim().is_empty())
        .or_else(|| section_default_layout(section_key))
        .unwrap_or(DEFAULT_LAYOUT)
        .to_string()
}

/// Resolves per-section colours and layouts from design presets
pub struct DesignResolver {
    remote: Arc<dyn RemoteStore>,
    local: Arc<dyn LocalStorage>,
    surface: Arc<dyn StyleSurface>,
    presets: RwLock<PresetGroups>,
}

impl DesignResolver {
    /// Creates a resolver seeded from the persisted snapshot, if any.
    ///
    /// A missing or unreadable snapshot means a cold start with built-in
    /// defaults. Nothing here touches the network.
    pub fn new(
        remote: Arc<dyn RemoteStore>,
        local: Arc<dyn LocalStorage>,
        surface: Arc<dyn StyleSurface>,
    ) -> Self {
        let presets = match read_json::<PresetGroups>(local.as_ref(), DESIGN_SNAPSHOT_KEY) {
            Ok(Some(snapshot)) => {
                debug!(sections = snapshot.len(), "loaded design snapshot");
                snapshot
            }
            Ok(None) => PresetGroups::new(),
            Err(e) => {
                warn!(error = %e, "could not read design snapshot");
                PresetGroups::new()
            }
        };

        Self {
            remote,
            local,
            surface,
            presets: RwLock::new(presets),
        }
    }

    /// Applies the persisted header background, if there is one.
    ///
    /// Meant to run before anything else renders.
    pub fn paint_cached_background(&self) -> Option<String> {
        let cached = read_json::<CachedBackground>(self.local.as_ref(), BACKGROUND_CACHE_KEY)
            .unwrap_or_else(|e| {
                warn!(error = %e, "could not read cached background");
                None
            })?;

        self.surface.set_background(&cached.bg);
        Some(cached.bg)
    }

    /// Active colours for a section. Never empty-handed: falls back to
    /// built-in palettes.
    pub fn active_colors(&self, section_key: &str) -> ColorPalette {
        let presets = self.presets.read().unwrap_or_else(PoisonError::into_inner);
        resolve_colors(presets.get(section_key).map(Vec::as_slice), section_key)
    }

    /// Active layout tag for a section.
    pub fn active_layout(&self, section_key: &str) -> String {
        let presets = self.presets.read().unwrap_or_else(PoisonError::into_inner);
        resolve_layout(presets.get(section_key).map(Vec::as_slice), section_key)
    }

    /// Presets currently loaded for a section, in preset order.
    pub fn presets(&self, section_key: &str) -> Vec<DesignPreset> {
        self.presets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(section_key)
            .cloned()
            .unwrap_or_default()
    }

    /// Sections with at least one loaded preset.
    pub fn sections(&self) -> Vec<String> {
        self.presets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    /// Fetches every preset and replaces the loaded state.
    ///
    /// Returns false if the fetch failed, in which case the previous state
    /// is kept. Persistence failures are logged and otherwise ignored.
    pub async fn refresh(&self) -> bool {
        let rows = match self.remote.fetch_design_presets().await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(error = %e, "design preset fetch failed, keeping current state");
                return false;
            }
        };

        let groups = group_by_section(rows);
        info!(sections = groups.len(), "design presets refreshed");

        if let Err(e) = write_json(self.local.as_ref(), DESIGN_SNAPSHOT_KEY, &groups) {
            warn!(error = %e, "could not persist design snapshot");
        }

        let header = groups
            .get(HEADER_SECTION)
            .and_then(|presets| active_preset(presets))
            .cloned();

        *self.presets.write().unwrap_or_else(PoisonError::into_inner) = groups;

        if let Some(header) = header {
            self.apply_header(&header.colors);
        }

        true
    }

    fn apply_header(&self, colors: &ColorPalette) {
        if let Some(bg) = colors.get("bg") {
            self.surface.set_background(bg);

            let cached = CachedBackground { bg: bg.to_string() };
            if let Err(e) = write_json(self.local.as_ref(), BACKGROUND_CACHE_KEY, &cached) {
                warn!(error = %e, "could not persist header background");
            }
        }

        let applied = apply_palette(self.surface.as_ref(), colors);
        debug!(applied, "applied header style variables");
    }
}
