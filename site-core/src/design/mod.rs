// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Design resolution
//!
//! Provides per-section colour palettes and layout tags from admin-edited
//! design presets, with built-in defaults for every section and a
//! persisted snapshot for styled first paint.

mod defaults;
mod resolver;
mod style;
mod types;

pub use defaults::{
    global_default_palette, section_default_layout, section_default_palette, DEFAULT_LAYOUT,
    KNOWN_SECTIONS,
};
pub use resolver::{
    resolve_colors, resolve_layout, CachedBackground, DesignResolver, HEADER_SECTION,
};
pub use style::{
    apply_palette, check_heading_contrast, validate_hex_color, validate_palette, ColorError,
    StyleSheet, StyleSurface, STYLE_VARIABLES,
};
pub use types::{active_preset, group_by_section, ColorPalette, DesignPreset, PresetGroups};
