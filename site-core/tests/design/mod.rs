// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tests for design resolution
//!
//! Feature: site-design.feature

mod fallback_tests;
mod snapshot_tests;

use site_core::design::{ColorPalette, DesignPreset};

/// Header with two presets (second active), hero with one inactive preset,
/// news with a single active preset.
pub fn sample_presets() -> Vec<DesignPreset> {
    vec![
        DesignPreset::new("header", 1).with_colors(ColorPalette::from_pairs(&[
            ("bg", "#ffffff"),
            ("accent", "#000000"),
        ])),
        DesignPreset::new("header", 2)
            .active()
            .with_colors(ColorPalette::from_pairs(&[
                ("bg", "#0a1628"),
                ("bg2", "#112240"),
                ("accent", "#d4af37"),
                ("heading", "#f5f5f5"),
                ("muted", "#8892b0"),
                ("cardBg", "#112240"),
                ("cardBorder", "#233554"),
            ]))
            .with_layout("transparent"),
        DesignPreset::new("hero", 1).with_colors(ColorPalette::from_pairs(&[("bg", "#333333")])),
        DesignPreset::new("news", 1)
            .active()
            .with_colors(ColorPalette::from_pairs(&[("bg", "#fafafa")]))
            .with_layout("list"),
    ]
}
