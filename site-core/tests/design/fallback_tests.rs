//! Tests for colour and layout fallback order
//!
//! Scenarios from site-design.feature:
//! - Sections without presets use their built-in palette
//! - Unknown sections use the global palette
//! - The active preset wins regardless of list order

use proptest::prelude::*;
use serde_json::json;
use site_core::design::{
    global_default_palette, resolve_colors, resolve_layout, section_default_palette,
    ColorPalette, DesignPreset, DEFAULT_LAYOUT, KNOWN_SECTIONS,
};

#[test]
fn test_known_sections_without_presets_use_section_defaults() {
    for section in KNOWN_SECTIONS {
        let colors = resolve_colors(None, section);
        assert_eq!(Some(colors), section_default_palette(section), "{section}");
        assert_ne!(resolve_layout(None, section), "");
    }
}

#[test]
fn test_unknown_section_uses_global_defaults() {
    assert_eq!(resolve_colors(None, "gallery"), global_default_palette());
    assert_eq!(resolve_layout(None, "gallery"), DEFAULT_LAYOUT);
}

#[test]
fn test_empty_preset_list_uses_section_defaults() {
    let empty: Vec<DesignPreset> = Vec::new();
    assert_eq!(
        Some(resolve_colors(Some(empty.as_slice()), "brands")),
        section_default_palette("brands")
    );
}

#[test]
fn test_two_active_presets_take_first_in_order() {
    // Nothing prevents two active presets; the first one wins
    let presets = vec![
        DesignPreset::new("brands", 1)
            .active()
            .with_colors(ColorPalette::from_pairs(&[("bg", "#010101")])),
        DesignPreset::new("brands", 2)
            .active()
            .with_colors(ColorPalette::from_pairs(&[("bg", "#020202")])),
    ];

    assert_eq!(
        resolve_colors(Some(presets.as_slice()), "brands").get("bg"),
        Some("#010101")
    );
}

#[test]
fn test_active_preset_with_null_colors_uses_section_defaults() {
    let row = json!({
        "section_key": "hero",
        "preset_number": 1,
        "is_active": true,
        "colors": null,
        "layout": "video"
    });
    let presets = vec![serde_json::from_value::<DesignPreset>(row).unwrap()];

    assert_eq!(
        Some(resolve_colors(Some(presets.as_slice()), "hero")),
        section_default_palette("hero")
    );
    // The layout still comes from the preset
    assert_eq!(resolve_layout(Some(presets.as_slice()), "hero"), "video");
}

#[test]
fn test_active_preset_with_blank_colors_uses_global_defaults() {
    let presets = vec![DesignPreset::new("gallery", 1)
        .active()
        .with_colors(ColorPalette::from_pairs(&[("bg", ""), ("accent", " ")]))];

    assert_eq!(
        resolve_colors(Some(presets.as_slice()), "gallery"),
        global_default_palette()
    );
}

fn section_presets(count: usize, active: usize) -> Vec<DesignPreset> {
    (0..count)
        .map(|i| {
            let preset = DesignPreset::new("projects", i as i64 + 1)
                .with_colors(ColorPalette::from_pairs(&[("bg", &format!("#0000{:02x}", i))]))
                .with_layout(&format!("layout-{}", i));
            if i == active {
                preset.active()
            } else {
                preset
            }
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_single_active_preset_wins_in_any_order(
        (expected, presets) in (1usize..8)
            .prop_flat_map(|n| (Just(n), 0..n))
            .prop_flat_map(|(n, active)| {
                let presets = section_presets(n, active);
                (Just(presets[active].clone()), Just(presets).prop_shuffle())
            })
    ) {
        prop_assert_eq!(resolve_colors(Some(presets.as_slice()), "projects"), expected.colors);
        prop_assert_eq!(
            resolve_layout(Some(presets.as_slice()), "projects"),
            expected.layout.unwrap()
        );
    }
}
