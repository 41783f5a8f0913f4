//! Built-in section designs
//!
//! Palettes and layouts compiled into the binary. Sections render with
//! these until a preset arrives, and whenever no preset is active.

use super::types::ColorPalette;

/// Layout used when neither a preset nor the section names one.
pub const DEFAULT_LAYOUT: &str = "default";

/// Sections with a built-in palette and layout
pub const KNOWN_SECTIONS: &[&str] = &[
    "header",
    "hero",
    "about",
    "founder_highlight",
    "portfolio",
    "brands",
    "news",
    "projects",
    "careers_page",
    "contact",
    "footer",
];

/// Palette of last resort.
pub fn global_default_palette() -> ColorPalette {
    ColorPalette::from_pairs(&[
        ("bg", "#0b1d33"),
        ("bg2", "#10263f"),
        ("accent", "#c9a227"),
        ("accentHover", "#b38f1f"),
        ("accentLight", "#e3c766"),
        ("accentDark", "#8c6f14"),
        ("accentBg10", "rgba(201, 162, 39, 0.1)"),
        ("accentBg20", "rgba(201, 162, 39, 0.2)"),
        ("accent2", "#3f7cac"),
        ("accent2Hover", "#33668d"),
        ("gradientFrom", "#0b1d33"),
        ("gradientTo", "#1d3b5c"),
        ("heading", "#ffffff"),
        ("muted", "#9aa8b8"),
        ("cardBg", "#132c48"),
        ("cardBorder", "#24476d"),
    ])
}

/// Built-in palette for a section, if it has one.
pub fn section_default_palette(section_key: &str) -> Option<ColorPalette> {
    let palette = match section_key {
        "header" | "footer" => global_default_palette(),
        "hero" => global_default_palette()
            .with("gradientFrom", "#07121f")
            .with("gradientTo", "#0b1d33"),
        "about" | "founder_highlight" => light_palette(),
        "portfolio" => global_default_palette().with("bg", "#0e2238"),
        "brands" => light_palette().with("bg", "#f4f1ea"),
        "news" | "projects" => light_palette(),
        "careers_page" => light_palette()
            .with("accent2", "#2f6f4e")
            .with("accent2Hover", "#265a3f"),
        "contact" => global_default_palette().with("cardBg", "#0f2440"),
        _ => return None,
    };
    Some(palette)
}

/// Built-in layout for a section, if it has one.
pub fn section_default_layout(section_key: &str) -> Option<&'static str> {
    let layout = match section_key {
        "header" => "standard",
        "hero" => "centered",
        "about" | "contact" => "split",
        "founder_highlight" => "portrait-left",
        "portfolio" => "timeline",
        "brands" | "projects" => "grid",
        "news" => "cards",
        "careers_page" => "list",
        "footer" => "columns",
        _ => return None,
    };
    Some(layout)
}

fn light_palette() -> ColorPalette {
    ColorPalette::from_pairs(&[
        ("bg", "#ffffff"),
        ("bg2", "#f5f6f8"),
        ("accent", "#c9a227"),
        ("accentHover", "#b38f1f"),
        ("accentLight", "#e3c766"),
        ("accentDark", "#8c6f14"),
        ("accentBg10", "rgba(201, 162, 39, 0.1)"),
        ("accentBg20", "rgba(201, 162, 39, 0.2)"),
        ("accent2", "#3f7cac"),
        ("accent2Hover", "#33668d"),
        ("gradientFrom", "#ffffff"),
        ("gradientTo", "#eef1f5"),
        ("heading", "#0b1d33"),
        ("muted", "#5c6b7a"),
        ("cardBg", "#ffffff"),
        ("cardBorder", "#e1e5ea"),
    ])
}
