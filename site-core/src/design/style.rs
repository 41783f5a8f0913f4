// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global style variables
//!
//! The header's active preset is expanded into page-wide style variables
//! that every section can read. Colour validation and contrast checks back
//! the admin design tool.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;

use super::types::ColorPalette;

/// Colour token to style variable mapping
pub const STYLE_VARIABLES: &[(&str, &str)] = &[
    ("bg", "--bg"),
    ("bg2", "--bg-secondary"),
    ("accent", "--accent"),
    ("accentHover", "--accent-hover"),
    ("accentLight", "--accent-light"),
    ("accentDark", "--accent-dark"),
    ("accentBg10", "--accent-bg-10"),
    ("accentBg20", "--accent-bg-20"),
    ("accent2", "--accent2"),
    ("accent2Hover", "--accent2-hover"),
    ("gradientFrom", "--gradient-from"),
    ("gradientTo", "--gradient-to"),
    ("heading", "--heading"),
    ("muted", "--text-muted"),
    ("cardBg", "--card-bg"),
    ("cardBorder", "--card-border"),
];

/// Receives the design resolver's page-wide side effects.
pub trait StyleSurface: Send + Sync {
    /// Sets the background of the root surface.
    fn set_background(&self, color: &str);

    /// Sets a page-wide style variable.
    fn set_variable(&self, name: &str, value: &str);
}

/// Pushes every token of `palette` that has a value onto `surface`.
///
/// Tokens without a value leave the variable untouched. Returns the number
/// of variables set.
pub fn apply_palette(surface: &dyn StyleSurface, palette: &ColorPalette) -> usize {
    let mut applied = 0;
    for (token, variable) in STYLE_VARIABLES {
        if let Some(value) = palette.get(token) {
            surface.set_variable(variable, value);
            applied += 1;
        }
    }
    applied
}

#[derive(Debug, Default)]
struct SheetState {
    background: Option<String>,
    variables: BTreeMap<String, String>,
}

/// Style surface that records what was applied and renders it as CSS
#[derive(Debug, Default)]
pub struct StyleSheet {
    state: Mutex<SheetState>,
}

impl StyleSheet {
    /// Creates an empty sheet.
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, SheetState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current root background, if one was set.
    pub fn background(&self) -> Option<String> {
        self.state().background.clone()
    }

    /// Current value of a style variable.
    pub fn variable(&self, name: &str) -> Option<String> {
        self.state().variables.get(name).cloned()
    }

    /// Every variable set so far, by name.
    pub fn variables(&self) -> BTreeMap<String, String> {
        self.state().variables.clone()
    }

    /// Renders the sheet as a `:root` rule.
    pub fn to_css(&self) -> String {
        let state = self.state();
        let mut css = String::from(":root {\n");
        if let Some(bg) = &state.background {
            let _ = writeln!(css, "  background-color: {};", bg);
        }
        for (name, value) in &state.variables {
            let _ = writeln!(css, "  {}: {};", name, value);
        }
        css.push('}');
        css
    }
}

impl StyleSurface for StyleSheet {
    fn set_background(&self, color: &str) {
        self.state().background = Some(color.to_string());
    }

    fn set_variable(&self, name: &str, value: &str) {
        self.state()
            .variables
            .insert(name.to_string(), value.to_string());
    }
}

/// Colour validation errors
#[derive(Debug, Error)]
pub enum ColorError {
    #[error("Invalid hex color: {0}")]
    InvalidHexColor(String),

    #[error("Insufficient contrast ratio: {actual:.2} (required: {required:.2})")]
    InsufficientContrast { actual: f64, required: f64 },
}

/// Validate a hex colour string (`#rgb`, `#rrggbb` or `#rrggbbaa`)
pub fn validate_hex_color(color: &str) -> Result<(), ColorError> {
    parse_hex(color).map(|_| ())
}

/// Validates every hex-valued token of a palette. Other colour notations
/// (`rgba(...)`, named colours) are passed through.
pub fn validate_palette(palette: &ColorPalette) -> Result<(), ColorError> {
    palette
        .present()
        .filter(|(_, value)| value.starts_with('#'))
        .try_for_each(|(_, value)| validate_hex_color(value))
}

/// Checks heading text against the section background.
/// Uses WCAG 2.0 AA (4.5:1 for normal text).
pub fn check_heading_contrast(palette: &ColorPalette) -> Result<(), ColorError> {
    let (Some(bg), Some(heading)) = (palette.get("bg"), palette.get("heading")) else {
        return Ok(());
    };

    let ratio = contrast_ratio(parse_hex(bg)?, parse_hex(heading)?);
    if ratio < 4.5 {
        return Err(ColorError::InsufficientContrast {
            actual: ratio,
            required: 4.5,
        });
    }
    Ok(())
}

/// Parse a hex colour string to RGB, ignoring any alpha channel
fn parse_hex(color: &str) -> Result<(u8, u8, u8), ColorError> {
    let invalid = || ColorError::InvalidHexColor(color.to_string());

    let digits = color.strip_prefix('#').ok_or_else(invalid)?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
    match digits.len() {
        3 => {
            let expand = |i: usize| channel(&digits[i..i + 1].repeat(2));
            Ok((expand(0)?, expand(1)?, expand(2)?))
        }
        6 | 8 => Ok((
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        )),
        _ => Err(invalid()),
    }
}

/// Calculate relative luminance of a color (WCAG formula)
fn relative_luminance(color: (u8, u8, u8)) -> f64 {
    let (r, g, b) = color;

    let r = srgb_to_linear(r as f64 / 255.0);
    let g = srgb_to_linear(g as f64 / 255.0);
    let b = srgb_to_linear(b as f64 / 255.0);

    0.2126 * r + 0.7152 * g + 0.0722 * b
}

fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn contrast_ratio(c1: (u8, u8, u8), c2: (u8, u8, u8)) -> f64 {
    let l1 = relative_luminance(c1);
    let l2 = relative_luminance(c2);
    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
    (lighter + 0.05) / (darker + 0.05)
}
