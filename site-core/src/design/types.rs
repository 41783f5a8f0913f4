// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Design preset definitions

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Named colour tokens of a preset (e.g. "bg", "accent", "cardBorder").
///
/// Tokens may be present with no value; [`ColorPalette::get`] treats null
/// and empty values as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorPalette(BTreeMap<String, Option<String>>);

impl ColorPalette {
    /// Creates an empty palette.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a palette from token/value pairs.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self(
            pairs
                .iter()
                .map(|(token, value)| (token.to_string(), Some(value.to_string())))
                .collect(),
        )
    }

    /// Sets a token, returning the palette for chaining.
    pub fn with(mut self, token: &str, value: &str) -> Self {
        self.0.insert(token.to_string(), Some(value.to_string()));
        self
    }

    /// Value of a token, if it has a non-empty one.
    pub fn get(&self, token: &str) -> Option<&str> {
        self.0
            .get(token)
            .and_then(|value| value.as_deref())
            .filter(|value| !value.trim().is_empty())
    }

    /// Tokens that carry a value, in token order.
    pub fn present(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().filter_map(|(token, value)| {
            value
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .map(|v| (token.as_str(), v))
        })
    }

    /// Returns true if at least one token carries a value.
    pub fn has_values(&self) -> bool {
        self.present().next().is_some()
    }

    /// Number of declared tokens, including empty ones.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no tokens are declared.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One colour scheme and layout choice for a page section
///
/// Several presets can exist per section; at most one should be active.
/// Nothing enforces that on write, and readers take the first active one
/// in preset order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignPreset {
    /// Section this preset belongs to
    pub section_key: String,
    /// Ordering among the section's presets
    pub preset_number: i64,
    /// Whether this preset is the one in use
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_active: bool,
    /// Colour tokens
    #[serde(default, deserialize_with = "null_as_default")]
    pub colors: ColorPalette,
    /// Layout variant tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
}

impl DesignPreset {
    /// Creates an inactive preset with no colours and no layout.
    pub fn new(section_key: &str, preset_number: i64) -> Self {
        Self {
            section_key: section_key.to_string(),
            preset_number,
            is_active: false,
            colors: ColorPalette::new(),
            layout: None,
        }
    }

    /// Marks the preset active.
    pub fn active(mut self) -> Self {
        self.is_active = true;
        self
    }

    /// Sets the colour tokens.
    pub fn with_colors(mut self, colors: ColorPalette) -> Self {
        self.colors = colors;
        self
    }

    /// Sets the layout tag.
    pub fn with_layout(mut self, layout: &str) -> Self {
        self.layout = Some(layout.to_string());
        self
    }
}

/// Presets grouped by section, each list in preset order
pub type PresetGroups = BTreeMap<String, Vec<DesignPreset>>;

/// Groups preset rows by section, keeping the row order within a section.
pub fn group_by_section(rows: Vec<DesignPreset>) -> PresetGroups {
    let mut groups = PresetGroups::new();
    for preset in rows {
        groups
            .entry(preset.section_key.clone())
            .or_default()
            .push(preset);
    }
    groups
}

/// First active preset in list order.
pub fn active_preset(presets: &[DesignPreset]) -> Option<&DesignPreset> {
    presets.iter().find(|preset| preset.is_active)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
