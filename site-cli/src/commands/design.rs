//! Design Commands
//!
//! Inspect section colours, layouts and the page-wide style.

use anyhow::{bail, Result};
use site_core::design::check_heading_contrast;
use site_core::Site;

use crate::display;

/// Shows the active colours of a section.
///
/// Uses the persisted snapshot, refreshed first when the remote answers.
pub async fn colors(site: &Site, section: &str) {
    site.design().refresh().await;
    let palette = site.design().active_colors(section);

    display::display_palette(section, &palette);
    if let Err(e) = check_heading_contrast(&palette) {
        display::warning(&format!("Heading colour: {}", e));
    }
}

/// Shows the active layout of a section.
pub async fn layout(site: &Site, section: &str) {
    site.design().refresh().await;
    let presets = site.design().presets(section);
    let active = presets.iter().find(|p| p.is_active);

    println!("{}", site.design().active_layout(section));
    match active {
        Some(preset) => display::info(&format!(
            "From preset {} of {}",
            preset.preset_number,
            presets.len()
        )),
        None => display::info("Built-in layout (no active preset)"),
    }
}

/// Fetches every preset and prints the resulting style variables.
pub async fn refresh(site: &Site) -> Result<()> {
    if !site.design().refresh().await {
        bail!("Could not fetch design presets; the cached design is unchanged");
    }

    display::success(&format!(
        "Loaded presets for {} sections",
        site.design().sections().len()
    ));
    display::display_style(site.style());
    Ok(())
}
