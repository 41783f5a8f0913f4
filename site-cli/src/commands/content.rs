//! Content Commands
//!
//! Read and edit per-section content.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value;
use site_core::Site;

use crate::display;

/// Prints the content of a section.
pub async fn get(site: &Site, key: &str) -> Result<()> {
    match site.content().resolve(key).await {
        Some(content) => println!("{}", serde_json::to_string_pretty(&content)?),
        None => {
            display::warning(&format!("No content for section '{}'", key));
            display::info("The section renders its built-in fallback copy");
        }
    }
    Ok(())
}

/// Replaces the content of a section. Requires an admin session.
pub async fn set(site: &Site, key: &str, file: &Path) -> Result<()> {
    let Some(session) = site.admin_session()? else {
        bail!("No admin session. Run 'site session start <user>' first.");
    };

    let content = read_content(file)?;
    let saved = site.save_content(key, content).await?;

    display::success(&format!("Saved '{}' as {}", key, session.user));
    println!("{}", serde_json::to_string_pretty(&saved)?);
    Ok(())
}

fn read_content(file: &Path) -> Result<Value> {
    let raw = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let content: Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", file.display()))?;

    if !content.is_object() && !content.is_array() {
        bail!("Section content must be a JSON object or array");
    }
    Ok(content)
}
