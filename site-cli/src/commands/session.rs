//! Session Commands
//!
//! Manage the locally stored admin session.

use anyhow::Result;
use site_core::Site;

use crate::display;

/// Shows the stored admin session.
pub fn show(site: &Site) -> Result<()> {
    match site.admin_session()? {
        Some(session) => {
            println!("  User:    {}", session.user);
            println!("  Expires: {}", session.expiry.format("%Y-%m-%d %H:%M UTC"));
        }
        None => display::info("No admin session"),
    }
    Ok(())
}

/// Starts an admin session for the configured lifetime.
pub fn start(site: &Site, user: &str) -> Result<()> {
    let session = site.begin_admin_session(user)?;
    display::success(&format!(
        "Signed in as {} until {}",
        session.user,
        session.expiry.format("%Y-%m-%d %H:%M UTC")
    ));
    Ok(())
}

/// Ends the admin session.
pub fn clear(site: &Site) -> Result<()> {
    site.end_admin_session()?;
    display::success("Signed out");
    Ok(())
}
