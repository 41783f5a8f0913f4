//! Display Helpers
//!
//! Terminal output formatting and styling.

use console::{style, Style};
use site_core::{ColorPalette, StyleSheet};

/// Prints a success message.
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Prints a warning message.
pub fn warning(msg: &str) {
    println!("{} {}", style("⚠").yellow().bold(), msg);
}

/// Prints an info message.
pub fn info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

/// Displays a section palette, one token per line.
pub fn display_palette(section: &str, palette: &ColorPalette) {
    let width = 40;

    println!("{}", "─".repeat(width));
    println!("  {}", style(section).bold().cyan());
    println!("{}", "─".repeat(width));

    if palette.is_empty() {
        println!("  {}", style("(no colours)").dim());
    } else {
        let token_style = Style::new().dim();
        for (token, value) in palette.present() {
            println!("  {:14} {}", token_style.apply_to(token), value);
        }
    }

    println!("{}", "─".repeat(width));
}

/// Displays the page-wide style variables as CSS.
pub fn display_style(sheet: &StyleSheet) {
    match style_css(sheet) {
        Some(css) => println!("{}", css),
        None => println!("  {}", style("(no variables set)").dim()),
    }
}

/// The sheet's CSS, or `None` when neither a background nor a variable is set.
fn style_css(sheet: &StyleSheet) -> Option<String> {
    if sheet.background().is_none() && sheet.variables().is_empty() {
        return None;
    }
    Some(sheet.to_css())
}
