//! CLI Commands

pub mod content;
pub mod design;
pub mod session;
