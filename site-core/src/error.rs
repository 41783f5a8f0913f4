// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error Types
//!
//! Unified error type for admin-facing operations. Reads never produce
//! these; they fall back to defaults instead.

use thiserror::Error;

use crate::design::ColorError;
use crate::local::LocalStorageError;
use crate::remote::RemoteError;
use crate::session::SessionError;

/// Unified error type for site operations.
#[derive(Error, Debug)]
pub enum SiteError {
    /// Remote store operation failed.
    #[error("remote store error: {0}")]
    Remote(#[from] RemoteError),

    /// Local storage operation failed.
    #[error("local storage error: {0}")]
    Local(#[from] LocalStorageError),

    /// Admin session operation failed.
    #[error("session error: {0}")]
    Session(#[from] SessionError),

    /// Colour validation failed.
    #[error("color error: {0}")]
    Color(#[from] ColorError),
}

/// Result type for site operations.
pub type SiteResult<T> = Result<T, SiteError>;
