// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Admin dashboard session
//!
//! The dashboard remembers who is signed in and until when. Checking
//! credentials happens elsewhere; this module only persists the outcome.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::local::{read_json, write_json, LocalStorage, LocalStorageError, ADMIN_SESSION_KEY};

/// A signed-in admin and the session's expiry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSession {
    /// Admin user name
    pub user: String,
    /// Moment the session stops being valid
    pub expiry: DateTime<Utc>,
}

impl AdminSession {
    /// Starts a session for `user` lasting `ttl` from `now`.
    pub fn start_at(user: &str, ttl: Duration, now: DateTime<Utc>) -> Result<Self, SessionError> {
        let ttl = chrono::Duration::from_std(ttl).map_err(|_| SessionError::InvalidTtl)?;
        let expiry = now.checked_add_signed(ttl).ok_or(SessionError::InvalidTtl)?;
        Ok(Self {
            user: user.to_string(),
            expiry,
        })
    }

    /// Starts a session for `user` lasting `ttl` from now.
    pub fn start(user: &str, ttl: Duration) -> Result<Self, SessionError> {
        Self::start_at(user, ttl, Utc::now())
    }

    /// Returns true if the session has not expired at `now`.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expiry
    }

    /// Loads the stored session if it is still valid at `now`.
    ///
    /// Expired sessions are removed; unreadable ones are treated as absent.
    pub fn load_at(
        storage: &dyn LocalStorage,
        now: DateTime<Utc>,
    ) -> Result<Option<Self>, SessionError> {
        let Some(session) = read_json::<Self>(storage, ADMIN_SESSION_KEY)? else {
            return Ok(None);
        };

        if session.is_valid_at(now) {
            Ok(Some(session))
        } else {
            storage.remove_item(ADMIN_SESSION_KEY)?;
            Ok(None)
        }
    }

    /// Loads the stored session if it is still valid now.
    pub fn load(storage: &dyn LocalStorage) -> Result<Option<Self>, SessionError> {
        Self::load_at(storage, Utc::now())
    }

    /// Persists the session.
    pub fn store(&self, storage: &dyn LocalStorage) -> Result<(), SessionError> {
        write_json(storage, ADMIN_SESSION_KEY, self)?;
        Ok(())
    }

    /// Removes any stored session.
    pub fn clear(storage: &dyn LocalStorage) -> Result<(), SessionError> {
        storage.remove_item(ADMIN_SESSION_KEY)?;
        Ok(())
    }
}

/// Errors that can occur with admin sessions
#[derive(Debug, Error)]
pub enum SessionError {
    /// Local storage error
    #[error("Storage error: {0}")]
    Storage(#[from] LocalStorageError),

    /// Session lifetime out of range
    #[error("Invalid session lifetime")]
    InvalidTtl,
}
