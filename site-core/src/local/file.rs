// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! File-backed local storage
//!
//! One file per key inside a `local/` directory, written atomically so a
//! crash never leaves a half-written snapshot behind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{LocalStorage, LocalStorageError};

/// Local storage persisted to a directory on disk
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create a file storage at the given data path
    ///
    /// Creates a `local/` subdirectory if it doesn't exist.
    pub fn new(storage_path: &Path) -> Result<Self, LocalStorageError> {
        let dir = storage_path.join("local");
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Directory holding the stored values
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn item_path(&self, key: &str) -> PathBuf {
        // Sanitize the key to prevent path traversal
        let safe_key = key
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect::<String>();
        self.dir.join(format!("{}.json", safe_key))
    }
}

impl LocalStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, LocalStorageError> {
        match fs::read_to_string(self.item_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), LocalStorageError> {
        atomic_write(&self.item_path(key), value.as_bytes())
    }

    fn remove_item(&self, key: &str) -> Result<(), LocalStorageError> {
        match fs::remove_file(self.item_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Atomic file write (write to temp, then rename)
fn atomic_write(path: &Path, data: &[u8]) -> Result<(), LocalStorageError> {
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, data)?;
    fs::rename(&temp_path, path)?;
    Ok(())
}
