// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Asset hosts
//!
//! An asset host owns the cached client assets the gate may have to purge:
//! named cache-storage entries and background worker registrations. It also
//! performs the final reload.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use thiserror::Error;

/// Cached client assets and the reload hook.
#[async_trait]
pub trait AssetHost: Send + Sync {
    /// Names of every cache-storage entry.
    async fn cache_names(&self) -> Result<Vec<String>, HostError>;

    /// Deletes a cache-storage entry. Returns false if it was already gone.
    async fn delete_cache(&self, name: &str) -> Result<bool, HostError>;

    /// Identifiers of every active worker registration.
    async fn worker_registrations(&self) -> Result<Vec<String>, HostError>;

    /// Unregisters a worker. Returns false if it was already gone.
    async fn unregister_worker(&self, id: &str) -> Result<bool, HostError>;

    /// Forces a full, non-cached reload.
    fn reload(&self);

    /// Returns true once for each reload requested since the last call.
    /// The entry point polls this to restart its resolvers.
    fn take_reload_request(&self) -> bool;
}

/// Errors raised by an asset host
#[derive(Debug, Error)]
pub enum HostError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Host refused the operation
    #[error("Host unavailable: {0}")]
    Unavailable(String),
}

/// Asset host backed by directories on disk
///
/// Subdirectories of `caches/` are cache-storage entries; files in
/// `workers/` are worker registrations. A reload only raises a flag the
/// entry point picks up with [`AssetHost::take_reload_request`].
pub struct DirectoryAssetHost {
    caches_dir: PathBuf,
    workers_dir: PathBuf,
    reload_requested: AtomicBool,
}

impl DirectoryAssetHost {
    /// Creates a host rooted at the given data path.
    pub fn new(storage_path: &Path) -> Self {
        Self {
            caches_dir: storage_path.join("caches"),
            workers_dir: storage_path.join("workers"),
            reload_requested: AtomicBool::new(false),
        }
    }

    /// Directory holding cache-storage entries
    pub fn caches_dir(&self) -> &Path {
        &self.caches_dir
    }

    /// Directory holding worker registrations
    pub fn workers_dir(&self) -> &Path {
        &self.workers_dir
    }

    fn entry_path(dir: &Path, name: &str) -> Option<PathBuf> {
        // Only plain names, never paths
        let candidate = Path::new(name);
        match candidate.file_name() {
            Some(file_name) if file_name == candidate.as_os_str() => Some(dir.join(name)),
            _ => None,
        }
    }
}

fn list_entries(dir: &Path, want_dirs: bool) -> Result<Vec<String>, HostError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_dir() == want_dirs {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

#[async_trait]
impl AssetHost for DirectoryAssetHost {
    async fn cache_names(&self) -> Result<Vec<String>, HostError> {
        list_entries(&self.caches_dir, true)
    }

    async fn delete_cache(&self, name: &str) -> Result<bool, HostError> {
        let Some(path) = Self::entry_path(&self.caches_dir, name) else {
            return Ok(false);
        };
        match fs::remove_dir_all(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn worker_registrations(&self) -> Result<Vec<String>, HostError> {
        list_entries(&self.workers_dir, false)
    }

    async fn unregister_worker(&self, id: &str) -> Result<bool, HostError> {
        let Some(path) = Self::entry_path(&self.workers_dir, id) else {
            return Ok(false);
        };
        match fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn reload(&self) {
        self.reload_requested.store(true, Ordering::SeqCst);
    }

    fn take_reload_request(&self) -> bool {
        self.reload_requested.swap(false, Ordering::SeqCst)
    }
}

#[derive(Debug, Default)]
struct HostState {
    caches: Vec<String>,
    workers: Vec<String>,
    failing: bool,
}

/// In-memory asset host that records purges and reloads
#[derive(Debug, Default)]
pub struct MemoryAssetHost {
    state: Mutex<HostState>,
    reloads: AtomicUsize,
    reload_pending: AtomicBool,
}

impl MemoryAssetHost {
    /// Creates a host with the given cache entries and worker registrations.
    pub fn new(caches: &[&str], workers: &[&str]) -> Self {
        Self {
            state: Mutex::new(HostState {
                caches: caches.iter().map(|s| s.to_string()).collect(),
                workers: workers.iter().map(|s| s.to_string()).collect(),
                failing: false,
            }),
            reloads: AtomicUsize::new(0),
            reload_pending: AtomicBool::new(false),
        }
    }

    fn state(&self) -> MutexGuard<'_, HostState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Makes cache deletion fail until reset.
    pub fn set_failing(&self, failing: bool) {
        self.state().failing = failing;
    }

    /// Remaining cache entries.
    pub fn caches(&self) -> Vec<String> {
        self.state().caches.clone()
    }

    /// Remaining worker registrations.
    pub fn workers(&self) -> Vec<String> {
        self.state().workers.clone()
    }

    /// Number of reloads requested.
    pub fn reloads(&self) -> usize {
        self.reloads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AssetHost for MemoryAssetHost {
    async fn cache_names(&self) -> Result<Vec<String>, HostError> {
        Ok(self.caches())
    }

    async fn delete_cache(&self, name: &str) -> Result<bool, HostError> {
        let mut state = self.state();
        if state.failing {
            return Err(HostError::Unavailable("cache storage is locked".into()));
        }
        let before = state.caches.len();
        state.caches.retain(|c| c != name);
        Ok(state.caches.len() != before)
    }

    async fn worker_registrations(&self) -> Result<Vec<String>, HostError> {
        Ok(self.workers())
    }

    async fn unregister_worker(&self, id: &str) -> Result<bool, HostError> {
        let mut state = self.state();
        let before = state.workers.len();
        state.workers.retain(|w| w != id);
        Ok(state.workers.len() != before)
    }

    fn reload(&self) {
        self.reloads.fetch_add(1, Ordering::SeqCst);
        self.reload_pending.store(true, Ordering::SeqCst);
    }

    fn take_reload_request(&self) -> bool {
        self.reload_pending.swap(false, Ordering::SeqCst)
    }
}
