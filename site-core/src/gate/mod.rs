// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Cache generation gate
//!
//! Runs once at process start. Compares the remote cache generation token
//! with the last one seen locally; when they differ, every cached client
//! asset is purged and a full reload is forced so nothing stale survives a
//! deploy.

mod host;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

pub use host::{AssetHost, DirectoryAssetHost, HostError, MemoryAssetHost};

use crate::local::{LocalStorage, CACHE_VERSION_KEY};
use crate::remote::{RemoteStore, CACHE_VERSION_SETTING};

/// What the gate did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// The remote token could not be fetched; nothing was touched
    RemoteUnavailable,
    /// No local token existed; the remote one was stored
    FirstRun {
        /// Token now stored locally
        version: String,
    },
    /// Local and remote tokens match
    UpToDate {
        /// The shared token
        version: String,
    },
    /// Tokens differed; caches were purged and a reload was requested
    Purged {
        /// Token seen on the previous run
        previous: String,
        /// Token now served remotely
        current: String,
        /// Cache-storage entries deleted
        caches_deleted: usize,
        /// Worker registrations removed
        workers_unregistered: usize,
        /// False if any purge step failed. The new token is then not
        /// stored, so the next start purges again.
        complete: bool,
    },
    /// The gate already ran in this process
    AlreadyRan,
}

impl GateOutcome {
    /// Returns true if the gate requested a reload.
    pub fn reloaded(&self) -> bool {
        matches!(self, GateOutcome::Purged { .. })
    }
}

/// Startup step comparing cache generation tokens
pub struct CacheGenerationGate {
    remote: Arc<dyn RemoteStore>,
    local: Arc<dyn LocalStorage>,
    host: Arc<dyn AssetHost>,
    ran: AtomicBool,
}

impl CacheGenerationGate {
    /// Creates a gate over its three collaborators.
    pub fn new(
        remote: Arc<dyn RemoteStore>,
        local: Arc<dyn LocalStorage>,
        host: Arc<dyn AssetHost>,
    ) -> Self {
        Self {
            remote,
            local,
            host,
            ran: AtomicBool::new(false),
        }
    }

    /// Runs the gate. Only the first call per gate does any work.
    pub async fn run(&self) -> GateOutcome {
        if self.ran.swap(true, Ordering::SeqCst) {
            return GateOutcome::AlreadyRan;
        }

        let current = match self.remote.fetch_setting(CACHE_VERSION_SETTING).await {
            Ok(version) => version,
            Err(e) => {
                debug!(error = %e, "cache version unavailable, skipping gate");
                return GateOutcome::RemoteUnavailable;
            }
        };

        let previous = self.local.get_item(CACHE_VERSION_KEY).unwrap_or_else(|e| {
            warn!(error = %e, "could not read local cache version");
            None
        });

        match previous {
            Some(previous) if previous != current => self.purge(previous, current).await,
            Some(_) => {
                self.persist(&current);
                GateOutcome::UpToDate { version: current }
            }
            None => {
                self.persist(&current);
                GateOutcome::FirstRun { version: current }
            }
        }
    }

    async fn purge(&self, previous: String, current: String) -> GateOutcome {
        info!(%previous, %current, "cache version changed, purging cached assets");
        let mut complete = true;

        let mut caches_deleted = 0;
        match self.host.cache_names().await {
            Ok(names) => {
                for name in names {
                    match self.host.delete_cache(&name).await {
                        Ok(true) => caches_deleted += 1,
                        Ok(false) => {}
                        Err(e) => {
                            warn!(cache = %name, error = %e, "could not delete cache");
                            complete = false;
                        }
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, "could not enumerate caches");
                complete = false;
            }
        }

        let mut workers_unregistered = 0;
        match self.host.worker_registrations().await {
            Ok(ids) => {
                for id in ids {
                    match self.host.unregister_worker(&id).await {
                        Ok(true) => workers_unregistered += 1,
                        Ok(false) => {}
                        Err(e) => {
                            warn!(worker = %id, error = %e, "could not unregister worker");
                            complete = false;
                        }
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, "could not enumerate worker registrations");
                complete = false;
            }
        }

        if complete {
            self.persist(&current);
        } else {
            warn!("purge incomplete, keeping previous cache version for the next start");
        }

        info!(caches_deleted, workers_unregistered, "reloading");
        self.host.reload();

        GateOutcome::Purged {
            previous,
            current,
            caches_deleted,
            workers_unregistered,
            complete,
        }
    }

    fn persist(&self, version: &str) {
        if let Err(e) = self.local.set_item(CACHE_VERSION_KEY, version) {
            warn!(error = %e, "could not persist cache version");
        }
    }
}
