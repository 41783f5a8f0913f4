//! CLI Configuration

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use site_core::gate::DirectoryAssetHost;
use site_core::local::FileStorage;
use site_core::remote::MemoryStore;
use site_core::{GateOutcome, Site, SiteConfig};
use tracing::info;

use crate::display;

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Runtime configuration handed to the site.
    pub site: SiteConfig,
    /// Skip the hosted database entirely.
    pub offline: bool,
}

impl CliConfig {
    /// Builds the configuration from the environment, then applies
    /// command-line overrides.
    pub fn new(
        data_dir: Option<PathBuf>,
        remote_url: Option<String>,
        anon_key: Option<String>,
        offline: bool,
    ) -> Self {
        let mut site = SiteConfig::from_env();

        site.storage_path = data_dir.unwrap_or_else(default_data_dir);
        if let Some(url) = remote_url {
            site.remote_url = url;
        }
        if let Some(key) = anon_key {
            site.anon_key = key;
        }

        Self { site, offline }
    }

    /// Returns the data directory.
    pub fn data_dir(&self) -> &PathBuf {
        &self.site.storage_path
    }

    /// Opens the site. Offline runs get an empty in-memory remote, so every
    /// fetch fails and resolvers fall back to local state and defaults.
    pub fn open_site(&self) -> Result<Site> {
        if !self.offline {
            return Ok(Site::open(self.site.clone())?);
        }

        info!(data_dir = ?self.data_dir(), "running offline");
        let local = Arc::new(FileStorage::new(self.data_dir())?);
        let host = Arc::new(DirectoryAssetHost::new(self.data_dir()));
        Ok(Site::from_parts(
            self.site.clone(),
            Arc::new(MemoryStore::new()),
            local,
            host,
        ))
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("holding-site")
}

/// Tells the user what the startup gate did, when it matters.
pub fn report_gate(outcome: &GateOutcome) {
    match outcome {
        GateOutcome::Purged {
            current,
            caches_deleted,
            workers_unregistered,
            complete: true,
            ..
        } => display::info(&format!(
            "New deploy {} detected: cleared {} caches and {} workers",
            current, caches_deleted, workers_unregistered
        )),
        GateOutcome::Purged {
            complete: false, ..
        } => display::warning("Cached assets could not all be cleared; will retry next start"),
        GateOutcome::RemoteUnavailable
        | GateOutcome::FirstRun { .. }
        | GateOutcome::UpToDate { .. }
        | GateOutcome::AlreadyRan => {}
    }
}
