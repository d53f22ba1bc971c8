//! Gallery session: one visitor's environment plus the shared catalog.
//!
//! The catalog lives behind an `Arc<RwLock<Arc<_>>>`: readers clone the
//! inner `Arc` and work on an immutable snapshot while a reload swaps in a
//! fresh one. A failed reload leaves the previous snapshot in place.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::SecondsFormat;
use tokio::sync::RwLock;
use tracing::info;

use crate::availability::{self, AvailabilityResult};
use crate::catalog::{Catalog, CatalogEntry};
use crate::environment::{self, CapabilityVector};
use crate::error::{GalleryError, Result};
use crate::launch::{self, LaunchTarget, PageContext};

/// Outcome of a user-initiated launch attempt. Unsupported environments are
/// a normal outcome; the caller surfaces the availability text instead of
/// navigating.
#[derive(Debug, Clone, PartialEq)]
pub enum LaunchOutcome {
    Launched(LaunchTarget),
    Blocked(AvailabilityResult),
}

pub struct GallerySession {
    capabilities: CapabilityVector,
    manifest_path: PathBuf,
    current: Arc<RwLock<Arc<Catalog>>>,
}

impl GallerySession {
    /// A new session starts on an empty catalog; call [`Self::reload`] to
    /// populate it.
    pub fn new(manifest_path: impl Into<PathBuf>, signature: &str) -> Self {
        Self {
            capabilities: CapabilityVector::from_signature(signature),
            manifest_path: manifest_path.into(),
            current: Arc::new(RwLock::new(Arc::new(Catalog::empty()))),
        }
    }

    pub fn capabilities(&self) -> &CapabilityVector {
        &self.capabilities
    }

    /// Cheap snapshot of the current catalog: an `Arc` clone, never a deep
    /// copy. Snapshots stay valid across later reloads.
    pub async fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&*self.current.read().await)
    }

    /// Re-read the manifest from disk and swap it in. Returns the entry
    /// count; on any failure the previous snapshot stays current.
    pub async fn reload(&self) -> Result<usize> {
        let raw = tokio::fs::read(&self.manifest_path).await.map_err(|e| {
            GalleryError::CatalogFetch {
                path: self.manifest_path.clone(),
                reason: e.to_string(),
            }
        })?;
        let catalog: Catalog =
            serde_json::from_slice(&raw).map_err(|e| GalleryError::CatalogFetch {
                path: self.manifest_path.clone(),
                reason: e.to_string(),
            })?;

        let total = catalog.items.len();
        {
            let mut current = self.current.write().await;
            *current = Arc::new(catalog);
        }
        info!(
            "catalog reloaded: {} entries from {}",
            total,
            self.manifest_path.display()
        );
        Ok(total)
    }

    /// Availability of one entry for this session's environment.
    pub fn availability(&self, entry: &CatalogEntry) -> AvailabilityResult {
        availability::resolve(entry, &self.capabilities)
    }

    /// Resolve and, when available, build the launch target. `title` labels
    /// the Scene Viewer header on Android; other platforms ignore it.
    pub fn try_launch(
        &self,
        entry: &CatalogEntry,
        page: &PageContext,
        title: Option<&str>,
    ) -> Result<LaunchOutcome> {
        let availability = self.availability(entry);
        if !availability.available {
            return Ok(LaunchOutcome::Blocked(availability));
        }
        let target =
            launch::build_launch_target(entry, &self.capabilities, &availability, page, title)?;
        Ok(LaunchOutcome::Launched(target))
    }

    /// One-line summary for a status bar: entry count, generation time and
    /// the environment hint when one applies.
    pub async fn status_line(&self) -> String {
        let catalog = self.catalog().await;
        let generated = catalog
            .generated_at
            .to_rfc3339_opts(SecondsFormat::Secs, true);
        let base = format!("{} models, generated {generated}", catalog.total);
        match environment::environment_hint(&self.capabilities) {
            Some(hint) => format!("{base} - {hint}"),
            None => base,
        }
    }
}
