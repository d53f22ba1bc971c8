//! Model directory scanner.
//!
//! Walks one flat directory, classifies every file by extension and groups
//! the survivors by base name. File metadata (size, mtime) is gathered
//! concurrently and merged in file-name order, so the result is independent
//! of both enumeration order and stat completion order.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::catalog::{AssetDescriptor, SizeInfo};
use crate::error::{GalleryError, Result};

/// Recognized thumbnail extensions, in selection-priority order.
pub const THUMBNAIL_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "webp", "avif"];

/// Role a file plays in the model directory, decided by extension alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// `.usdz`, consumed by Apple Quick Look.
    IosModel,
    /// `.glb`, consumed by Google Scene Viewer.
    AndroidModel,
    Thumbnail,
    /// Anything else; never contributes to the catalog.
    Ignored,
}

/// Classify a file name. Matching is case-insensitive; names without an
/// extension are ignored.
pub fn classify_extension(file_name: &str) -> AssetKind {
    let ext = match Path::new(file_name).extension().and_then(|e| e.to_str()) {
        Some(ext) => ext.to_ascii_lowercase(),
        None => return AssetKind::Ignored,
    };
    match ext.as_str() {
        "usdz" => AssetKind::IosModel,
        "glb" => AssetKind::AndroidModel,
        _ if THUMBNAIL_EXTENSIONS.contains(&ext.as_str()) => AssetKind::Thumbnail,
        _ => AssetKind::Ignored,
    }
}

/// Base name used as the grouping key and entry id: the file name with its
/// final extension stripped, case preserved.
pub fn base_name(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(file_name)
        .to_string()
}

/// Files sharing one base name, accumulated during a scan.
#[derive(Debug, Clone, Default)]
pub struct ModelGroup {
    pub ios: Option<AssetDescriptor>,
    pub android: Option<AssetDescriptor>,
    /// Thumbnail candidates; the scanner stores them in name order and
    /// [`Self::select_thumbnail`] picks the winner.
    pub thumbnails: Vec<String>,
}

impl ModelGroup {
    /// A group reaches the catalog only with at least one platform asset;
    /// orphan thumbnails never become entries.
    pub fn has_platform_asset(&self) -> bool {
        self.ios.is_some() || self.android.is_some()
    }

    /// Primary asset for display metadata. iOS wins when both exist.
    pub fn primary_descriptor(&self) -> Option<&AssetDescriptor> {
        self.ios.as_ref().or(self.android.as_ref())
    }

    /// Deterministic thumbnail pick: fixed extension priority rather than
    /// whatever order the directory happened to enumerate in. Ties within
    /// one extension fall to the first candidate in list order.
    pub fn select_thumbnail(&self) -> Option<&str> {
        for wanted in THUMBNAIL_EXTENSIONS {
            let hit = self.thumbnails.iter().find(|name| {
                Path::new(name)
                    .extension()
                    .and_then(|e| e.to_str())
                    .map(|ext| ext.eq_ignore_ascii_case(wanted))
                    .unwrap_or(false)
            });
            if let Some(name) = hit {
                return Some(name);
            }
        }
        None
    }
}

/// Everything one directory scan produced.
#[derive(Debug)]
pub struct DirectoryScan {
    /// Last segment of the scanned directory. Published paths are
    /// `<route_prefix>/<file name>`, relative to the site root.
    pub route_prefix: String,
    pub groups: BTreeMap<String, ModelGroup>,
}

pub struct Scanner;

impl Scanner {
    /// Scan a flat model directory. Subdirectories and unrecognized files
    /// are skipped with a debug line; a missing directory is an error.
    pub async fn scan(dir: &Path) -> Result<DirectoryScan> {
        let mut read_dir = match tokio::fs::read_dir(dir).await {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(GalleryError::DirectoryNotFound {
                    path: dir.to_path_buf(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        let route_prefix = dir
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("model")
            .to_string();

        // First pass: classify names. Stat calls happen concurrently below.
        let mut models: Vec<(String, AssetKind, PathBuf)> = Vec::new();
        let mut groups: BTreeMap<String, ModelGroup> = BTreeMap::new();
        while let Some(entry) = read_dir.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                debug!("skipping {:?}: not a regular file", entry.file_name());
                continue;
            }
            let file_name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    debug!("skipping non-UTF-8 file name {raw:?}");
                    continue;
                }
            };
            match classify_extension(&file_name) {
                AssetKind::Ignored => {
                    debug!("ignoring {file_name}: unrecognized extension");
                }
                AssetKind::Thumbnail => {
                    // Thumbnails publish only their path; no stat needed.
                    groups
                        .entry(base_name(&file_name))
                        .or_default()
                        .thumbnails
                        .push(file_name);
                }
                kind => {
                    let path = entry.path();
                    models.push((file_name, kind, path));
                }
            }
        }

        // Readdir order is not stable across runs; name-ordered candidate
        // lists keep thumbnail selection and diagnostics reproducible.
        for group in groups.values_mut() {
            group.thumbnails.sort();
        }

        let mut stats: JoinSet<std::io::Result<(String, AssetKind, u64, SystemTime)>> =
            JoinSet::new();
        for (file_name, kind, path) in models {
            stats.spawn(async move {
                let meta = tokio::fs::metadata(&path).await?;
                let modified = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);
                Ok((file_name, kind, meta.len(), modified))
            });
        }

        let mut stat_results = Vec::with_capacity(stats.len());
        while let Some(joined) = stats.join_next().await {
            stat_results.push(joined.map_err(|e| GalleryError::Internal(e.to_string()))??);
        }
        // Completion order varies run to run; merging in file-name order
        // keeps the catalog identical across rebuilds of an unchanged
        // directory, even when case-variant files contend for one slot.
        stat_results.sort_by(|a, b| a.0.cmp(&b.0));

        let mut model_files = 0usize;
        for (file_name, kind, len, modified) in stat_results {
            let descriptor = AssetDescriptor {
                path: format!("{route_prefix}/{file_name}"),
                size: SizeInfo::from_bytes(len),
                updated_at: DateTime::<Utc>::from(modified),
                file_name,
            };
            let group = groups.entry(base_name(&descriptor.file_name)).or_default();
            let slot = match kind {
                AssetKind::IosModel => &mut group.ios,
                AssetKind::AndroidModel => &mut group.android,
                AssetKind::Thumbnail | AssetKind::Ignored => continue,
            };
            if let Some(existing) = slot {
                warn!(
                    "duplicate model for '{}': keeping '{}', ignoring '{}'",
                    base_name(&descriptor.file_name),
                    existing.file_name,
                    descriptor.file_name
                );
            } else {
                *slot = Some(descriptor);
            }
            model_files += 1;
        }

        info!(
            "scanned {}: {} model files across {} groups",
            dir.display(),
            model_files,
            groups.len()
        );

        Ok(DirectoryScan {
            route_prefix,
            groups,
        })
    }
}
