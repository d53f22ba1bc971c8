//! One-shot manifest build: scan, assemble, write.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::info;

use crate::assemble::{Assembler, Assembly};
use crate::catalog::Catalog;
use crate::error::Result;
use crate::scan::Scanner;

/// What a build did, for operator-facing summaries.
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// Entries written to the manifest.
    pub total: usize,
    /// Groups dropped for having no platform asset.
    pub discarded: usize,
    /// Entries published without a thumbnail.
    pub missing_thumbnails: usize,
    pub output: PathBuf,
    pub duration: Duration,
}

/// Scan and assemble without touching disk output. Used by the watcher and
/// by anything that wants the catalog in memory.
pub async fn build_catalog(model_dir: &Path) -> Result<Assembly> {
    let scan = Scanner::scan(model_dir).await?;
    Ok(Assembler::assemble(scan))
}

/// Full build: scan the model directory, assemble the catalog and write it
/// to `output` atomically.
pub async fn build_manifest(model_dir: &Path, output: &Path) -> Result<BuildReport> {
    let start = Instant::now();
    let assembly = build_catalog(model_dir).await?;
    write_catalog(&assembly.catalog, output).await?;

    let report = BuildReport {
        total: assembly.catalog.total,
        discarded: assembly.discarded,
        missing_thumbnails: assembly.missing_thumbnails,
        output: output.to_path_buf(),
        duration: start.elapsed(),
    };
    info!(
        "manifest written: {} entries -> {} in {:?}",
        report.total,
        output.display(),
        report.duration
    );
    Ok(report)
}

/// Serialize with two-space indentation and swap the file into place via a
/// temp sibling, so readers never observe a half-written manifest.
pub async fn write_catalog(catalog: &Catalog, output: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(catalog)?;

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let tmp = output.with_extension("tmp");
    tokio::fs::write(&tmp, json.as_bytes()).await?;
    tokio::fs::rename(&tmp, output).await?;
    Ok(())
}
