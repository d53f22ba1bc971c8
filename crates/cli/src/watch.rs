use std::path::PathBuf;
use std::time::Duration;

use argallery_core::manifest;
use argallery_core::scan::{self, AssetKind};
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher as NotifyWatcher};
use tokio::sync::mpsc;
use tracing::{error, info};

/// Does this change event touch a file the scanner would pick up? Editor
/// temp files and the manifest's own writes never trigger a rebuild.
fn is_relevant(event: &Event) -> bool {
    event.paths.iter().any(|path| {
        path.file_name()
            .and_then(|name| name.to_str())
            .map(|name| scan::classify_extension(name) != AssetKind::Ignored)
            .unwrap_or(false)
    })
}

pub async fn run(model_dir: PathBuf, output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    // Build once up front so the gallery never serves a stale manifest
    // while the watcher runs.
    info!("Initial build of {}...", model_dir.display());
    let report = manifest::build_manifest(&model_dir, &output).await?;
    info!("Initial manifest: {} entries.", report.total);

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = tx.send(res);
        },
        Config::default(),
    )?;
    // The model directory is flat; nothing below the first level matters.
    watcher.watch(&model_dir, RecursiveMode::NonRecursive)?;

    info!("Watching {} for changes.", model_dir.display());
    info!("Press Ctrl+C to stop.");

    let mut pending_events: Vec<Event> = Vec::new();
    let debounce_interval = Duration::from_millis(500);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                break;
            }
            event = rx.recv() => {
                match event {
                    Some(Ok(e)) => {
                        if is_relevant(&e) {
                            pending_events.push(e);
                        }
                    }
                    Some(Err(e)) => error!("Watch error: {e}"),
                    None => break,
                }
            }
            _ = tokio::time::sleep(debounce_interval), if !pending_events.is_empty() => {
                let batched = pending_events.len();
                pending_events.clear();
                info!("Detected {batched} change events. Rebuilding...");
                match manifest::build_manifest(&model_dir, &output).await {
                    Ok(report) => info!("Manifest updated: {} entries.", report.total),
                    Err(err) => error!("Rebuild failed: {err}"),
                }
            }
        }
    }

    info!("Watcher stopped.");
    Ok(())
}
