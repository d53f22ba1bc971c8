use std::path::PathBuf;
use tracing::info;

pub async fn run(model_dir: PathBuf, output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    info!("Scanning model directory: {}...", model_dir.display());

    let report = argallery_core::manifest::build_manifest(&model_dir, &output).await?;

    info!("Manifest complete!");
    info!("Entries: {}", report.total);
    if report.discarded > 0 {
        info!("Discarded (no model file): {}", report.discarded);
    }
    if report.missing_thumbnails > 0 {
        info!("Entries without thumbnails: {}", report.missing_thumbnails);
    }
    info!(
        "Wrote {} in {:?}",
        report.output.display(),
        report.duration
    );

    Ok(())
}
