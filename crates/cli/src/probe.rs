use std::path::PathBuf;

use argallery_core::launch::PageContext;
use argallery_core::session::{GallerySession, LaunchOutcome};
use serde_json::json;
use tracing::warn;

pub async fn run(
    user_agent: String,
    manifest: PathBuf,
    page: String,
    model: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = GallerySession::new(manifest, &user_agent);
    session.reload().await?;
    let page = PageContext::parse(&page)?;

    let catalog = session.catalog().await;
    let mut results = Vec::new();
    for entry in catalog
        .items
        .iter()
        .filter(|e| model.as_deref().map_or(true, |id| e.id == id))
    {
        let availability = session.availability(entry);
        let launch = match session.try_launch(entry, &page, Some(&entry.display_name))? {
            LaunchOutcome::Launched(target) => Some(target),
            LaunchOutcome::Blocked(_) => None,
        };
        results.push(json!({
            "id": entry.id,
            "displayName": entry.display_name,
            "coverage": entry.coverage().map(|c| c.label()),
            "availability": availability,
            "launch": launch,
        }));
    }

    if let Some(id) = &model {
        if results.is_empty() {
            warn!("model '{id}' not found in the manifest");
        }
    }

    let payload = json!({
        "capabilities": session.capabilities(),
        "page": page.url().as_str(),
        "status": session.status_line().await,
        "results": results,
    });
    println!("{}", serde_json::to_string_pretty(&payload)?);

    Ok(())
}
