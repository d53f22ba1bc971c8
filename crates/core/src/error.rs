use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("model directory not found: {}", .path.display())]
    DirectoryNotFound { path: PathBuf },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catalog fetch failed for {}: {reason}", .path.display())]
    CatalogFetch { path: PathBuf, reason: String },
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, GalleryError>;
