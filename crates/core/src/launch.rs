//! Launch target construction.
//!
//! Once the resolver has said "available", this module builds the concrete
//! thing to navigate to: a Quick Look href, a Scene Viewer intent URL, or a
//! plain download link. Calling it for an unavailable entry is a caller bug
//! and fails loudly.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;
use url::{Url, form_urlencoded};

use crate::availability::AvailabilityResult;
use crate::catalog::CatalogEntry;
use crate::environment::{CapabilityVector, Platform};
use crate::error::{GalleryError, Result};

/// Scene Viewer intent skeleton. The query is form-urlencoded; the fallback
/// URL in the fragment uses component encoding. Both encoders must match
/// what browsers produce or Android drops the intent on the floor.
const SCENE_VIEWER_ENDPOINT: &str = "intent://arvr.google.com/scene-viewer/1.0";
const SCENE_VIEWER_PACKAGE: &str = "com.google.ar.core";
const INTENT_ACTION: &str = "android.intent.action.VIEW";

/// Characters `encodeURIComponent` leaves bare; everything else gets
/// percent-escaped.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// The page a visitor is on. Relative catalog paths resolve against it, and
/// it doubles as the Scene Viewer browser fallback.
#[derive(Debug, Clone)]
pub struct PageContext {
    url: Url,
}

impl PageContext {
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    pub fn parse(raw: &str) -> std::result::Result<Self, url::ParseError> {
        Url::parse(raw).map(Self::new)
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Resolve a catalog-relative path the way a browser resolves
    /// `new URL(path, location.href)`.
    pub fn absolute(&self, path: &str) -> Result<Url> {
        self.url.join(path).map_err(|e| {
            GalleryError::Internal(format!(
                "cannot resolve '{path}' against {}: {e}",
                self.url
            ))
        })
    }
}

/// Concrete navigation the UI performs for one launch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LaunchTarget {
    /// Navigate the current context; Safari hands `.usdz` to Quick Look.
    QuickLook { href: String },
    /// Navigate to the intent URL; Chrome hands it to Scene Viewer.
    SceneViewer { intent: String },
    /// Open in a fresh browsing context, without opener access.
    Download { href: String },
}

/// Build the Scene Viewer intent URL for an absolute model URL. `page_url`
/// becomes the browser fallback when ARCore is missing.
pub fn scene_viewer_intent(model_url: &Url, title: Option<&str>, page_url: &Url) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair("file", model_url.as_str());
    query.append_pair("mode", "ar_preferred");
    if let Some(title) = title {
        query.append_pair("title", title);
    }
    let query = query.finish();
    let fallback = utf8_percent_encode(page_url.as_str(), COMPONENT);

    format!(
        "{SCENE_VIEWER_ENDPOINT}?{query}#Intent;scheme=https;package={SCENE_VIEWER_PACKAGE};\
         action={INTENT_ACTION};S.browser_fallback_url={fallback};end;"
    )
}

/// Rewrite the page URL so it deep-links to `model_id`: the first `model`
/// query parameter is replaced in place, extra occurrences are dropped, and
/// every other parameter keeps its position. Appended at the end when the
/// page had no `model` parameter.
pub fn share_url(page: &PageContext, model_id: &str) -> Url {
    let mut url = page.url().clone();
    let mut replaced = false;
    let mut kept: Vec<(String, String)> = Vec::new();
    for (key, value) in url.query_pairs() {
        if key == "model" {
            if !replaced {
                kept.push(("model".to_string(), model_id.to_string()));
                replaced = true;
            }
        } else {
            kept.push((key.into_owned(), value.into_owned()));
        }
    }
    if !replaced {
        kept.push(("model".to_string(), model_id.to_string()));
    }

    let mut pairs = url.query_pairs_mut();
    pairs.clear();
    for (key, value) in &kept {
        pairs.append_pair(key, value);
    }
    drop(pairs);
    url
}

/// Build the launch target for an entry the resolver marked available.
///
/// # Panics
///
/// Panics if `availability.available` is false. Availability must be checked
/// first; this function exists strictly downstream of that decision.
pub fn build_launch_target(
    entry: &CatalogEntry,
    caps: &CapabilityVector,
    availability: &AvailabilityResult,
    page: &PageContext,
    title: Option<&str>,
) -> Result<LaunchTarget> {
    assert!(
        availability.available,
        "launch target requested for unavailable entry '{}'",
        entry.id
    );

    match caps.platform {
        Platform::Ios => {
            let path = entry.model_path.as_ref().ok_or_else(|| {
                GalleryError::Internal(format!(
                    "entry '{}' resolved available without an iOS asset",
                    entry.id
                ))
            })?;
            let href = page.absolute(path)?.to_string();
            Ok(LaunchTarget::QuickLook { href })
        }
        Platform::Android => {
            let path = entry.android_model_path.as_ref().ok_or_else(|| {
                GalleryError::Internal(format!(
                    "entry '{}' resolved available without an Android asset",
                    entry.id
                ))
            })?;
            let model_url = page.absolute(path)?;
            let intent = scene_viewer_intent(&model_url, title, page.url());
            Ok(LaunchTarget::SceneViewer { intent })
        }
        Platform::Other => {
            let path = availability.fallback_href.as_ref().ok_or_else(|| {
                GalleryError::Internal(format!(
                    "entry '{}' resolved available without a download path",
                    entry.id
                ))
            })?;
            let href = page.absolute(path)?.to_string();
            Ok(LaunchTarget::Download { href })
        }
    }
}
