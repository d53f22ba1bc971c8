//! Per-entry AR availability.
//!
//! Matches one catalog entry against a capability vector and answers: can
//! this visitor launch AR for this model, what should the action button say,
//! and if not AR, where should the button point instead. Unsupported
//! environments are ordinary outcomes here, never errors.

use serde::Serialize;

use crate::catalog::CatalogEntry;
use crate::environment::{CapabilityVector, Platform};

/// Action-button labels, keyed by decision outcome.
pub mod label {
    pub const OPEN_AR_IOS: &str = "Open AR (iOS)";
    pub const OPEN_AR_ANDROID: &str = "Open AR (Android)";
    pub const DOWNLOAD: &str = "Download model";
    pub const MISSING_USDZ: &str = "Missing USDZ";
    pub const MISSING_GLB: &str = "Missing GLB";
    pub const OPEN_IN_SAFARI: &str = "Open in Safari";
    pub const OPEN_IN_CHROME: &str = "Open in Chrome";
    pub const QUICK_LOOK_UNAVAILABLE: &str = "Quick Look unavailable";
    pub const NO_AR_BROWSER: &str = "Browser lacks AR";
    pub const NO_FILE: &str = "No file available";
}

/// Secondary guidance attached to unavailable outcomes.
pub mod hint {
    pub const ADD_USDZ: &str = "Add a .usdz file with the same base name to enable iOS AR.";
    pub const ADD_GLB: &str = "Add a .glb file with the same base name to enable Android AR.";
    pub const ADD_ANY_MODEL: &str = "Provide a .usdz or .glb file for this model.";
    pub const LINE_TO_SAFARI: &str =
        "AR cannot start inside LINE; use its menu to open this page in Safari.";
    pub const LINE_TO_CHROME: &str =
        "AR cannot start inside LINE; use its menu to open this page in Chrome.";
    pub const USE_SAFARI: &str = "Switch to Safari to launch Apple Quick Look.";
    pub const USE_CHROME: &str = "Use Android Chrome with ARCore to launch Scene Viewer.";
}

/// Outcome of matching one entry against one environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResult {
    pub available: bool,
    pub label: &'static str,
    pub hint: Option<&'static str>,
    /// Non-AR destination for the action: the raw catalog-relative asset
    /// path. Present for unavailable-but-downloadable and for the iOS and
    /// desktop paths; the Scene Viewer fallback is built at launch time.
    pub fallback_href: Option<String>,
}

impl AvailabilityResult {
    fn available(label: &'static str, fallback_href: Option<String>) -> Self {
        Self {
            available: true,
            label,
            hint: None,
            fallback_href,
        }
    }

    fn unavailable(label: &'static str, hint: &'static str) -> Self {
        Self {
            available: false,
            label,
            hint: Some(hint),
            fallback_href: None,
        }
    }
}

/// Decision table: platform first, then required asset, then browser.
pub fn resolve(entry: &CatalogEntry, caps: &CapabilityVector) -> AvailabilityResult {
    match caps.platform {
        Platform::Ios => resolve_ios(entry, caps),
        Platform::Android => resolve_android(entry, caps),
        Platform::Other => resolve_other(entry),
    }
}

fn resolve_ios(entry: &CatalogEntry, caps: &CapabilityVector) -> AvailabilityResult {
    let Some(path) = &entry.model_path else {
        return AvailabilityResult::unavailable(label::MISSING_USDZ, hint::ADD_USDZ);
    };
    if !caps.supports_quick_look {
        return if caps.in_app {
            AvailabilityResult::unavailable(label::OPEN_IN_SAFARI, hint::LINE_TO_SAFARI)
        } else {
            AvailabilityResult::unavailable(label::QUICK_LOOK_UNAVAILABLE, hint::USE_SAFARI)
        };
    }
    AvailabilityResult::available(label::OPEN_AR_IOS, Some(path.clone()))
}

fn resolve_android(entry: &CatalogEntry, caps: &CapabilityVector) -> AvailabilityResult {
    if entry.android_model_path.is_none() {
        return AvailabilityResult::unavailable(label::MISSING_GLB, hint::ADD_GLB);
    }
    if !caps.supports_scene_viewer {
        return if caps.in_app {
            AvailabilityResult::unavailable(label::OPEN_IN_CHROME, hint::LINE_TO_CHROME)
        } else {
            AvailabilityResult::unavailable(label::NO_AR_BROWSER, hint::USE_CHROME)
        };
    }
    AvailabilityResult::available(label::OPEN_AR_ANDROID, None)
}

/// Desktop and everything else: no AR, offer the file itself, iOS asset
/// first when both exist.
fn resolve_other(entry: &CatalogEntry) -> AvailabilityResult {
    match entry
        .model_path
        .as_ref()
        .or(entry.android_model_path.as_ref())
    {
        Some(path) => AvailabilityResult::available(label::DOWNLOAD, Some(path.clone())),
        None => AvailabilityResult::unavailable(label::NO_FILE, hint::ADD_ANY_MODEL),
    }
}
