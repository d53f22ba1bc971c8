//! Environment classification.
//!
//! Maps a raw user-agent signature to the capability vector that drives AR
//! availability. Classification is pure string containment over the
//! lowercased signature; no version parsing, no feature probing.

use serde::Serialize;

const IOS_DEVICE_TOKENS: [&str; 3] = ["iphone", "ipad", "ipod"];
const ANDROID_TOKEN: &str = "android";
/// In-app browser markers. LINE is the one that matters for these galleries;
/// it rewrites link handling and breaks both AR paths.
const IN_APP_TOKENS: [&str; 1] = ["line/"];
const CHROME_TOKEN: &str = "chrome/";
/// Desktop-style Edge advertises Chrome plus this marker.
const EDGE_TOKEN: &str = "edg/";
const SAFARI_TOKEN: &str = "safari";
/// Browsers that carry the Safari token on iOS without being Safari. Any of
/// these disqualifies the Quick Look path.
const SAFARI_IMPOSTOR_TOKENS: [&str; 5] = ["crios", "fxios", "edgios", "opios", "line/"];

/// Device platform family. iOS device tokens win over the Android token
/// when a signature somehow carries both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Android,
    Other,
}

/// Everything launch decisions need to know about the visitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityVector {
    pub platform: Platform,
    pub safari: bool,
    pub chrome: bool,
    pub in_app: bool,
    pub supports_quick_look: bool,
    pub supports_scene_viewer: bool,
}

impl CapabilityVector {
    /// Classify a raw signature. Unknown signatures land on
    /// [`Platform::Other`] with no AR support.
    pub fn from_signature(signature: &str) -> Self {
        let lower = signature.to_ascii_lowercase();

        let platform = if IOS_DEVICE_TOKENS.iter().any(|t| lower.contains(t)) {
            Platform::Ios
        } else if lower.contains(ANDROID_TOKEN) {
            Platform::Android
        } else {
            Platform::Other
        };
        let in_app = IN_APP_TOKENS.iter().any(|t| lower.contains(t));
        let chrome = lower.contains(CHROME_TOKEN) && !lower.contains(EDGE_TOKEN);
        let safari = platform == Platform::Ios
            && lower.contains(SAFARI_TOKEN)
            && !SAFARI_IMPOSTOR_TOKENS.iter().any(|t| lower.contains(t));

        Self {
            platform,
            safari,
            chrome,
            in_app,
            supports_quick_look: platform == Platform::Ios && safari && !in_app,
            supports_scene_viewer: platform == Platform::Android && chrome && !in_app,
        }
    }
}

/// One-line guidance for environments that are close to working: right
/// platform, wrong browser. Fully capable or hopeless environments get none.
pub fn environment_hint(caps: &CapabilityVector) -> Option<&'static str> {
    match caps.platform {
        Platform::Ios if caps.in_app => {
            Some("The LINE in-app browser cannot start AR; open this page in Safari.")
        }
        Platform::Ios if !caps.supports_quick_look => {
            Some("Use iOS Safari to enable Quick Look AR.")
        }
        Platform::Android if caps.in_app => {
            Some("The LINE in-app browser cannot start AR; open this page in Chrome.")
        }
        Platform::Android if !caps.supports_scene_viewer => {
            Some("Use Android Chrome with ARCore to enable Scene Viewer.")
        }
        _ => None,
    }
}
