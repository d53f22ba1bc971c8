//! Published catalog document model.
//!
//! The catalog is a plain JSON file consumed by the static gallery page, so
//! the serialized field names are part of the contract: camelCase keys,
//! ISO-8601 timestamps with millisecond precision, and explicit `null` for a
//! missing thumbnail.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Units for [`format_file_size`]. Anything above the last entry is clamped
/// to it rather than overflowing into invented units.
const SIZE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Humanize a byte count with base-1024 units: one decimal below 10, none at
/// or above, whole bytes never carry a decimal, and exact halves round up.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }
    let exponent = (((bytes as f64).ln() / 1024f64.ln()).floor() as usize).min(SIZE_UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);
    let decimals = if value >= 10.0 || exponent == 0 { 0 } else { 1 };
    // The `{:.*}` formatter rounds ties to even; size strings round them
    // away from zero, so round explicitly before formatting.
    let scale = 10f64.powi(decimals as i32);
    let value = (value * scale).round() / scale;
    format!("{value:.decimals$} {}", SIZE_UNITS[exponent])
}

/// Timestamp codec for catalog JSON: `2026-08-23T12:34:56.789Z`.
pub(crate) mod iso8601 {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

/// Byte count alongside its display form, so the gallery page never has to
/// re-derive the human string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeInfo {
    pub bytes: u64,
    pub human_readable: String,
}

impl SizeInfo {
    pub fn from_bytes(bytes: u64) -> Self {
        Self {
            bytes,
            human_readable: format_file_size(bytes),
        }
    }
}

/// One concrete file behind a catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetDescriptor {
    pub file_name: String,
    /// Site-root-relative path, always forward-slashed.
    pub path: String,
    pub size: SizeInfo,
    #[serde(with = "iso8601")]
    pub updated_at: DateTime<Utc>,
}

/// Per-platform variants of one model. Either side may be absent; a group
/// with neither never reaches the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlatformVariants {
    pub ios: Option<AssetDescriptor>,
    pub android: Option<AssetDescriptor>,
}

/// Which platforms an entry can serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PlatformCoverage {
    Both,
    IosOnly,
    AndroidOnly,
}

impl PlatformCoverage {
    /// Badge text the gallery renders next to an entry.
    pub fn label(self) -> &'static str {
        match self {
            PlatformCoverage::Both => "iOS & Android",
            PlatformCoverage::IosOnly => "iOS / USDZ",
            PlatformCoverage::AndroidOnly => "Android / GLB",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    /// Base file name shared by the entry's assets; stable across rebuilds.
    pub id: String,
    pub display_name: String,
    /// Primary asset's file name (iOS-first when both platforms exist).
    pub file_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub android_model_path: Option<String>,
    /// `null` when no thumbnail was found; the page shows a placeholder.
    pub thumbnail_path: Option<String>,
    /// Size and timestamp of the primary asset.
    pub size: SizeInfo,
    #[serde(with = "iso8601")]
    pub updated_at: DateTime<Utc>,
    pub variants: PlatformVariants,
}

impl CatalogEntry {
    /// None means the entry is unusable on every platform, which the
    /// assembler never emits.
    pub fn coverage(&self) -> Option<PlatformCoverage> {
        match (&self.model_path, &self.android_model_path) {
            (Some(_), Some(_)) => Some(PlatformCoverage::Both),
            (Some(_), None) => Some(PlatformCoverage::IosOnly),
            (None, Some(_)) => Some(PlatformCoverage::AndroidOnly),
            (None, None) => None,
        }
    }
}

/// Root catalog document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(with = "iso8601")]
    pub generated_at: DateTime<Utc>,
    pub total: usize,
    pub items: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn empty() -> Self {
        Self {
            generated_at: Utc::now(),
            total: 0,
            items: Vec::new(),
        }
    }

    pub fn find(&self, id: &str) -> Option<&CatalogEntry> {
        self.items.iter().find(|entry| entry.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn format_zero_bytes() {
        assert_eq!(format_file_size(0), "0 B");
    }

    #[test]
    fn format_whole_bytes_have_no_decimal() {
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1023), "1023 B");
    }

    #[test]
    fn format_small_values_keep_one_decimal() {
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(2048), "2.0 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024 * 1024), "5.0 GB");
    }

    #[test]
    fn format_large_values_drop_the_decimal() {
        assert_eq!(format_file_size(10 * 1024 * 1024), "10 MB");
        assert_eq!(format_file_size(200 * 1024), "200 KB");
    }

    #[test]
    fn format_rounds_halves_away_from_zero() {
        // 10.5 KB, 2.25 KB and 1.25 KB are exact in binary; the display
        // rounds them up, never to even.
        assert_eq!(format_file_size(10752), "11 KB");
        assert_eq!(format_file_size(2304), "2.3 KB");
        assert_eq!(format_file_size(1280), "1.3 KB");
    }

    #[test]
    fn format_clamps_to_gigabytes() {
        // 1 TiB still reports in GB, matching the unit table.
        assert_eq!(format_file_size(1024 * 1024 * 1024 * 1024), "1024 GB");
    }

    #[test]
    fn timestamps_serialize_with_millisecond_z() {
        let catalog = Catalog {
            generated_at: Utc.with_ymd_and_hms(2026, 5, 5, 3, 2, 1).unwrap(),
            total: 0,
            items: Vec::new(),
        };
        let json = serde_json::to_string(&catalog).unwrap();
        assert!(
            json.contains("\"generatedAt\":\"2026-05-05T03:02:01.000Z\""),
            "unexpected timestamp encoding: {json}"
        );
    }

    #[test]
    fn timestamps_parse_back_to_utc() {
        let json = r#"{"generatedAt":"2026-05-05T03:02:01.250Z","total":0,"items":[]}"#;
        let catalog: Catalog = serde_json::from_str(json).unwrap();
        assert_eq!(
            catalog.generated_at,
            Utc.with_ymd_and_hms(2026, 5, 5, 3, 2, 1).unwrap() + chrono::Duration::milliseconds(250)
        );
    }

    #[test]
    fn entry_keys_are_camel_case() {
        let entry = CatalogEntry {
            id: "fox".to_string(),
            display_name: "Fox".to_string(),
            file_name: "fox.usdz".to_string(),
            model_path: Some("model/fox.usdz".to_string()),
            android_model_path: None,
            thumbnail_path: None,
            size: SizeInfo::from_bytes(2048),
            updated_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            variants: PlatformVariants::default(),
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"displayName\":\"Fox\""));
        assert!(json.contains("\"fileName\":\"fox.usdz\""));
        assert!(json.contains("\"modelPath\":\"model/fox.usdz\""));
        assert!(json.contains("\"humanReadable\":\"2.0 KB\""));
        // Missing thumbnail is an explicit null; a missing android path is
        // omitted entirely.
        assert!(json.contains("\"thumbnailPath\":null"));
        assert!(!json.contains("androidModelPath"));
    }

    #[test]
    fn coverage_reflects_present_paths() {
        let mut entry = CatalogEntry {
            id: "fox".to_string(),
            display_name: "Fox".to_string(),
            file_name: "fox.usdz".to_string(),
            model_path: Some("model/fox.usdz".to_string()),
            android_model_path: Some("model/fox.glb".to_string()),
            thumbnail_path: None,
            size: SizeInfo::from_bytes(1),
            updated_at: Utc::now(),
            variants: PlatformVariants::default(),
        };
        assert_eq!(entry.coverage(), Some(PlatformCoverage::Both));
        assert_eq!(entry.coverage().unwrap().label(), "iOS & Android");

        entry.android_model_path = None;
        assert_eq!(entry.coverage(), Some(PlatformCoverage::IosOnly));

        entry.model_path = None;
        entry.android_model_path = Some("model/fox.glb".to_string());
        assert_eq!(entry.coverage(), Some(PlatformCoverage::AndroidOnly));

        entry.android_model_path = None;
        assert_eq!(entry.coverage(), None);
    }
}
