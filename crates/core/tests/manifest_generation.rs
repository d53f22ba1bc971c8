use std::fs;
use std::path::PathBuf;

use argallery_core::catalog::Catalog;
use argallery_core::environment::CapabilityVector;
use argallery_core::manifest::{build_catalog, build_manifest};
use argallery_core::{GalleryError, availability};
use tempfile::tempdir;

const IOS_SAFARI: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_5 like Mac OS X) \
     AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.5 Mobile/15E148 Safari/604.1";
const ANDROID_CHROME: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.6422.113 Mobile Safari/537.36";
const DESKTOP: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Firefox/126.0";

/// Lay out a `model/` directory inside a fresh tempdir.
fn model_dir(files: &[(&str, &[u8])]) -> (tempfile::TempDir, PathBuf) {
    let tmp = tempdir().unwrap();
    let dir = tmp.path().join("model");
    fs::create_dir(&dir).unwrap();
    for (name, bytes) in files {
        fs::write(dir.join(name), bytes).unwrap();
    }
    (tmp, dir)
}

#[tokio::test]
async fn fox_with_usdz_and_thumbnail_serves_ios_but_not_android() {
    let (_tmp, dir) = model_dir(&[("fox.usdz", &[0u8; 2048]), ("fox.png", b"png")]);
    let assembly = build_catalog(&dir).await.unwrap();
    let catalog = &assembly.catalog;

    assert_eq!(catalog.total, 1);
    let entry = catalog.find("fox").expect("fox entry should exist");
    assert_eq!(entry.display_name, "Fox");
    assert_eq!(entry.model_path.as_deref(), Some("model/fox.usdz"));
    assert_eq!(entry.android_model_path, None);
    assert_eq!(entry.thumbnail_path.as_deref(), Some("model/fox.png"));
    assert_eq!(entry.size.bytes, 2048);
    assert_eq!(entry.size.human_readable, "2.0 KB");

    let ios = availability::resolve(entry, &CapabilityVector::from_signature(IOS_SAFARI));
    assert!(ios.available);
    assert_eq!(ios.fallback_href.as_deref(), Some("model/fox.usdz"));

    let android = availability::resolve(entry, &CapabilityVector::from_signature(ANDROID_CHROME));
    assert!(!android.available);
    assert_eq!(android.label, availability::label::MISSING_GLB);
}

#[tokio::test]
async fn glb_only_fox_downloads_on_desktop() {
    let (_tmp, dir) = model_dir(&[("fox.glb", b"glb-bytes")]);
    let assembly = build_catalog(&dir).await.unwrap();
    let entry = assembly.catalog.find("fox").expect("fox entry should exist");

    let desktop = availability::resolve(entry, &CapabilityVector::from_signature(DESKTOP));
    assert!(desktop.available);
    assert_eq!(desktop.label, availability::label::DOWNLOAD);
    assert_eq!(desktop.fallback_href.as_deref(), Some("model/fox.glb"));
}

#[tokio::test]
async fn orphan_thumbnails_never_reach_the_manifest() {
    let (_tmp, dir) = model_dir(&[
        ("ghost.png", b"png"),
        ("fox.usdz", b"usdz"),
        ("fox.jpg", b"jpg"),
    ]);
    let assembly = build_catalog(&dir).await.unwrap();

    assert_eq!(assembly.catalog.total, 1, "only fox has a platform asset");
    assert_eq!(assembly.discarded, 1);
    assert!(assembly.catalog.find("ghost").is_none());
}

#[tokio::test]
async fn both_variants_are_recorded_with_ios_primary() {
    let (_tmp, dir) = model_dir(&[
        ("chair.usdz", &[0u8; 4096]),
        ("chair.glb", &[0u8; 1024]),
        ("chair.webp", b"webp"),
    ]);
    let assembly = build_catalog(&dir).await.unwrap();
    let entry = assembly.catalog.find("chair").expect("chair entry");

    assert_eq!(entry.file_name, "chair.usdz");
    assert_eq!(entry.size.bytes, 4096, "size comes from the primary asset");
    let ios = entry.variants.ios.as_ref().expect("ios variant");
    let android = entry.variants.android.as_ref().expect("android variant");
    assert_eq!(ios.path, "model/chair.usdz");
    assert_eq!(android.path, "model/chair.glb");
    assert_eq!(android.size.bytes, 1024);
}

#[tokio::test]
async fn rebuild_is_idempotent_apart_from_generated_at() {
    let (_tmp, dir) = model_dir(&[
        ("banana.usdz", b"b"),
        ("apple.usdz", b"a"),
        ("apple.png", b"png"),
    ]);

    let first = build_catalog(&dir).await.unwrap().catalog;
    let second = build_catalog(&dir).await.unwrap().catalog;
    assert_eq!(
        first.items, second.items,
        "unchanged directory must reproduce identical entries"
    );
    assert_eq!(first.total, second.total);
}

#[tokio::test]
async fn case_variant_duplicates_rebuild_identically() {
    let (_tmp, dir) = model_dir(&[
        ("fox.usdz", &[0u8; 64]),
        ("fox.USDZ", &[0u8; 4096]),
        ("fox.jpg", b"lower"),
        ("fox.JPG", b"upper"),
    ]);

    let first = build_catalog(&dir).await.unwrap().catalog;
    let entry = first.find("fox").expect("fox entry");
    assert_eq!(
        entry.file_name, "fox.USDZ",
        "first file name in order wins a contested slot"
    );
    assert_eq!(entry.size.bytes, 4096);
    assert_eq!(entry.thumbnail_path.as_deref(), Some("model/fox.JPG"));

    for _ in 0..8 {
        let again = build_catalog(&dir).await.unwrap().catalog;
        assert_eq!(
            first.items, again.items,
            "case-variant files must not make rebuilds diverge"
        );
    }
}

#[tokio::test]
async fn han_display_names_sort_reproducibly() {
    let (_tmp, dir) = model_dir(&[("香蕉模型.usdz", b"x"), ("蘋果模型.usdz", b"y")]);

    let ids = |catalog: &Catalog| -> Vec<String> {
        catalog.items.iter().map(|e| e.id.clone()).collect()
    };
    let first = ids(&build_catalog(&dir).await.unwrap().catalog);
    let second = ids(&build_catalog(&dir).await.unwrap().catalog);

    assert_eq!(first.len(), 2);
    assert_eq!(first, second, "collation order must be stable across runs");
}

#[tokio::test]
async fn written_manifest_round_trips_and_uses_camel_case() {
    let (tmp, dir) = model_dir(&[("tea_set.usdz", &[0u8; 1536]), ("tea_set.jpeg", b"jpeg")]);
    let output = tmp.path().join("data").join("models.json");

    let report = build_manifest(&dir, &output).await.unwrap();
    assert_eq!(report.total, 1);
    assert_eq!(report.output, output);

    let raw = fs::read_to_string(&output).unwrap();
    assert!(raw.contains("\"generatedAt\""));
    assert!(raw.contains("\"displayName\": \"Tea Set\""));
    assert!(raw.contains("\"humanReadable\": \"1.5 KB\""));
    assert!(raw.contains("\"thumbnailPath\": \"model/tea_set.jpeg\""));

    let parsed: Catalog = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed.total, 1);
    assert_eq!(parsed.items[0].id, "tea_set");
}

#[tokio::test]
async fn missing_model_directory_is_a_clean_error() {
    let tmp = tempdir().unwrap();
    let err = build_catalog(&tmp.path().join("model")).await.unwrap_err();
    assert!(matches!(err, GalleryError::DirectoryNotFound { .. }));
}
