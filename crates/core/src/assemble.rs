//! Catalog assembly.
//!
//! Turns scanned model groups into the published [`Catalog`]: derives
//! display names, picks thumbnails, applies the platform-asset filter and
//! sorts entries under stroke-aware collation.

use chrono::Utc;
use tracing::warn;

use crate::catalog::{Catalog, CatalogEntry, PlatformVariants};
use crate::collation;
use crate::scan::{DirectoryScan, ModelGroup};

/// Derive a display name from an entry id: separators become spaces, runs of
/// whitespace collapse, and the character opening each word is uppercased.
/// Words start after any non-alphanumeric character, not only after spaces,
/// so `tea.set` becomes `Tea.Set`.
pub fn prettify_name(id: &str) -> String {
    let spaced: String = id
        .chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c })
        .collect();
    let collapsed = spaced.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut name = String::with_capacity(collapsed.len());
    let mut prev_word = false;
    for c in collapsed.chars() {
        let is_word = c.is_ascii_alphanumeric();
        if is_word && !prev_word {
            name.push(c.to_ascii_uppercase());
        } else {
            name.push(c);
        }
        prev_word = is_word;
    }
    name
}

/// Assembled catalog plus counts for the build report.
#[derive(Debug)]
pub struct Assembly {
    pub catalog: Catalog,
    /// Groups dropped for having no platform asset.
    pub discarded: usize,
    /// Kept entries that have no thumbnail.
    pub missing_thumbnails: usize,
    /// Kept entries where more than one thumbnail candidate existed.
    pub ambiguous_thumbnails: usize,
}

pub struct Assembler;

impl Assembler {
    /// Assemble a catalog from a directory scan. Pure aside from diagnostics:
    /// the same scan always yields the same entries in the same order.
    pub fn assemble(scan: DirectoryScan) -> Assembly {
        let DirectoryScan {
            route_prefix,
            groups,
        } = scan;

        let mut items = Vec::with_capacity(groups.len());
        let mut discarded = 0;
        let mut missing_thumbnails = 0;
        let mut ambiguous_thumbnails = 0;

        for (id, group) in groups {
            if !group.has_platform_asset() {
                discarded += 1;
                warn!("discarding '{id}': thumbnail present but no .usdz or .glb model");
                continue;
            }
            match group.thumbnails.len() {
                0 => {
                    missing_thumbnails += 1;
                    warn!("no thumbnail for '{id}'; the gallery will show a placeholder");
                }
                1 => {}
                _ => {
                    ambiguous_thumbnails += 1;
                    warn!(
                        "multiple thumbnails for '{id}' ({:?}); keeping '{}'",
                        group.thumbnails,
                        group.select_thumbnail().unwrap_or_default()
                    );
                }
            }
            if let Some(entry) = Self::build_entry(id, &group, &route_prefix) {
                items.push(entry);
            }
        }

        items.sort_by(|a, b| {
            collation::display_name_cmp(&a.display_name, &b.display_name)
                .then_with(|| a.id.cmp(&b.id))
        });

        let total = items.len();
        Assembly {
            catalog: Catalog {
                generated_at: Utc::now(),
                total,
                items,
            },
            discarded,
            missing_thumbnails,
            ambiguous_thumbnails,
        }
    }

    fn build_entry(id: String, group: &ModelGroup, route_prefix: &str) -> Option<CatalogEntry> {
        let primary = group.primary_descriptor()?.clone();
        let thumbnail_path = group
            .select_thumbnail()
            .map(|name| format!("{route_prefix}/{name}"));

        Some(CatalogEntry {
            display_name: prettify_name(&id),
            file_name: primary.file_name,
            model_path: group.ios.as_ref().map(|d| d.path.clone()),
            android_model_path: group.android.as_ref().map(|d| d.path.clone()),
            thumbnail_path,
            size: primary.size,
            updated_at: primary.updated_at,
            variants: PlatformVariants {
                ios: group.ios.clone(),
                android: group.android.clone(),
            },
            id,
        })
    }
}
