//! Locale-aware ordering for display names.
//!
//! Galleries in the field are mostly Traditional-Chinese, so the catalog
//! sorts under zh stroke-count collation; Latin names order the way plain
//! string comparison would. If collator data is unavailable the sort falls
//! back to binary ordering, which is still deterministic.

use std::cmp::Ordering;

use icu::collator::options::CollatorOptions;
use icu::collator::{Collator, CollatorBorrowed};
use icu::locale::locale;
use once_cell::sync::Lazy;
use tracing::warn;

static STROKE_COLLATOR: Lazy<Option<CollatorBorrowed<'static>>> = Lazy::new(|| {
    match Collator::try_new(
        locale!("zh-u-co-stroke").into(),
        CollatorOptions::default(),
    ) {
        Ok(collator) => Some(collator),
        Err(e) => {
            warn!("stroke collation unavailable ({e}); falling back to binary ordering");
            None
        }
    }
});

/// Compare two display names under zh-Hant stroke collation.
pub fn display_name_cmp(a: &str, b: &str) -> Ordering {
    match STROKE_COLLATOR.as_ref() {
        Some(collator) => collator.compare(a, b),
        None => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin_names_order_alphabetically() {
        assert_eq!(display_name_cmp("Apple", "Banana"), Ordering::Less);
        assert_eq!(display_name_cmp("Banana", "Apple"), Ordering::Greater);
        assert_eq!(display_name_cmp("Apple", "Apple"), Ordering::Equal);
    }

    #[test]
    fn comparison_is_antisymmetric_for_han() {
        let a = "香蕉模型";
        let b = "蘋果模型";
        let forward = display_name_cmp(a, b);
        let backward = display_name_cmp(b, a);
        assert_eq!(forward, backward.reverse());
        assert_ne!(forward, Ordering::Equal);
    }

    #[test]
    fn comparison_is_stable_across_calls() {
        let pairs = [("香蕉模型", "蘋果模型"), ("茶壺", "椅子"), ("fox", "狐狸")];
        for (a, b) in pairs {
            let first = display_name_cmp(a, b);
            for _ in 0..3 {
                assert_eq!(display_name_cmp(a, b), first);
            }
        }
    }
}
