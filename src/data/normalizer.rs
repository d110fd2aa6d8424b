// ============================================================
// Layer 4 — Feature Normalizer
// ============================================================
// Canonicalises column names so lookups ignore how a file
// styled its headers:
//
//   "  Mat "  → "mat"
//   "SR"      → "sr"
//
// The logical feature list and target are normalised with the
// same function, so " RUNS" in a file still matches "Runs".

use crate::domain::dataset::Dataset;
use crate::domain::feature_set::FeatureSet;

/// Trim surrounding whitespace and lowercase
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

pub struct Normalizer;

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Rename every column; values are untouched
    pub fn normalize_dataset(&self, dataset: Dataset) -> Dataset {
        dataset.map_column_names(normalize_name)
    }

    pub fn normalize_feature_set(&self, features: &FeatureSet) -> FeatureSet {
        features.normalized_with(normalize_name)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dataset::Column;

    #[test]
    fn test_trims_and_lowercases() {
        assert_eq!(normalize_name("  Mat "), "mat");
        assert_eq!(normalize_name("SR"), "sr");
        assert_eq!(normalize_name("runs"), "runs");
    }

    #[test]
    fn test_dataset_columns_renamed() {
        let ds = Dataset::new(
            "mem",
            vec![
                Column::numeric(" Inns", vec![Some(3.0)]),
                Column::numeric("RUNS ", vec![Some(40.0)]),
            ],
        );
        let ds = Normalizer::new().normalize_dataset(ds);
        let names: Vec<&str> = ds.column_names().collect();
        assert_eq!(names, vec!["inns", "runs"]);
        assert_eq!(ds.row_count(), 1);
    }

    #[test]
    fn test_feature_set_normalized() {
        let fs = Normalizer::new().normalize_feature_set(&FeatureSet::default());
        assert_eq!(fs.features, vec!["mat", "inns", "no", "bf", "sr"]);
        assert_eq!(fs.target, "runs");
    }
}
