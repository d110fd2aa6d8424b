// ============================================================
// Layer 3 — Feature Set
// ============================================================
// The fixed logical predictors and target of the runs model.
//
//   Mat  → matches played
//   Inns → innings
//   NO   → not-outs
//   BF   → balls faced
//   SR   → strike rate
//   Runs → target

use serde::{Deserialize, Serialize};

pub const CANDIDATE_FEATURES: [&str; 5] = ["Mat", "Inns", "NO", "BF", "SR"];
pub const TARGET: &str = "Runs";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSet {
    pub features: Vec<String>,
    pub target:   String,
}

impl FeatureSet {
    pub fn new(features: Vec<String>, target: impl Into<String>) -> Self {
        Self { features, target: target.into() }
    }

    /// Apply the same renaming used for dataset columns
    pub fn normalized_with(&self, f: impl Fn(&str) -> String) -> Self {
        Self {
            features: self.features.iter().map(|s| f(s)).collect(),
            target:   f(&self.target),
        }
    }
}

impl Default for FeatureSet {
    fn default() -> Self {
        Self::new(
            CANDIDATE_FEATURES.iter().map(|s| s.to_string()).collect(),
            TARGET,
        )
    }
}
