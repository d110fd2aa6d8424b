// ============================================================
// Layer 4 — Feature / Target Preparer
// ============================================================
// Turns a normalised Dataset into a dense feature matrix and a
// target vector.
//
// Steps (applied in order):
//   1. Schema check: keep the candidate features present as
//      columns; the target must be present and numeric
//   2. Target: missing cells → mean of observed target values
//      over the whole dataset (before any split)
//   3. Features: missing numeric cells → 0.0, missing text
//      cells → the category "0"
//   4. One-hot encode text columns, dropping the first sorted
//      category of each; encoded columns go after numeric ones
//
// The target mean is taken before splitting, so a little of the
// evaluation subset leaks into the fill value. This is kept so
// metric values stay comparable with earlier runs.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::dataset::{ColumnData, Dataset};
use crate::domain::errors::{PipelineError, PipelineResult};
use crate::domain::feature_set::FeatureSet;
use crate::domain::format::Format;

/// Fill value for missing categorical feature cells
const MISSING_CATEGORY: &str = "0";

/// Model-ready data. `rows[i][j]` is feature `feature_names[j]` of row `i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparedData {
    pub feature_names:    Vec<String>,
    pub rows:             Vec<Vec<f64>>,
    pub target:           Vec<f64>,
    /// Candidate features absent from the dataset
    pub skipped_features: Vec<String>,
    /// Mean used for missing target cells
    pub target_fill:      f64,
}

impl PreparedData {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn feature_count(&self) -> usize {
        self.feature_names.len()
    }

    /// Column `j` of the feature matrix
    pub fn feature_column(&self, j: usize) -> Vec<f64> {
        self.rows.iter().map(|r| r[j]).collect()
    }
}

pub struct Preparer {
    format: Format,
}

impl Preparer {
    pub fn new(format: Format) -> Self {
        Self { format }
    }

    /// `dataset` and `features` must already be normalised.
    pub fn prepare(&self, dataset: &Dataset, features: &FeatureSet) -> PipelineResult<PreparedData> {
        // ── Step 1: Schema check ─────────────────────────────────────────────
        let (present, skipped): (Vec<&String>, Vec<&String>) = features
            .features
            .iter()
            .partition(|f| dataset.has_column(f));

        for name in &skipped {
            tracing::warn!("{} dataset has no '{}' column; continuing without it", self.format, name);
        }

        let target_col = dataset.column(&features.target).ok_or_else(|| {
            PipelineError::SchemaMismatch {
                format:  self.format,
                missing: std::iter::once(&features.target)
                    .chain(skipped.iter().copied())
                    .cloned()
                    .collect(),
            }
        })?;

        if present.is_empty() {
            return Err(PipelineError::SchemaMismatch {
                format:  self.format,
                missing: skipped.iter().map(|s| s.to_string()).collect(),
            });
        }

        let target_values = match &target_col.data {
            ColumnData::Numeric(v) => v,
            ColumnData::Categorical(_) => {
                return Err(PipelineError::SchemaMismatch {
                    format:  self.format,
                    missing: vec![format!("{} (numeric)", features.target)],
                });
            }
        };

        // ── Step 2: Target imputation ────────────────────────────────────────
        let target_fill = observed_mean(target_values).ok_or_else(|| {
            PipelineError::InsufficientData(format!(
                "{} dataset has no observed '{}' values",
                self.format, features.target
            ))
        })?;
        let target: Vec<f64> = target_values
            .iter()
            .map(|v| v.unwrap_or(target_fill))
            .collect();

        // ── Steps 3 + 4: Feature imputation and encoding ─────────────────────
        let mut numeric: Vec<(String, Vec<f64>)> = Vec::new();
        let mut encoded: Vec<(String, Vec<f64>)> = Vec::new();

        for name in &present {
            // present names were checked above
            let Some(column) = dataset.column(name) else { continue };
            match &column.data {
                ColumnData::Numeric(values) => {
                    numeric.push((name.to_string(), fill_zero(values)));
                }
                ColumnData::Categorical(values) => {
                    tracing::info!("Categorical feature '{}' detected; applying one-hot encoding", name);
                    encoded.extend(one_hot_drop_first(name, values));
                }
            }
        }

        numeric.extend(encoded);
        if numeric.is_empty() {
            return Err(PipelineError::InsufficientData(format!(
                "{} dataset has no usable feature columns after encoding",
                self.format
            )));
        }

        let feature_names: Vec<String> = numeric.iter().map(|(n, _)| n.clone()).collect();
        let rows: Vec<Vec<f64>> = (0..dataset.row_count())
            .map(|i| numeric.iter().map(|(_, col)| col[i]).collect())
            .collect();

        tracing::debug!(
            "Prepared {} rows from '{}' with features {:?} (target fill {:.3})",
            rows.len(),
            dataset.source,
            feature_names,
            target_fill
        );

        Ok(PreparedData {
            feature_names,
            rows,
            target,
            skipped_features: skipped.into_iter().cloned().collect(),
            target_fill,
        })
    }
}

/// Arithmetic mean of the non-missing values
pub fn observed_mean(values: &[Option<f64>]) -> Option<f64> {
    let (sum, count) = values
        .iter()
        .flatten()
        .fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    (count > 0).then(|| sum / count as f64)
}

pub fn fill_zero(values: &[Option<f64>]) -> Vec<f64> {
    values.iter().map(|v| v.unwrap_or(0.0)).collect()
}

/// One indicator column per category except the first in sorted order.
/// Columns are named `{column}_{category}`.
pub fn one_hot_drop_first(column: &str, values: &[Option<String>]) -> Vec<(String, Vec<f64>)> {
    let filled: Vec<&str> = values
        .iter()
        .map(|v| v.as_deref().unwrap_or(MISSING_CATEGORY))
        .collect();

    let categories: BTreeSet<&str> = filled.iter().copied().collect();

    categories
        .into_iter()
        .skip(1)
        .map(|category| {
            let indicator = filled
                .iter()
                .map(|v| if *v == category { 1.0 } else { 0.0 })
                .collect();
            (format!("{column}_{category}"), indicator)
        })
        .collect()
}
