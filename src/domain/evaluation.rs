// ============================================================
// Layer 3 — Evaluation and Report Types
// ============================================================
// Plain result structs produced by one pipeline run.
// They are derived, read-only and discarded once rendered.

use serde::{Deserialize, Serialize};

use crate::domain::dataset::ColumnKind;
use crate::domain::format::Format;

/// One row of the feature-importance table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub feature:    String,
    pub importance: f64,
}

/// Scores of the held-out subset.
/// `predictions`, `actuals` and `residuals` share eval-row order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub predictions:        Vec<f64>,
    pub actuals:            Vec<f64>,
    pub mse:                f64,
    pub mae:                f64,
    pub r2:                 f64,
    pub adjusted_r2:        f64,
    /// Sorted by importance, descending
    pub feature_importance: Vec<FeatureImportance>,
    pub residuals:          Vec<f64>,
}

impl EvaluationResult {
    pub fn importance_sum(&self) -> f64 {
        self.feature_importance.iter().map(|f| f.importance).sum()
    }
}

/// Equal-width histogram; `counts[i]` covers `[edges[i], edges[i + 1])`,
/// the last bin is closed on the right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub edges:  Vec<f64>,
    pub counts: Vec<usize>,
}

/// Pearson correlations between prepared feature columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub names:  Vec<String>,
    pub values: Vec<Vec<f64>>,
}


/// Everything one run produces: the evaluation plus the
/// diagnostics shown next to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineReport {
    pub format:              Format,
    pub row_count:           usize,
    /// Value written into missing target cells
    pub target_fill:         f64,
    pub train_size:          usize,
    pub eval_size:           usize,
    pub feature_names:       Vec<String>,
    pub skipped_features:    Vec<String>,
    pub correlations:        CorrelationMatrix,
    pub target_distribution: Histogram,
    pub evaluation:          EvaluationResult,
}

// ─── Dataset overview ────────────────────────────────────────────────────────

/// Descriptive statistics of one numeric column over its observed cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub count: usize,
    pub mean:  f64,
    pub std:   f64,
    pub min:   f64,
    pub q25:   f64,
    pub q50:   f64,
    pub q75:   f64,
    pub max:   f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnOverview {
    pub name:    String,
    pub kind:    ColumnKind,
    pub missing: usize,
    /// Present for numeric columns with at least one observed value
    pub summary: Option<NumericSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetOverview {
    pub format:    Format,
    pub row_count: usize,
    pub columns:   Vec<ColumnOverview>,
}
