// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer depends on these seams, not on the
// concrete CSV loader or forest implementation.

use crate::domain::dataset::Dataset;
use crate::domain::errors::PipelineResult;
use crate::domain::format::Format;

// ─── DatasetSource ────────────────────────────────────────────────────────────
/// Any component that can produce the dataset for a match format.
///
/// Implementations:
///   - CsvLoader → reads `<data_dir>/<format file>`
pub trait DatasetSource {
    fn load(&self, format: Format) -> PipelineResult<Dataset>;
}

// ─── Regressor ────────────────────────────────────────────────────────────────
/// A fitted regression model over a dense, row-major feature matrix.
pub trait Regressor {
    /// Predict one value per row, in row order
    fn predict(&self, rows: &[Vec<f64>]) -> Vec<f64>;

    /// Per-feature importance weights, aligned with the training columns
    fn feature_importances(&self) -> &[f64];
}
