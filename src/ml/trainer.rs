// ============================================================
// Layer 5 — Model Trainer
// ============================================================
// Fits the random forest on the training subset and logs what
// was fitted. The fitted model is owned by the caller for one
// pipeline run and never persisted.

use crate::domain::errors::{PipelineError, PipelineResult};
use crate::ml::forest::{ForestConfig, RandomForestRegressor};

pub fn train_model(
    rows:   &[Vec<f64>],
    target: &[f64],
    config: &ForestConfig,
) -> PipelineResult<RandomForestRegressor> {
    if rows.is_empty() {
        return Err(PipelineError::InsufficientData(
            "training subset is empty".to_string(),
        ));
    }
    if rows.len() != target.len() {
        return Err(PipelineError::InsufficientData(format!(
            "{} feature rows but {} target values",
            rows.len(),
            target.len()
        )));
    }

    tracing::info!(
        "Fitting random forest: {} trees, max_depth={:?}, seed={} on {} rows x {} features",
        config.n_trees,
        config.max_depth,
        config.seed,
        rows.len(),
        rows[0].len()
    );

    let model = RandomForestRegressor::fit(rows, target, config);

    tracing::info!(
        "Training complete ({} trees, {} leaves)",
        model.tree_count(),
        model.leaf_count()
    );
    Ok(model)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::traits::Regressor;

    #[test]
    fn test_empty_training_set() {
        let err = train_model(&[], &[], &ForestConfig::default()).unwrap_err();
        assert!(matches!(err, PipelineError::InsufficientData(_)));
    }

    #[test]
    fn test_length_mismatch() {
        let err = train_model(&[vec![1.0]], &[1.0, 2.0], &ForestConfig::default()).unwrap_err();
        assert!(matches!(err, PipelineError::InsufficientData(_)));
    }

    #[test]
    fn test_fits_requested_tree_count() {
        let rows   = vec![vec![1.0], vec![2.0], vec![3.0]];
        let target = vec![1.0, 2.0, 3.0];
        let config = ForestConfig { n_trees: 7, ..ForestConfig::default() };
        let model  = train_model(&rows, &target, &config).unwrap();
        assert_eq!(model.tree_count(), 7);
        assert!(model.leaf_count() >= 7);
        assert_eq!(model.feature_importances().len(), 1);
    }
}
