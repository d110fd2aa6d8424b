// ============================================================
// Layer 5 — Evaluator
// ============================================================
// Scores a fitted model on the held-out subset:
//
//   MSE         = mean((y - ŷ)²)
//   MAE         = mean(|y - ŷ|)
//   R²          = 1 - SS_res / SS_tot
//   Adjusted R² = 1 - (1 - R²)(n - 1) / (n - p - 1)
//   residual    = y - ŷ
//
// n = evaluation rows, p = feature columns after encoding.
// Adjusted R² with n - p - 1 <= 0 is DegenerateMetricError.

use crate::domain::errors::{PipelineError, PipelineResult};
use crate::domain::evaluation::{EvaluationResult, FeatureImportance};
use crate::domain::traits::Regressor;

pub fn evaluate<M: Regressor>(
    model:         &M,
    feature_names: &[String],
    rows:          &[Vec<f64>],
    actuals:       &[f64],
) -> PipelineResult<EvaluationResult> {
    if rows.is_empty() {
        return Err(PipelineError::InsufficientData(
            "evaluation subset is empty".to_string(),
        ));
    }

    let predictions = model.predict(rows);
    let residuals: Vec<f64> = actuals
        .iter()
        .zip(&predictions)
        .map(|(y, p)| y - p)
        .collect();

    let mse = mean_squared_error(&residuals);
    let mae = mean_absolute_error(&residuals);
    let r2  = r2_score(actuals, &residuals);
    let adjusted_r2 = adjusted_r2(r2, rows.len(), feature_names.len())?;

    let feature_importance = rank_importance(feature_names, model.feature_importances());

    tracing::info!(
        "Evaluation on {} rows: MSE={:.2} MAE={:.2} R²={:.3} adj R²={:.3}",
        rows.len(),
        mse,
        mae,
        r2,
        adjusted_r2
    );

    Ok(EvaluationResult {
        predictions,
        actuals: actuals.to_vec(),
        mse,
        mae,
        r2,
        adjusted_r2,
        feature_importance,
        residuals,
    })
}

pub fn mean_squared_error(residuals: &[f64]) -> f64 {
    residuals.iter().map(|r| r * r).sum::<f64>() / residuals.len() as f64
}

pub fn mean_absolute_error(residuals: &[f64]) -> f64 {
    residuals.iter().map(|r| r.abs()).sum::<f64>() / residuals.len() as f64
}

/// A constant `actuals` scores 1.0 when predicted exactly, else 0.0.
pub fn r2_score(actuals: &[f64], residuals: &[f64]) -> f64 {
    let mean   = actuals.iter().sum::<f64>() / actuals.len() as f64;
    let ss_tot = actuals.iter().map(|y| (y - mean).powi(2)).sum::<f64>();
    let ss_res = residuals.iter().map(|r| r * r).sum::<f64>();

    if ss_tot == 0.0 {
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }
    1.0 - ss_res / ss_tot
}

pub fn adjusted_r2(r2: f64, n: usize, p: usize) -> PipelineResult<f64> {
    if n <= p + 1 {
        return Err(PipelineError::DegenerateMetric { n, p });
    }
    let dof = (n - p - 1) as f64;
    Ok(1.0 - (1.0 - r2) * (n - 1) as f64 / dof)
}

/// Pair names with weights, heaviest first (ties by name)
pub fn rank_importance(names: &[String], weights: &[f64]) -> Vec<FeatureImportance> {
    let mut ranked: Vec<FeatureImportance> = names
        .iter()
        .zip(weights)
        .map(|(name, &importance)| FeatureImportance { feature: name.clone(), importance })
        .collect();
    ranked.sort_by(|a, b| {
        b.importance
            .total_cmp(&a.importance)
            .then_with(|| a.feature.cmp(&b.feature))
    });
    ranked
}
