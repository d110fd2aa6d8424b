// ============================================================
// Layer 2 — PipelineUseCase
// ============================================================
// Orchestrates one regression run for one match format:
//
//   Step 1: Load the format's CSV          (Layer 4 - data)
//   Step 2: Normalise column names         (Layer 4 - data)
//   Step 3: Prepare features and target    (Layer 4 - data)
//   Step 4: Split train/evaluation (80/20) (Layer 4 - data)
//   Step 5: Fit the random forest          (Layer 5 - ml)
//   Step 6: Evaluate on held-out rows      (Layer 5 - ml)
//   Step 7: Correlations + target spread   (Layer 4 - data)
//
// Each run owns its dataset, matrices and model; nothing is kept
// between runs, so switching format always retrains from scratch.

use serde::{Deserialize, Serialize};

use crate::data::{
    loader::{CsvLoader, DEFAULT_NA_VALUES},
    normalizer::Normalizer,
    preparer::Preparer,
    splitter::{select, split_indices},
    summary,
};
use crate::domain::errors::{PipelineError, PipelineResult};
use crate::domain::evaluation::{EvaluationResult, PipelineReport};
use crate::domain::feature_set::FeatureSet;
use crate::domain::format::Format;
use crate::domain::traits::DatasetSource;
use crate::ml::{evaluator::evaluate, forest::ForestConfig, trainer::train_model};

/// Upper bound on target histogram bins
pub const MAX_HISTOGRAM_BINS: usize = 1_000;

// ─── Pipeline Configuration ──────────────────────────────────────────────────
// Every knob of a run, with fixed defaults so repeated runs are
// reproducible. Serialisable so it can be stored as JSON and
// reloaded with `--config`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub data_dir:       String,
    pub test_fraction:  f64,
    pub split_seed:     u64,
    /// Cell values read as missing
    pub na_values:      Vec<String>,
    pub histogram_bins: usize,
    pub forest:         ForestConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir:       "data".to_string(),
            test_fraction:  0.2,
            split_seed:     42,
            na_values:      DEFAULT_NA_VALUES.iter().map(|s| s.to_string()).collect(),
            histogram_bins: 20,
            forest:         ForestConfig::default(),
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> PipelineResult<()> {
        let invalid = |msg: String| Err(PipelineError::InvalidConfig(msg));

        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return invalid(format!("test_fraction must be in (0, 1), got {}", self.test_fraction));
        }
        if self.forest.n_trees == 0 {
            return invalid("forest.n_trees must be at least 1".to_string());
        }
        if self.forest.min_samples_split < 2 {
            return invalid("forest.min_samples_split must be at least 2".to_string());
        }
        if self.forest.min_samples_leaf == 0 {
            return invalid("forest.min_samples_leaf must be at least 1".to_string());
        }
        if self.histogram_bins == 0 || self.histogram_bins > MAX_HISTOGRAM_BINS {
            return invalid(format!(
                "histogram_bins must be in 1..={MAX_HISTOGRAM_BINS}, got {}",
                self.histogram_bins
            ));
        }
        Ok(())
    }
}

// ─── PipelineUseCase ─────────────────────────────────────────────────────────
pub struct PipelineUseCase<S: DatasetSource = CsvLoader> {
    config: PipelineConfig,
    source: S,
}

impl PipelineUseCase<CsvLoader> {
    /// Read datasets from `config.data_dir`
    pub fn new(config: PipelineConfig) -> Self {
        let source = CsvLoader::new(&config.data_dir, config.na_values.clone());
        Self::with_source(config, source)
    }
}

impl<S: DatasetSource> PipelineUseCase<S> {
    pub fn with_source(config: PipelineConfig, source: S) -> Self {
        Self { config, source }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the full pipeline for one format
    pub fn execute(&self, format: Format) -> PipelineResult<PipelineReport> {
        let cfg = &self.config;
        cfg.validate()?;

        // ── Step 1: Load ──────────────────────────────────────────────────────
        let raw = self.source.load(format)?;

        // ── Step 2: Normalise column names and the feature list ──────────────
        let normalizer = Normalizer::new();
        let dataset    = normalizer.normalize_dataset(raw);
        let features   = normalizer.normalize_feature_set(&FeatureSet::default());

        // ── Step 3: Schema check, imputation, encoding ───────────────────────
        let prepared = Preparer::new(format).prepare(&dataset, &features)?;

        // ── Step 4: Seeded split ──────────────────────────────────────────────
        let split = split_indices(prepared.row_count(), cfg.test_fraction, cfg.split_seed)?;
        tracing::info!(
            "Split {}: {} train, {} evaluation",
            format,
            split.train.len(),
            split.eval.len()
        );

        let train_x = select(&prepared.rows, &split.train);
        let train_y = select(&prepared.target, &split.train);
        let eval_x  = select(&prepared.rows, &split.eval);
        let eval_y  = select(&prepared.target, &split.eval);

        // ── Step 5: Fit ──────────────────────────────────────────────────────
        let model = train_model(&train_x, &train_y, &cfg.forest)?;

        // ── Step 6: Evaluate ─────────────────────────────────────────────────
        let evaluation = evaluate(&model, &prepared.feature_names, &eval_x, &eval_y)?;

        // ── Step 7: Diagnostics over the full prepared data ──────────────────
        let columns: Vec<Vec<f64>> = (0..prepared.feature_count())
            .map(|j| prepared.feature_column(j))
            .collect();
        let correlations        = summary::correlation(&prepared.feature_names, &columns);
        let target_distribution = summary::histogram(&prepared.target, cfg.histogram_bins);

        Ok(PipelineReport {
            format,
            row_count: prepared.row_count(),
            target_fill: prepared.target_fill,
            train_size: split.train.len(),
            eval_size: split.eval.len(),
            feature_names: prepared.feature_names,
            skipped_features: prepared.skipped_features,
            correlations,
            target_distribution,
            evaluation,
        })
    }
}

/// Pipeline entry point: evaluation result or a typed failure.
pub fn run_pipeline(format: Format, config: &PipelineConfig) -> PipelineResult<EvaluationResult> {
    PipelineUseCase::new(config.clone())
        .execute(format)
        .map(|report| report.evaluation)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::fmt::Write as _;
    use std::path::Path;

    /// Deterministic synthetic batting table with `n` complete rows
    fn batting_csv(n: usize, with_sr: bool) -> String {
        let mut out = String::from("Unnamed: 0, Player ,Mat,Inns,NO,BF,");
        if with_sr {
            out.push_str("SR,");
        }
        out.push_str("Runs,100\n");
        for i in 0..n {
            let mat  = 5 + (i * 7) % 40;
            let inns = mat - (i % 3);
            let no   = (i * 5) % 4;
            let bf   = 30 * inns + (i * 11) % 50;
            let runs = (bf as f64 * (0.9 + (i % 5) as f64 * 0.1)).round();
            let sr   = 100.0 * runs / bf as f64;
            write!(out, "{i},Player {i},{mat},{inns},{no},{bf},").unwrap();
            if with_sr {
                write!(out, "{sr:.2},").unwrap();
            }
            writeln!(out, "{runs},{}", i % 2).unwrap();
        }
        out
    }

    /// Replace data cell `col` of every row with `cell(row)`
    fn rewrite_column(csv: &str, col: usize, cell: impl Fn(usize) -> String) -> String {
        let mut lines = csv.lines();
        let mut out   = format!("{}\n", lines.next().unwrap());
        for (i, line) in lines.enumerate() {
            let mut fields: Vec<String> = line.split(',').map(str::to_string).collect();
            fields[col] = cell(i);
            writeln!(out, "{}", fields.join(",")).unwrap();
        }
        out
    }

    // Column positions in batting_csv(.., true)
    const MAT: usize  = 2;
    const NO: usize   = 4;
    const RUNS: usize = 7;

    fn config_for(dir: &Path) -> PipelineConfig {
        PipelineConfig {
            data_dir: dir.display().to_string(),
            forest:   ForestConfig { n_trees: 25, ..ForestConfig::default() },
            ..PipelineConfig::default()
        }
    }

    fn write_all_formats(dir: &Path, n: usize) {
        for format in Format::ALL {
            std::fs::write(dir.join(format.file_name()), batting_csv(n, true)).unwrap();
        }
    }

    #[test]
    fn test_t20_fifty_rows_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("t20.csv"), batting_csv(50, true)).unwrap();

        let report = PipelineUseCase::new(config_for(dir.path()))
            .execute(Format::T20)
            .unwrap();
        let eval = &report.evaluation;

        assert_eq!(report.row_count, 50);
        assert_eq!(report.train_size, 40);
        assert_eq!(eval.predictions.len(), 10);
        assert_eq!(eval.residuals.len(), 10);
        assert!(eval.mse.is_finite() && eval.mae.is_finite());
        assert!(eval.r2.is_finite() && eval.adjusted_r2.is_finite());

        let mut listed: Vec<&str> = eval.feature_importance.iter().map(|f| f.feature.as_str()).collect();
        listed.sort();
        assert_eq!(listed, vec!["bf", "inns", "mat", "no", "sr"]);
        assert_relative_eq!(eval.importance_sum(), 1.0, epsilon = 1e-6);

        for ((a, p), r) in eval.actuals.iter().zip(&eval.predictions).zip(&eval.residuals) {
            assert_relative_eq!(a - p, *r);
        }
        assert_eq!(report.target_distribution.counts.iter().sum::<usize>(), 50);
        assert_eq!(report.correlations.names.len(), 5);
    }

    #[test]
    fn test_every_format_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        write_all_formats(dir.path(), 36);
        let cfg = config_for(dir.path());
        for format in Format::ALL {
            let eval = run_pipeline(format, &cfg).unwrap();
            // ceil(36 * 0.2) = 8
            assert_eq!(eval.predictions.len(), 8, "{format}");
        }
    }

    #[test]
    fn test_runs_are_reproducible() {
        let dir = tempfile::tempdir().unwrap();
        write_all_formats(dir.path(), 45);
        let use_case = PipelineUseCase::new(config_for(dir.path()));
        let a = use_case.execute(Format::Odi).unwrap();
        let b = use_case.execute(Format::Odi).unwrap();
        assert_eq!(a.evaluation, b.evaluation);
        assert_eq!(a.target_distribution, b.target_distribution);
    }

    #[test]
    fn test_missing_strike_rate_degrades_gracefully() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("test.csv"), batting_csv(40, false)).unwrap();
        let report = PipelineUseCase::new(config_for(dir.path()))
            .execute(Format::Test)
            .unwrap();
        assert_eq!(report.feature_names, vec!["mat", "inns", "no", "bf"]);
        assert_eq!(report.skipped_features, vec!["sr"]);
        assert_relative_eq!(report.evaluation.importance_sum(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_non_finite_feature_cells_are_missing() {
        for bad in ["NaN", "-inf", "inf"] {
            let dir = tempfile::tempdir().unwrap();
            let csv = rewrite_column(&batting_csv(40, true), MAT, |i| {
                if i == 3 { bad.to_string() } else { (5 + (i * 7) % 40).to_string() }
            });
            std::fs::write(dir.path().join("t20.csv"), csv).unwrap();

            let eval = run_pipeline(Format::T20, &config_for(dir.path())).unwrap();
            assert_eq!(eval.predictions.len(), 8, "{bad}");
            assert!(eval.predictions.iter().all(|p| p.is_finite()), "{bad}");
            assert!(eval.mse.is_finite(), "{bad}");
        }
    }

    #[test]
    fn test_null_spellings_in_target_are_mean_filled() {
        for bad in ["NaN", "N/A", "null", "#N/A"] {
            let dir = tempfile::tempdir().unwrap();
            let csv = batting_csv(40, true);
            let observed: Vec<f64> = csv
                .lines()
                .skip(1)
                .enumerate()
                .filter(|(i, _)| *i != 2)
                .map(|(_, l)| l.split(',').nth(RUNS).unwrap().parse().unwrap())
                .collect();
            let csv = rewrite_column(&csv, RUNS, |i| {
                let original = csv.lines().nth(i + 1).unwrap().split(',').nth(RUNS).unwrap();
                if i == 2 { bad.to_string() } else { original.to_string() }
            });
            std::fs::write(dir.path().join("t20.csv"), csv).unwrap();

            let report = PipelineUseCase::new(config_for(dir.path()))
                .execute(Format::T20)
                .unwrap();
            let mean = observed.iter().sum::<f64>() / observed.len() as f64;
            assert_relative_eq!(report.target_fill, mean, epsilon = 1e-9);
            assert!(report.evaluation.r2.is_finite(), "{bad}");
        }
    }

    #[test]
    fn test_text_feature_is_encoded_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let csv = rewrite_column(&batting_csv(40, true), NO, |i| {
            if i % 2 == 0 { "a".to_string() } else { "b".to_string() }
        });
        std::fs::write(dir.path().join("t20.csv"), csv).unwrap();

        let report = PipelineUseCase::new(config_for(dir.path()))
            .execute(Format::T20)
            .unwrap();
        assert_eq!(report.feature_names, vec!["mat", "inns", "bf", "sr", "no_b"]);

        let eval = &report.evaluation;
        let mut listed: Vec<&str> = eval.feature_importance.iter().map(|f| f.feature.as_str()).collect();
        listed.sort();
        assert_eq!(listed, vec!["bf", "inns", "mat", "no_b", "sr"]);
        assert_relative_eq!(eval.importance_sum(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_encoded_columns_count_towards_degrees_of_freedom() {
        // 30 rows → 6 evaluation rows; a/b/c expands NO into 2 columns, p = 6
        let dir = tempfile::tempdir().unwrap();
        let csv = rewrite_column(&batting_csv(30, true), NO, |i| ["a", "b", "c"][i % 3].to_string());
        std::fs::write(dir.path().join("t20.csv"), csv).unwrap();
        let err = run_pipeline(Format::T20, &config_for(dir.path())).unwrap_err();
        assert_eq!(err, PipelineError::DegenerateMetric { n: 6, p: 6 });
    }

    #[test]
    fn test_missing_target_is_schema_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("t20.csv"), "Mat,Inns,NO,BF,SR\n1,1,0,10,100\n").unwrap();
        let err = run_pipeline(Format::T20, &config_for(dir.path())).unwrap_err();
        assert!(matches!(err, PipelineError::SchemaMismatch { format: Format::T20, .. }));
    }

    #[test]
    fn test_missing_file_is_data_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_pipeline(Format::Odi, &config_for(dir.path())).unwrap_err();
        assert!(matches!(err, PipelineError::DataLoad { .. }));
    }

    #[test]
    fn test_small_eval_subset_is_degenerate() {
        // 10 rows → 2 evaluation rows for 5 features
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("t20.csv"), batting_csv(10, true)).unwrap();
        let err = run_pipeline(Format::T20, &config_for(dir.path())).unwrap_err();
        assert_eq!(err, PipelineError::DegenerateMetric { n: 2, p: 5 });
    }

    #[test]
    fn test_single_row_is_insufficient() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("t20.csv"), batting_csv(1, true)).unwrap();
        let err = run_pipeline(Format::T20, &config_for(dir.path())).unwrap_err();
        assert!(matches!(err, PipelineError::InsufficientData(_)));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let cfg = PipelineConfig { test_fraction: 1.0, ..PipelineConfig::default() };
        assert!(matches!(cfg.validate(), Err(PipelineError::InvalidConfig(_))));
        let cfg = PipelineConfig {
            forest: ForestConfig { n_trees: 0, ..ForestConfig::default() },
            ..PipelineConfig::default()
        };
        assert!(cfg.validate().is_err());
        let cfg = PipelineConfig { histogram_bins: MAX_HISTOGRAM_BINS + 1, ..PipelineConfig::default() };
        assert!(matches!(cfg.validate(), Err(PipelineError::InvalidConfig(_))));
        let cfg = PipelineConfig { histogram_bins: usize::MAX, ..PipelineConfig::default() };
        assert!(cfg.validate().is_err());
        assert!(PipelineConfig::default().validate().is_ok());
    }
}
