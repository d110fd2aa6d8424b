// ============================================================
// Layer 6 — Report Writer
// ============================================================
// Persists one pipeline run to an output directory:
//
//   <out>/t20_report.json     ← full PipelineReport
//   <out>/t20_residuals.csv   ← one row per evaluation row
//
// Example residual CSV:
//   actual,predicted,residual
//   412,398.55,13.45
//   87,101.2,-14.2
//
// Non-finite correlations are written as JSON null.

use anyhow::{Context, Result};
use serde::Serialize;
use std::{fs, path::PathBuf};

use crate::domain::evaluation::PipelineReport;
use crate::domain::format::Format;

#[derive(Debug, Serialize)]
struct ResidualRow {
    actual:    f64,
    predicted: f64,
    residual:  f64,
}

/// Files produced for one format
#[derive(Debug, Clone, PartialEq)]
pub struct ReportPaths {
    pub report:    PathBuf,
    pub residuals: PathBuf,
}

pub struct ReportWriter {
    dir: PathBuf,
}

impl ReportWriter {
    /// Creates `dir` if it doesn't exist yet.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create output directory '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn paths_for(&self, format: Format) -> ReportPaths {
        let stem = format.label().to_lowercase();
        ReportPaths {
            report:    self.dir.join(format!("{stem}_report.json")),
            residuals: self.dir.join(format!("{stem}_residuals.csv")),
        }
    }

    pub fn write(&self, report: &PipelineReport) -> Result<ReportPaths> {
        let paths = self.paths_for(report.format);

        let json = serde_json::to_string_pretty(report)?;
        fs::write(&paths.report, json)
            .with_context(|| format!("Cannot write report to '{}'", paths.report.display()))?;

        let mut wtr = csv::Writer::from_path(&paths.residuals)
            .with_context(|| format!("Cannot create '{}'", paths.residuals.display()))?;
        let eval = &report.evaluation;
        for ((&actual, &predicted), &residual) in eval
            .actuals
            .iter()
            .zip(&eval.predictions)
            .zip(&eval.residuals)
        {
            wtr.serialize(ResidualRow { actual, predicted, residual })?;
        }
        wtr.flush()?;

        tracing::info!(
            "Wrote {} report to '{}'",
            report.format,
            self.dir.display()
        );
        Ok(paths)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::evaluation::{
        CorrelationMatrix, EvaluationResult, FeatureImportance, Histogram,
    };

    fn sample_report() -> PipelineReport {
        PipelineReport {
            format:           Format::Odi,
            row_count:        10,
            target_fill:      6.5,
            train_size:       8,
            eval_size:        2,
            feature_names:    vec!["mat".into(), "bf".into()],
            skipped_features: vec!["sr".into()],
            correlations: CorrelationMatrix {
                names:  vec!["mat".into(), "bf".into()],
                values: vec![vec![1.0, f64::NAN], vec![f64::NAN, f64::NAN]],
            },
            target_distribution: Histogram { edges: vec![0.0, 5.0, 10.0], counts: vec![6, 4] },
            evaluation: EvaluationResult {
                predictions: vec![9.0, 3.5],
                actuals:     vec![10.0, 3.0],
                mse:         0.625,
                mae:         0.75,
                r2:          0.9,
                adjusted_r2: 0.8,
                feature_importance: vec![
                    FeatureImportance { feature: "bf".into(), importance: 0.7 },
                    FeatureImportance { feature: "mat".into(), importance: 0.3 },
                ],
                residuals: vec![1.0, -0.5],
            },
        }
    }

    #[test]
    fn test_writes_report_and_residuals() {
        let dir    = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path().join("out")).unwrap();
        let paths  = writer.write(&sample_report()).unwrap();

        assert!(paths.report.ends_with("odi_report.json"));
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&paths.report).unwrap()).unwrap();
        assert_eq!(json["format"], "ODI");
        assert_eq!(json["eval_size"], 2);
        assert!(json["correlations"]["values"][0][1].is_null());

        let csv_text = fs::read_to_string(&paths.residuals).unwrap();
        let lines: Vec<&str> = csv_text.lines().collect();
        assert_eq!(lines, vec!["actual,predicted,residual", "10.0,9.0,1.0", "3.0,3.5,-0.5"]);
    }

    #[test]
    fn test_paths_per_format() {
        let dir    = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path()).unwrap();
        assert!(writer.paths_for(Format::T20).residuals.ends_with("t20_residuals.csv"));
        assert!(writer.paths_for(Format::Test).report.ends_with("test_report.json"));
    }
}
