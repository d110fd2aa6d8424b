// ============================================================
// Layer 1 — Text Rendering
// ============================================================
// Turns reports into plain-text tables for the terminal.
// Pure string building; printing happens in cli/mod.rs.

use std::fmt::Write;

use crate::domain::evaluation::{
    CorrelationMatrix, DatasetOverview, EvaluationResult, Histogram, PipelineReport,
};

/// Widest bar drawn in the target histogram
const BAR_WIDTH: usize = 40;

pub fn report(report: &PipelineReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== {} ===", report.format);
    let _ = writeln!(
        out,
        "Rows: {} (train {}, evaluation {})",
        report.row_count, report.train_size, report.eval_size
    );
    let _ = writeln!(out, "Features: {}", report.feature_names.join(", "));
    if !report.skipped_features.is_empty() {
        let _ = writeln!(out, "Not in dataset: {}", report.skipped_features.join(", "));
    }
    let _ = writeln!(out, "Missing runs filled with: {:.2}", report.target_fill);
    out.push('\n');
    out.push_str(&metrics(&report.evaluation));
    out.push('\n');
    out.push_str(&importance(&report.evaluation));
    out.push('\n');
    out.push_str(&correlations(&report.correlations));
    out.push('\n');
    out.push_str(&histogram(&report.target_distribution));
    out
}

pub fn metrics(eval: &EvaluationResult) -> String {
    let mut out = String::from("Metric        Value\n");
    let rows = [
        ("MSE", eval.mse),
        ("MAE", eval.mae),
        ("R²", eval.r2),
        ("Adjusted R²", eval.adjusted_r2),
    ];
    for (name, value) in rows {
        let _ = writeln!(out, "{name:<13} {value:.4}");
    }
    out
}

pub fn importance(eval: &EvaluationResult) -> String {
    let mut out = String::from("Feature       Importance\n");
    for f in &eval.feature_importance {
        let _ = writeln!(out, "{:<13} {:.4}", f.feature, f.importance);
    }
    let _ = writeln!(out, "{:<13} {:.4}", "Total", eval.importance_sum());
    out
}

/// NaN cells (zero-variance columns) print as "-"
pub fn correlations(matrix: &CorrelationMatrix) -> String {
    let mut out = format!("{:<10}", "");
    for name in &matrix.names {
        let _ = write!(out, "{name:>10}");
    }
    out.push('\n');
    for (name, row) in matrix.names.iter().zip(&matrix.values) {
        let _ = write!(out, "{name:<10}");
        for v in row {
            if v.is_nan() {
                let _ = write!(out, "{:>10}", "-");
            } else {
                let _ = write!(out, "{v:>10.3}");
            }
        }
        out.push('\n');
    }
    out
}

pub fn histogram(hist: &Histogram) -> String {
    let mut out = String::from("Runs distribution\n");
    let peak = hist.counts.iter().copied().max().unwrap_or(0).max(1);
    for (i, &count) in hist.counts.iter().enumerate() {
        let bar = "#".repeat(count * BAR_WIDTH / peak);
        let _ = writeln!(
            out,
            "[{:>10.1}, {:>10.1}) {:>5} {bar}",
            hist.edges[i],
            hist.edges[i + 1],
            count
        );
    }
    out
}

pub fn overview(overview: &DatasetOverview) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "=== {} === {} rows, {} columns",
        overview.format,
        overview.row_count,
        overview.columns.len()
    );
    let _ = writeln!(
        out,
        "{:<16} {:<12} {:>7} {:>10} {:>10} {:>10} {:>10}",
        "Column", "Kind", "Missing", "Mean", "Std", "Min", "Max"
    );
    for c in &overview.columns {
        let _ = write!(out, "{:<16} {:<12} {:>7}", c.name, format!("{:?}", c.kind), c.missing);
        match &c.summary {
            Some(s) => {
                let _ = writeln!(out, " {:>10.2} {:>10.2} {:>10.2} {:>10.2}", s.mean, s.std, s.min, s.max);
            }
            None => out.push('\n'),
        }
    }
    out
}
