// ============================================================
// Layer 4 — Descriptive Summaries
// ============================================================
// Read-only statistics shown next to the model:
//   - overview():    shape, column kinds, missing counts and a
//                    count/mean/std/min/quartiles/max summary
//   - correlation(): Pearson matrix of the prepared features
//   - histogram():   equal-width distribution of the target
//
// Quantiles use linear interpolation between order statistics
// and std is the sample (n - 1) estimate.

use crate::domain::dataset::{ColumnData, Dataset};
use crate::domain::evaluation::{
    ColumnOverview, CorrelationMatrix, DatasetOverview, Histogram, NumericSummary,
};
use crate::domain::format::Format;

pub fn overview(format: Format, dataset: &Dataset) -> DatasetOverview {
    let columns = dataset
        .columns()
        .iter()
        .map(|c| ColumnOverview {
            name:    c.name.clone(),
            kind:    c.data.kind(),
            missing: c.data.missing_count(),
            summary: match &c.data {
                ColumnData::Numeric(values) => {
                    let observed: Vec<f64> = values.iter().flatten().copied().collect();
                    describe(&observed)
                }
                ColumnData::Categorical(_) => None,
            },
        })
        .collect();

    DatasetOverview { format, row_count: dataset.row_count(), columns }
}

/// Summary of a sample; `None` when it is empty
pub fn describe(values: &[f64]) -> Option<NumericSummary> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n    = sorted.len() as f64;
    let mean = sorted.iter().sum::<f64>() / n;
    let std  = if sorted.len() > 1 {
        (sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt()
    } else {
        f64::NAN
    };

    Some(NumericSummary {
        count: sorted.len(),
        mean,
        std,
        min:   sorted[0],
        q25:   quantile_sorted(&sorted, 0.25),
        q50:   quantile_sorted(&sorted, 0.50),
        q75:   quantile_sorted(&sorted, 0.75),
        max:   sorted[sorted.len() - 1],
    })
}

/// Linear-interpolated quantile of an ascending, non-empty slice
fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let pos  = q * (sorted.len() - 1) as f64;
    let lo   = pos.floor() as usize;
    let hi   = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Pearson correlation between every pair of `columns`.
/// Pairs involving a zero-variance column are NaN.
pub fn correlation(names: &[String], columns: &[Vec<f64>]) -> CorrelationMatrix {
    let p = columns.len();
    let mut values = vec![vec![f64::NAN; p]; p];

    for i in 0..p {
        for j in i..p {
            let r = pearson(&columns[i], &columns[j]);
            let r = if i == j && r.is_finite() { 1.0 } else { r };
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrelationMatrix { names: names.to_vec(), values }
}

fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len().min(b.len());
    if n < 2 {
        return f64::NAN;
    }
    let mean_a = a[..n].iter().sum::<f64>() / n as f64;
    let mean_b = b[..n].iter().sum::<f64>() / n as f64;

    let (mut cov, mut var_a, mut var_b) = (0.0, 0.0, 0.0);
    for k in 0..n {
        let da = a[k] - mean_a;
        let db = b[k] - mean_b;
        cov   += da * db;
        var_a += da * da;
        var_b += db * db;
    }

    if var_a == 0.0 || var_b == 0.0 {
        f64::NAN
    } else {
        cov / (var_a.sqrt() * var_b.sqrt())
    }
}

/// Equal-width histogram over `[min, max]`. A constant sample is
/// centred in `[v - 0.5, v + 0.5]`.
pub fn histogram(values: &[f64], bins: usize) -> Histogram {
    if values.is_empty() || bins == 0 {
        return Histogram { edges: Vec::new(), counts: Vec::new() };
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let (lo, hi) = if min == max { (min - 0.5, max + 0.5) } else { (min, max) };
    let width = (hi - lo) / bins as f64;

    let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();
    let mut counts = vec![0usize; bins];
    for &v in values {
        let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    Histogram { edges, counts }
}
