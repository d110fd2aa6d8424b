// ============================================================
// Layer 4 — Dataset Loader
// ============================================================
// Reads one format's CSV file into a typed Dataset using the
// csv crate.
//
// Loading rules:
//   1. The first record is the header row
//   2. Every field is trimmed; configured NA tokens become missing
//   3. A column is numeric when every observed cell parses as f64,
//      otherwise it is categorical; NaN and infinite parses in a
//      numeric column are missing
//   4. Columns named "Unnamed..." (or with an empty header) are
//      unlabeled index columns and are dropped
//
// Any I/O, UTF-8 or ragged-row failure becomes DataLoadError.

use std::path::{Path, PathBuf};

use crate::domain::dataset::{Column, Dataset};
use crate::domain::errors::{PipelineError, PipelineResult};
use crate::domain::format::Format;
use crate::domain::traits::DatasetSource;

/// Header fragment marking an unlabeled index column
const UNNAMED_MARKER: &str = "Unnamed";

/// Cell values read as missing unless the config says otherwise:
/// "-" plus the usual spreadsheet and dataframe null spellings.
pub const DEFAULT_NA_VALUES: [&str; 20] = [
    "-", "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan",
    "1.#IND", "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Loads format datasets from a directory of CSV files.
/// Implements the DatasetSource trait from Layer 3.
pub struct CsvLoader {
    data_dir:  PathBuf,
    na_values: Vec<String>,
}

impl CsvLoader {
    pub fn new(data_dir: impl Into<PathBuf>, na_values: Vec<String>) -> Self {
        Self { data_dir: data_dir.into(), na_values }
    }

    pub fn path_for(&self, format: Format) -> PathBuf {
        self.data_dir.join(format.file_name())
    }
}

impl DatasetSource for CsvLoader {
    fn load(&self, format: Format) -> PipelineResult<Dataset> {
        let path = self.path_for(format);
        tracing::info!("Loading {} dataset from '{}'", format, path.display());
        let dataset = load_csv(&path, &self.na_values)?;
        tracing::info!(
            "Loaded {} rows x {} columns",
            dataset.row_count(),
            dataset.column_count()
        );
        Ok(dataset)
    }
}

/// Parse a CSV file into a Dataset, dropping unlabeled index columns.
pub fn load_csv(path: &Path, na_values: &[String]) -> PipelineResult<Dataset> {
    let load_err = |reason: String| PipelineError::DataLoad {
        path:   path.display().to_string(),
        reason,
    };

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Fields)
        .from_path(path)
        .map_err(|e| load_err(e.to_string()))?;

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| load_err(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    // Raw cells per column, None for NA tokens
    let mut raw: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];

    for (row_idx, rec) in rdr.records().enumerate() {
        let rec = rec.map_err(|e| load_err(format!("row {}: {e}", row_idx + 1)))?;
        for (col_idx, field) in rec.iter().enumerate() {
            let cell = if na_values.iter().any(|na| na == field) {
                None
            } else {
                Some(field.to_string())
            };
            raw[col_idx].push(cell);
        }
    }

    let columns: Vec<Column> = headers
        .into_iter()
        .zip(raw)
        .filter(|(name, _)| {
            let unnamed = is_unnamed(name);
            if unnamed {
                tracing::debug!("Dropping unlabeled index column '{}'", name);
            }
            !unnamed
        })
        .map(|(name, cells)| type_column(name, cells))
        .collect();

    Ok(Dataset::new(path.display().to_string(), columns))
}

fn is_unnamed(header: &str) -> bool {
    header.trim().is_empty() || header.contains(UNNAMED_MARKER)
}

/// Numeric if every observed cell parses, categorical otherwise
fn type_column(name: String, cells: Vec<Option<String>>) -> Column {
    let parsed: Option<Vec<Option<f64>>> = cells
        .iter()
        .map(|cell| match cell {
            None    => Some(None),
            Some(s) => s.parse::<f64>().ok().map(|v| v.is_finite().then_some(v)),
        })
        .collect();

    match parsed {
        Some(values) => Column::numeric(name, values),
        None         => Column::categorical(name, cells),
    }
}
