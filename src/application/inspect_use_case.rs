// ============================================================
// Layer 2 — Inspect Use Case
// ============================================================
// Loads one format's table and describes it: column kinds,
// missing cells and descriptive statistics. Nothing is trained.
//
// Column names are reported as they appear in the file, so a
// header problem (stray spaces, odd casing) is visible here.

use crate::application::pipeline_use_case::PipelineConfig;
use crate::data::{loader::CsvLoader, summary};
use crate::domain::errors::PipelineResult;
use crate::domain::evaluation::DatasetOverview;
use crate::domain::format::Format;
use crate::domain::traits::DatasetSource;

pub struct InspectUseCase<S: DatasetSource = CsvLoader> {
    source: S,
}

impl InspectUseCase<CsvLoader> {
    pub fn new(config: &PipelineConfig) -> Self {
        Self::with_source(CsvLoader::new(&config.data_dir, config.na_values.clone()))
    }
}

impl<S: DatasetSource> InspectUseCase<S> {
    pub fn with_source(source: S) -> Self {
        Self { source }
    }

    pub fn overview(&self, format: Format) -> PipelineResult<DatasetOverview> {
        let dataset  = self.source.load(format)?;
        let overview = summary::overview(format, &dataset);
        tracing::info!(
            "{}: {} rows, {} columns",
            format,
            overview.row_count,
            overview.columns.len()
        );
        Ok(overview)
    }
}
