//! Typed outcomes of a pipeline run that are not a result.
//!
//! Every variant is an expected condition the presentation layer
//! turns into a message; none of them is a crash.

use thiserror::Error;

use crate::domain::format::Format;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PipelineError {
    /// Dataset file missing, unreadable or malformed
    #[error("cannot load dataset '{path}': {reason}")]
    DataLoad { path: String, reason: String },

    /// Required columns absent after normalization
    #[error("{format} dataset is missing required column(s): {}", missing.join(", "))]
    SchemaMismatch { format: Format, missing: Vec<String> },

    /// Not enough rows (or observed values) to train
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    /// Adjusted R² undefined because n - p - 1 <= 0
    #[error("adjusted R² not computable: {n} evaluation rows for {p} features")]
    DegenerateMetric { n: usize, p: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
