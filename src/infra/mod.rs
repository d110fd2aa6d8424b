// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// File I/O that sits outside the pipeline itself:
//
//   config_store.rs — PipelineConfig saved/loaded as JSON so a
//                     run can be repeated with the same knobs.
//
//   report.rs       — Writes a finished run to disk: the full
//                     report as JSON and the residuals as CSV
//                     for plotting predicted vs actual.
//
// Both return anyhow::Result with context naming the file, since
// their failures are reported to the user, not matched on.

/// Pipeline config persistence
pub mod config_store;

/// JSON report and residual CSV writer
pub mod report;
