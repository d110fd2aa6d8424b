// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the CSV file on disk and the dense
// matrices the model trains on:
//
//   <format>.csv
//       │
//       ▼
//   CsvLoader     → typed Dataset, index columns dropped
//       │
//       ▼
//   Normalizer    → trimmed, lowercased column names
//       │
//       ▼
//   Preparer      → feature matrix + target, imputed, encoded
//       │
//       ▼
//   split_indices → seeded train / evaluation row indices
//
// summary.rs computes the descriptive tables shown alongside.

/// Reads format CSV files into typed datasets
pub mod loader;

/// Canonicalises column names
pub mod normalizer;

/// Schema check, imputation and one-hot encoding
pub mod preparer;

/// Seeded 80/20 row partition
pub mod splitter;

/// Overview, correlations and histograms
pub mod summary;
