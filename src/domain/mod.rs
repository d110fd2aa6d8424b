// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums and traits that define what the
// pipeline works with.
//
// Rules for this layer:
//   - NO file I/O
//   - NO model fitting or statistics
//   - Only data types, error taxonomy and traits

// The three match formats and their dataset files
pub mod format;

// The loaded table
pub mod dataset;

// Logical predictors and target
pub mod feature_set;

// Evaluation result and report types
pub mod evaluation;

// Typed pipeline failures
pub mod errors;

// Seams implemented by the data and ml layers
pub mod traits;
