// ============================================================
// Layer 5 — ML / Model Layer
// ============================================================
// All model code lives here:
//
//   tree.rs      — CART regression tree (squared error)
//   forest.rs    — bagged ensemble of trees + importance
//   trainer.rs   — fits the forest on the training subset
//   evaluator.rs — predictions, error metrics, residuals

pub mod tree;

pub mod forest;

pub mod trainer;

pub mod evaluator;
