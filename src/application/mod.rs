// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates the data and ml layers to accomplish
// a specific goal (a regression run or a dataset overview).
//
// Rules for this layer:
//   - No ML math or model code here
//   - No printing here (that's Layer 1)
//   - No direct file access (that's Layer 4 and 6)
//   - Only workflow coordination

// The load → prepare → split → fit → evaluate workflow
pub mod pipeline_use_case;

// Column summary of a raw dataset
pub mod inspect_use_case;
