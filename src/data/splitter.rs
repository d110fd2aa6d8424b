// ============================================================
// Layer 4 — Train/Evaluation Splitter
// ============================================================
// Shuffles row indices with a seeded RNG and partitions them:
//   - Evaluation subset: the first ceil(n * test_fraction)
//     shuffled indices
//   - Training subset:   the rest
//
// The same seed over the same row count always gives the same
// partition. Uses the Fisher-Yates shuffle from
// rand::seq::SliceRandom over a StdRng.

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::domain::errors::{PipelineError, PipelineResult};

/// Row indices of the two subsets, in shuffled order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Split {
    pub train: Vec<usize>,
    pub eval:  Vec<usize>,
}

/// Number of evaluation rows for `total` rows
pub fn eval_size(total: usize, test_fraction: f64) -> usize {
    ((total as f64) * test_fraction).ceil() as usize
}

/// Partition `0..total` into (train, eval).
///
/// # Errors
/// `InsufficientData` when the training subset would be empty.
pub fn split_indices(total: usize, test_fraction: f64, seed: u64) -> PipelineResult<Split> {
    let n_eval = eval_size(total, test_fraction).min(total);
    if total - n_eval == 0 {
        return Err(PipelineError::InsufficientData(format!(
            "{total} row(s) leave no training rows at test fraction {test_fraction}"
        )));
    }

    let mut rng     = StdRng::seed_from_u64(seed);
    let mut indices: Vec<usize> = (0..total).collect();
    indices.shuffle(&mut rng);

    // split_off(n) leaves [0..n) in `indices` and returns [n..)
    let train = indices.split_off(n_eval);
    let eval  = indices;

    tracing::debug!(
        "Dataset split: {} training, {} evaluation (seed {})",
        train.len(),
        eval.len(),
        seed
    );

    Ok(Split { train, eval })
}

/// Pick the elements of `items` at `indices`, in index order
pub fn select<T: Clone>(items: &[T], indices: &[usize]) -> Vec<T> {
    indices.iter().map(|&i| items[i].clone()).collect()
}
