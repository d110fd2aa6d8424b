//! Random forest regressor: bagged CART trees averaged together.
//!
//! Every tree draws its bootstrap sample from its own `StdRng`,
//! seeded from the forest seed, so fitting twice on the same data
//! gives identical trees, predictions and importances.

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::domain::traits::Regressor;
use crate::ml::tree::{RegressionTree, TreeConfig};

/// Hyperparameters of the ensemble. The defaults are fixed so runs
/// are reproducible without relying on library defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestConfig {
    pub n_trees:           usize,
    /// None = unlimited depth
    pub max_depth:         Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf:  usize,
    /// Fit each tree on a bootstrap resample of the training rows
    pub bootstrap:         bool,
    pub seed:              u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees:           100,
            max_depth:         None,
            min_samples_split: 2,
            min_samples_leaf:  1,
            bootstrap:         true,
            seed:              42,
        }
    }
}

impl ForestConfig {
    pub fn tree_config(&self) -> TreeConfig {
        TreeConfig {
            max_depth:         self.max_depth,
            min_samples_split: self.min_samples_split,
            min_samples_leaf:  self.min_samples_leaf,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForestRegressor {
    trees:       Vec<RegressionTree>,
    importances: Vec<f64>,
}

impl RandomForestRegressor {
    /// Fit on a non-empty, row-major matrix `x` with targets `y`.
    pub fn fit(x: &[Vec<f64>], y: &[f64], config: &ForestConfig) -> Self {
        let n           = x.len();
        let n_features  = x.first().map(|r| r.len()).unwrap_or(0);
        let tree_config = config.tree_config();
        let mut seeder  = StdRng::seed_from_u64(config.seed);

        let trees: Vec<RegressionTree> = (0..config.n_trees)
            .map(|_| {
                let mut rng = StdRng::seed_from_u64(seeder.gen());
                let sample: Vec<usize> = if config.bootstrap {
                    (0..n).map(|_| rng.gen_range(0..n)).collect()
                } else {
                    (0..n).collect()
                };
                RegressionTree::fit(x, y, &sample, &tree_config)
            })
            .collect();

        let importances = forest_importance(&trees, n_features);
        Self { trees, importances }
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Leaves across every tree
    pub fn leaf_count(&self) -> usize {
        self.trees.iter().map(RegressionTree::leaf_count).sum()
    }

    pub fn predict_row(&self, row: &[f64]) -> f64 {
        let total: f64 = self.trees.iter().map(|t| t.predict_row(row)).sum();
        total / self.trees.len() as f64
    }
}

impl Regressor for RandomForestRegressor {
    fn predict(&self, rows: &[Vec<f64>]) -> Vec<f64> {
        rows.iter().map(|r| self.predict_row(r)).collect()
    }

    fn feature_importances(&self) -> &[f64] {
        &self.importances
    }
}

/// Average of per-tree normalised importances, normalised again.
/// Trees that never split carry no information and are skipped; if
/// no tree split at all the weight is spread evenly.
fn forest_importance(trees: &[RegressionTree], n_features: usize) -> Vec<f64> {
    let mut total = vec![0.0; n_features];
    let mut used  = 0usize;

    for tree in trees.iter().filter(|t| t.node_count() > 1) {
        let imp = tree.impurity_importance();
        let sum: f64 = imp.iter().sum();
        if sum <= 0.0 {
            continue;
        }
        for (acc, v) in total.iter_mut().zip(&imp) {
            *acc += v / sum;
        }
        used += 1;
    }

    if used == 0 || n_features == 0 {
        return vec![1.0 / n_features.max(1) as f64; n_features];
    }

    let sum: f64 = total.iter().sum();
    total.iter().map(|v| v / sum).collect()
}
