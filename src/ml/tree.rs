//! CART regression tree.
//!
//! Exact-greedy construction with the squared-error criterion.
//! Rows are addressed by index so a bootstrap sample (which
//! repeats indices) needs no copying of the feature matrix.

use serde::{Deserialize, Serialize};

/// Nodes at or below this impurity become leaves
const MIN_IMPURITY: f64 = 1e-12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// None = grow until leaves are pure or too small
    pub max_depth:         Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf:  usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth:         None,
            min_samples_split: 2,
            min_samples_leaf:  1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Leaf {
        value:     f64,
        n_samples: usize,
    },
    Split {
        feature:   usize,
        threshold: f64,
        left:      usize,
        right:     usize,
        n_samples: usize,
        /// Squared-error reduction achieved by this split
        sse_drop:  f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    nodes:      Vec<Node>,
    n_features: usize,
}

#[derive(Debug, Clone, Copy)]
struct SplitCandidate {
    feature:   usize,
    threshold: f64,
    sse_drop:  f64,
}

impl RegressionTree {
    /// Fit on the rows of `x`/`y` listed in `sample` (repeats allowed).
    /// `sample` must be non-empty.
    pub fn fit(x: &[Vec<f64>], y: &[f64], sample: &[usize], config: &TreeConfig) -> Self {
        let n_features = x.first().map(|r| r.len()).unwrap_or(0);
        let mut nodes: Vec<Node> = Vec::new();

        // (slot to fill, rows reaching it, depth)
        nodes.push(Node::Leaf { value: 0.0, n_samples: 0 });
        let mut stack: Vec<(usize, Vec<usize>, usize)> = vec![(0, sample.to_vec(), 0)];

        while let Some((slot, rows, depth)) = stack.pop() {
            let (sum, sum_sq) = sums(y, &rows);
            let m        = rows.len() as f64;
            let mean     = sum / m;
            let impurity = (sum_sq / m - mean * mean).max(0.0);

            let can_split = config.max_depth.map_or(true, |d| depth < d)
                && rows.len() >= config.min_samples_split
                && rows.len() >= 2 * config.min_samples_leaf
                && impurity > MIN_IMPURITY;

            let split = if can_split {
                best_split(x, y, &rows, n_features, config.min_samples_leaf, sum, sum_sq)
            } else {
                None
            };

            match split {
                None => {
                    nodes[slot] = Node::Leaf { value: mean, n_samples: rows.len() };
                }
                Some(s) => {
                    let (left_rows, right_rows): (Vec<usize>, Vec<usize>) =
                        rows.iter().partition(|&&i| x[i][s.feature] <= s.threshold);

                    let left  = nodes.len();
                    let right = left + 1;
                    nodes.push(Node::Leaf { value: 0.0, n_samples: 0 });
                    nodes.push(Node::Leaf { value: 0.0, n_samples: 0 });

                    nodes[slot] = Node::Split {
                        feature:   s.feature,
                        threshold: s.threshold,
                        left,
                        right,
                        n_samples: rows.len(),
                        sse_drop:  s.sse_drop,
                    };

                    stack.push((right, right_rows, depth + 1));
                    stack.push((left, left_rows, depth + 1));
                }
            }
        }

        Self { nodes, n_features }
    }

    pub fn predict_row(&self, row: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { value, .. } => return *value,
                Node::Split { feature, threshold, left, right, .. } => {
                    idx = if row[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }

    /// Mean decrease in impurity per feature, weighted by the share
    /// of training rows reaching each split. Not normalised.
    pub fn impurity_importance(&self) -> Vec<f64> {
        let mut importance = vec![0.0; self.n_features];
        let total = match self.nodes.first() {
            Some(Node::Leaf { n_samples, .. }) | Some(Node::Split { n_samples, .. }) => {
                *n_samples as f64
            }
            None => return importance,
        };

        for node in &self.nodes {
            if let Node::Split { feature, sse_drop, .. } = node {
                // sse_drop / N == (n/N)·imp − (n_l/N)·imp_l − (n_r/N)·imp_r
                importance[*feature] += sse_drop / total;
            }
        }
        importance
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| matches!(n, Node::Leaf { .. })).count()
    }
}

fn sums(y: &[f64], rows: &[usize]) -> (f64, f64) {
    rows.iter().fold((0.0, 0.0), |(s, sq), &i| (s + y[i], sq + y[i] * y[i]))
}

/// Sum of squared errors around the mean from running sums
fn sse(sum: f64, sum_sq: f64, count: f64) -> f64 {
    (sum_sq - sum * sum / count).max(0.0)
}

/// Sweep every feature's sorted values and return the split with the
/// largest squared-error reduction. Ties keep the earliest candidate.
fn best_split(
    x:          &[Vec<f64>],
    y:          &[f64],
    rows:       &[usize],
    n_features: usize,
    min_leaf:   usize,
    sum:        f64,
    sum_sq:     f64,
) -> Option<SplitCandidate> {
    let m          = rows.len();
    let parent_sse = sse(sum, sum_sq, m as f64);
    let mut best: Option<SplitCandidate> = None;

    let mut pairs: Vec<(f64, f64)> = Vec::with_capacity(m);
    for feature in 0..n_features {
        pairs.clear();
        pairs.extend(rows.iter().map(|&i| (x[i][feature], y[i])));
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

        let (mut left_sum, mut left_sq) = (0.0, 0.0);
        for k in 1..m {
            let (prev_x, prev_y) = pairs[k - 1];
            left_sum += prev_y;
            left_sq  += prev_y * prev_y;

            let next_x = pairs[k].0;
            if prev_x == next_x || k < min_leaf || m - k < min_leaf {
                continue;
            }
            // A NaN threshold would send every row right, forever
            if !prev_x.is_finite() || !next_x.is_finite() {
                continue;
            }

            let left_sse  = sse(left_sum, left_sq, k as f64);
            let right_sse = sse(sum - left_sum, sum_sq - left_sq, (m - k) as f64);
            let drop      = parent_sse - left_sse - right_sse;

            if drop > 0.0 && best.map_or(true, |b| drop > b.sse_drop) {
                let mut threshold = prev_x + (next_x - prev_x) / 2.0;
                if !threshold.is_finite() || threshold >= next_x {
                    threshold = prev_x;
                }
                best = Some(SplitCandidate { feature, threshold, sse_drop: drop });
            }
        }
    }

    best
}
