//! Gradient boosting training loop and greedy tree construction

use super::model::{sigmoid, GbdtModel, Node, Tree};
use crate::error::{BaselineError, Result as BaselineResult};
use ndarray::ArrayView2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cmp::Ordering;

/// Minimum gain for a split to be accepted
const MIN_SPLIT_GAIN: f32 = 1e-6;

/// Floor for per-row hessians to keep leaf values finite
const HESS_FLOOR: f32 = 1e-12;

/// Training hyperparameters
#[derive(Debug, Clone)]
pub struct TrainOptions {
    pub rounds: usize,
    pub max_depth: usize,
    pub learning_rate: f32,
    pub l2: f32,
    pub min_samples_leaf: usize,
    /// Fraction of rows drawn (without replacement) per boosting round
    pub subsample: f32,
    pub seed: u64,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            rounds: 100,
            max_depth: 7,
            learning_rate: 0.1,
            l2: 1.0,
            min_samples_leaf: 1,
            subsample: 1.0,
            seed: 42,
        }
    }
}

struct TreeBuilder<'x, 'a> {
    x: ArrayView2<'x, f32>,
    grad: &'a [f32],
    hess: &'a [f32],
    options: &'a TrainOptions,
}

struct Split {
    feature: usize,
    threshold: f32,
    gain: f32,
}

impl<'x, 'a> TreeBuilder<'x, 'a> {
    fn build(&self, rows: &[usize]) -> Tree {
        let mut nodes = Vec::new();
        self.build_node(rows, 0, &mut nodes);
        Tree { nodes }
    }

    fn build_node(&self, rows: &[usize], depth: usize, nodes: &mut Vec<Node>) -> usize {
        let sum_g: f32 = rows.iter().map(|&r| self.grad[r]).sum();
        let sum_h: f32 = rows.iter().map(|&r| self.hess[r]).sum();

        if depth >= self.options.max_depth || rows.len() < 2 * self.options.min_samples_leaf.max(1)
        {
            return self.push_leaf(sum_g, sum_h, nodes);
        }

        let split = match self.best_split(rows, sum_g, sum_h) {
            Some(split) => split,
            None => return self.push_leaf(sum_g, sum_h, nodes),
        };

        let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = rows
            .iter()
            .copied()
            .partition(|&r| self.x[[r, split.feature]] <= split.threshold);

        let idx = nodes.len();
        // Placeholder, replaced once children exist
        nodes.push(Node::Leaf { value: 0.0 });
        let left = self.build_node(&left_rows, depth + 1, nodes);
        let right = self.build_node(&right_rows, depth + 1, nodes);
        nodes[idx] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        idx
    }

    fn push_leaf(&self, sum_g: f32, sum_h: f32, nodes: &mut Vec<Node>) -> usize {
        let value = -sum_g / (sum_h + self.options.l2);
        nodes.push(Node::Leaf { value });
        nodes.len() - 1
    }

    /// Exact greedy split search over all features
    ///
    /// Ties are broken toward the lowest feature index and the first
    /// qualifying threshold, so construction is deterministic.
    fn best_split(&self, rows: &[usize], sum_g: f32, sum_h: f32) -> Option<Split> {
        let min_leaf = self.options.min_samples_leaf.max(1);
        let l2 = self.options.l2;
        let parent_score = sum_g * sum_g / (sum_h + l2);
        let mut best: Option<Split> = None;

        for feature in 0..self.x.shape()[1] {
            let mut ordered: Vec<usize> = rows.to_vec();
            ordered.sort_by(|&a, &b| {
                self.x[[a, feature]]
                    .partial_cmp(&self.x[[b, feature]])
                    .unwrap_or(Ordering::Equal)
                    .then(a.cmp(&b))
            });

            let mut left_g = 0.0;
            let mut left_h = 0.0;
            for i in 0..ordered.len() - 1 {
                let row = ordered[i];
                left_g += self.grad[row];
                left_h += self.hess[row];

                let value = self.x[[row, feature]];
                let next_value = self.x[[ordered[i + 1], feature]];
                if next_value <= value {
                    continue;
                }
                let left_count = i + 1;
                let right_count = ordered.len() - left_count;
                if left_count < min_leaf || right_count < min_leaf {
                    continue;
                }

                let right_g = sum_g - left_g;
                let right_h = sum_h - left_h;
                let gain = left_g * left_g / (left_h + l2) + right_g * right_g / (right_h + l2)
                    - parent_score;
                if gain > MIN_SPLIT_GAIN && best.as_ref().map_or(true, |b| gain > b.gain) {
                    best = Some(Split {
                        feature,
                        // Midpoint keeps ties off the boundary
                        threshold: 0.5 * (value + next_value),
                        gain,
                    });
                }
            }
        }
        best
    }
}

/// Train a boosted-tree binary classifier on reduced features
pub fn train_gbdt(
    x: ArrayView2<f32>,
    y: &[bool],
    options: &TrainOptions,
) -> BaselineResult<GbdtModel> {
    let n = x.shape()[0];
    if n == 0 {
        return Err(BaselineError::Training(
            "cannot fit on an empty training set".to_string(),
        ));
    }
    if y.len() != n {
        return Err(BaselineError::Training(format!(
            "{} feature rows but {} labels",
            n,
            y.len()
        )));
    }

    let positives = y.iter().filter(|&&label| label).count();
    let prior = (positives as f32 / n as f32).clamp(1e-6, 1.0 - 1e-6);
    let base_score = (prior / (1.0 - prior)).ln();

    let mut model = GbdtModel {
        trees: Vec::new(),
        base_score,
        learning_rate: options.learning_rate,
    };

    // Single-label input: the log-odds prior is already the optimum
    if positives == 0 || positives == n {
        return Ok(model);
    }

    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut margins = vec![base_score; n];
    let mut grad = vec![0.0f32; n];
    let mut hess = vec![0.0f32; n];

    for _ in 0..options.rounds {
        for i in 0..n {
            let p = sigmoid(margins[i]);
            grad[i] = p - if y[i] { 1.0 } else { 0.0 };
            hess[i] = (p * (1.0 - p)).max(HESS_FLOOR);
        }

        let rows = sample_rows(n, options.subsample, &mut rng);
        let builder = TreeBuilder {
            x,
            grad: &grad,
            hess: &hess,
            options,
        };
        let tree = builder.build(&rows);

        for (i, margin) in margins.iter_mut().enumerate() {
            *margin += options.learning_rate * tree.predict_row(x.row(i));
        }
        model.trees.push(tree);
    }

    Ok(model)
}

/// Draw a sorted, seeded subsample of row indices (all rows when subsample >= 1)
fn sample_rows(n: usize, subsample: f32, rng: &mut StdRng) -> Vec<usize> {
    if subsample >= 1.0 {
        return (0..n).collect();
    }
    let m = ((n as f32 * subsample).ceil() as usize).clamp(1, n);
    let mut rows = rand::seq::index::sample(rng, n, m).into_vec();
    rows.sort_unstable();
    rows
}
