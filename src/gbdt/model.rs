//! Boosted-tree model representation and prediction

use ndarray::{ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

/// Logistic sigmoid
pub fn sigmoid(margin: f32) -> f32 {
    1.0 / (1.0 + (-margin).exp())
}

/// One node of a regression tree, stored in a flat arena
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Node {
    Split {
        feature: usize,
        /// Rows with feature value <= threshold go left
        threshold: f32,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f32,
    },
}

/// A single regression tree over reduced feature vectors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

impl Tree {
    /// Walk the tree for one feature vector
    pub fn predict_row(&self, row: ArrayView1<f32>) -> f32 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if row[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

/// Trained boosted-tree binary classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GbdtModel {
    pub trees: Vec<Tree>,
    /// Log-odds prior from the training label distribution
    pub base_score: f32,
    pub learning_rate: f32,
}

impl GbdtModel {
    /// Raw additive margin per row
    pub fn predict_margin(&self, x: ArrayView2<f32>) -> Vec<f32> {
        x.rows()
            .into_iter()
            .map(|row| {
                let boosted: f32 = self.trees.iter().map(|t| t.predict_row(row)).sum();
                self.base_score + self.learning_rate * boosted
            })
            .collect()
    }

    /// Positive-class probability per row
    pub fn predict_proba(&self, x: ArrayView2<f32>) -> Vec<f32> {
        self.predict_margin(x).into_iter().map(sigmoid).collect()
    }

    /// Hard labels at probability 0.5
    pub fn predict(&self, x: ArrayView2<f32>) -> Vec<bool> {
        self.predict_margin(x).into_iter().map(|m| m >= 0.0).collect()
    }
}
