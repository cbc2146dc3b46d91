//! Deterministic gradient-boosted decision trees for binary classification.
//!
//! A lightweight in-crate learner that avoids external ML dependencies while
//! still supporting:
//! - Logistic-loss boosting with Newton leaf values and L2 regularization.
//! - Depth-limited exact greedy splits with deterministic tie-breaking.
//! - Seeded row subsampling for reproducible stochastic boosting.

mod model;
mod train;

pub use model::{sigmoid, GbdtModel, Node, Tree};
pub use train::{train_gbdt, TrainOptions};
