//! Per-class training and evaluation loop

use crate::config::Config;
use crate::dataset::{ClassDescriptor, Dataset};
use crate::error::{BaselineError, Result as BaselineResult};
use crate::features::{binarize_labels, reduce_time_mean, select_annotated};
use crate::gbdt::{train_gbdt, GbdtModel, TrainOptions};
use crate::metrics::{macro_scores, MetricRecord};
use crate::split::Partition;
use log::{debug, warn};
use ndarray::ArrayView2;

/// Fitted binary classifier over reduced feature vectors
pub trait Model {
    fn predict(&self, x: ArrayView2<f32>) -> Vec<bool>;
}

/// Anything that can fit a `Model` from features and boolean labels
///
/// The boosted-tree learner is the production implementation; tests plug in
/// trivial learners through the same seam.
pub trait Learner {
    type Model: Model;

    fn fit(&self, x: ArrayView2<f32>, y: &[bool]) -> BaselineResult<Self::Model>;
}

impl Model for GbdtModel {
    fn predict(&self, x: ArrayView2<f32>) -> Vec<bool> {
        GbdtModel::predict(self, x)
    }
}

/// Boosted-tree learner configured from the run configuration
#[derive(Debug, Clone)]
pub struct GbdtLearner {
    pub options: TrainOptions,
}

impl GbdtLearner {
    pub fn from_config(config: &Config) -> Self {
        let boosting = &config.boosting;
        Self {
            options: TrainOptions {
                rounds: boosting.rounds,
                max_depth: boosting.max_depth,
                learning_rate: boosting.learning_rate,
                l2: boosting.l2,
                min_samples_leaf: boosting.min_samples_leaf,
                subsample: boosting.subsample,
                seed: boosting.seed,
            },
        }
    }
}

impl Learner for GbdtLearner {
    type Model = GbdtModel;

    fn fit(&self, x: ArrayView2<f32>, y: &[bool]) -> BaselineResult<GbdtModel> {
        train_gbdt(x, y, &self.options)
    }
}

/// One successfully evaluated class
#[derive(Debug, Clone)]
pub struct ClassEvaluation<M> {
    pub class: ClassDescriptor,
    pub model: M,
    pub train_metrics: MetricRecord,
    pub test_metrics: MetricRecord,
}

/// A class excluded from the aggregate, with the reason
#[derive(Debug, Clone)]
pub struct SkippedClass {
    pub class: ClassDescriptor,
    pub reason: String,
}

/// Accumulated outcome of the per-class loop
#[derive(Debug, Clone)]
pub struct EvalOutcome<M> {
    pub evaluated: Vec<ClassEvaluation<M>>,
    pub skipped: Vec<SkippedClass>,
}

impl<M> EvalOutcome<M> {
    /// Trained classifier for a class name, if it was evaluated
    pub fn model_for(&self, name: &str) -> Option<&M> {
        self.evaluated
            .iter()
            .find(|e| e.class.name == name)
            .map(|e| &e.model)
    }

    /// Per-class test metric records, in evaluation order
    pub fn test_records(&self) -> Vec<MetricRecord> {
        self.evaluated.iter().map(|e| e.test_metrics).collect()
    }
}

fn check_degenerate(class: &ClassDescriptor, labels: &[bool], split: &str) -> BaselineResult<()> {
    if labels.is_empty() {
        return Err(BaselineError::DegenerateClass {
            class: class.name.clone(),
            reason: format!("no annotated rows in the {} split", split),
        });
    }
    let first = labels[0];
    if labels.iter().all(|&l| l == first) {
        return Err(BaselineError::DegenerateClass {
            class: class.name.clone(),
            reason: format!(
                "all {} {} labels are {}",
                labels.len(),
                split,
                first
            ),
        });
    }
    Ok(())
}

/// Train and score a single class
///
/// Selects annotated rows per split, reduces the time axis, binarizes the
/// soft labels, fits, and scores predictions on both splits.
pub fn evaluate_class<L: Learner>(
    dataset: &Dataset,
    partition: &Partition,
    class: &ClassDescriptor,
    threshold: f32,
    learner: &L,
) -> BaselineResult<ClassEvaluation<L::Model>> {
    let mask = dataset.mask.view();
    let train_rows = select_annotated(&mask, &partition.train, class.index);
    let test_rows = select_annotated(&mask, &partition.test, class.index);

    let labels = dataset.labels.view();
    let train_labels = binarize_labels(&labels, &train_rows, class.index, threshold);
    let test_labels = binarize_labels(&labels, &test_rows, class.index, threshold);

    check_degenerate(class, &train_labels, "train")?;
    check_degenerate(class, &test_labels, "test")?;

    let features = dataset.features.view();
    let train_x = reduce_time_mean(&features, &train_rows);
    let test_x = reduce_time_mean(&features, &test_rows);

    let model = learner.fit(train_x.view(), &train_labels)?;

    let train_metrics = macro_scores(&train_labels, &model.predict(train_x.view()));
    let test_metrics = macro_scores(&test_labels, &model.predict(test_x.view()));
    debug!(
        "class '{}': train F1 {:.4}, test F1 {:.4} (support {})",
        class.name, train_metrics.f1, test_metrics.f1, test_metrics.support
    );

    Ok(ClassEvaluation {
        class: class.clone(),
        model,
        train_metrics,
        test_metrics,
    })
}

/// Run the per-class loop over all class descriptors
///
/// Classes are independent; the aggregate is invariant to their order.
/// Degenerate classes and per-class fit failures are skipped with a warning
/// so the remaining classes still run; any other error is fatal.
pub fn evaluate_classes<L: Learner>(
    dataset: &Dataset,
    partition: &Partition,
    classes: &[ClassDescriptor],
    threshold: f32,
    learner: &L,
) -> BaselineResult<EvalOutcome<L::Model>> {
    let mut outcome = EvalOutcome {
        evaluated: Vec::new(),
        skipped: Vec::new(),
    };

    for class in classes {
        match evaluate_class(dataset, partition, class, threshold, learner) {
            Ok(evaluation) => outcome.evaluated.push(evaluation),
            Err(err @ (BaselineError::DegenerateClass { .. } | BaselineError::Training(_))) => {
                warn!("skipping class '{}': {}", class.name, err);
                outcome.skipped.push(SkippedClass {
                    class: class.clone(),
                    reason: err.to_string(),
                });
            }
            Err(err) => return Err(err),
        }
    }

    Ok(outcome)
}
