//! Precision/recall/F1 scoring and macro aggregation

use serde::{Deserialize, Serialize};

/// Per-class metric record (macro-averaged over the two label values)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub precision: f32,
    pub recall: f32,
    pub f1: f32,
    /// Number of scored rows
    pub support: usize,
}

/// Headline summary: unweighted means over evaluated classes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub precision: f32,
    pub recall: f32,
    pub f1: f32,
    pub classes_evaluated: usize,
}

/// Binary confusion counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfusionCounts {
    pub true_pos: usize,
    pub false_pos: usize,
    pub true_neg: usize,
    pub false_neg: usize,
}

impl ConfusionCounts {
    pub fn from_predictions(truth: &[bool], predicted: &[bool]) -> Self {
        debug_assert_eq!(truth.len(), predicted.len());
        let mut counts = ConfusionCounts::default();
        for (&t, &p) in truth.iter().zip(predicted.iter()) {
            match (t, p) {
                (true, true) => counts.true_pos += 1,
                (false, true) => counts.false_pos += 1,
                (false, false) => counts.true_neg += 1,
                (true, false) => counts.false_neg += 1,
            }
        }
        counts
    }
}

/// Ratio with the zero-denominator-scores-zero convention
fn safe_ratio(numerator: usize, denominator: usize) -> f32 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f32 / denominator as f32
    }
}

fn f1_score(precision: f32, recall: f32) -> f32 {
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

/// Macro-averaged precision/recall/F1 over the two label values
///
/// Each label value (positive and negative) is scored as its own class and
/// the two scores are averaged without weighting, matching macro averaging
/// for a binary problem. Undefined ratios (empty denominator) score 0.
pub fn macro_scores(truth: &[bool], predicted: &[bool]) -> MetricRecord {
    let c = ConfusionCounts::from_predictions(truth, predicted);

    let pos_precision = safe_ratio(c.true_pos, c.true_pos + c.false_pos);
    let pos_recall = safe_ratio(c.true_pos, c.true_pos + c.false_neg);
    let neg_precision = safe_ratio(c.true_neg, c.true_neg + c.false_neg);
    let neg_recall = safe_ratio(c.true_neg, c.true_neg + c.false_pos);

    let precision = 0.5 * (pos_precision + neg_precision);
    let recall = 0.5 * (pos_recall + neg_recall);
    let f1 = 0.5 * (f1_score(pos_precision, pos_recall) + f1_score(neg_precision, neg_recall));

    MetricRecord {
        precision,
        recall,
        f1,
        support: truth.len(),
    }
}

/// Unweighted mean of per-class records
///
/// Only classes that were actually evaluated contribute; the result is
/// independent of the order of the records.
pub fn summarize(records: &[MetricRecord]) -> Summary {
    if records.is_empty() {
        return Summary {
            precision: 0.0,
            recall: 0.0,
            f1: 0.0,
            classes_evaluated: 0,
        };
    }
    let n = records.len() as f32;
    Summary {
        precision: records.iter().map(|r| r.precision).sum::<f32>() / n,
        recall: records.iter().map(|r| r.recall).sum::<f32>() / n,
        f1: records.iter().map(|r| r.f1).sum::<f32>() / n,
        classes_evaluated: records.len(),
    }
}
