//! Validation tests for macro scoring and aggregation

use openmic_baseline::metrics::{macro_scores, summarize, ConfusionCounts, MetricRecord};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confusion_counts() {
        let truth = vec![true, true, false, false, true];
        let predicted = vec![true, false, true, false, true];
        let c = ConfusionCounts::from_predictions(&truth, &predicted);

        assert_eq!(c.true_pos, 2);
        assert_eq!(c.false_neg, 1);
        assert_eq!(c.false_pos, 1);
        assert_eq!(c.true_neg, 1);
    }

    #[test]
    fn test_perfect_prediction_scores_one() {
        let truth = vec![true, false, true, false];
        let record = macro_scores(&truth, &truth);

        assert!((record.precision - 1.0).abs() < 1e-6);
        assert!((record.recall - 1.0).abs() < 1e-6);
        assert!((record.f1 - 1.0).abs() < 1e-6);
        assert_eq!(record.support, 4);
    }

    #[test]
    fn test_macro_scores_hand_computed() {
        // truth [T, F], predicted [T, T]:
        //   positive class: precision 1/2, recall 1, F1 2/3
        //   negative class: precision 0 (no predicted negatives), recall 0, F1 0
        let record = macro_scores(&[true, false], &[true, true]);

        assert!((record.precision - 0.25).abs() < 1e-6);
        assert!((record.recall - 0.5).abs() < 1e-6);
        assert!((record.f1 - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_denominator_scores_zero() {
        // All-positive truth and all-negative predictions leave every
        // positive-class ratio and the negative precision undefined
        let record = macro_scores(&[true, true], &[false, false]);

        assert!((record.precision - 0.0).abs() < 1e-6);
        // negative recall is tn / (tn + fp) = 0 / 0 -> 0 as well
        assert!((record.recall - 0.0).abs() < 1e-6);
        assert!((record.f1 - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_summarize_is_unweighted_mean() {
        let records = vec![
            MetricRecord {
                precision: 1.0,
                recall: 0.5,
                f1: 0.8,
                support: 100,
            },
            MetricRecord {
                precision: 0.5,
                recall: 1.0,
                f1: 0.4,
                support: 2,
            },
        ];
        let summary = summarize(&records);

        assert!((summary.precision - 0.75).abs() < 1e-6);
        assert!((summary.recall - 0.75).abs() < 1e-6);
        assert!((summary.f1 - 0.6).abs() < 1e-6);
        assert_eq!(summary.classes_evaluated, 2);
    }

    #[test]
    fn test_summarize_is_order_invariant() {
        let a = MetricRecord {
            precision: 0.3,
            recall: 0.7,
            f1: 0.42,
            support: 10,
        };
        let b = MetricRecord {
            precision: 0.9,
            recall: 0.1,
            f1: 0.18,
            support: 20,
        };
        assert_eq!(summarize(&[a, b]), summarize(&[b, a]));
    }

    #[test]
    fn test_summarize_empty_is_zero() {
        let summary = summarize(&[]);
        assert_eq!(summary.classes_evaluated, 0);
        assert_eq!(summary.precision, 0.0);
        assert_eq!(summary.recall, 0.0);
        assert_eq!(summary.f1, 0.0);
    }
}
