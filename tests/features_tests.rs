//! Validation tests for feature reduction and label binarization

use ndarray::{arr2, Array3};
use openmic_baseline::features::{binarize_labels, reduce_time_mean, select_annotated};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_reduction_is_elementwise_mean() {
        // One clip, two time slices [1,1] and [3,3] -> mean [2,2]
        let mut features = Array3::<f32>::zeros((1, 2, 2));
        features[[0, 0, 0]] = 1.0;
        features[[0, 0, 1]] = 1.0;
        features[[0, 1, 0]] = 3.0;
        features[[0, 1, 1]] = 3.0;

        let reduced = reduce_time_mean(&features.view(), &[0]);
        assert_eq!(reduced.shape(), &[1, 2]);
        assert!((reduced[[0, 0]] - 2.0).abs() < 1e-6);
        assert!((reduced[[0, 1]] - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_time_reduction_selects_requested_rows_in_order() {
        let mut features = Array3::<f32>::zeros((3, 2, 1));
        for clip in 0..3 {
            features[[clip, 0, 0]] = clip as f32;
            features[[clip, 1, 0]] = clip as f32;
        }

        let reduced = reduce_time_mean(&features.view(), &[2, 0]);
        assert_eq!(reduced.shape(), &[2, 1]);
        assert!((reduced[[0, 0]] - 2.0).abs() < 1e-6);
        assert!((reduced[[1, 0]] - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_threshold_boundary_is_inclusive() {
        let labels = arr2(&[[0.5f32], [0.4999], [0.9], [0.0]]);
        let binarized = binarize_labels(&labels.view(), &[0, 1, 2, 3], 0, 0.5);
        assert_eq!(binarized, vec![true, false, true, false]);
    }

    #[test]
    fn test_select_annotated_honors_mask() {
        let mask = arr2(&[[true, false], [false, true], [true, true]]);
        let selected = select_annotated(&mask.view(), &[0, 1, 2], 0);
        assert_eq!(selected, vec![0, 2]);

        // Every selected row must be masked for the class
        for &row in &selected {
            assert!(mask[[row, 0]]);
        }

        let selected = select_annotated(&mask.view(), &[0, 1, 2], 1);
        assert_eq!(selected, vec![1, 2]);
    }

    #[test]
    fn test_select_annotated_respects_candidate_subset() {
        let mask = arr2(&[[true], [true], [true]]);
        // Only candidates from the split subset are eligible
        let selected = select_annotated(&mask.view(), &[1], 0);
        assert_eq!(selected, vec![1]);
    }
}
