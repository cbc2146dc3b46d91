//! Validation tests for the dataset loader and class map

mod common;

use ndarray::{Array2, Array3};
use openmic_baseline::config::Config;
use openmic_baseline::dataset::{load_class_map, load_dataset, ClassMap};
use openmic_baseline::error::BaselineError;
use std::collections::HashMap;

fn small_arrays() -> (Array3<f32>, Array2<f32>, Array2<bool>) {
    let features = Array3::<f32>::from_elem((3, 2, 4), 0.25);
    let labels = Array2::<f32>::from_elem((3, 2), 0.8);
    let mask = Array2::<bool>::from_elem((3, 2), true);
    (features, labels, mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_dataset_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (features, labels, mask) = small_arrays();
        common::write_data_root(
            dir.path(),
            &features,
            &labels,
            &mask,
            &["clip_a", "clip_b", "clip_c"],
            &[("guitar", 0), ("piano", 1)],
            &["clip_a", "clip_b"],
            &["clip_c"],
        );

        let (dataset, class_map) =
            load_dataset(dir.path(), &Config::default()).expect("load dataset");

        assert_eq!(dataset.n_clips(), 3);
        assert_eq!(dataset.n_time_slices(), 2);
        assert_eq!(dataset.n_feature_dims(), 4);
        assert_eq!(dataset.n_classes(), 2);
        assert_eq!(dataset.keys, vec!["clip_a", "clip_b", "clip_c"]);
        assert!((dataset.features[[1, 1, 3]] - 0.25).abs() < 1e-6);
        assert!((dataset.labels[[2, 0]] - 0.8).abs() < 1e-6);
        assert!(dataset.mask[[0, 1]]);
        assert_eq!(class_map.len(), 2);
    }

    #[test]
    fn test_missing_bundle_is_data_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = load_dataset(dir.path(), &Config::default());
        assert!(matches!(result, Err(BaselineError::DataNotFound(_))));
    }

    #[test]
    fn test_missing_class_map_is_data_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (features, labels, mask) = small_arrays();
        common::write_bundle(&dir.path().join("openmic-2018.npz"), &features, &labels, &mask);
        common::write_key_file(
            &dir.path().join("sample_keys.csv"),
            &["clip_a", "clip_b", "clip_c"],
        );

        let result = load_dataset(dir.path(), &Config::default());
        match result {
            Err(BaselineError::DataNotFound(msg)) => assert!(msg.contains("class map")),
            other => panic!("expected DataNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_key_count_mismatch_is_shape_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (features, labels, mask) = small_arrays();
        common::write_data_root(
            dir.path(),
            &features,
            &labels,
            &mask,
            &["clip_a", "clip_b"], // one key short
            &[("guitar", 0), ("piano", 1)],
            &["clip_a"],
            &["clip_b"],
        );

        let result = load_dataset(dir.path(), &Config::default());
        assert!(matches!(result, Err(BaselineError::ShapeMismatch(_))));
    }

    #[test]
    fn test_class_count_mismatch_is_shape_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (features, labels, mask) = small_arrays();
        common::write_data_root(
            dir.path(),
            &features,
            &labels,
            &mask,
            &["clip_a", "clip_b", "clip_c"],
            &[("guitar", 0)], // label matrix has 2 columns
            &["clip_a", "clip_b"],
            &["clip_c"],
        );

        let result = load_dataset(dir.path(), &Config::default());
        assert!(matches!(result, Err(BaselineError::ShapeMismatch(_))));
    }

    #[test]
    fn test_class_map_is_bidirectional() {
        let mut pairs = HashMap::new();
        pairs.insert("guitar".to_string(), 1);
        pairs.insert("piano".to_string(), 0);
        let class_map = ClassMap::from_pairs(pairs).expect("valid map");

        assert_eq!(class_map.index_of("guitar"), Some(1));
        assert_eq!(class_map.name_of(1), Some("guitar"));
        assert_eq!(class_map.index_of("piano"), Some(0));
        assert_eq!(class_map.name_of(0), Some("piano"));
        assert_eq!(class_map.index_of("banjo"), None);

        // Descriptors come back in column-index order
        let descriptors = class_map.descriptors();
        assert_eq!(descriptors[0].name, "piano");
        assert_eq!(descriptors[1].name, "guitar");
    }

    #[test]
    fn test_class_map_rejects_duplicate_indices() {
        let mut pairs = HashMap::new();
        pairs.insert("guitar".to_string(), 0);
        pairs.insert("piano".to_string(), 0);
        assert!(matches!(
            ClassMap::from_pairs(pairs),
            Err(BaselineError::ClassMapInvalid(_))
        ));
    }

    #[test]
    fn test_class_map_rejects_out_of_range_index() {
        let mut pairs = HashMap::new();
        pairs.insert("guitar".to_string(), 5);
        assert!(matches!(
            ClassMap::from_pairs(pairs),
            Err(BaselineError::ClassMapInvalid(_))
        ));
    }

    #[test]
    fn test_load_class_map_from_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("class-map.json");
        common::write_class_map(&path, &[("drums", 0), ("violin", 1)]);

        let class_map = load_class_map(&path).expect("load class map");
        assert_eq!(class_map.len(), 2);
        assert_eq!(class_map.index_of("violin"), Some(1));
    }
}
