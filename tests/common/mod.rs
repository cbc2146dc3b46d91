//! Shared helpers for building synthetic on-disk datasets

use ndarray::{Array2, Array3};
use ndarray_npy::NpzWriter;
use std::fs::File;
use std::path::Path;

/// Write the NPZ bundle with the three named arrays
pub fn write_bundle(
    path: &Path,
    features: &Array3<f32>,
    labels: &Array2<f32>,
    mask: &Array2<bool>,
) {
    let mut npz = NpzWriter::new(File::create(path).expect("create bundle"));
    npz.add_array("X", features).expect("write X");
    npz.add_array("Y_true", labels).expect("write Y_true");
    npz.add_array("Y_mask", mask).expect("write Y_mask");
    npz.finish().expect("finish bundle");
}

/// Write a single-column headerless key file
pub fn write_key_file(path: &Path, keys: &[&str]) {
    let content = keys.join("\n");
    std::fs::write(path, content + "\n").expect("write key file");
}

/// Write a class map JSON from (name, index) pairs
pub fn write_class_map(path: &Path, pairs: &[(&str, usize)]) {
    let entries: Vec<String> = pairs
        .iter()
        .map(|(name, index)| format!("  \"{}\": {}", name, index))
        .collect();
    let json = format!("{{\n{}\n}}\n", entries.join(",\n"));
    std::fs::write(path, json).expect("write class map");
}

/// Lay out a complete data root: bundle, keys, class map, and split files
#[allow(clippy::too_many_arguments)]
pub fn write_data_root(
    root: &Path,
    features: &Array3<f32>,
    labels: &Array2<f32>,
    mask: &Array2<bool>,
    keys: &[&str],
    class_pairs: &[(&str, usize)],
    train_keys: &[&str],
    test_keys: &[&str],
) {
    write_bundle(&root.join("openmic-2018.npz"), features, labels, mask);
    write_key_file(&root.join("sample_keys.csv"), keys);
    write_class_map(&root.join("class-map.json"), class_pairs);
    std::fs::create_dir_all(root.join("partitions")).expect("create partitions dir");
    write_key_file(&root.join("partitions/split01_train.csv"), train_keys);
    write_key_file(&root.join("partitions/split01_test.csv"), test_keys);
}
