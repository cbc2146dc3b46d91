//! Dataset loading: feature bundle, clip keys, and the instrument class map

use crate::config::Config;
use crate::error::{BaselineError, Result as BaselineResult};
use log::info;
use ndarray::{Array2, Array3};
use ndarray_npy::NpzReader;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// One instrument class: human-readable name plus its label-matrix column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDescriptor {
    pub name: String,
    pub index: usize,
}

/// Bidirectional instrument name <-> column index mapping
///
/// Built once from the class-map JSON and immutable afterwards. Exposes a
/// deterministic, index-ordered descriptor sequence for the per-class loop.
#[derive(Debug, Clone)]
pub struct ClassMap {
    names: Vec<String>,
    by_name: HashMap<String, usize>,
}

impl ClassMap {
    /// Build from name -> index pairs; indices must cover 0..C-1 exactly once
    pub fn from_pairs(pairs: HashMap<String, usize>) -> BaselineResult<Self> {
        let n_classes = pairs.len();
        if n_classes == 0 {
            return Err(BaselineError::ClassMapInvalid(
                "class map is empty".to_string(),
            ));
        }
        let mut names = vec![String::new(); n_classes];
        let mut seen = vec![false; n_classes];
        for (name, &index) in &pairs {
            if index >= n_classes {
                return Err(BaselineError::ClassMapInvalid(format!(
                    "class '{}' has index {} but only {} classes exist",
                    name, index, n_classes
                )));
            }
            if seen[index] {
                return Err(BaselineError::ClassMapInvalid(format!(
                    "column index {} is assigned to more than one class",
                    index
                )));
            }
            seen[index] = true;
            names[index] = name.clone();
        }
        Ok(ClassMap {
            names,
            by_name: pairs,
        })
    }

    /// Number of classes
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Column index for an instrument name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Instrument name for a column index
    pub fn name_of(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(|s| s.as_str())
    }

    /// All classes in column-index order
    pub fn descriptors(&self) -> Vec<ClassDescriptor> {
        self.names
            .iter()
            .enumerate()
            .map(|(index, name)| ClassDescriptor {
                name: name.clone(),
                index,
            })
            .collect()
    }
}

/// Loaded dataset: arrays are row-aligned with the clip key sequence
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Per-clip time-series features, shape (N, T, D)
    pub features: Array3<f32>,
    /// Soft label probabilities in [0, 1], shape (N, C)
    pub labels: Array2<f32>,
    /// Annotation presence mask, shape (N, C)
    pub mask: Array2<bool>,
    /// Clip keys, one per row
    pub keys: Vec<String>,
}

impl Dataset {
    pub fn n_clips(&self) -> usize {
        self.features.shape()[0]
    }

    pub fn n_time_slices(&self) -> usize {
        self.features.shape()[1]
    }

    pub fn n_feature_dims(&self) -> usize {
        self.features.shape()[2]
    }

    pub fn n_classes(&self) -> usize {
        self.labels.shape()[1]
    }
}

/// Read a single-column headerless CSV file into an ordered key sequence
pub fn read_key_column<P: AsRef<Path>>(path: P) -> BaselineResult<Vec<String>> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(BaselineError::DataNotFound(format!(
            "key file not found: {}",
            path.display()
        )));
    }
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    let mut keys = Vec::new();
    for record in reader.records() {
        let record = record?;
        match record.get(0) {
            Some(key) if !key.is_empty() => keys.push(key.to_string()),
            _ => {
                return Err(BaselineError::SplitFile(format!(
                    "empty row in {}",
                    path.display()
                )))
            }
        }
    }
    Ok(keys)
}

/// Load the class map JSON (instrument name -> column index)
pub fn load_class_map<P: AsRef<Path>>(path: P) -> BaselineResult<ClassMap> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(BaselineError::DataNotFound(format!(
            "class map not found: {}",
            path.display()
        )));
    }
    let content = std::fs::read_to_string(path)?;
    let pairs: HashMap<String, usize> = serde_json::from_str(&content)?;
    ClassMap::from_pairs(pairs)
}

/// Load the NPZ feature bundle and companion files from the data root
///
/// Returns arrays exactly as stored; no transformation beyond deserialization.
pub fn load_dataset<P: AsRef<Path>>(
    data_root: P,
    config: &Config,
) -> BaselineResult<(Dataset, ClassMap)> {
    let data_root = data_root.as_ref();
    if !data_root.is_dir() {
        return Err(BaselineError::DataNotFound(format!(
            "data root is not a directory: {}",
            data_root.display()
        )));
    }

    let bundle_path = data_root.join(&config.data.bundle_file);
    if !bundle_path.is_file() {
        return Err(BaselineError::DataNotFound(format!(
            "bundle not found: {}",
            bundle_path.display()
        )));
    }

    let file = File::open(&bundle_path)?;
    let mut npz = NpzReader::new(file)?;
    let features: Array3<f32> = npz.by_name("X")?;
    let labels: Array2<f32> = npz.by_name("Y_true")?;
    let mask: Array2<bool> = npz.by_name("Y_mask")?;

    let keys = read_key_column(data_root.join(&config.data.key_file))?;
    let class_map = load_class_map(data_root.join(&config.data.class_map_file))?;

    let dataset = Dataset {
        features,
        labels,
        mask,
        keys,
    };
    validate_shapes(&dataset, &class_map)?;

    info!(
        "Loaded bundle: {} clips, {} time slices, {} feature dims, {} classes",
        dataset.n_clips(),
        dataset.n_time_slices(),
        dataset.n_feature_dims(),
        class_map.len()
    );

    Ok((dataset, class_map))
}

/// Check that arrays, keys, and class map agree on N and C
fn validate_shapes(dataset: &Dataset, class_map: &ClassMap) -> BaselineResult<()> {
    let n = dataset.n_clips();
    if dataset.n_time_slices() == 0 || dataset.n_feature_dims() == 0 {
        return Err(BaselineError::ShapeMismatch(format!(
            "feature tensor has empty time or feature axis: {:?}",
            dataset.features.dim()
        )));
    }
    if dataset.labels.shape()[0] != n {
        return Err(BaselineError::ShapeMismatch(format!(
            "features have {} rows but labels have {}",
            n,
            dataset.labels.shape()[0]
        )));
    }
    if dataset.mask.dim() != dataset.labels.dim() {
        return Err(BaselineError::ShapeMismatch(format!(
            "mask shape {:?} != label shape {:?}",
            dataset.mask.dim(),
            dataset.labels.dim()
        )));
    }
    if dataset.keys.len() != n {
        return Err(BaselineError::ShapeMismatch(format!(
            "{} clip keys for {} rows",
            dataset.keys.len(),
            n
        )));
    }
    if class_map.len() != dataset.n_classes() {
        return Err(BaselineError::ShapeMismatch(format!(
            "class map has {} classes but label matrix has {} columns",
            class_map.len(),
            dataset.n_classes()
        )));
    }
    Ok(())
}
