//! Train/test partitioning by pre-defined clip key lists

use crate::config::Config;
use crate::dataset::read_key_column;
use crate::error::{BaselineError, Result as BaselineResult};
use log::info;
use std::collections::HashSet;
use std::path::Path;

/// Row index subsets for the two splits, in original row order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

impl Partition {
    /// Total number of partitioned rows
    pub fn len(&self) -> usize {
        self.train.len() + self.test.len()
    }

    pub fn is_empty(&self) -> bool {
        self.train.is_empty() && self.test.is_empty()
    }
}

/// Classify every clip key into exactly one split
///
/// Iterates the full key sequence once, so index order within each split
/// preserves original row order rather than split-file order. Every key must
/// belong to exactly one split set; anything else is a fatal consistency
/// error because partition correctness cannot be guaranteed.
pub fn partition_keys(
    keys: &[String],
    train_set: &HashSet<String>,
    test_set: &HashSet<String>,
) -> BaselineResult<Partition> {
    if let Some(shared) = train_set.intersection(test_set).next() {
        return Err(BaselineError::SplitFile(format!(
            "clip key '{}' appears in both splits",
            shared
        )));
    }

    let mut train = Vec::new();
    let mut test = Vec::new();
    for (row, key) in keys.iter().enumerate() {
        if train_set.contains(key) {
            train.push(row);
        } else if test_set.contains(key) {
            test.push(row);
        } else {
            return Err(BaselineError::UnknownKey(format!(
                "'{}' (row {})",
                key, row
            )));
        }
    }

    Ok(Partition { train, test })
}

/// Read both split files and partition the full clip key sequence
pub fn load_partition<P: AsRef<Path>>(
    data_root: P,
    keys: &[String],
    config: &Config,
) -> BaselineResult<Partition> {
    let data_root = data_root.as_ref();
    let train_keys = read_key_column(data_root.join(&config.data.train_split_file))?;
    let test_keys = read_key_column(data_root.join(&config.data.test_split_file))?;

    let train_set: HashSet<String> = train_keys.into_iter().collect();
    let test_set: HashSet<String> = test_keys.into_iter().collect();

    let partition = partition_keys(keys, &train_set, &test_set)?;
    info!(
        "Partitioned {} clips into {} train / {} test",
        partition.len(),
        partition.train.len(),
        partition.test.len()
    );
    Ok(partition)
}
