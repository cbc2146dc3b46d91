//! Configuration system for the baseline trainer/evaluator

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Config {
    pub data: DataConfig,
    pub boosting: BoostingConfig,
    pub labels: LabelConfig,
    pub report: ReportConfig,
}

/// File names resolved relative to the data root
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub bundle_file: String,
    pub key_file: String,
    pub class_map_file: String,
    pub train_split_file: String,
    pub test_split_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            bundle_file: "openmic-2018.npz".to_string(),
            key_file: "sample_keys.csv".to_string(),
            class_map_file: "class-map.json".to_string(),
            train_split_file: "partitions/split01_train.csv".to_string(),
            test_split_file: "partitions/split01_test.csv".to_string(),
        }
    }
}

/// Gradient boosting hyperparameters, fixed for reproducibility
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoostingConfig {
    pub rounds: usize,
    pub max_depth: usize,
    pub learning_rate: f32,
    pub l2: f32,
    pub min_samples_leaf: usize,
    pub subsample: f32,
    pub seed: u64,
}

impl Default for BoostingConfig {
    fn default() -> Self {
        Self {
            rounds: 100,
            max_depth: 7,
            learning_rate: 0.1,
            l2: 1.0,
            min_samples_leaf: 1,
            subsample: 1.0,
            seed: 42,
        }
    }
}

/// Label binarization configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// Soft labels at or above this value are positive (inclusive threshold)
    pub positive_threshold: f32,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            positive_threshold: 0.5,
        }
    }
}

/// Report output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub export_json: bool,
    pub per_class: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            export_json: true,
            per_class: true,
        }
    }
}

/// Validate configuration parameters
pub fn validate_config(config: &Config) -> anyhow::Result<()> {
    if config.boosting.rounds == 0 {
        anyhow::bail!("boosting.rounds must be > 0");
    }
    if config.boosting.max_depth == 0 {
        anyhow::bail!("boosting.max_depth must be >= 1");
    }
    if config.boosting.learning_rate <= 0.0 || config.boosting.learning_rate > 1.0 {
        anyhow::bail!("boosting.learning_rate must be in (0, 1]");
    }
    if config.boosting.l2 < 0.0 {
        anyhow::bail!("boosting.l2 must be >= 0");
    }
    if config.boosting.subsample <= 0.0 || config.boosting.subsample > 1.0 {
        anyhow::bail!("boosting.subsample must be in (0, 1]");
    }
    if !(0.0..=1.0).contains(&config.labels.positive_threshold) {
        anyhow::bail!("labels.positive_threshold must be in [0, 1]");
    }
    Ok(())
}

/// Load configuration from JSON file
pub fn load_config<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Config> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = serde_json::from_str(&content)?;
    validate_config(&config)?;
    Ok(config)
}

/// Save configuration to JSON file
pub fn save_config<P: AsRef<std::path::Path>>(config: &Config, path: P) -> anyhow::Result<()> {
    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
