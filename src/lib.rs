//! OpenMIC-Style Per-Instrument Baseline
//!
//! Loads a packaged audio-feature dataset, applies a fixed train/test split,
//! trains one gradient-boosted binary classifier per instrument class, and
//! reports aggregate macro precision/recall/F1.

pub mod config;
pub mod dataset;
pub mod error;
pub mod features;
pub mod gbdt;
pub mod metrics;
pub mod report;
pub mod split;
pub mod trainer;

pub use config::Config;
pub use error::{BaselineError, Result as BaselineResult};

use log::info;
use std::path::Path;

/// Main processing pipeline: load, partition, train per class, aggregate
pub struct BaselinePipeline {
    config: Config,
}

impl BaselinePipeline {
    /// Create a new pipeline with the given configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run the full pipeline against a data root and write results
    pub fn run<P: AsRef<Path>>(
        &self,
        data_root: P,
        output_dir: P,
    ) -> BaselineResult<report::RunReport> {
        let data_root = data_root.as_ref();

        info!("Loading dataset from {}", data_root.display());
        let (dataset, class_map) = dataset::load_dataset(data_root, &self.config)?;

        let partition = split::load_partition(data_root, &dataset.keys, &self.config)?;

        info!("Training {} per-class classifiers", class_map.len());
        let learner = trainer::GbdtLearner::from_config(&self.config);
        let outcome = trainer::evaluate_classes(
            &dataset,
            &partition,
            &class_map.descriptors(),
            self.config.labels.positive_threshold,
            &learner,
        )?;

        let summary = metrics::summarize(&outcome.test_records());
        let run_report = report::build_report(&dataset, &partition, &outcome, summary);

        if self.config.report.export_json {
            report::export_report(&run_report, output_dir.as_ref())?;
        }

        Ok(run_report)
    }
}

/// Check that the data root and its expected companion files exist
pub fn validate_input<P: AsRef<Path>>(data_root: P, config: &Config) -> BaselineResult<()> {
    let data_root = data_root.as_ref();
    if !data_root.is_dir() {
        return Err(BaselineError::DataNotFound(format!(
            "data root is not a directory: {}",
            data_root.display()
        )));
    }
    for file in [
        &config.data.bundle_file,
        &config.data.key_file,
        &config.data.class_map_file,
        &config.data.train_split_file,
        &config.data.test_split_file,
    ] {
        let path = data_root.join(file);
        if !path.is_file() {
            return Err(BaselineError::DataNotFound(format!(
                "missing input file: {}",
                path.display()
            )));
        }
    }
    config::validate_config(config)
        .map_err(|e| BaselineError::ConfigValidationFailed(e.to_string()))?;
    Ok(())
}
