//! Run summary output: stdout scalars plus a structured JSON report

use crate::dataset::Dataset;
use crate::error::{BaselineError, Result as BaselineResult};
use crate::metrics::{MetricRecord, Summary};
use crate::split::Partition;
use crate::trainer::EvalOutcome;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Full run report, exported as analysis.json
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub version: String,
    pub timestamp: String,
    pub dataset: DatasetInfo,
    pub summary: Summary,
    pub classes: Vec<ClassReportEntry>,
    pub skipped: Vec<SkippedEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub n_clips: usize,
    pub n_time_slices: usize,
    pub n_feature_dims: usize,
    pub n_classes: usize,
    pub n_train: usize,
    pub n_test: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassReportEntry {
    pub name: String,
    pub index: usize,
    pub train: MetricRecord,
    pub test: MetricRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedEntry {
    pub name: String,
    pub reason: String,
}

/// Assemble the report structure from the run outcome
pub fn build_report<M>(
    dataset: &Dataset,
    partition: &Partition,
    outcome: &EvalOutcome<M>,
    summary: Summary,
) -> RunReport {
    RunReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
            .to_string(),
        dataset: DatasetInfo {
            n_clips: dataset.n_clips(),
            n_time_slices: dataset.n_time_slices(),
            n_feature_dims: dataset.n_feature_dims(),
            n_classes: dataset.n_classes(),
            n_train: partition.train.len(),
            n_test: partition.test.len(),
        },
        summary,
        classes: outcome
            .evaluated
            .iter()
            .map(|e| ClassReportEntry {
                name: e.class.name.clone(),
                index: e.class.index,
                train: e.train_metrics,
                test: e.test_metrics,
            })
            .collect(),
        skipped: outcome
            .skipped
            .iter()
            .map(|s| SkippedEntry {
                name: s.class.name.clone(),
                reason: s.reason.clone(),
            })
            .collect(),
    }
}

/// Write the report JSON into the output directory
pub fn export_report(report: &RunReport, output_dir: &Path) -> BaselineResult<()> {
    std::fs::create_dir_all(output_dir)
        .map_err(|e| BaselineError::ReportExport(format!("cannot create output dir: {}", e)))?;

    let report_path = output_dir.join("analysis.json");
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| BaselineError::ReportExport(format!("JSON serialization error: {}", e)))?;
    std::fs::write(&report_path, json)
        .map_err(|e| BaselineError::ReportExport(format!("cannot write report: {}", e)))?;

    info!("Exported run report to {}", report_path.display());
    Ok(())
}

/// Print the headline macro averages, optionally with the per-class table
pub fn print_summary(report: &RunReport, per_class: bool) {
    if per_class {
        for entry in &report.classes {
            println!(
                "  {:<20} precision={:.4}  recall={:.4}  f1={:.4}  support={}",
                entry.name,
                entry.test.precision,
                entry.test.recall,
                entry.test.f1,
                entry.test.support
            );
        }
        for skipped in &report.skipped {
            println!("  {:<20} skipped ({})", skipped.name, skipped.reason);
        }
    }
    println!(
        "Macro precision: {:.4}",
        report.summary.precision
    );
    println!("Macro recall:    {:.4}", report.summary.recall);
    println!("Macro F1:        {:.4}", report.summary.f1);
}
