//! Error types for the baseline trainer/evaluator

use std::fmt;

/// Custom error type for baseline pipeline operations
#[derive(Debug, Clone)]
pub enum BaselineError {
    /// E001: Data root, bundle, or a companion file is missing
    DataNotFound(String),
    /// E002: Bundle deserialization failed (bad NPZ entry, wrong dtype)
    BundleFormat(String),
    /// E003: Configuration validation failed
    ConfigValidationFailed(String),
    /// E004: Class map is not a valid bidirectional name/index mapping
    ClassMapInvalid(String),
    /// E005: Split file unreadable, or the two splits overlap
    SplitFile(String),
    /// E006: A clip key belongs to neither the train nor the test split
    UnknownKey(String),
    /// E007: Array/key/class-map dimensions disagree
    ShapeMismatch(String),
    /// E008: A class has too few distinct labels to train or score (recoverable)
    DegenerateClass { class: String, reason: String },
    /// E009: Model fitting failed for one class
    Training(String),
    /// E010: Report export error
    ReportExport(String),
}

impl fmt::Display for BaselineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BaselineError::DataNotFound(msg) => {
                write!(f, "E001: Data not found - {}", msg)
            }
            BaselineError::BundleFormat(msg) => {
                write!(f, "E002: Invalid bundle format - {}", msg)
            }
            BaselineError::ConfigValidationFailed(msg) => {
                write!(f, "E003: Configuration validation failed - {}", msg)
            }
            BaselineError::ClassMapInvalid(msg) => {
                write!(f, "E004: Invalid class map - {}", msg)
            }
            BaselineError::SplitFile(msg) => {
                write!(f, "E005: Split file error - {}", msg)
            }
            BaselineError::UnknownKey(msg) => {
                write!(f, "E006: Clip key in neither split - {}", msg)
            }
            BaselineError::ShapeMismatch(msg) => {
                write!(f, "E007: Shape mismatch - {}", msg)
            }
            BaselineError::DegenerateClass { class, reason } => {
                write!(f, "E008: Degenerate class '{}' - {}", class, reason)
            }
            BaselineError::Training(msg) => {
                write!(f, "E009: Training error - {}", msg)
            }
            BaselineError::ReportExport(msg) => {
                write!(f, "E010: Report export error - {}", msg)
            }
        }
    }
}

impl std::error::Error for BaselineError {}

// From implementations for common error types
impl From<std::io::Error> for BaselineError {
    fn from(err: std::io::Error) -> Self {
        BaselineError::DataNotFound(format!("File I/O error: {}", err))
    }
}

impl From<serde_json::Error> for BaselineError {
    fn from(err: serde_json::Error) -> Self {
        BaselineError::ClassMapInvalid(format!("JSON error: {}", err))
    }
}

impl From<csv::Error> for BaselineError {
    fn from(err: csv::Error) -> Self {
        BaselineError::SplitFile(format!("CSV error: {}", err))
    }
}

impl From<ndarray_npy::ReadNpzError> for BaselineError {
    fn from(err: ndarray_npy::ReadNpzError) -> Self {
        BaselineError::BundleFormat(format!("NPZ read error: {}", err))
    }
}

impl From<anyhow::Error> for BaselineError {
    fn from(err: anyhow::Error) -> Self {
        BaselineError::ConfigValidationFailed(format!("Generic error: {}", err))
    }
}

/// Result type alias for baseline pipeline operations
pub type Result<T> = std::result::Result<T, BaselineError>;
