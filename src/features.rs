//! Per-clip feature reduction and label binarization

use ndarray::{Array2, ArrayView2, ArrayView3, Axis};

/// Rows within `candidates` whose annotation mask is set for column `class_idx`
pub fn select_annotated(
    mask: &ArrayView2<bool>,
    candidates: &[usize],
    class_idx: usize,
) -> Vec<usize> {
    candidates
        .iter()
        .copied()
        .filter(|&row| mask[[row, class_idx]])
        .collect()
}

/// Collapse the time axis by arithmetic mean for the selected rows
///
/// Produces one D-dimensional vector per row. Temporal variation within a
/// clip is discarded; the pipeline does no temporal modeling.
pub fn reduce_time_mean(features: &ArrayView3<f32>, rows: &[usize]) -> Array2<f32> {
    let d = features.shape()[2];
    let mut reduced = Array2::<f32>::zeros((rows.len(), d));
    for (out_row, &row) in rows.iter().enumerate() {
        let clip = features.index_axis(Axis(0), row);
        let mean = clip.mean_axis(Axis(0)).expect("T > 0 enforced at load time");
        reduced.row_mut(out_row).assign(&mean);
    }
    reduced
}

/// Threshold soft labels into booleans for the selected rows
///
/// The threshold is inclusive: a probability exactly at the threshold is
/// positive.
pub fn binarize_labels(
    labels: &ArrayView2<f32>,
    rows: &[usize],
    class_idx: usize,
    threshold: f32,
) -> Vec<bool> {
    rows.iter()
        .map(|&row| labels[[row, class_idx]] >= threshold)
        .collect()
}
