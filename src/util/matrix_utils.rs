use ndarray::{Array2, ArrayView2, Axis};

// Normalize a count matrix by rows so each row is a distribution over columns.
// Rows with no observations stay all zero instead of becoming NaN.
pub fn normalize_rows(counts: ArrayView2<u64>) -> Array2<f64> {
    let mut normalized = counts.mapv(|count| count as f64);
    for mut row in normalized.axis_iter_mut(Axis(0)) {
        let sum: f64 = row.sum();
        if sum == 0.0 {
            continue;
        }
        row.mapv_inplace(|value| value / sum);
    }
    normalized
}
