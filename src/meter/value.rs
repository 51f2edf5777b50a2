use std::fmt;

use ndarray::Array2;

/// Snapshot of a confusion matrix. Rows are ground-truth classes, columns are predicted classes.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfusionValue {
    Counts(Array2<u64>),
    Normalized(Array2<f64>),
}

impl ConfusionValue {
    pub fn k(&self) -> usize {
        match self {
            ConfusionValue::Counts(matrix) => matrix.nrows(),
            ConfusionValue::Normalized(matrix) => matrix.nrows(),
        }
    }

    pub fn as_counts(&self) -> Option<&Array2<u64>> {
        match self {
            ConfusionValue::Counts(matrix) => Some(matrix),
            ConfusionValue::Normalized(_) => None,
        }
    }

    pub fn as_probabilities(&self) -> Option<&Array2<f64>> {
        match self {
            ConfusionValue::Counts(_) => None,
            ConfusionValue::Normalized(matrix) => Some(matrix),
        }
    }

    /// The matrix as floats, whichever variant this is.
    pub fn to_f64(&self) -> Array2<f64> {
        match self {
            ConfusionValue::Counts(matrix) => matrix.mapv(|count| count as f64),
            ConfusionValue::Normalized(matrix) => matrix.clone(),
        }
    }
}

impl fmt::Display for ConfusionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<Vec<String>> = match self {
            ConfusionValue::Counts(matrix) => matrix
                .rows()
                .into_iter()
                .map(|row| row.iter().map(|v| v.to_string()).collect())
                .collect(),
            ConfusionValue::Normalized(matrix) => matrix
                .rows()
                .into_iter()
                .map(|row| row.iter().map(|v| format!("{:.4}", v)).collect())
                .collect(),
        };
        let width = rows.iter().flatten().map(String::len).max().unwrap_or(1);
        for (i, row) in rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let cells: Vec<String> = row.iter().map(|c| format!("{:>width$}", c)).collect();
            write!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_display_counts() {
        let value = ConfusionValue::Counts(array![[2, 0, 0], [0, 1, 0], [0, 10, 0]]);
        assert_eq!(value.to_string(), " 2  0  0\n 0  1  0\n 0 10  0");
    }

    #[test]
    fn test_display_normalized() {
        let value = ConfusionValue::Normalized(array![[1.0, 0.0], [0.25, 0.75]]);
        assert_eq!(value.to_string(), "1.0000 0.0000\n0.2500 0.7500");
    }

    #[test]
    fn test_accessors() {
        let value = ConfusionValue::Counts(array![[1, 2], [3, 4]]);
        assert_eq!(value.k(), 2);
        assert!(value.as_probabilities().is_none());
        assert_eq!(value.as_counts(), Some(&array![[1u64, 2], [3, 4]]));
        assert_eq!(value.to_f64(), array![[1.0, 2.0], [3.0, 4.0]]);
    }
}
