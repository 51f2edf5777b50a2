use std::fmt;

#[derive(Debug, thiserror::Error)]
pub enum MeterError {
    #[error("{operand} must be of dimension (N, H, W) or (N, K, H, W), got shape {shape:?}.")]
    InvalidShape { operand: Operand, shape: Vec<usize> },
    #[error("Number of targets and predicted outputs do not match. Predicted batch: {predicted}, target batch: {target}.")]
    BatchSizeMismatch { predicted: usize, target: usize },
    #[error("Number of predicted and target labels must match. Predicted: {predicted}, target: {target}.")]
    ShapeMismatch { predicted: usize, target: usize },
    #[error("{operand} label {value} is outside the range [0, {classes}).")]
    LabelRange {
        operand: Operand,
        value: i64,
        classes: usize,
    },
    #[error("{operand} label {value} is not a whole class index.")]
    NonIntegralLabel { operand: Operand, value: f64 },
    #[error("{operand} scores contain NaN, cannot take the arg-max.")]
    NanScore { operand: Operand },
    #[error("Configuration Error: {0}")]
    ConfigurationError(String),
    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV Error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("Serde YAML Error: {0}")]
    SerdeYamlError(#[from] serde_yaml::Error),
    #[error("Shape Error: {0}")]
    ShapeError(#[from] ndarray::ShapeError),
}

/// Which side of a predicted/target pair a value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Predicted,
    Target,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Predicted => write!(f, "predicted"),
            Operand::Target => write!(f, "target"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_range_message_names_operand() {
        let err = MeterError::LabelRange {
            operand: Operand::Target,
            value: 5,
            classes: 3,
        };
        assert_eq!(err.to_string(), "target label 5 is outside the range [0, 3).");
    }

    #[test]
    fn test_batch_mismatch_message() {
        let err = MeterError::BatchSizeMismatch {
            predicted: 2,
            target: 3,
        };
        assert!(err.to_string().contains("Predicted batch: 2, target batch: 3"));
    }
}
