use ndarray::{Array2, ArrayView2, Axis};
use tracing::debug;

use crate::{
    config::MeterConfig,
    data::volume::argmax_along,
    error::{MeterError, Operand},
    meter::value::ConfusionValue,
    util::matrix_utils::normalize_rows,
};

/**
Running K×K confusion matrix over flat (predicted, target) label pairs.

Rows correspond to ground-truth targets and columns to predicted classes.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct ConfusionMeter {
    conf: Array2<u64>,
    normalized: bool,
}

impl ConfusionMeter {
    /**
    Create an empty meter.

    ## Arguments
    * `k` - Number of classes, must be greater than zero.
    * `normalized` - Whether `value()` returns row-normalized probabilities instead of counts.
     */
    pub fn new(k: usize, normalized: bool) -> Result<Self, MeterError> {
        if k == 0 {
            return Err(MeterError::ConfigurationError(
                "Number of classes (k) must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            conf: Array2::zeros((k, k)),
            normalized,
        })
    }

    pub fn from_config(config: &MeterConfig) -> Result<Self, MeterError> {
        config.validate()?;
        Self::new(config.classes, config.normalized)
    }

    pub fn k(&self) -> usize {
        self.conf.nrows()
    }

    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    /// Number of label pairs seen since the last reset.
    pub fn total(&self) -> u64 {
        self.conf.sum()
    }

    pub fn reset(&mut self) {
        self.conf.fill(0);
    }

    /**
    Count one batch of label pairs.

    The whole batch is validated before anything is counted, so a rejected batch
    leaves the matrix untouched.

    ## Arguments
    * `predicted` - Predicted class per observation, each in `[0, k)`.
    * `target` - Ground-truth class per observation, each in `[0, k)`.
     */
    pub fn add(&mut self, predicted: &[usize], target: &[usize]) -> Result<(), MeterError> {
        if predicted.len() != target.len() {
            return Err(MeterError::ShapeMismatch {
                predicted: predicted.len(),
                target: target.len(),
            });
        }
        let k = self.k();
        check_range(predicted, Operand::Predicted, k)?;
        check_range(target, Operand::Target, k)?;

        for (&p, &t) in predicted.iter().zip(target) {
            self.conf[[t, p]] += 1;
        }
        debug!(pairs = predicted.len(), total = self.total(), "Updated confusion matrix");
        Ok(())
    }

    /**
    Count one batch of per-sample class scores against hard targets.

    ## Arguments
    * `scores` - (N, K) scores, the predicted class of each row is its arg-max (lowest index on ties).
    * `target` - N ground-truth classes.
     */
    pub fn add_scores(&mut self, scores: ArrayView2<f64>, target: &[usize]) -> Result<(), MeterError> {
        if scores.ncols() != self.k() {
            return Err(MeterError::InvalidShape {
                operand: Operand::Predicted,
                shape: scores.shape().to_vec(),
            });
        }
        let predicted = argmax_along(scores.into_dyn(), Axis(1), Operand::Predicted)?;
        self.add(&predicted, target)
    }

    /// Raw counts, regardless of the normalization flag.
    pub fn counts(&self) -> Array2<u64> {
        self.conf.clone()
    }

    /// Row-normalized matrix, regardless of the normalization flag.
    pub fn probabilities(&self) -> Array2<f64> {
        normalize_rows(self.conf.view())
    }

    pub fn value(&self) -> ConfusionValue {
        if self.normalized {
            ConfusionValue::Normalized(self.probabilities())
        } else {
            ConfusionValue::Counts(self.counts())
        }
    }
}

fn check_range(labels: &[usize], operand: Operand, classes: usize) -> Result<(), MeterError> {
    match labels.iter().find(|&&label| label >= classes) {
        Some(&label) => Err(MeterError::LabelRange {
            operand,
            value: i64::try_from(label).unwrap_or(i64::MAX),
            classes,
        }),
        None => Ok(()),
    }
}
