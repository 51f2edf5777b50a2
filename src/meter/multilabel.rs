use ndarray::Array2;
use tracing::{debug, instrument};

use crate::{
    config::MeterConfig,
    data::volume::Volume,
    error::{MeterError, Operand},
    meter::{confusion::ConfusionMeter, value::ConfusionValue},
};

/**
Confusion matrix for multi-class, multi-label problems over spatial outputs such as
segmentation maps.

Each `add` takes a predicted and a target volume that are either (N, H, W) maps of
class indices or (N, K, H, W) per-class scores. Score volumes are reduced to labels
with an arg-max over the class axis, then every pixel is counted as one observation.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct MultiLabelConfusionMeter {
    confusion: ConfusionMeter,
}

impl MultiLabelConfusionMeter {
    pub fn new(k: usize, normalized: bool) -> Result<Self, MeterError> {
        Ok(Self {
            confusion: ConfusionMeter::new(k, normalized)?,
        })
    }

    pub fn from_config(config: &MeterConfig) -> Result<Self, MeterError> {
        Ok(Self {
            confusion: ConfusionMeter::from_config(config)?,
        })
    }

    pub fn k(&self) -> usize {
        self.confusion.k()
    }

    pub fn is_normalized(&self) -> bool {
        self.confusion.is_normalized()
    }

    pub fn total(&self) -> u64 {
        self.confusion.total()
    }

    pub fn reset(&mut self) {
        self.confusion.reset();
    }

    /**
    Count one batch of predicted and target volumes.

    ## Arguments
    * `predicted` - (N, K, H, W) scores or (N, H, W) class indices.
    * `target` - (N, K, H, W) scores or (N, H, W) class indices.

    ## Returns
    `Ok(())` once every pixel has been counted. On error nothing is counted.
     */
    #[instrument(level = "debug", skip_all)]
    pub fn add(
        &mut self,
        predicted: impl Into<Volume>,
        target: impl Into<Volume>,
    ) -> Result<(), MeterError> {
        let predicted = predicted.into();
        let target = target.into();

        target.check_dimensionality(Operand::Target)?;
        predicted.check_dimensionality(Operand::Predicted)?;
        if predicted.batch_size() != target.batch_size() {
            return Err(MeterError::BatchSizeMismatch {
                predicted: predicted.batch_size(),
                target: target.batch_size(),
            });
        }
        debug!(
            predicted_shape = ?predicted.shape(),
            target_shape = ?target.shape(),
            k = self.k(),
            "Reducing volumes to label maps"
        );

        let k = self.k();
        let target = target.into_labels(Operand::Target, k)?;
        let predicted = predicted.into_labels(Operand::Predicted, k)?;

        self.confusion.add(&predicted, &target)
    }

    pub fn counts(&self) -> Array2<u64> {
        self.confusion.counts()
    }

    pub fn probabilities(&self) -> Array2<f64> {
        self.confusion.probabilities()
    }

    /// Rows are ground-truth targets, columns are predicted classes.
    pub fn value(&self) -> ConfusionValue {
        self.confusion.value()
    }
}
