use ndarray::{Array, ArrayD, ArrayViewD, Axis, Dimension};
use ndarray_stats::{errors::MinMaxError, QuantileExt};

use crate::error::{MeterError, Operand};

/// Axis holding the per-class scores in an (N, K, H, W) volume.
pub const CLASS_AXIS: usize = 1;

/**
A batch of predictions or targets as handed to the multi-label meter.

The element type only decides how values are read. The dimensionality decides
what they mean: a 3-D volume (N, H, W) holds hard class indices, a 4-D volume
(N, K, H, W) holds per-class scores which are reduced with arg-max over axis 1.
 */
#[derive(Debug, Clone, PartialEq)]
pub enum Volume {
    Int(ArrayD<i64>),
    Float(ArrayD<f64>),
}

impl<D: Dimension> From<Array<i64, D>> for Volume {
    fn from(array: Array<i64, D>) -> Self {
        Volume::Int(array.into_dyn())
    }
}

impl<D: Dimension> From<Array<f64, D>> for Volume {
    fn from(array: Array<f64, D>) -> Self {
        Volume::Float(array.into_dyn())
    }
}

impl<D: Dimension> From<Array<f32, D>> for Volume {
    fn from(array: Array<f32, D>) -> Self {
        Volume::Float(array.mapv(f64::from).into_dyn())
    }
}

macro_rules! int_volume_lossless {
    ($($ty:ty),*) => {
        $(
            impl<D: Dimension> From<Array<$ty, D>> for Volume {
                fn from(array: Array<$ty, D>) -> Self {
                    Volume::Int(array.mapv(i64::from).into_dyn())
                }
            }
        )*
    };
}

// Values past i64::MAX saturate and are later rejected by the range check.
macro_rules! int_volume_saturating {
    ($($ty:ty),*) => {
        $(
            impl<D: Dimension> From<Array<$ty, D>> for Volume {
                fn from(array: Array<$ty, D>) -> Self {
                    Volume::Int(
                        array
                            .mapv(|v| i64::try_from(v).unwrap_or(i64::MAX))
                            .into_dyn(),
                    )
                }
            }
        )*
    };
}

int_volume_lossless!(i8, i16, i32, u8, u16, u32);
int_volume_saturating!(u64, usize);

impl Volume {
    pub fn shape(&self) -> &[usize] {
        match self {
            Volume::Int(array) => array.shape(),
            Volume::Float(array) => array.shape(),
        }
    }

    pub fn ndim(&self) -> usize {
        self.shape().len()
    }

    /// Leading (batch) dimension. Only meaningful once the dimensionality has been checked.
    pub fn batch_size(&self) -> usize {
        self.shape().first().copied().unwrap_or(0)
    }

    /// Fails unless the volume is (N, H, W) or (N, K, H, W).
    pub fn check_dimensionality(&self, operand: Operand) -> Result<(), MeterError> {
        match self.ndim() {
            3 | 4 => Ok(()),
            _ => Err(MeterError::InvalidShape {
                operand,
                shape: self.shape().to_vec(),
            }),
        }
    }

    /**
    Reduce the volume to hard labels and flatten it in row-major order (N, H, W).

    ## Arguments
    * `operand` - Which side of the pair this volume is, used for error reporting.
    * `classes` - Number of classes, used for error reporting on negative labels.

    ## Returns
    The flat label sequence. Labels are not checked against the upper bound here,
    that is left to [`ConfusionMeter::add`](crate::meter::confusion::ConfusionMeter::add).
     */
    pub fn into_labels(self, operand: Operand, classes: usize) -> Result<Vec<usize>, MeterError> {
        self.check_dimensionality(operand)?;
        match self {
            Volume::Int(scores) if scores.ndim() == 4 => {
                argmax_along(scores.view(), Axis(CLASS_AXIS), operand)
            }
            Volume::Float(scores) if scores.ndim() == 4 => {
                argmax_along(scores.view(), Axis(CLASS_AXIS), operand)
            }
            Volume::Int(labels) => labels
                .iter()
                .map(|&value| int_label(value, operand, classes))
                .collect(),
            Volume::Float(labels) => labels
                .iter()
                .map(|&value| float_label(value, operand, classes))
                .collect(),
        }
    }
}

/**
Arg-max along `axis`, flattened in row-major order over the remaining axes.

Ties go to the lowest index. A lane containing NaN has no defined maximum and is
rejected, as is an empty class axis.
 */
pub(crate) fn argmax_along<A: PartialOrd>(
    scores: ArrayViewD<A>,
    axis: Axis,
    operand: Operand,
) -> Result<Vec<usize>, MeterError> {
    if scores.len_of(axis) == 0 {
        return Err(MeterError::InvalidShape {
            operand,
            shape: scores.shape().to_vec(),
        });
    }
    let reduced = scores.map_axis(axis, |lane| lane.argmax());
    reduced
        .iter()
        .map(|result| match result {
            Ok(index) => Ok(*index),
            Err(MinMaxError::UndefinedOrder) => Err(MeterError::NanScore { operand }),
            Err(_) => Err(MeterError::InvalidShape {
                operand,
                shape: scores.shape().to_vec(),
            }),
        })
        .collect()
}

pub(crate) fn int_label(value: i64, operand: Operand, classes: usize) -> Result<usize, MeterError> {
    usize::try_from(value).map_err(|_| MeterError::LabelRange {
        operand,
        value,
        classes,
    })
}

fn float_label(value: f64, operand: Operand, classes: usize) -> Result<usize, MeterError> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(MeterError::NonIntegralLabel { operand, value });
    }
    if value < 0.0 {
        return Err(MeterError::LabelRange {
            operand,
            value: value as i64,
            classes,
        });
    }
    Ok(value as usize)
}
