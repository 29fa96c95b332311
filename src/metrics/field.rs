//! Single-channel intensity fields compared by the metric engine

use std::fmt;

use ndarray::Array2;
use num_traits::ToPrimitive;

use crate::io::configuration::MAX_CHANNEL_VALUE;
use crate::io::error::{Result, shape_mismatch};

/// Which side of a comparison a field stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    /// Observed human gaze density (Hu)
    Gaze,
    /// Model-predicted saliency (Hs)
    Saliency,
}

impl fmt::Display for FieldRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gaze => write!(f, "gaze field (Hu)"),
            Self::Saliency => write!(f, "saliency field (Hs)"),
        }
    }
}

/// 2D grid of scalar intensities, semantically normalized to [0,1]
///
/// Values are not forced into range on construction; the metric engine
/// applies its clamp policy before computing ratios.
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityField {
    values: Array2<f64>,
}

impl From<Array2<f64>> for IntensityField {
    fn from(values: Array2<f64>) -> Self {
        Self::new(values)
    }
}

impl IntensityField {
    /// Wrap an array of intensities as a field
    pub const fn new(values: Array2<f64>) -> Self {
        Self { values }
    }

    /// Field of the given (rows, cols) shape with zero mass
    pub fn zeros(shape: (usize, usize)) -> Self {
        Self::new(Array2::zeros(shape))
    }

    /// Normalize raw samples by the largest representable sample value
    ///
    /// Samples that cannot be represented as `f64` count as zero.
    pub fn from_scaled<T>(raw: &Array2<T>, max_value: f64) -> Self
    where
        T: Copy + ToPrimitive,
    {
        Self::new(raw.mapv(|sample| sample.to_f64().unwrap_or(0.0) / max_value))
    }

    /// Normalize 8-bit samples to [0,1]
    pub fn from_bytes(raw: &Array2<u8>) -> Self {
        Self::from_scaled(raw, MAX_CHANNEL_VALUE)
    }

    /// Shape as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    /// Borrow the underlying intensities
    pub const fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Take ownership of the underlying intensities
    pub fn into_values(self) -> Array2<f64> {
        self.values
    }

    /// Total intensity over the grid
    pub fn mass(&self) -> f64 {
        self.values.sum()
    }

    /// Copy of the field with every value clamped into [0,1]
    pub fn clamped(&self) -> Self {
        Self::new(self.values.mapv(|v| v.clamp(0.0, 1.0)))
    }

    /// Check that `other` has the same shape as `self`
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` when the dimensions differ
    pub fn ensure_same_shape(&self, other: &Self) -> Result<()> {
        if self.shape() == other.shape() {
            Ok(())
        } else {
            Err(shape_mismatch(self.shape(), other.shape()))
        }
    }
}
