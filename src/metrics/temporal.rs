//! Temporal aggregation over a sequence of frame pairs
//!
//! Gaze frames and saliency frames are averaged independently and the metrics
//! are computed once on the two averaged fields. This smooths the fields over
//! time; it is not an average of per-frame metrics.

use ndarray::Array2;

use crate::io::error::{ErrorContext, HeatmapError, Result, WithContext, shape_mismatch};
use crate::metrics::field::{FieldRole, IntensityField};
use crate::metrics::overlap::{MetricConfig, OverlapMetrics, metrics_with};

/// Running elementwise sum of same-shape frames
#[derive(Debug, Clone, Default)]
pub struct FrameAccumulator {
    sum: Option<Array2<f64>>,
    count: usize,
}

impl FrameAccumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames folded in so far
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Whether no frame has been folded in yet
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Fold a frame into the running sum
    ///
    /// The first frame fixes the expected shape.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` tagged with the frame index when the frame's
    /// shape differs from the first frame's
    pub fn push(&mut self, frame: &IntensityField) -> Result<()> {
        match &mut self.sum {
            Some(sum) => {
                if sum.dim() != frame.shape() {
                    return Err(shape_mismatch(sum.dim(), frame.shape())).with_frame(self.count);
                }
                *sum += frame.values();
            }
            None => self.sum = Some(frame.values().clone()),
        }
        self.count += 1;
        Ok(())
    }

    /// Elementwise arithmetic mean of all frames folded in
    ///
    /// # Errors
    ///
    /// Returns `EmptySequence` when no frame has been pushed
    pub fn mean(&self) -> Result<IntensityField> {
        let sum = self.sum.as_ref().ok_or(HeatmapError::EmptySequence)?;
        let count = self.count as f64;
        Ok(IntensityField::new(sum.mapv(|v| v / count)))
    }
}

/// Paired accumulators for gaze and saliency frames
#[derive(Debug, Clone, Default)]
pub struct SequenceAccumulator {
    gaze: FrameAccumulator,
    saliency: FrameAccumulator,
}

impl SequenceAccumulator {
    /// Create an empty sequence
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frame pairs folded in so far
    pub const fn len(&self) -> usize {
        self.gaze.len()
    }

    /// Whether no pair has been folded in yet
    pub const fn is_empty(&self) -> bool {
        self.gaze.is_empty()
    }

    /// Fold one gaze/saliency frame pair into the sequence
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` tagged with the frame index and the offending
    /// side when the pair disagrees with itself or with earlier frames. A pair
    /// that disagrees with itself is attributed to its saliency field.
    pub fn push_pair(&mut self, gaze: &IntensityField, saliency: &IntensityField) -> Result<()> {
        gaze.ensure_same_shape(saliency).with_context(ErrorContext {
            frame: Some(self.len()),
            field: Some(FieldRole::Saliency),
            path: None,
        })?;
        self.gaze.push(gaze).with_field(FieldRole::Gaze)?;
        self.saliency.push(saliency).with_field(FieldRole::Saliency)
    }

    /// Averaged (gaze, saliency) fields
    ///
    /// # Errors
    ///
    /// Returns `EmptySequence` when no pair has been pushed
    pub fn means(&self) -> Result<(IntensityField, IntensityField)> {
        Ok((self.gaze.mean()?, self.saliency.mean()?))
    }

    /// Metrics of the averaged fields
    ///
    /// # Errors
    ///
    /// Returns an error if the sequence is empty or the averaged fields are degenerate
    pub fn metrics(&self, config: MetricConfig) -> Result<OverlapMetrics> {
        let (gaze, saliency) = self.means()?;
        metrics_with(config, &gaze, &saliency)
    }
}

/// Elementwise arithmetic mean of a sequence of same-shape fields
///
/// # Errors
///
/// Returns an error if the sequence is empty or the frames differ in shape
pub fn mean_field<'a, I>(frames: I) -> Result<IntensityField>
where
    I: IntoIterator<Item = &'a IntensityField>,
{
    let mut accumulator = FrameAccumulator::new();
    for frame in frames {
        accumulator.push(frame)?;
    }
    accumulator.mean()
}

/// Metrics over a sequence of (gaze, saliency) frame pairs
///
/// # Errors
///
/// Returns an error if:
/// - The sequence is empty
/// - Any frame differs in shape from the first
/// - Either averaged field has zero total mass
pub fn temporal_metrics(
    config: MetricConfig,
    pairs: &[(IntensityField, IntensityField)],
) -> Result<OverlapMetrics> {
    let mut sequence = SequenceAccumulator::new();
    for (gaze, saliency) in pairs {
        sequence.push_pair(gaze, saliency)?;
    }
    sequence.metrics(config)
}
