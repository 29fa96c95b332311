//! Overlap analysis between human gaze heatmaps and saliency-model heatmaps
//!
//! Color-coded heatmaps are reduced to grayscale intensity by hue bucketing,
//! then gaze and saliency fields are compared through three overlap ratios,
//! optionally after averaging a sequence of frames.

#![forbid(unsafe_code)]

/// Grayscale extraction from color-coded heatmaps
pub mod extraction;
/// Input/output operations, command-line surface and error handling
pub mod io;
/// Overlap metrics and temporal aggregation
pub mod metrics;

pub use io::error::{HeatmapError, Result};
