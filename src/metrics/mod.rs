//! Overlap metrics between gaze and saliency intensity fields

/// Intensity field type and its role labels
pub mod field;
/// Coverage, outside-gaze and unseen-saliency ratios
pub mod overlap;
/// Averaging over sequences of frame pairs
pub mod temporal;

pub use field::{FieldRole, IntensityField};
pub use overlap::{
    ClampPolicy, IntersectionRule, MetricConfig, OverlapMetrics, metrics, metrics_with,
};
pub use temporal::{SequenceAccumulator, mean_field, temporal_metrics};
