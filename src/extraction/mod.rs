//! Grayscale extraction from color-coded heatmaps

/// Bucket table mapping hue to alpha levels
pub mod buckets;
/// Per-pixel extraction and file-level wrapper
pub mod extractor;
/// RGB to HLS conversion
pub mod hls;

pub use buckets::{HueBucket, HueBucketTable};
pub use extractor::{extract, extract_file, extract_with};
pub use hls::{Hls, rgb_to_hls};
