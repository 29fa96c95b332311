//! Hue bucket table mapping perceived color to a discrete alpha level
//!
//! Buckets are half-open hue intervals evaluated in table order, first match
//! wins. A bucket whose start is greater than its end wraps through hue 0,
//! which is how the hottest (red) bucket covers both ends of the hue circle.
//! A lightness cutoff overrides every bucket so that near-white background
//! never counts as signal.

use crate::extraction::hls::Hls;
use crate::io::configuration::{
    ALPHA_BLUE, ALPHA_GREEN, ALPHA_ORANGE, ALPHA_RED, ALPHA_YELLOW, HUE_BLUE_UPPER,
    HUE_GREEN_UPPER, HUE_ORANGE_UPPER, HUE_RED_UPPER, HUE_YELLOW_UPPER, LIGHTNESS_CUTOFF,
    MAX_CHANNEL_VALUE,
};
use crate::io::error::{Result, invalid_parameter};

// Accumulated rounding when summing bucket widths
const COVERAGE_TOLERANCE: f64 = 1e-9;

/// Half-open hue interval `[start, end)` with its alpha level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueBucket {
    /// Inclusive lower hue bound
    pub start: f64,
    /// Exclusive upper hue bound
    pub end: f64,
    /// Alpha assigned to hues inside the interval
    pub alpha: f64,
}

impl HueBucket {
    /// Create a bucket; `start > end` describes an interval wrapping through 0
    pub const fn new(start: f64, end: f64, alpha: f64) -> Self {
        Self { start, end, alpha }
    }

    /// Whether the interval wraps through hue 0
    pub const fn wraps(&self) -> bool {
        self.start > self.end
    }

    /// Test hue membership under half-open semantics
    pub const fn contains(&self, hue: f64) -> bool {
        if self.wraps() {
            hue >= self.start || hue < self.end
        } else {
            hue >= self.start && hue < self.end
        }
    }

    /// Angular width of the interval as a fraction of a full turn
    pub const fn width(&self) -> f64 {
        if self.wraps() {
            1.0 - self.start + self.end
        } else {
            self.end - self.start
        }
    }
}

/// Ordered bucket table plus the lightness override
#[derive(Debug, Clone, PartialEq)]
pub struct HueBucketTable {
    buckets: Vec<HueBucket>,
    lightness_cutoff: f64,
}

impl Default for HueBucketTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl HueBucketTable {
    /// The fixed five-level table used for color-coded gaze heatmaps
    pub fn standard() -> Self {
        Self {
            buckets: vec![
                HueBucket::new(HUE_BLUE_UPPER, HUE_RED_UPPER, ALPHA_RED),
                HueBucket::new(HUE_RED_UPPER, HUE_ORANGE_UPPER, ALPHA_ORANGE),
                HueBucket::new(HUE_ORANGE_UPPER, HUE_YELLOW_UPPER, ALPHA_YELLOW),
                HueBucket::new(HUE_YELLOW_UPPER, HUE_GREEN_UPPER, ALPHA_GREEN),
                HueBucket::new(HUE_GREEN_UPPER, HUE_BLUE_UPPER, ALPHA_BLUE),
            ],
            lightness_cutoff: LIGHTNESS_CUTOFF,
        }
    }

    /// Build a custom table, checking that the buckets partition the hue circle
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The table is empty
    /// - A bound lies outside [0,1] or a bucket is empty
    /// - An alpha or the lightness cutoff lies outside [0,1]
    /// - Buckets overlap or leave a gap
    pub fn new(buckets: Vec<HueBucket>, lightness_cutoff: f64) -> Result<Self> {
        if buckets.is_empty() {
            return Err(invalid_parameter(
                "buckets",
                &"[]",
                &"at least one hue bucket is required",
            ));
        }

        if !(0.0..=1.0).contains(&lightness_cutoff) {
            return Err(invalid_parameter(
                "lightness_cutoff",
                &lightness_cutoff,
                &"must lie in [0, 1]",
            ));
        }

        for bucket in &buckets {
            let bounds_ok =
                (0.0..=1.0).contains(&bucket.start) && (0.0..=1.0).contains(&bucket.end);
            #[allow(clippy::float_cmp)]
            let empty = bucket.start == bucket.end;
            if !bounds_ok || empty {
                return Err(invalid_parameter(
                    "buckets",
                    &format!("[{}, {})", bucket.start, bucket.end),
                    &"bounds must lie in [0, 1] and enclose a non-empty interval",
                ));
            }
            if !(0.0..=1.0).contains(&bucket.alpha) {
                return Err(invalid_parameter(
                    "alpha",
                    &bucket.alpha,
                    &"must lie in [0, 1]",
                ));
            }
        }

        let total_width: f64 = buckets.iter().map(HueBucket::width).sum();
        if (total_width - 1.0).abs() > COVERAGE_TOLERANCE {
            return Err(invalid_parameter(
                "buckets",
                &total_width,
                &"bucket widths must sum to one full turn",
            ));
        }

        // Equal total width alone would accept a gap balanced by an overlap
        let mut by_start = buckets.clone();
        by_start.sort_by(|a, b| a.start.total_cmp(&b.start));
        for (current, next) in by_start.iter().zip(by_start.iter().cycle().skip(1)) {
            if (current.end.rem_euclid(1.0) - next.start).abs() > COVERAGE_TOLERANCE {
                return Err(invalid_parameter(
                    "buckets",
                    &format!("[{}, {})", current.start, current.end),
                    &"bucket is not contiguous with the next one",
                ));
            }
        }

        Ok(Self {
            buckets,
            lightness_cutoff,
        })
    }

    /// Buckets in evaluation order
    pub fn buckets(&self) -> &[HueBucket] {
        &self.buckets
    }

    /// Lightness above which alpha is forced to zero
    pub const fn lightness_cutoff(&self) -> f64 {
        self.lightness_cutoff
    }

    /// First bucket in table order containing `hue`
    pub fn bucket_for(&self, hue: f64) -> Option<&HueBucket> {
        self.buckets.iter().find(|bucket| bucket.contains(hue))
    }

    /// Alpha for a pixel: bucket alpha, then the lightness override
    pub fn alpha_for(&self, hls: Hls) -> f64 {
        let alpha = self.bucket_for(hls.hue).map_or(0.0, |bucket| bucket.alpha);

        if hls.lightness > self.lightness_cutoff {
            0.0
        } else {
            alpha
        }
    }
}

/// Scale an alpha in [0,1] to a byte, truncating toward zero
pub const fn alpha_byte(alpha: f64) -> u8 {
    (alpha.clamp(0.0, 1.0) * MAX_CHANNEL_VALUE) as u8
}
