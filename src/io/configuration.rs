//! Bucketing constants and runtime configuration defaults

// Hue bucket thresholds, in fraction of a full turn
/// Upper bound of the wrapping red bucket at the low end of the hue circle
// Exactly 1/24 so a hue on the boundary is orange; not the rounded 0.041666666666667
pub const HUE_RED_UPPER: f64 = 1.0 / 24.0;
/// Upper bound of the orange bucket
pub const HUE_ORANGE_UPPER: f64 = 0.125;
/// Upper bound of the yellow bucket
pub const HUE_YELLOW_UPPER: f64 = 0.208;
/// Upper bound of the green bucket
pub const HUE_GREEN_UPPER: f64 = 0.458;
/// Upper bound of the blue bucket, where red starts again
pub const HUE_BLUE_UPPER: f64 = 0.9;

// Alpha assigned to each bucket, hottest first
/// Alpha for red hues
pub const ALPHA_RED: f64 = 1.0;
/// Alpha for orange hues
pub const ALPHA_ORANGE: f64 = 0.75;
/// Alpha for yellow hues
pub const ALPHA_YELLOW: f64 = 0.5;
/// Alpha for green hues
pub const ALPHA_GREEN: f64 = 0.25;
/// Alpha for blue and violet hues
pub const ALPHA_BLUE: f64 = 0.1;

// Near-white pixels are background, not signal
/// Lightness above which alpha is forced to zero
pub const LIGHTNESS_CUTOFF: f64 = 0.98;

/// Largest 8-bit channel value
pub const MAX_CHANNEL_VALUE: f64 = 255.0;
/// Largest 16-bit channel value
pub const MAX_WIDE_CHANNEL_VALUE: f64 = 65_535.0;

// Output settings
/// Decimal places printed for each metric
pub const REPORT_PRECISION: usize = 6;

// Progress bar display settings
/// Minimum number of frame pairs before a progress bar is shown
pub const MIN_PAIRS_FOR_PROGRESS: usize = 2;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
