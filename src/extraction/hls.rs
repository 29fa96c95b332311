//! RGB to hue/lightness/saturation conversion
//!
//! All three components are fractions in [0,1]; hue is a fraction of a full
//! turn rather than degrees so it can be compared directly with the bucket
//! thresholds.

use crate::io::configuration::MAX_CHANNEL_VALUE;

/// Hue, lightness and saturation of a single pixel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hls {
    /// Hue as a fraction of a full turn, in [0,1)
    pub hue: f64,
    /// Lightness, the midpoint of the largest and smallest channel
    pub lightness: f64,
    /// Saturation; computed for completeness, unused by bucketing
    pub saturation: f64,
}

/// Convert an 8-bit RGB triple to HLS
pub fn rgb_to_hls(r: u8, g: u8, b: u8) -> Hls {
    normalized_rgb_to_hls(
        f64::from(r) / MAX_CHANNEL_VALUE,
        f64::from(g) / MAX_CHANNEL_VALUE,
        f64::from(b) / MAX_CHANNEL_VALUE,
    )
}

/// Convert RGB channels already scaled to [0,1] to HLS
// Exact comparisons: the extreme channel is one of the inputs, bit for bit
#[allow(clippy::float_cmp)]
pub fn normalized_rgb_to_hls(r: f64, g: f64, b: f64) -> Hls {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let sum = max + min;
    let range = max - min;
    let lightness = sum / 2.0;

    if max == min {
        return Hls {
            hue: 0.0,
            lightness,
            saturation: 0.0,
        };
    }

    let saturation = if lightness <= 0.5 {
        range / sum
    } else {
        range / (2.0 - sum)
    };

    let rc = (max - r) / range;
    let gc = (max - g) / range;
    let bc = (max - b) / range;

    let sector = if r == max {
        bc - gc
    } else if g == max {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };

    Hls {
        hue: (sector / 6.0).rem_euclid(1.0),
        lightness,
        saturation,
    }
}
