//! Conversion of color-coded heatmaps into grayscale intensity images

use std::path::Path;

use ndarray::{Array3, Axis, Zip};

use crate::extraction::buckets::{HueBucketTable, alpha_byte};
use crate::extraction::hls::rgb_to_hls;
use crate::io::error::{HeatmapError, Result};
use crate::io::image::{load_color_heatmap, save_grayscale};

/// Number of channels in both the color input and the grayscale output
pub const RGB_CHANNELS: usize = 3;

/// Extract a grayscale heatmap using the standard bucket table
///
/// # Errors
///
/// Returns an error if the input does not have exactly three channels
pub fn extract(color: &Array3<u8>) -> Result<Array3<u8>> {
    extract_with(&HueBucketTable::standard(), color)
}

/// Extract a grayscale heatmap using a caller-supplied bucket table
///
/// The output has the input's shape; every pixel carries one alpha byte
/// replicated across its three channels.
///
/// # Errors
///
/// Returns an error if the input does not have exactly three channels
pub fn extract_with(table: &HueBucketTable, color: &Array3<u8>) -> Result<Array3<u8>> {
    let (rows, cols, channels) = color.dim();
    if channels != RGB_CHANNELS {
        return Err(HeatmapError::InvalidSourceData {
            reason: format!("expected {RGB_CHANNELS} color channels, found {channels}"),
        });
    }

    let mut output = Array3::zeros((rows, cols, RGB_CHANNELS));

    Zip::from(output.lanes_mut(Axis(2)))
        .and(color.lanes(Axis(2)))
        .for_each(|mut out_pixel, in_pixel| {
            let channel = |c: usize| in_pixel.get(c).copied().unwrap_or(0);
            let hls = rgb_to_hls(channel(0), channel(1), channel(2));
            out_pixel.fill(alpha_byte(table.alpha_for(hls)));
        });

    Ok(output)
}

/// Decode a color heatmap, extract it and write the grayscale result as PNG
///
/// # Errors
///
/// Returns an error if the input cannot be decoded or the output cannot be written
pub fn extract_file(input: &Path, output: &Path) -> Result<()> {
    let color = load_color_heatmap(input)?;
    let grayscale = extract(&color)?;
    save_grayscale(&grayscale, output)?;

    tracing::info!(
        "Extracted '{}' -> '{}' ({}x{})",
        input.display(),
        output.display(),
        grayscale.dim().1,
        grayscale.dim().0
    );

    Ok(())
}
