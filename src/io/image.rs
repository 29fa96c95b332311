//! Raster decoding into ndarray buffers and grayscale PNG export

use std::path::Path;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use ndarray::{Array2, Array3};

use crate::extraction::extractor::RGB_CHANNELS;
use crate::io::configuration::{MAX_CHANNEL_VALUE, MAX_WIDE_CHANNEL_VALUE};
use crate::io::error::{HeatmapError, Result};
use crate::metrics::field::IntensityField;

fn open_image(path: &Path) -> Result<DynamicImage> {
    let img = image::open(path).map_err(|e| HeatmapError::ImageDecode {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::debug!(
        "Decoded '{}': {}x{} {:?}",
        path.display(),
        img.width(),
        img.height(),
        img.color()
    );

    Ok(img)
}

/// Blend a translucent overlay onto the white page it is drawn on
///
/// Fully transparent pixels become white and so read as background.
fn composite_on_white(rgba: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let Rgba([r, g, b, alpha]) = *rgba.get_pixel(x, y);
        Rgb([r, g, b].map(|channel| over_white(channel, alpha)))
    })
}

fn over_white(channel: u8, alpha: u8) -> u8 {
    let (channel, alpha) = (u32::from(channel), u32::from(alpha));
    let max = MAX_CHANNEL_VALUE as u32;
    ((channel * alpha + max * (max - alpha) + max / 2) / max) as u8
}

/// Load a color-coded heatmap as (rows, cols, 3) RGB bytes
///
/// Translucent pixels are composited onto white, so transparent regions are
/// background rather than black. Wider sample types are reduced to 8 bits.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded
pub fn load_color_heatmap(path: &Path) -> Result<Array3<u8>> {
    let img = open_image(path)?;
    let rgb = if img.color().has_alpha() {
        composite_on_white(&img.to_rgba8())
    } else {
        img.to_rgb8()
    };
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);

    Array3::from_shape_vec((height, width, RGB_CHANNELS), rgb.into_raw()).map_err(|e| {
        HeatmapError::InvalidSourceData {
            reason: format!("'{}' has an inconsistent pixel buffer: {e}", path.display()),
        }
    })
}

fn channel_mean(channels: [f64; 3]) -> f64 {
    channels.iter().sum::<f64>() / channels.len() as f64
}

/// Load a grayscale intensity image as a field normalized to [0,1]
///
/// Each pixel is reduced to the mean of its RGB channels, which is exact for
/// grayscale images stored with replicated channels. 8-bit, 16-bit and float
/// images are each normalized by their own full-scale value.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded
pub fn load_intensity_field(path: &Path) -> Result<IntensityField> {
    let img = open_image(path)?;
    let (width, height) = (img.width() as usize, img.height() as usize);

    let color = img.color();
    let bytes_per_sample = color.bytes_per_pixel() / color.channel_count().max(1);

    let (samples, full_scale): (Vec<f64>, f64) = match bytes_per_sample {
        1 => (
            img.to_rgb8()
                .pixels()
                .map(|p| channel_mean(p.0.map(f64::from)))
                .collect(),
            MAX_CHANNEL_VALUE,
        ),
        2 => (
            img.to_rgb16()
                .pixels()
                .map(|p| channel_mean(p.0.map(f64::from)))
                .collect(),
            MAX_WIDE_CHANNEL_VALUE,
        ),
        _ => (
            img.to_rgb32f()
                .pixels()
                .map(|p| channel_mean(p.0.map(f64::from)))
                .collect(),
            1.0,
        ),
    };

    let raw = Array2::from_shape_vec((height, width), samples).map_err(|e| {
        HeatmapError::InvalidSourceData {
            reason: format!("'{}' has an inconsistent pixel buffer: {e}", path.display()),
        }
    })?;

    Ok(IntensityField::from_scaled(&raw, full_scale))
}

/// Save a (rows, cols, 3) byte array as an RGB PNG
///
/// # Errors
///
/// Returns an error if:
/// - The array does not have three channels or is too large for an image
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn save_grayscale(pixels: &Array3<u8>, output_path: &Path) -> Result<()> {
    let (rows, cols, channels) = pixels.dim();
    if channels != RGB_CHANNELS {
        return Err(HeatmapError::InvalidSourceData {
            reason: format!("expected {RGB_CHANNELS} channels for export, found {channels}"),
        });
    }

    let too_large = |_| HeatmapError::InvalidSourceData {
        reason: format!("{cols}x{rows} exceeds the maximum image size"),
    };
    let width = u32::try_from(cols).map_err(too_large)?;
    let height = u32::try_from(rows).map_err(too_large)?;

    // Logical iteration order is row-major regardless of memory layout
    let raw: Vec<u8> = pixels.iter().copied().collect();
    let mismatched = || HeatmapError::InvalidSourceData {
        reason: "pixel buffer does not match image dimensions".to_string(),
    };
    let img = RgbImage::from_raw(width, height, raw).ok_or_else(mismatched)?;

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| HeatmapError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save_with_format(output_path, ImageFormat::Png)
        .map_err(|e| HeatmapError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
