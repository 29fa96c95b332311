//! Tests for image decoding into arrays and grayscale PNG export

#[cfg(test)]
mod tests {
    use heatoverlap::HeatmapError;
    use heatoverlap::extraction::extractor::extract;
    use heatoverlap::io::image::{load_color_heatmap, load_intensity_field, save_grayscale};
    use image::{ImageBuffer, Rgb, RgbImage, Rgba, RgbaImage};
    use ndarray::{Array3, array};
    use tempfile::TempDir;

    // Tests color heatmaps load as rows x cols x 3 in row-major order
    // Verified by swapping width and height
    #[test]
    fn test_load_color_heatmap_layout() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("color.png");
        RgbImage::from_fn(3, 2, |x, y| Rgb([x as u8 * 10, y as u8 * 100, 7]))
            .save(&path)
            .unwrap();

        let color = load_color_heatmap(&path).unwrap();

        assert_eq!(color.dim(), (2, 3, 3));
        assert_eq!(color.get((1, 2, 0)), Some(&20));
        assert_eq!(color.get((1, 2, 1)), Some(&100));
        assert_eq!(color.get((0, 0, 2)), Some(&7));
    }

    // Tests translucent pixels are composited onto a white page
    // Verified by dropping the alpha channel instead
    #[test]
    fn test_load_color_heatmap_composites_alpha() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rgba.png");
        RgbaImage::from_fn(3, 1, |x, _| match x {
            0 => Rgba([0, 0, 0, 0]),
            1 => Rgba([255, 0, 0, 255]),
            _ => Rgba([255, 0, 0, 128]),
        })
        .save(&path)
        .unwrap();

        let color = load_color_heatmap(&path).unwrap();

        assert_eq!(color.dim(), (1, 3, 3));
        assert_eq!(
            color.iter().copied().collect::<Vec<u8>>(),
            vec![255, 255, 255, 255, 0, 0, 255, 127, 127]
        );
    }

    // Tests a transparent overlay background carries no signal
    // Verified by treating transparent pixels as black
    #[test]
    fn test_transparent_background_extracts_to_zero() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("overlay.png");
        RgbaImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                Rgba([0, 0, 0, 0])
            } else {
                Rgba([255, 0, 0, 255])
            }
        })
        .save(&path)
        .unwrap();

        let grayscale = extract(&load_color_heatmap(&path).unwrap()).unwrap();

        assert_eq!(
            grayscale.iter().copied().collect::<Vec<u8>>(),
            vec![0, 0, 0, 255, 255, 255]
        );
    }

    // Tests grayscale images normalize to [0, 1]
    // Verified by skipping normalization
    #[test]
    fn test_load_intensity_field_normalizes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("gray.png");
        RgbImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                Rgb([255, 255, 255])
            } else {
                Rgb([51, 51, 51])
            }
        })
        .save(&path)
        .unwrap();

        let field = load_intensity_field(&path).unwrap();

        assert_eq!(field.shape(), (1, 2));
        assert_eq!(field.values(), &array![[1.0, 0.2]]);
    }

    // Tests colored pixels reduce to their channel mean
    // Verified by keeping only the red channel
    #[test]
    fn test_load_intensity_field_channel_mean() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("color.png");
        RgbImage::from_pixel(1, 1, Rgb([255, 0, 0])).save(&path).unwrap();

        let field = load_intensity_field(&path).unwrap();

        assert!((field.mass() - 1.0 / 3.0).abs() < 1e-12);
    }

    // Tests 16-bit images normalize by their own full scale
    // Verified by always normalizing by 255
    #[test]
    fn test_load_intensity_field_sixteen_bit() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("wide.png");
        let img: ImageBuffer<Rgb<u16>, Vec<u16>> =
            ImageBuffer::from_pixel(2, 2, Rgb([65_535, 65_535, 65_535]));
        img.save(&path).unwrap();

        let field = load_intensity_field(&path).unwrap();

        assert!((field.mass() - 4.0).abs() < 1e-12);
    }

    // Tests missing files surface as decode errors
    // Verified by mapping to a file system error
    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.png");

        assert!(matches!(
            load_intensity_field(&path),
            Err(HeatmapError::ImageDecode { .. })
        ));
        assert!(matches!(
            load_color_heatmap(&path),
            Err(HeatmapError::ImageDecode { .. })
        ));
    }

    // Tests corrupt files surface as decode errors
    // Verified by ignoring decode failures
    #[test]
    fn test_load_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("corrupt.png");
        std::fs::write(&path, b"not a png").unwrap();

        assert!(matches!(
            load_intensity_field(&path),
            Err(HeatmapError::ImageDecode { .. })
        ));
    }

    // Tests export creates parent directories and preserves pixels
    // Verified by disabling directory creation
    #[test]
    fn test_save_grayscale_creates_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a").join("b").join("out.png");
        let pixels = Array3::from_shape_fn((2, 3, 3), |(row, col, _)| (row * 3 + col) as u8 * 40);

        save_grayscale(&pixels, &path).unwrap();

        let written = image::open(&path).unwrap().to_rgb8();
        assert_eq!(written.dimensions(), (3, 2));
        assert_eq!(written.get_pixel(2, 1), &Rgb([200, 200, 200]));
    }

    // Tests PNG is written whatever the output extension says
    // Verified by inferring the format from the extension
    #[test]
    fn test_save_grayscale_always_png() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.dat");

        save_grayscale(&Array3::zeros((1, 1, 3)), &path).unwrap();

        let header = std::fs::read(&path).unwrap();
        assert_eq!(header.get(1..4), Some(&b"PNG"[..]));
    }

    // Tests export rejects arrays without three channels
    // Verified by removing the channel check
    #[test]
    fn test_save_grayscale_wrong_channels() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.png");

        let result = save_grayscale(&Array3::zeros((2, 2, 1)), &path);

        assert!(matches!(
            result,
            Err(HeatmapError::InvalidSourceData { .. })
        ));
        assert!(!path.exists());
    }
}
