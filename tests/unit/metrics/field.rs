//! Tests for intensity field construction and shape checks

#[cfg(test)]
mod tests {
    use heatoverlap::HeatmapError;
    use heatoverlap::metrics::field::{FieldRole, IntensityField};
    use ndarray::{Array2, array};

    // Tests byte samples are normalized by 255
    // Verified by dividing by 256
    #[test]
    fn test_from_bytes_normalizes() {
        let field = IntensityField::from_bytes(&array![[0_u8, 255], [51, 102]]);

        assert_eq!(field.values(), &array![[0.0, 1.0], [0.2, 0.4]]);
    }

    // Tests wide samples are normalized by their own full scale
    // Verified by ignoring the full-scale argument
    #[test]
    fn test_from_scaled_wide_samples() {
        let field = IntensityField::from_scaled(&array![[65_535_u16, 0]], 65_535.0);

        assert!((field.mass() - 1.0).abs() < f64::EPSILON);
    }

    // Tests mass sums every cell
    // Verified by summing a single row
    #[test]
    fn test_mass() {
        let field = IntensityField::new(array![[0.5, 0.25], [0.25, 1.0]]);

        assert!((field.mass() - 2.0).abs() < f64::EPSILON);
        assert!(IntensityField::zeros((3, 4)).mass().abs() < f64::EPSILON);
    }

    // Tests clamping bounds values on both sides
    // Verified by clamping only the upper side
    #[test]
    fn test_clamped() {
        let field = IntensityField::new(array![[-0.5, 0.5, 1.5]]);

        assert_eq!(field.clamped().values(), &array![[0.0, 0.5, 1.0]]);
        assert_eq!(field.values(), &array![[-0.5, 0.5, 1.5]]);
    }

    // Tests shape reporting and mismatch detection
    // Verified by comparing element counts instead of shapes
    #[test]
    fn test_ensure_same_shape() {
        let wide = IntensityField::zeros((2, 3));
        let tall = IntensityField::zeros((3, 2));

        assert_eq!(wide.shape(), (2, 3));
        assert!(wide.ensure_same_shape(&wide.clone()).is_ok());
        match wide.ensure_same_shape(&tall) {
            Err(HeatmapError::ShapeMismatch {
                expected,
                found,
                frame,
                field,
                path,
            }) => {
                assert_eq!(expected, (2, 3));
                assert_eq!(found, (3, 2));
                assert_eq!(frame, None);
                assert_eq!(field, None);
                assert_eq!(path, None);
            }
            other => unreachable!("Expected ShapeMismatch, got {other:?}"),
        }
    }

    // Tests conversion from and back into a raw array
    // Verified by transposing on conversion
    #[test]
    fn test_array_conversion() {
        let raw: Array2<f64> = array![[0.1, 0.2], [0.3, 0.4]];
        let field = IntensityField::from(raw.clone());

        assert_eq!(field.into_values(), raw);
    }

    // Tests role labels name the conventional field symbols
    // Verified by swapping the labels
    #[test]
    fn test_role_display() {
        assert!(FieldRole::Gaze.to_string().contains("Hu"));
        assert!(FieldRole::Saliency.to_string().contains("Hs"));
    }
}
