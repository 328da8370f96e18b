//! Tests for the fill-tracking output canvas

#[cfg(test)]
mod tests {
    use image::Rgb;
    use quiltex::QuiltError;
    use quiltex::io::configuration::MAX_OUTPUT_DIMENSION;
    use quiltex::spatial::canvas::Canvas;
    use quiltex::spatial::grid::Extent;

    // Tests a new canvas starts unfilled
    #[test]
    fn test_new_canvas_is_unfilled() {
        let canvas = Canvas::<Rgb<u8>>::new(Extent::new(4, 3)).unwrap();

        assert_eq!(canvas.filled_count(), 0);
        assert!(!canvas.is_complete());
        assert!(!canvas.is_filled(0, 0));
        assert_eq!(canvas.filled_pixel(0, 0), None);
        assert_eq!(canvas.as_image().dimensions(), (4, 3));
    }

    // Tests invalid canvas sizes
    #[test]
    fn test_new_canvas_rejects_bad_sizes() {
        assert!(matches!(
            Canvas::<Rgb<u8>>::new(Extent::new(0, 3)),
            Err(QuiltError::InvalidParameters {
                parameter: "size",
                ..
            })
        ));
        let oversized = Extent::new(MAX_OUTPUT_DIMENSION + 1, 1);
        assert!(Canvas::<Rgb<u8>>::new(oversized).is_err());
    }

    // Tests each cell is filled at most once
    #[test]
    fn test_fill_once() {
        let mut canvas = Canvas::<Rgb<u8>>::new(Extent::new(2, 2)).unwrap();

        assert!(canvas.fill(1, 0, &[1, 2, 3]));
        assert!(!canvas.fill(1, 0, &[9, 9, 9]));
        assert!(!canvas.fill(2, 0, &[9, 9, 9]));

        assert!(canvas.is_filled(1, 0));
        assert_eq!(canvas.filled_pixel(1, 0), Some(&[1, 2, 3][..]));
        assert_eq!(canvas.filled_count(), 1);
    }

    // Tests overwrite and blend require a filled cell
    #[test]
    fn test_overwrite_and_blend_require_filled() {
        let mut canvas = Canvas::<Rgb<u8>>::new(Extent::new(2, 2)).unwrap();

        assert!(matches!(
            canvas.overwrite(0, 0, &[1, 1, 1]),
            Err(QuiltError::OutOfBounds { .. })
        ));
        assert!(canvas.blend(0, 0, &[1, 1, 1]).is_err());
        assert_eq!(canvas.filled_count(), 0);

        canvas.fill(0, 0, &[1, 1, 1]);
        canvas.overwrite(0, 0, &[7, 8, 9]).unwrap();
        assert_eq!(canvas.filled_pixel(0, 0), Some(&[7, 8, 9][..]));
    }

    // Tests blending averages channels, rounding half up
    #[test]
    fn test_blend_averages() {
        let mut canvas = Canvas::<Rgb<u8>>::new(Extent::new(1, 1)).unwrap();
        canvas.fill(0, 0, &[0, 100, 255]);
        canvas.blend(0, 0, &[255, 101, 255]).unwrap();

        assert_eq!(canvas.filled_pixel(0, 0), Some(&[128, 101, 255][..]));
    }

    // Tests completion once every cell is filled
    #[test]
    fn test_is_complete() {
        let mut canvas = Canvas::<Rgb<u8>>::new(Extent::new(3, 2)).unwrap();
        for y in 0..2 {
            for x in 0..3 {
                assert!(canvas.fill(x, y, &[x as u8, y as u8, 0]));
            }
        }

        assert!(canvas.is_complete());
        let image = canvas.into_image();
        assert_eq!(image.get_pixel(2, 1), &Rgb([2, 1, 0]));
    }
}
