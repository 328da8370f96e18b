//! Tests for bounds-checked block views

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};
    use quiltex::QuiltError;
    use quiltex::spatial::block::{Block, sample};
    use quiltex::spatial::grid::{Extent, Point, Rect};

    fn coordinate_image(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| Rgb([x as u8, y as u8, 0]))
    }

    // Tests sampling a block that fits
    #[test]
    fn test_sample_within_bounds() {
        let image = coordinate_image(10, 10);
        let block = sample(&image, Point::new(6, 6), 4).unwrap();

        assert_eq!(block.origin(), Point::new(6, 6));
        assert_eq!(block.extent(), Extent::square(4));
        assert_eq!(block.channel_count(), 3);
        assert_eq!(block.pixel(0, 0), Some(&[6, 6, 0][..]));
        assert_eq!(block.pixel(3, 1), Some(&[9, 7, 0][..]));
        assert_eq!(block.pixel(4, 0), None);
    }

    // Tests blocks extending past the grid are rejected
    #[test]
    fn test_sample_out_of_bounds() {
        let image = coordinate_image(10, 10);
        let result = sample(&image, Point::new(7, 0), 4);

        assert!(matches!(
            result,
            Err(QuiltError::OutOfBounds {
                origin: (7, 0),
                extent: (4, 4),
                bounds: (10, 10),
            })
        ));
    }

    // Tests zero-sized blocks are rejected
    #[test]
    fn test_sample_zero_size() {
        let image = coordinate_image(4, 4);
        let result = sample(&image, Point::new(0, 0), 0);

        assert!(matches!(
            result,
            Err(QuiltError::InvalidParameters {
                parameter: "block_size",
                ..
            })
        ));
    }

    // Tests sampling twice yields the same view
    #[test]
    fn test_sample_is_idempotent() {
        let image = coordinate_image(8, 8);
        let first = sample(&image, Point::new(1, 2), 3).unwrap();
        let second = sample(&image, Point::new(1, 2), 3).unwrap();

        assert_eq!(first, second);
        assert_ne!(first, sample(&image, Point::new(2, 2), 3).unwrap());
    }

    // Tests sub-blocks translate local coordinates
    #[test]
    fn test_sub_block() {
        let image = coordinate_image(10, 10);
        let block = Block::region(&image, Rect::new(Point::new(2, 3), Extent::new(5, 4))).unwrap();
        let strip = block
            .sub_block(Rect::new(Point::new(1, 0), Extent::new(2, 4)))
            .unwrap();

        assert_eq!(strip.origin(), Point::new(3, 3));
        assert_eq!(strip.rect(), Rect::new(Point::new(3, 3), Extent::new(2, 4)));
        assert_eq!(strip.pixel(1, 3), Some(&[4, 6, 0][..]));

        let outside = block.sub_block(Rect::new(Point::new(4, 0), Extent::new(2, 1)));
        assert!(matches!(outside, Err(QuiltError::OutOfBounds { .. })));
    }
}
