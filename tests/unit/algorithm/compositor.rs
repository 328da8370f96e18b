//! Tests for compositing blocks into the canvas along boundary cuts

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage, RgbaImage};
    use quiltex::QuiltError;
    use quiltex::algorithm::compositor::place;
    use quiltex::algorithm::seam::{BoundaryCut, SeamPath};
    use quiltex::spatial::block::{Block, sample};
    use quiltex::spatial::canvas::Canvas;
    use quiltex::spatial::grid::{Extent, Point, Rect};

    const BLACK: [u8; 3] = [0, 0, 0];
    const WHITE: [u8; 3] = [255, 255, 255];

    fn black_canvas(width: usize, height: usize) -> Canvas<Rgb<u8>> {
        let mut canvas = Canvas::new(Extent::new(width, height)).unwrap();
        for y in 0..height {
            for x in 0..width {
                canvas.fill(x, y, &BLACK);
            }
        }
        canvas
    }

    // Tests an empty canvas takes the whole block
    #[test]
    fn test_place_into_empty_canvas() {
        let source = RgbImage::from_fn(8, 8, |x, y| Rgb([x as u8, y as u8, 1]));
        let block = sample(&source, Point::new(0, 0), 8).unwrap();
        let mut canvas = Canvas::<Rgb<u8>>::new(Extent::new(10, 10)).unwrap();
        let cut = BoundaryCut::none();

        let filled = place(&mut canvas, Point::new(2, 2), &block, &cut, false).unwrap();

        assert_eq!(filled, 64);
        assert_eq!(canvas.filled_count(), 64);
        assert_eq!(canvas.filled_pixel(2, 2), Some(&[0, 0, 1][..]));
        assert_eq!(canvas.filled_pixel(9, 9), Some(&[7, 7, 1][..]));
        assert!(!canvas.is_filled(1, 2));
    }

    // Tests a block past the canvas edge is rejected without writes
    #[test]
    fn test_out_of_bounds_leaves_canvas_untouched() {
        let source = RgbImage::from_pixel(8, 8, Rgb(WHITE));
        let block = sample(&source, Point::new(0, 0), 8).unwrap();
        let mut canvas = Canvas::<Rgb<u8>>::new(Extent::new(8, 8)).unwrap();
        let cut = BoundaryCut::none();

        let result = place(&mut canvas, Point::new(4, 4), &block, &cut, false);

        assert!(matches!(result, Err(QuiltError::OutOfBounds { .. })));
        assert_eq!(canvas.filled_count(), 0);
    }

    // Tests channel layouts must agree
    #[test]
    fn test_channel_mismatch() {
        let source = RgbaImage::new(4, 4);
        let block = sample(&source, Point::new(0, 0), 4).unwrap();
        let mut canvas = Canvas::<Rgb<u8>>::new(Extent::new(4, 4)).unwrap();
        let cut = BoundaryCut::none();

        let result = place(&mut canvas, Point::new(0, 0), &block, &cut, false);

        assert!(matches!(
            result,
            Err(QuiltError::ShapeMismatch {
                expected: (4, 4, 3),
                found: (4, 4, 4),
            })
        ));
        assert_eq!(canvas.filled_count(), 0);
    }

    // Tests filled cells follow the cut: existing kept, seam and incoming replaced
    #[test]
    fn test_cut_sides() {
        let source = RgbImage::from_pixel(4, 2, Rgb(WHITE));
        let block = Block::region(&source, Rect::at_origin(Extent::new(4, 2))).unwrap();
        let cut = BoundaryCut::new(Some(SeamPath::from_cuts(vec![1, 2])), None);
        let mut canvas = black_canvas(4, 2);

        let filled = place(&mut canvas, Point::new(0, 0), &block, &cut, false).unwrap();

        assert_eq!(filled, 0);
        let row = |y: usize| -> Vec<u8> {
            (0..4)
                .map(|x| canvas.filled_pixel(x, y).map_or(0, |p| p[0]))
                .collect()
        };
        assert_eq!(row(0), vec![0, 255, 255, 255]);
        assert_eq!(row(1), vec![0, 0, 255, 255]);
    }

    // Tests seam cells are averaged when blending
    #[test]
    fn test_blended_seam() {
        let source = RgbImage::from_pixel(3, 1, Rgb(WHITE));
        let block = Block::region(&source, Rect::at_origin(Extent::new(3, 1))).unwrap();
        let cut = BoundaryCut::new(Some(SeamPath::from_cuts(vec![1])), None);
        let mut canvas = black_canvas(3, 1);

        place(&mut canvas, Point::new(0, 0), &block, &cut, true).unwrap();

        assert_eq!(canvas.filled_pixel(0, 0), Some(&BLACK[..]));
        assert_eq!(canvas.filled_pixel(1, 0), Some(&[128, 128, 128][..]));
        assert_eq!(canvas.filled_pixel(2, 0), Some(&WHITE[..]));
    }

    // Tests unfilled cells are filled even on the existing side of the cut
    #[test]
    fn test_unfilled_cells_ignore_cut() {
        let source = RgbImage::from_pixel(2, 2, Rgb(WHITE));
        let block = sample(&source, Point::new(0, 0), 2).unwrap();
        let cut = BoundaryCut::new(Some(SeamPath::from_cuts(vec![2, 2])), None);
        let mut canvas = Canvas::<Rgb<u8>>::new(Extent::new(2, 2)).unwrap();

        let filled = place(&mut canvas, Point::new(0, 0), &block, &cut, false).unwrap();

        assert_eq!(filled, 4);
        assert!(canvas.is_complete());
    }
}
