//! Tests for visualization capture and GIF export

#[cfg(test)]
mod tests {
    use image::Rgb;
    use quiltex::QuiltError;
    use quiltex::io::configuration::{GIF_FRAME_DELAY_MS, UNFILLED_COLOR};
    use quiltex::io::visualization::VisualizationCapture;
    use quiltex::spatial::canvas::Canvas;
    use quiltex::spatial::grid::{Extent, Point, Rect};

    // Tests patches copy filled cells and mark unfilled ones
    #[test]
    fn test_record_patch() {
        let mut canvas = Canvas::<Rgb<u8>>::new(Extent::new(4, 4)).unwrap();
        canvas.fill(1, 1, &[10, 20, 30]);
        let mut capture = VisualizationCapture::new(canvas_extent(), 1);

        capture.record_patch(&canvas, Rect::new(Point::new(1, 1), Extent::new(2, 2)));

        assert_eq!(capture.patch_count(), 1);
        let patch = capture.patches().first().unwrap();
        assert_eq!(patch.pixels.dimensions(), (2, 2));
        assert_eq!(patch.pixels.get_pixel(0, 0).0, [10, 20, 30, 255]);
        assert_eq!(patch.pixels.get_pixel(1, 1).0, UNFILLED_COLOR);
    }

    fn canvas_extent() -> Extent {
        Extent::new(4, 4)
    }

    // Tests exporting without captured patches fails
    #[test]
    fn test_export_empty_capture() {
        let dir = tempfile::tempdir().unwrap();
        let capture = VisualizationCapture::new(canvas_extent(), 0);

        let result = capture.export_gif(&dir.path().join("empty.gif"), GIF_FRAME_DELAY_MS);
        assert!(matches!(
            result,
            Err(QuiltError::InvalidParameters {
                parameter: "visualization",
                ..
            })
        ));
    }

    // Tests a GIF is written for recorded patches
    #[test]
    fn test_export_gif() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viz").join("progress.gif");
        let mut canvas = Canvas::<Rgb<u8>>::new(canvas_extent()).unwrap();
        let mut capture = VisualizationCapture::new(canvas_extent(), 4);

        for y in 0..2 {
            for x in 0..2 {
                let rect = Rect::new(Point::new(x * 2, y * 2), Extent::square(2));
                for dy in 0..2 {
                    for dx in 0..2 {
                        canvas.fill(x * 2 + dx, y * 2 + dy, &[200, 100, 50]);
                    }
                }
                capture.record_patch(&canvas, rect);
            }
        }

        capture.export_gif(&path, GIF_FRAME_DELAY_MS).unwrap();

        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }
}
