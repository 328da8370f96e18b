//! Tests for per-pixel distance metrics

#[cfg(test)]
mod tests {
    use quiltex::math::distance::{DistanceMetric, manhattan, squared_euclidean};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < f64::EPSILON
    }

    // Tests squared Euclidean distance
    #[test]
    fn test_squared_euclidean() {
        assert!(close(squared_euclidean(&[0, 0, 0], &[3, 4, 0]), 25.0));
        assert!(close(squared_euclidean(&[255, 0, 0], &[0, 255, 0]), 130_050.0));
        assert!(close(squared_euclidean(&[9, 9, 9], &[9, 9, 9]), 0.0));
    }

    // Tests Manhattan distance
    #[test]
    fn test_manhattan() {
        assert!(close(manhattan(&[0, 10, 200], &[5, 0, 255]), 70.0));
    }

    // Tests dispatch through the metric enum and the default choice
    #[test]
    fn test_metric_dispatch() {
        let a = [10, 20, 30, 255];
        let b = [13, 16, 30, 0];

        let squared = DistanceMetric::SquaredEuclidean.distance(&a, &b);
        let manhattan = DistanceMetric::Manhattan.distance(&a, &b);
        assert!(close(squared, 65_050.0));
        assert!(close(manhattan, 262.0));
        assert_eq!(DistanceMetric::default(), DistanceMetric::SquaredEuclidean);
    }

    // Tests distances are symmetric
    #[test]
    fn test_symmetry() {
        let a = [1, 200, 37];
        let b = [250, 3, 90];
        for metric in [DistanceMetric::SquaredEuclidean, DistanceMetric::Manhattan] {
            assert!(close(metric.distance(&a, &b), metric.distance(&b, &a)));
        }
    }
}
