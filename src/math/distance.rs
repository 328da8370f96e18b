//! Per-pixel color distances over 8-bit channels

/// Distance used to compare a candidate pixel with an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum DistanceMetric {
    /// Sum of squared channel differences
    #[default]
    SquaredEuclidean,
    /// Sum of absolute channel differences (L1)
    Manhattan,
}

impl DistanceMetric {
    /// Distance between two pixels
    ///
    /// Channels are paired positionally; surplus channels on either side are ignored.
    pub fn distance(self, a: &[u8], b: &[u8]) -> f64 {
        match self {
            Self::SquaredEuclidean => squared_euclidean(a, b),
            Self::Manhattan => manhattan(a, b),
        }
    }
}

/// Sum of squared channel differences
pub fn squared_euclidean(a: &[u8], b: &[u8]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(&ca, &cb)| {
            let diff = f64::from(ca) - f64::from(cb);
            diff * diff
        })
        .sum()
}

/// Sum of absolute channel differences
pub fn manhattan(a: &[u8], b: &[u8]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(&ca, &cb)| f64::from(ca.abs_diff(cb)))
        .sum()
}
