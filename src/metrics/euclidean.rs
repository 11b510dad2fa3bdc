use crate::core::distance_metric::DistanceMetric;

/// Plain (non-normalized) Euclidean distance.
///
/// `d = sqrt(sum((a_i - b_i)^2))`, with each difference widened to `f64` before
/// squaring so long windows do not lose precision to `f32` round-off.
///
/// Properties relied on by the predictor:
/// - `d(a, a) == 0.0` exactly
/// - `d(a, b) == d(b, a)` bit-for-bit (negating a difference is exact)
#[derive(Debug, Clone)]
pub struct Euclidean;

impl DistanceMetric for Euclidean {
    #[inline]
    fn distance(a: &[f32], b: &[f32]) -> f64 {
        debug_assert_eq!(a.len(), b.len());
        a.iter()
            .zip(b)
            .map(|(&x, &y)| {
                let d = f64::from(x) - f64::from(y);
                d * d
            })
            .sum::<f64>()
            .sqrt()
    }
}
