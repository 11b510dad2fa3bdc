use crate::core::window_matrix::WindowMatrix;

/// Minimum number of training rows before a distance set is computed in parallel.
#[cfg(feature = "parallel")]
const MIN_PARALLEL_ROWS: usize = 4096;

/// Trait for the distance used to rank training windows against a query window.
///
/// Designed for static polymorphism: the predictor is generic over `M: DistanceMetric`,
/// so the per-pair distance is monomorphized and inlined into the distance-set loop.
pub trait DistanceMetric: Clone + Send + Sync {
    /// Distance between two windows of equal length.
    ///
    /// Implementations accumulate in `f64` regardless of the `f32` storage type.
    fn distance(a: &[f32], b: &[f32]) -> f64;

    /// Distances from `query` to every row of `rows`, indexed by row.
    ///
    /// Large training sets are split across the rayon pool; each entry is written
    /// by exactly one worker, and the result is identical to the serial loop.
    fn distance_set(query: &[f32], rows: &WindowMatrix) -> Vec<f64> {
        debug_assert_eq!(query.len(), rows.width());

        #[cfg(feature = "parallel")]
        if rows.n_rows() >= MIN_PARALLEL_ROWS {
            use rayon::prelude::*;
            return rows
                .as_slice()
                .par_chunks_exact(rows.width())
                .map(|row| Self::distance(row, query))
                .collect();
        }

        rows.rows().map(|row| Self::distance(row, query)).collect()
    }
}
