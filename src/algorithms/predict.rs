use crate::algorithms::topk::TopKSelector;
use crate::core::distance_metric::DistanceMetric;
use crate::core::error::{ForecastError, Result};
use crate::core::window_matrix::WindowMatrix;

/// Minimum number of test rows before predictions are spread across the rayon pool.
#[cfg(feature = "parallel")]
const MIN_PARALLEL_QUERIES: usize = 64;

/// A selected training row and its distance to the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Row index in the training matrix.
    pub index: usize,
    pub distance: f64,
}

/// Check the shapes shared by every prediction against `train`.
fn validate(train: &WindowMatrix, targets: &[f32], query_width: usize, k: usize) -> Result<()> {
    let n = train.n_rows();
    if n == 0 {
        return Err(ForecastError::EmptyTrainingSet);
    }
    if targets.len() != n {
        return Err(ForecastError::TargetLengthMismatch {
            rows: n,
            targets: targets.len(),
        });
    }
    validate_k(k, n)?;
    if query_width != train.width() {
        return Err(ForecastError::ColumnMismatch {
            train: train.width(),
            test: query_width,
        });
    }
    Ok(())
}

fn validate_k(k: usize, n: usize) -> Result<()> {
    if k == 0 {
        return Err(ForecastError::InvalidArgument("k must be >= 1".to_string()));
    }
    if k > n {
        return Err(ForecastError::InvalidArgument(format!(
            "k = {k} exceeds the {n} available training windows"
        )));
    }
    Ok(())
}

/// Run top-k selection over the distance set of `query`. Shapes must already be validated.
fn select<M: DistanceMetric>(train: &WindowMatrix, query: &[f32], k: usize) -> TopKSelector {
    let distances = M::distance_set(query, train);
    let mut selector = TopKSelector::new(k);
    for (i, &d) in distances.iter().enumerate() {
        selector.update(d, i);
    }
    selector
}

/// Mean target of the `k` nearest rows. Shapes must already be validated.
#[inline]
fn predict_row<M: DistanceMetric>(
    train: &WindowMatrix,
    targets: &[f32],
    query: &[f32],
    k: usize,
) -> f32 {
    let selector = select::<M>(train, query, k);
    let sum: f64 = selector
        .indices()
        .iter()
        .map(|&i| f64::from(targets[i]))
        .sum();
    (sum / k as f64) as f32
}

/// The `k` training rows closest to `query`, nearest first.
///
/// # Errors
/// Empty training matrix, `k == 0`, `k > n`, or a query width that differs from
/// the training width.
pub fn nearest_neighbors<M: DistanceMetric>(
    train: &WindowMatrix,
    query: &[f32],
    k: usize,
) -> Result<Vec<Neighbor>> {
    if train.n_rows() == 0 {
        return Err(ForecastError::EmptyTrainingSet);
    }
    validate_k(k, train.n_rows())?;
    if query.len() != train.width() {
        return Err(ForecastError::ColumnMismatch {
            train: train.width(),
            test: query.len(),
        });
    }
    let selector = select::<M>(train, query, k);
    Ok(selector
        .indices()
        .iter()
        .zip(selector.distances())
        .map(|(&index, &distance)| Neighbor { index, distance })
        .collect())
}

/// Predict one test window: the mean target of its `k` nearest training windows.
///
/// # Errors
/// See [`predict`].
pub fn predict_one<M: DistanceMetric>(
    train: &WindowMatrix,
    targets: &[f32],
    query: &[f32],
    k: usize,
) -> Result<f32> {
    validate(train, targets, query.len(), k)?;
    Ok(predict_row::<M>(train, targets, query, k))
}

/// Predict every row of `test`.
///
/// Rows are independent: each builds its own distance set and selection against the
/// shared, read-only training matrix, so large batches are spread across the rayon pool.
/// The output is identical to the serial loop.
///
/// # Errors
/// - [`ForecastError::EmptyTrainingSet`] if `train` has no rows
/// - [`ForecastError::TargetLengthMismatch`] if `targets` does not have one entry per row
/// - [`ForecastError::InvalidArgument`] if `k == 0` or `k` exceeds the training rows
/// - [`ForecastError::ColumnMismatch`] if test and training widths differ
pub fn predict<M: DistanceMetric>(
    train: &WindowMatrix,
    targets: &[f32],
    test: &WindowMatrix,
    k: usize,
) -> Result<Vec<f32>> {
    validate(train, targets, test.width(), k)?;

    #[cfg(feature = "parallel")]
    if test.n_rows() >= MIN_PARALLEL_QUERIES {
        use rayon::prelude::*;
        return Ok(test
            .as_slice()
            .par_chunks_exact(test.width())
            .map(|query| predict_row::<M>(train, targets, query, k))
            .collect());
    }

    Ok(test
        .rows()
        .map(|query| predict_row::<M>(train, targets, query, k))
        .collect())
}
