use crate::core::error::Result;
use crate::core::window_matrix::WindowMatrix;

/// Minimum number of output rows before dispatching to parallel window construction.
#[cfg(feature = "parallel")]
const MIN_PARALLEL_ROWS: usize = 4096;

/// Training windows and their regression targets.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSet {
    /// Row `i` is `series[i..i + w]`.
    pub windows: WindowMatrix,
    /// `targets[i]` is the mean of `series[i + h..i + h + w]`.
    pub targets: Vec<f32>,
}

impl TrainingSet {
    pub fn n_rows(&self) -> usize {
        self.windows.n_rows()
    }
}

/// Number of training rows for a series of length `n`: `max(0, n - w - h)`.
#[inline]
pub fn training_row_count(n: usize, w: usize, h: usize) -> usize {
    n.saturating_sub(w).saturating_sub(h)
}

/// Number of test rows for a series of length `n`: `max(0, n - w)`.
#[inline]
pub fn test_row_count(n: usize, w: usize) -> usize {
    n.saturating_sub(w)
}

/// Build the training windows and targets for window width `w` and horizon `h`.
///
/// When the series is too short for a single window the result has zero rows;
/// the predictor rejects an empty training set, so malformed data never reaches it.
///
/// # Errors
/// `w == 0`.
pub fn build_training_set(series: &[f32], w: usize, h: usize) -> Result<TrainingSet> {
    let rows = training_row_count(series.len(), w, h);
    let mut windows = WindowMatrix::zeros(rows, w)?;
    fill_windows(series, &mut windows);
    let targets = window_targets(series, rows, w, h);
    Ok(TrainingSet { windows, targets })
}

/// Build the test windows for window width `w`.
///
/// # Errors
/// `w == 0`.
pub fn build_test_windows(series: &[f32], w: usize) -> Result<WindowMatrix> {
    let rows = test_row_count(series.len(), w);
    let mut windows = WindowMatrix::zeros(rows, w)?;
    fill_windows(series, &mut windows);
    Ok(windows)
}

/// Copy `series[i..i + w]` into row `i` of `windows`.
fn fill_windows(series: &[f32], windows: &mut WindowMatrix) {
    let w = windows.width();

    #[cfg(feature = "parallel")]
    if windows.n_rows() >= MIN_PARALLEL_ROWS {
        use rayon::prelude::*;
        windows
            .as_mut_slice()
            .par_chunks_exact_mut(w)
            .enumerate()
            .for_each(|(i, row)| row.copy_from_slice(&series[i..i + w]));
        return;
    }

    for (i, row) in windows.rows_mut().enumerate() {
        row.copy_from_slice(&series[i..i + w]);
    }
}

/// Mean of the `w` values starting `h` steps after each window start.
fn window_targets(series: &[f32], rows: usize, w: usize, h: usize) -> Vec<f32> {
    let target = |i: usize| -> f32 {
        let sum: f64 = series[i + h..i + h + w].iter().map(|&x| f64::from(x)).sum();
        (sum / w as f64) as f32
    };

    #[cfg(feature = "parallel")]
    if rows >= MIN_PARALLEL_ROWS {
        use rayon::prelude::*;
        return (0..rows).into_par_iter().map(target).collect();
    }

    (0..rows).map(target).collect()
}
