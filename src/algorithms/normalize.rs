use crate::core::error::{ForecastError, Result};
use crate::core::window_matrix::WindowMatrix;

/// Minimum number of rows before dispatching normalization to the rayon pool.
#[cfg(feature = "parallel")]
const MIN_PARALLEL_ROWS: usize = 4096;

/// Observed minimum and maximum of one matrix column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnRange {
    pub min: f32,
    pub max: f32,
}

impl ColumnRange {
    /// A column with `max == min` is left untouched by rescaling.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.max <= self.min
    }

    /// `(x - min) / (max - min)`, computed in `f64` so `min` maps to exactly 0
    /// and `max` to exactly 1.
    #[inline]
    pub fn rescale(&self, x: f32) -> f32 {
        let min = f64::from(self.min);
        let span = f64::from(self.max) - min;
        ((f64::from(x) - min) / span) as f32
    }
}

/// Min and max of every column. An empty matrix yields no ranges.
///
/// Columns are independent, so large matrices compute them in parallel.
pub fn column_ranges(m: &WindowMatrix) -> Vec<ColumnRange> {
    if m.is_empty() {
        return Vec::new();
    }
    let range_of = |j: usize| -> ColumnRange {
        let first = m.get(0, j);
        m.column(j)
            .fold(ColumnRange { min: first, max: first }, |r, x| ColumnRange {
                min: if x < r.min { x } else { r.min },
                max: if x > r.max { x } else { r.max },
            })
    };

    #[cfg(feature = "parallel")]
    if m.n_rows() >= MIN_PARALLEL_ROWS {
        use rayon::prelude::*;
        return (0..m.width()).into_par_iter().map(range_of).collect();
    }

    (0..m.width()).map(range_of).collect()
}

/// Rescale every column of `m` into [0, 1] using its own min and max.
///
/// Columns with `max == min` are left bit-for-bit unchanged. Returns the ranges used,
/// which is empty when the matrix has no rows.
pub fn normalize_columns(m: &mut WindowMatrix) -> Vec<ColumnRange> {
    let ranges = column_ranges(m);
    rescale_rows(m, &ranges);
    ranges
}

/// Rescale `m` with ranges observed elsewhere, typically on the training windows.
///
/// Values outside a supplied range map outside [0, 1].
///
/// # Errors
/// The number of ranges differs from the matrix width.
pub fn apply_column_ranges(m: &mut WindowMatrix, ranges: &[ColumnRange]) -> Result<()> {
    if ranges.len() != m.width() {
        return Err(ForecastError::ColumnMismatch {
            train: ranges.len(),
            test: m.width(),
        });
    }
    rescale_rows(m, ranges);
    Ok(())
}

/// Apply per-column ranges row by row. Each worker owns a disjoint set of rows.
fn rescale_rows(m: &mut WindowMatrix, ranges: &[ColumnRange]) {
    if m.is_empty() || ranges.iter().all(ColumnRange::is_degenerate) {
        return;
    }
    let rescale_row = |row: &mut [f32]| {
        for (x, r) in row.iter_mut().zip(ranges) {
            if !r.is_degenerate() {
                *x = r.rescale(*x);
            }
        }
    };

    #[cfg(feature = "parallel")]
    if m.n_rows() >= MIN_PARALLEL_ROWS {
        use rayon::prelude::*;
        let w = m.width();
        m.as_mut_slice()
            .par_chunks_exact_mut(w)
            .for_each(rescale_row);
        return;
    }

    m.rows_mut().for_each(rescale_row);
}
