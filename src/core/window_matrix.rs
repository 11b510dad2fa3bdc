use crate::core::error::{ForecastError, Result};

/// Row-major matrix of fixed-width windows.
///
/// Stored as one contiguous buffer with row stride `width`, so row scans stay
/// cache-friendly and rows can be handed out as disjoint slices to parallel workers.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowMatrix {
    data: Vec<f32>,
    width: usize,
}

impl WindowMatrix {
    /// Create a matrix of `rows` zero-filled rows.
    pub fn zeros(rows: usize, width: usize) -> Result<Self> {
        Self::check_width(width)?;
        Ok(Self {
            data: vec![0.0; rows * width],
            width,
        })
    }

    /// Wrap an existing row-major buffer. `data.len()` must be a multiple of `width`.
    pub fn from_vec(data: Vec<f32>, width: usize) -> Result<Self> {
        Self::check_width(width)?;
        if data.len() % width != 0 {
            return Err(ForecastError::InvalidArgument(format!(
                "buffer of length {} is not a whole number of rows of width {width}",
                data.len()
            )));
        }
        Ok(Self { data, width })
    }

    /// Build a matrix from explicit rows. All rows must have length `width`.
    pub fn from_rows<R: AsRef<[f32]>>(rows: &[R], width: usize) -> Result<Self> {
        Self::check_width(width)?;
        let mut data = Vec::with_capacity(rows.len() * width);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(ForecastError::InvalidArgument(format!(
                    "row {i} has {} columns, expected {width}",
                    row.len()
                )));
            }
            data.extend_from_slice(row);
        }
        Ok(Self { data, width })
    }

    fn check_width(width: usize) -> Result<()> {
        if width == 0 {
            return Err(ForecastError::InvalidArgument(
                "window width must be >= 1".to_string(),
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn n_rows(&self) -> usize {
        self.data.len() / self.width
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow row `i`. Panics if `i >= n_rows()`.
    #[inline]
    pub fn row(&self, i: usize) -> &[f32] {
        &self.data[i * self.width..(i + 1) * self.width]
    }

    pub fn rows(&self) -> std::slice::ChunksExact<'_, f32> {
        self.data.chunks_exact(self.width)
    }

    pub fn rows_mut(&mut self) -> std::slice::ChunksExactMut<'_, f32> {
        self.data.chunks_exact_mut(self.width)
    }

    /// Value at row `i`, column `j`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.data[i * self.width + j]
    }

    /// Iterate over the values of column `j`, top to bottom. Panics if `j >= width()`.
    pub fn column(&self, j: usize) -> impl Iterator<Item = f32> + '_ {
        assert!(
            j < self.width,
            "column index {j} out of range for width {}",
            self.width
        );
        self.data.iter().skip(j).step_by(self.width).copied()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_layout() {
        let m = WindowMatrix::from_rows(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]], 2).unwrap();
        assert_eq!(m.n_rows(), 3);
        assert_eq!(m.width(), 2);
        assert_eq!(m.row(1), &[3.0, 4.0]);
        assert_eq!(m.get(2, 0), 5.0);
        assert_eq!(m.column(1).collect::<Vec<_>>(), vec![2.0, 4.0, 6.0]);
        assert_eq!(m.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_empty_matrix_keeps_width() {
        let m = WindowMatrix::zeros(0, 4).unwrap();
        assert!(m.is_empty());
        assert_eq!(m.n_rows(), 0);
        assert_eq!(m.width(), 4);
        assert_eq!(m.rows().count(), 0);
        assert_eq!(m.column(2).count(), 0);
    }

    #[test]
    fn test_rejects_zero_width() {
        assert!(WindowMatrix::zeros(3, 0).is_err());
        assert!(WindowMatrix::from_vec(vec![], 0).is_err());
    }

    #[test]
    fn test_rejects_ragged_input() {
        assert!(WindowMatrix::from_vec(vec![1.0, 2.0, 3.0], 2).is_err());
        let rows: Vec<Vec<f32>> = vec![vec![1.0, 2.0], vec![3.0]];
        assert!(WindowMatrix::from_rows(&rows, 2).is_err());
    }

    #[test]
    fn test_rows_mut_writes_through() {
        let mut m = WindowMatrix::zeros(2, 3).unwrap();
        for (i, row) in m.rows_mut().enumerate() {
            row.fill(i as f32);
        }
        assert_eq!(m.row(0), &[0.0, 0.0, 0.0]);
        assert_eq!(m.row(1), &[1.0, 1.0, 1.0]);
    }

    #[test]
    #[should_panic(expected = "column index 2 out of range")]
    fn test_column_out_of_range_panics() {
        let m = WindowMatrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]], 2).unwrap();
        let _ = m.column(2);
    }
}
