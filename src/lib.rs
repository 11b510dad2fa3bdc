pub mod algorithms;
pub mod core;
pub mod io;
pub mod metrics;

use std::time::{Duration, Instant};

pub use crate::algorithms::normalize::{
    apply_column_ranges, column_ranges, normalize_columns, ColumnRange,
};
pub use crate::algorithms::predict::{nearest_neighbors, predict, predict_one, Neighbor};
pub use crate::algorithms::topk::{select_k_smallest, TopKSelector};
pub use crate::algorithms::windows::{
    build_test_windows, build_training_set, test_row_count, training_row_count, TrainingSet,
};
pub use crate::core::config::{ForecastConfig, NormalizationScope, LEGACY_OUTPUT_SCALE};
pub use crate::core::distance_metric::DistanceMetric;
pub use crate::core::error::{ForecastError, Result};
pub use crate::core::window_matrix::WindowMatrix;
pub use crate::metrics::euclidean::Euclidean;

/// Output of a forecasting run.
#[derive(Debug, Clone)]
pub struct Forecast {
    /// Regression target of every training window, unscaled.
    pub targets: Vec<f32>,
    /// One prediction per test window, after `output_scale` is applied.
    pub predictions: Vec<f32>,
    /// Column ranges observed on the training windows before rescaling.
    pub train_ranges: Vec<ColumnRange>,
    /// Wall-clock time of the prediction phase only.
    pub prediction_time: Duration,
}

/// High-level facade for sliding-window KNN forecasting, generic over distance metric.
///
/// # Examples
///
/// ```
/// use knn_forecast::{ForecastConfig, KnnForecaster};
///
/// let train: Vec<f32> = (0..40).map(|i| (i as f32 * 0.3).sin()).collect();
/// let test: Vec<f32> = (0..12).map(|i| (i as f32 * 0.3 + 0.1).sin()).collect();
/// let forecaster = KnnForecaster::new(ForecastConfig::new(3).with_horizon(1).with_k(4)).unwrap();
/// let forecast = forecaster.forecast(&train, &test).unwrap();
/// assert_eq!(forecast.targets.len(), 40 - 3 - 1);
/// assert_eq!(forecast.predictions.len(), 12 - 3);
/// ```
pub struct Forecaster<M: DistanceMetric> {
    config: ForecastConfig,
    _metric: std::marker::PhantomData<M>,
}

impl<M: DistanceMetric> Forecaster<M> {
    /// Create a new forecaster, rejecting configurations that can never produce a prediction.
    pub fn new(config: ForecastConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            _metric: std::marker::PhantomData,
        })
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Raw (unnormalized) training windows and targets for `series`.
    pub fn training_set(&self, series: &[f32]) -> Result<TrainingSet> {
        build_training_set(series, self.config.window, self.config.horizon)
    }

    /// Raw (unnormalized) test windows for `series`.
    pub fn test_windows(&self, series: &[f32]) -> Result<WindowMatrix> {
        build_test_windows(series, self.config.window)
    }

    /// Build windows, normalize them, and predict one value per test window.
    ///
    /// Stages run strictly in order; each parallel stage completes before the next
    /// reads its output. Only the prediction stage is timed.
    ///
    /// # Errors
    /// - [`ForecastError::EmptyTrainingSet`] if the training series is shorter than `w + h + 1`
    /// - [`ForecastError::InvalidArgument`] if `k` exceeds the number of training windows
    pub fn forecast(&self, train: &[f32], test: &[f32]) -> Result<Forecast> {
        if self.config.training_rows(train.len()) == 0 {
            return Err(ForecastError::EmptyTrainingSet);
        }
        let TrainingSet {
            windows: mut train_windows,
            targets,
        } = self.training_set(train)?;
        let mut test_windows = self.test_windows(test)?;
        tracing::debug!(
            train_rows = train_windows.n_rows(),
            test_rows = test_windows.n_rows(),
            width = self.config.window,
            "built windows"
        );

        let train_ranges = normalize_columns(&mut train_windows);
        match self.config.normalization {
            NormalizationScope::PerMatrix => {
                normalize_columns(&mut test_windows);
            }
            NormalizationScope::TrainingRanges => {
                apply_column_ranges(&mut test_windows, &train_ranges)?;
            }
        }

        let start = Instant::now();
        let mut predictions =
            predict::<M>(&train_windows, &targets, &test_windows, self.config.k)?;
        let prediction_time = start.elapsed();

        if self.config.output_scale != 1.0 {
            let scale = self.config.output_scale;
            predictions.iter_mut().for_each(|y| *y *= scale);
        }

        tracing::info!(
            predictions = predictions.len(),
            k = self.config.k,
            elapsed_us = prediction_time.as_micros() as u64,
            "prediction finished"
        );

        Ok(Forecast {
            targets,
            predictions,
            train_ranges,
            prediction_time,
        })
    }
}

/// Convenience type alias for the Euclidean forecaster.
pub type KnnForecaster = Forecaster<Euclidean>;
