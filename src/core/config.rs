use serde::{Deserialize, Serialize};

use crate::core::error::{ForecastError, Result};

/// Scale factor applied to predictions by the legacy deployment that wrote
/// values ten times larger than the model output.
pub const LEGACY_OUTPUT_SCALE: f32 = 10.0;

/// Which statistics rescale the test windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NormalizationScope {
    /// Training and test matrices are each rescaled with their own column ranges.
    ///
    /// This is the historical behavior. Test windows end up on a different scale from
    /// the training windows they are compared against whenever the two series cover
    /// different value ranges.
    #[default]
    PerMatrix,
    /// Test windows are rescaled with the column ranges observed on the training windows.
    TrainingRanges,
}

/// Configuration for a sliding-window KNN forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ForecastConfig {
    /// Window width `w`: number of consecutive observations per feature row.
    pub window: usize,
    /// Forecast horizon `h`: offset between a window and the values averaged into its target.
    pub horizon: usize,
    /// Number of neighbors averaged per prediction.
    pub k: usize,
    /// Multiplier applied to every prediction after averaging. `1.0` leaves predictions untouched.
    pub output_scale: f32,
    /// Normalization statistics used for the test windows.
    pub normalization: NormalizationScope,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            window: 3,
            horizon: 1,
            k: 5,
            output_scale: 1.0,
            normalization: NormalizationScope::PerMatrix,
        }
    }
}

impl ForecastConfig {
    pub fn new(window: usize) -> Self {
        Self {
            window,
            ..Self::default()
        }
    }

    pub fn with_horizon(mut self, horizon: usize) -> Self {
        self.horizon = horizon;
        self
    }

    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    pub fn with_output_scale(mut self, scale: f32) -> Self {
        self.output_scale = scale;
        self
    }

    pub fn with_normalization(mut self, scope: NormalizationScope) -> Self {
        self.normalization = scope;
        self
    }

    /// Parse a configuration from JSON. Missing fields take their default values.
    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Check the invariants that do not depend on the input series.
    ///
    /// `k` against the number of training rows is checked by the predictor,
    /// since the row count is only known once the windows are built.
    pub fn validate(&self) -> Result<()> {
        if self.window == 0 {
            return Err(ForecastError::InvalidConfig(
                "window width must be >= 1".to_string(),
            ));
        }
        if self.k == 0 {
            return Err(ForecastError::InvalidConfig("k must be >= 1".to_string()));
        }
        if !self.output_scale.is_finite() {
            return Err(ForecastError::InvalidConfig(format!(
                "output scale must be finite, got {}",
                self.output_scale
            )));
        }
        Ok(())
    }

    /// Number of training rows a series of length `n` yields under this configuration.
    pub fn training_rows(&self, n: usize) -> usize {
        crate::algorithms::windows::training_row_count(n, self.window, self.horizon)
    }
}
