//! knn-forecast command-line entry point.
//!
//! Reads a training and a test series, writes predictions to `ytest.txt` and training
//! targets to `ytrain.txt`, and prints the wall time of the prediction phase.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use knn_forecast::io::{
    read_config, read_series, write_values, DEFAULT_TEST_FILE, DEFAULT_TRAIN_FILE,
    PREDICTIONS_FILE, TARGETS_FILE,
};
use knn_forecast::{ForecastConfig, KnnForecaster, NormalizationScope};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum NormalizationArg {
    PerMatrix,
    TrainingRanges,
}

impl From<NormalizationArg> for NormalizationScope {
    fn from(arg: NormalizationArg) -> Self {
        match arg {
            NormalizationArg::PerMatrix => NormalizationScope::PerMatrix,
            NormalizationArg::TrainingRanges => NormalizationScope::TrainingRanges,
        }
    }
}

/// Sliding-window KNN forecasting of a univariate series.
#[derive(Debug, Parser)]
#[command(name = "knn-forecast", version, about)]
struct Cli {
    /// Training series (defaults to xtrain.txt; give both paths or neither)
    #[arg(requires = "test")]
    train: Option<PathBuf>,

    /// Test series (defaults to xtest.txt)
    test: Option<PathBuf>,

    /// Number of neighbors averaged per prediction
    #[arg(short = 'k', long = "neighbors")]
    k: Option<usize>,

    /// Window width
    #[arg(short = 'w', long)]
    window: Option<usize>,

    /// Forecast horizon in steps
    #[arg(long)]
    horizon: Option<usize>,

    /// Multiply every prediction by this factor before writing (the legacy deployment used 10)
    #[arg(long)]
    output_scale: Option<f32>,

    /// Statistics used to rescale the test windows
    #[arg(long, value_enum)]
    normalization: Option<NormalizationArg>,

    /// JSON configuration file; explicit flags override its values
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn forecast_config(&self) -> anyhow::Result<ForecastConfig> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => ForecastConfig::default(),
        };
        if let Some(k) = self.k {
            config.k = k;
        }
        if let Some(window) = self.window {
            config.window = window;
        }
        if let Some(horizon) = self.horizon {
            config.horizon = horizon;
        }
        if let Some(scale) = self.output_scale {
            config.output_scale = scale;
        }
        if let Some(scope) = self.normalization {
            config.normalization = scope.into();
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "knn_forecast=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let train_path = cli
        .train
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TRAIN_FILE));
    let test_path = cli
        .test
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TEST_FILE));

    let config = cli.forecast_config()?;
    tracing::info!(
        train = %train_path.display(),
        test = %test_path.display(),
        window = config.window,
        horizon = config.horizon,
        k = config.k,
        "starting forecast"
    );
    let forecaster = KnnForecaster::new(config)?;

    let train = read_series(&train_path)?;
    let test = read_series(&test_path)?;
    let forecast = forecaster
        .forecast(&train, &test)
        .context("forecast failed")?;

    write_values(TARGETS_FILE, &forecast.targets)?;
    write_values(PREDICTIONS_FILE, &forecast.predictions)?;

    println!(
        "Prediction time: {:.6} s",
        forecast.prediction_time.as_secs_f64()
    );
    Ok(())
}
