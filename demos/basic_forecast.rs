//! Basic sliding-window KNN forecast with knn-forecast.
//!
//! Trains on the first part of a noisy seasonal signal and forecasts the
//! mean of the next window for every window of a held-out segment.
//!
//! Run with: cargo run --release --example basic_forecast

use knn_forecast::{ForecastConfig, KnnForecaster};

fn main() {
    let n = 1_200;
    let split = 1_000;

    let mut ts = Vec::with_capacity(n);
    for i in 0..n {
        let t = i as f32;
        // Period-50 seasonality plus a small deterministic wobble
        let base = (t * std::f32::consts::TAU / 50.0).sin() * 5.0 + 20.0;
        let noise = ((t * 7.3).sin() * (t * 13.7).cos()) * 0.3;
        ts.push(base + noise);
    }
    let (train, test) = ts.split_at(split);

    let config = ForecastConfig::new(8).with_horizon(2).with_k(5);
    let forecaster = KnnForecaster::new(config).expect("valid configuration");
    let forecast = forecaster.forecast(train, test).expect("forecast");

    println!("Training windows: {}", forecast.targets.len());
    println!("Test windows:     {}", forecast.predictions.len());
    println!("Prediction time:  {:?}", forecast.prediction_time);

    // Compare each prediction with the value it stands for: the mean of the
    // window shifted `horizon` steps ahead.
    let w = forecaster.config().window;
    let h = forecaster.config().horizon;
    let mut abs_err = 0.0_f64;
    let mut count = 0;
    for (i, &y) in forecast.predictions.iter().enumerate() {
        if i + h + w > test.len() {
            break;
        }
        let actual = test[i + h..i + h + w].iter().sum::<f32>() / w as f32;
        abs_err += f64::from((y - actual).abs());
        count += 1;
    }

    println!("\nFirst predictions:");
    for (i, y) in forecast.predictions.iter().take(5).enumerate() {
        println!("  window {i:>3}: {y:.2}");
    }
    println!("\nMean absolute error over {count} windows: {:.4}", abs_err / count as f64);
}
