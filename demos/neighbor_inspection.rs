//! Inspect the neighbors behind a single prediction.
//!
//! Builds and normalizes the windows by hand, then lists the k training
//! windows selected for one query together with their distances and targets.
//!
//! Run with: cargo run --release --example neighbor_inspection

use knn_forecast::{
    build_test_windows, build_training_set, nearest_neighbors, normalize_columns, predict_one,
    Euclidean,
};

fn main() {
    let k = 4;
    let w = 5;
    let h = 1;

    let train: Vec<f32> = (0..300)
        .map(|i| {
            let t = i as f32;
            (t * 0.21).sin() * 3.0 + (t * 0.05).cos()
        })
        .collect();
    let test: Vec<f32> = (0..40).map(|i| ((i as f32 + 7.0) * 0.21).sin() * 3.0).collect();

    let mut ts = build_training_set(&train, w, h).expect("training windows");
    let ranges = normalize_columns(&mut ts.windows);
    let mut queries = build_test_windows(&test, w).expect("test windows");
    normalize_columns(&mut queries);

    println!("Training windows: {} x {}", ts.windows.n_rows(), ts.windows.width());
    println!("Column ranges before rescaling:");
    for (j, r) in ranges.iter().enumerate() {
        println!("  column {j}: [{:.3}, {:.3}]", r.min, r.max);
    }

    let query = queries.row(10);
    let neighbors = nearest_neighbors::<Euclidean>(&ts.windows, query, k).expect("neighbors");

    println!("\nQuery window 10: {query:?}");
    println!("Nearest {k} training windows:");
    for n in &neighbors {
        println!(
            "  row {:>4}  distance {:.5}  target {:.3}",
            n.index, n.distance, ts.targets[n.index]
        );
    }

    let y = predict_one::<Euclidean>(&ts.windows, &ts.targets, query, k).expect("prediction");
    println!("\nPrediction (mean of neighbor targets): {y:.3}");
}
