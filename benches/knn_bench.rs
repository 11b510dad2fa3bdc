use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use knn_forecast::{
    build_test_windows, build_training_set, normalize_columns, predict, select_k_smallest,
    DistanceMetric, Euclidean, ForecastConfig, KnnForecaster, WindowMatrix,
};

fn series(n: usize, phase: f32) -> Vec<f32> {
    (0..n).map(|i| ((i as f32 + phase) * 0.1).sin()).collect()
}

fn normalized_fixture(n_train: usize, n_test: usize, w: usize) -> (WindowMatrix, Vec<f32>, WindowMatrix) {
    let mut ts = build_training_set(&series(n_train, 0.0), w, 1).unwrap();
    normalize_columns(&mut ts.windows);
    let mut test = build_test_windows(&series(n_test, 0.5), w).unwrap();
    normalize_columns(&mut test);
    (ts.windows, ts.targets, test)
}

fn bench_distance(c: &mut Criterion) {
    let mut group = c.benchmark_group("euclidean_distance");
    for w in [3, 32, 256] {
        let a = series(w, 0.0);
        let b = series(w, 1.0);
        group.bench_with_input(BenchmarkId::from_parameter(w), &w, |bench, _| {
            bench.iter(|| Euclidean::distance(black_box(&a), black_box(&b)))
        });
    }
    group.finish();
}

fn bench_distance_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("distance_set");
    for n in [1_000, 10_000, 100_000] {
        let (train, _, test) = normalized_fixture(n, 16, 8);
        let query = test.row(0).to_vec();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| Euclidean::distance_set(black_box(&query), black_box(&train)))
        });
    }
    group.finish();
}

fn bench_topk(c: &mut Criterion) {
    let mut group = c.benchmark_group("topk_select");
    let distances: Vec<f64> = (0..10_000).map(|i| ((i as f64) * 0.77).sin().abs()).collect();
    for k in [1, 5, 50] {
        group.bench_with_input(BenchmarkId::from_parameter(k), &k, |b, &k| {
            b.iter(|| select_k_smallest(black_box(&distances), k).unwrap())
        });
    }
    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_columns");
    for n in [1_000, 100_000] {
        let ts = build_training_set(&series(n, 0.0), 16, 1).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter_batched(
                || ts.windows.clone(),
                |mut m| normalize_columns(&mut m),
                criterion::BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_predict(c: &mut Criterion) {
    let mut group = c.benchmark_group("predict");
    group.sample_size(10);
    for n in [1_000, 10_000] {
        let (train, targets, test) = normalized_fixture(n, 500, 3);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| predict::<Euclidean>(black_box(&train), &targets, black_box(&test), 5).unwrap())
        });
    }
    group.finish();
}

fn bench_forecast_end_to_end(c: &mut Criterion) {
    let train = series(20_000, 0.0);
    let test = series(2_000, 0.3);
    let forecaster = KnnForecaster::new(ForecastConfig::default()).unwrap();
    let mut group = c.benchmark_group("forecast");
    group.sample_size(10);
    group.bench_function("20k_train_2k_test", |b| {
        b.iter(|| forecaster.forecast(black_box(&train), black_box(&test)).unwrap())
    });
    group.finish();
}

#[cfg(feature = "parallel")]
fn bench_predict_thread_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("predict_thread_scaling");
    group.sample_size(10);

    let (train, targets, test) = normalized_fixture(10_000, 1_000, 3);

    for threads in [1, 2, 4, 8] {
        group.bench_with_input(
            BenchmarkId::new("threads", threads),
            &threads,
            |b, &threads| {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .unwrap();
                b.iter(|| {
                    pool.install(|| {
                        predict::<Euclidean>(black_box(&train), &targets, black_box(&test), 5)
                            .unwrap()
                    })
                });
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_distance,
    bench_distance_set,
    bench_topk,
    bench_normalize,
    bench_predict,
    bench_forecast_end_to_end,
);

#[cfg(feature = "parallel")]
criterion_group!(parallel_benches, bench_predict_thread_scaling);

#[cfg(feature = "parallel")]
criterion_main!(benches, parallel_benches);

#[cfg(not(feature = "parallel"))]
criterion_main!(benches);
