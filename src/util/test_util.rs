use std::path::Path;

use ndarray::{Array3, Array4};
use tracing::{info, subscriber::set_default};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt;

pub struct TracingGuards {
    _subscriber_guard: tracing::subscriber::DefaultGuard,
    _worker_guard: WorkerGuard,
}

pub fn setup_test_tracing(test_name: &str) -> TracingGuards {
    let log_dir = Path::new("tests/logs");
    if !log_dir.exists() {
        std::fs::create_dir_all(log_dir).unwrap();
    }

    let log_file = format!("tests/logs/{}.log", test_name);
    let file_appender = tracing_appender::rolling::never("", &log_file);
    let (non_blocking, worker_guard) = tracing_appender::non_blocking(file_appender);

    let subscriber = fmt::Subscriber::builder()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_level(true)
        .with_target(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_max_level(tracing::Level::DEBUG)
        .finish();

    // Default for this thread only, tests run in parallel
    let subscriber_guard = set_default(subscriber);

    info!("-----------------");
    info!("Test: {}", test_name);
    info!("-----------------");

    TracingGuards {
        _subscriber_guard: subscriber_guard,
        _worker_guard: worker_guard,
    }
}

/// One-hot (N, K, H, W) score volume for an (N, H, W) label map.
pub fn one_hot_scores(labels: &Array3<usize>, classes: usize) -> Array4<f64> {
    let (n, h, w) = labels.dim();
    Array4::from_shape_fn((n, classes, h, w), |(i, c, y, x)| {
        if labels[[i, y, x]] == c {
            1.0
        } else {
            0.0
        }
    })
}
