//! Tracing setup: console output plus optional daily log files.

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

const THIS_CRATE: &str = env!("CARGO_CRATE_NAME");

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("info,{THIS_CRATE}=debug")))
}

/// Installs the global subscriber. Keep the returned guard alive so buffered file
/// output gets flushed on shutdown.
pub fn install(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let timer = fmt::time::ChronoLocal::rfc_3339();

    let console_layer = fmt::layer()
        .with_ansi(true)
        .with_target(true)
        .with_timer(timer.clone())
        .with_filter(filter());

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, format!("{THIS_CRATE}.log"));
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_timer(timer)
                .with_writer(writer)
                .compact()
                .with_filter(filter());
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    guard
}
