// src/log.rs
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::consts::LOG_FILE;

/// Install the global subscriber: human-readable lines on stderr, and a full
/// debug trace appended to `<store_dir>/debug.log`.
///
/// `RUST_LOG` overrides the stderr level. Keep the returned guard alive for
/// the whole run or the file log loses its tail.
pub fn init(store_dir: &Path, verbose: bool) -> std::io::Result<WorkerGuard> {
    std::fs::create_dir_all(store_dir)?;

    let file = tracing_appender::rolling::never(store_dir, LOG_FILE);
    let (file_writer, guard) = tracing_appender::non_blocking(file);

    let default = if verbose { "ygo_scrape=debug" } else { "ygo_scrape=info" };
    let stderr_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false).with_filter(stderr_filter))
        .with(
            fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_filter(EnvFilter::new("ygo_scrape=debug")),
        )
        .try_init();

    Ok(guard)
}
