//! Logging setup: `tracing-subscriber` to stderr plus an optional rolling file appender.
//! Mirrors the one-line `tracing_subscriber::fmt::init()` other binaries in this stack use,
//! extended with a file sink since this CLI runs unattended for long stretches and needs a
//! durable log.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Must be kept alive for the process lifetime; dropping it stops the background flush thread.
pub struct LoggingGuard(#[allow(dead_code)] Option<tracing_appender::non_blocking::WorkerGuard>);

pub fn init(log_level: &str, log_dir: Option<&Path>) -> LoggingGuard {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    match log_dir {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "teebox-cli.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(non_blocking)
                .with_ansi(false)
                .init();
            LoggingGuard(Some(guard))
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
            LoggingGuard(None)
        }
    }
}
