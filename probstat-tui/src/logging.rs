use probstat_common::Config;
use tracing_appender::non_blocking::WorkerGuard;

/// File logging; stdout belongs to the terminal UI. The returned guard must be
/// held until exit so buffered lines are flushed. `RUST_LOG` overrides the
/// configured level.
pub fn init_logging(config: &Config) -> Option<WorkerGuard> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let logs_dir = config.log_dir();
    if let Err(e) = std::fs::create_dir_all(&logs_dir) {
        eprintln!("logging disabled: cannot create {}: {e}", logs_dir.display());
        return None;
    }
    let file_appender = tracing_appender::rolling::daily(&logs_dir, "probstat.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .try_init();
    if installed.is_err() {
        return None;
    }
    Some(guard)
}
