//! Logging Infrastructure
//!
//! Structured logging setup. `RUST_LOG` overrides the default level; in
//! production a daily-rotated file appender is added under the work dir.

use tracing_subscriber::EnvFilter;

/// Initialize the logger with stdout output
pub fn init_logger() {
    init_logger_with_file(None, None);
}

/// Initialize the logger with optional file output
pub fn init_logger_with_file(default_level: Option<&str>, log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.unwrap_or("info")));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        if std::path::Path::new(dir).exists() {
            let file_appender = tracing_appender::rolling::daily(dir, "stocktag-server");
            subscriber.with_writer(file_appender).init();
            return;
        }
    }

    subscriber.init();
}
