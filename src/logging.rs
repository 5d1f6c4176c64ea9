use std::fs;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initializes logging with a rotating JSON file plus console output.
pub fn init_logging() {
    // Daily-rotated JSON log under logs/
    let _ = fs::create_dir_all("logs");
    let file_appender = tracing_appender::rolling::daily("logs", "meddesk.log");
    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = fmt::layer().json().with_writer(non_blocking_writer);

    // The desk menu owns stdout, so console diagnostics go to stderr
    let console_layer = fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("meddesk=info".parse().unwrap()))
        .with(file_layer)
        .with(console_layer)
        .init();

    // Keep the guard alive for the process lifetime so logs flush on exit
    std::mem::forget(_guard);
}
