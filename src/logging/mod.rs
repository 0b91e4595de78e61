use tracing_subscriber::{fmt, EnvFilter};

/// Build the log filter. `verbose` overrides both `RUST_LOG` and the
/// configured level.
pub fn build_filter(verbose: bool, level: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new("hostver=debug");
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("hostver={}", level.unwrap_or("warn")))
    })
}

/// Initialize the logging/tracing subsystem. Logs go to stderr so stdout
/// carries only the comparison result.
pub fn init_logging(verbose: bool, level: Option<&str>, json: bool) {
    let filter = build_filter(verbose, level);
    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
