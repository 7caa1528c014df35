use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Variable lue en priorité, avant `RUST_LOG`.
pub const LOG_ENV: &str = "MAILTRUST_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Installs the stderr subscriber. stdout stays reserved for reports.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .with(filter_from_env())
        .init();
}

fn filter_from_env() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
