// src/utils/logging.rs
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global `tracing` subscriber.
/// `RUST_LOG` wins when set; otherwise `default_level` applies to this crate
/// and everything else stays at `warn` so reqwest/hyper do not drown the output.
pub fn setup_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("warn,finos_extractor={}", default_level))
    });

    // A second install (e.g. from tests) is not an error worth surfacing.
    if fmt().with_env_filter(filter).with_target(false).try_init().is_err() {
        return;
    }

    tracing::debug!("Logging setup complete.");
}
