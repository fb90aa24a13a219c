use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install a stdout subscriber filtered by `RUST_LOG` (default `info`).
///
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init();
}
