use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize structured tracing. Call once at startup.
/// Uses JSON format with env-filter (`RUST_LOG` env var), written to stderr
/// because stdout belongs to the interactive surface.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().json().with_writer(std::io::stderr))
        .try_init();
}
