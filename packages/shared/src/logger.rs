//! Logger setup.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the global tracing subscriber.
///
/// The filter is read from `RUST_LOG` when set; otherwise `bin_name` (with
/// `-` replaced by `_`) and the `kaiwa_*` crates log at `default_level`.
///
/// Calling this more than once is harmless: later calls are ignored.
pub fn setup_logger(bin_name: &str, default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(bin_name, default_level)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init();
}

fn default_filter(bin_name: &str, default_level: &str) -> String {
    format!(
        "{}={level},kaiwa_chat={level},kaiwa_shared={level}",
        bin_name.replace('-', "_"),
        level = default_level
    )
}
