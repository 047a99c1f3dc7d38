//! Logging setup for the `mars-rover` binary.
//!
//! Diagnostics go to stderr so stdout stays reserved for results. Verbosity
//! defaults to `warn` and is configurable via the `RUST_LOG` environment variable.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs the global subscriber. `default_level` applies when `RUST_LOG` is unset.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_logging(default_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .try_init();
}
