//! Log subscriber setup

use tracing_subscriber::EnvFilter;

use crate::config::Verbosity;

/// Installs the stderr log subscriber
///
/// `RUST_LOG` wins over the verbosity flags. Installing twice is a no-op.
pub fn init(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_directive()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
