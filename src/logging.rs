//! Logging initialization.
//!
//! Configures the tracing subscriber. Output goes to stderr so stdout only
//! carries the suggested replay command. The RUST_LOG environment variable
//! takes precedence over the level passed on the command line.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the logging subsystem.
///
/// `level` is any `EnvFilter` directive, e.g. `info` or `h2gen=trace`.
pub fn init(level: &str) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(level)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();
}
