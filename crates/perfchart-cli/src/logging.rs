//! Logging initialization.

use std::env;

use tracing_subscriber::{fmt, EnvFilter};

use crate::error::CliError;

pub const LOG_LEVEL_ENV: &str = "PERFCHART_LOG";

const DEFAULT_LEVEL: &str = "warn";

/// Install a stderr fmt subscriber.
///
/// `RUST_LOG` wins, then `PERFCHART_LOG`, then `warn`. Output goes to stderr
/// so JSON on stdout stays machine-readable.
pub fn init_logging() -> Result<(), CliError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| String::from(DEFAULT_LEVEL));
        EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
    });

    fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|error| CliError::Logging(error.to_string()))
}
