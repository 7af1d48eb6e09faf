use std::error::Error;
use std::io;

use tracing_subscriber::EnvFilter;

/// Installs a global subscriber writing to stderr, so the menu on stdout
/// stays readable.
///
/// `default_directive` is used unless `RUST_LOG` is set.
///
/// # Errors
///
/// Returns an Error if the directive does not parse or a global
/// subscriber was already installed.
pub fn try_init(default_directive: &str) -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    let env_filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) if !directives.is_empty() => EnvFilter::try_new(directives)?,
        _ => EnvFilter::try_new(default_directive)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .try_init()
}
