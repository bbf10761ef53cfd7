use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Install a formatted tracing subscriber for binaries and tests.
///
/// The filter is read from `LOGLEVEL` (for example `LOGLEVEL=debug` or
/// `LOGLEVEL=depthbook_rs=trace`) and defaults to `info`. Calling it again
/// once a subscriber is installed is harmless.
pub fn setup_logger() {
    let filter = EnvFilter::try_from_env("LOGLEVEL").unwrap_or_else(|_| EnvFilter::new("info"));

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_err()
    {
        debug!("Logger already initialized");
    }
}
