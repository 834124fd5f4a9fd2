use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_FILTER: &str = "chat_feed_lib=info";

/// Installs a fmt subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_LOG_FILTER`]. Safe to call more than once; later calls are
/// no-ops.
#[uniffi::export]
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_err()
    {
        tracing::debug!("logging already initialized");
    }
}
