use tracing_subscriber::EnvFilter;

/// Installs the global `fmt` subscriber. `debug_logging` in the settings
/// file switches the filter from a fixed `info` to `RUST_LOG` (or `debug`).
pub fn init(debug: bool) {
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::new("info")
    };

    if tracing_subscriber::fmt().with_env_filter(filter).try_init().is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
