use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Logs go to stderr so stdout only carries
/// summaries; `RUST_LOG` takes precedence over the default level.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be set (tests, embedding); keep the first one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
