use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber. Logs go to stderr so they never mix with
/// reading output on stdout.
///
/// The filter comes from `TAROT_LOG` (default `warn`); `verbose` forces `debug`.
pub fn init(verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("TAROT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}
