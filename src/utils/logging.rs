use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the stderr diagnostics subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--debug` selects debug output and the
/// default only surfaces warnings.
pub(crate) fn init_logging(debug: bool) {
    let default_level = if debug { "timelog=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .try_init();
}
