use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the stderr subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--debug` selects debug output for
/// this crate and everything else stays at `warn`.
pub(crate) fn init_logging(debug: bool) {
    let default_directive = if debug { "warn,llmcost=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    // Ignore an already-installed subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init();
}
