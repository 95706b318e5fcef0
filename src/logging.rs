//! `tracing` setup for the binary.
//!
//! Diagnostics go to stderr so stdout stays reserved for command summaries.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset, by `-v` count.
fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "harvest=info",
        1 => "harvest=debug",
        _ => "harvest=trace",
    }
}

/// Install the global subscriber. Calling it twice is a no-op.
pub fn init(verbosity: u8) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .try_init();
}
