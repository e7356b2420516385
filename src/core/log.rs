use anyhow::{Context, Result};
use tracing_subscriber::{
    EnvFilter, fmt, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt,
};

const APP_TARGET: &str = "moat";

/// Filter used when `RUST_LOG` is unset: the crate's own debug events with
/// `--verbose`, nothing otherwise.
fn default_directives(verbose: bool) -> String {
    if verbose {
        format!("{APP_TARGET}=debug")
    } else {
        "off".to_string()
    }
}

/// Installs the global subscriber, writing to stderr so table output on
/// stdout stays clean. `RUST_LOG` replaces the default filter.
pub fn init_logging(verbose: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .pretty()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(env_filter)
        .try_init()
        .context("Failed to install log subscriber")
}
