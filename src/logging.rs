//! Logging setup for the binary.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const VERBOSE_LEVEL: [&str; 3] = ["info", "debug", "trace"];

/// Log level for this crate at a given `-v` count, if raised at all.
pub fn verbosity_level(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        n => Some(VERBOSE_LEVEL[(n.min(3) as usize) - 1]),
    }
}

/// Install a stderr subscriber filtered by `RUST_LOG` (default `warn`).
///
/// Each `-v` raises this crate's level one step, up to `trace`.
pub fn init_logging(verbose: u8) -> anyhow::Result<()> {
    let mut env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    if let Some(level) = verbosity_level(verbose) {
        env_filter = env_filter.add_directive(format!("{}={}", env!("CARGO_CRATE_NAME"), level).parse()?);
    }

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose > 1);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()?;

    Ok(())
}
