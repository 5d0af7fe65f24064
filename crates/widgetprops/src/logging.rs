//! Tracing subscriber setup.
//!
//! The library only emits events through `tracing`; installing a subscriber
//! is left to the host. [`init`] is a convenience for hosts that do not
//! have one of their own.
//!
//! `RUST_LOG` takes precedence over the level passed in, e.g.
//! `RUST_LOG=widgetprops=debug`. Output goes to stderr.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a stderr fmt subscriber filtered at `level`.
///
/// Returns `false` if a global subscriber was already set.
pub fn init(level: &str) -> bool {
    let level: tracing::Level = level.parse().unwrap_or(tracing::Level::INFO);
    let env_filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .is_ok()
}
