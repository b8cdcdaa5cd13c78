#![forbid(unsafe_code)]

//! Subscriber setup for hosts that do not install their own.
//!
//! The filter comes from `TESSERA_LOG`, then `RUST_LOG`, then defaults to
//! `warn`.

use tracing_subscriber::EnvFilter;

/// Environment variable checked before `RUST_LOG`.
pub const LOG_ENV: &str = "TESSERA_LOG";

/// Build the filter used by [`init`].
#[must_use]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install a global fmt subscriber. Fails if one is already set.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(true)
        .try_init()
}
