#![forbid(unsafe_code)]

//! Logging helpers.
//!
//! With the `tracing` feature the `tracing` macros are re-exported at the
//! crate root so downstream crates can log through `sortkit_core::debug!`
//! and friends without a direct dependency. The `tracing-json` feature adds
//! [`init_json`], a one-call JSON subscriber for production use.

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

/// Environment variable read by [`init_json`] for the filter directive.
pub const LOG_ENV: &str = "SORTKIT_LOG";

/// Filter used when [`LOG_ENV`] is unset or unparsable.
pub const DEFAULT_FILTER: &str = "sortkit=info,sortkit_core=info,sortkit_dnd=info";

/// Install a global JSON subscriber filtered by [`LOG_ENV`].
///
/// Fails if a global subscriber is already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json() -> Result<(), tracing_subscriber::util::TryInitError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{EnvFilter, fmt};

    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().with_target(true))
        .try_init()?;

    tracing::debug!(env = LOG_ENV, "sortkit JSON logging initialized");
    Ok(())
}
