//! Opt-in `tracing` setup for hosts that have no subscriber of their own.
//!
//! The engine itself only emits events; it never installs a subscriber
//! unless asked. Hosts embedding the engine in a larger application
//! should wire their own subscriber and ignore this module.

/// Installs a compact stdout subscriber honoring `RUST_LOG`, falling back
/// to `info`. Only active with the `telemetry` feature.
///
/// Returns `true` when this call claimed the global subscriber; `false`
/// when the feature is disabled or a subscriber was already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_target(false)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
