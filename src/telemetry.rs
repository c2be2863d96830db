//! Telemetry helpers for applications embedding `chartboard`.
//!
//! The data layer emits structured `tracing` events for series loads,
//! visibility changes, cache recomputes and redraw passes. Setup stays
//! explicit and opt-in: call `init_default_tracing`, or wire your own
//! subscriber when the host application already owns one.

/// Initializes a default `tracing` subscriber when the `telemetry` feature
/// is enabled.
///
/// Without `RUST_LOG` set, only `chartboard` events at `info` and above are
/// shown; redraw and cache internals log at `debug`/`trace`, so raise the
/// filter to see per-pass detail.
///
/// Returns `true` when initialization succeeds.
/// Returns `false` when no initialization is performed (feature disabled)
/// or if a global subscriber was already set by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("chartboard=info")),
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
