//! Opt-in `tracing` subscriber setup for hosts embedding `strategy-curves`.
//!
//! The engine only emits events; installing a subscriber is the host's call.
//! Scene passes log at `debug`, per-pointer hover lookups and retry frames at
//! `trace`.

/// Filter used when `RUST_LOG` is unset: engine events at `debug`, the rest at `warn`.
pub const DEFAULT_FILTER: &str = "warn,strategy_curves=debug";

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`, or by
/// [`DEFAULT_FILTER`] when the variable is unset or unparsable.
///
/// Returns `false` when the `telemetry` feature is off or the host already
/// installed a global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter(DEFAULT_FILTER)
}

/// Like [`init_default_tracing`] with a caller-supplied fallback filter.
#[must_use]
pub fn init_tracing_with_filter(fallback_filter: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(fallback_filter))
            .unwrap_or_else(|_| EnvFilter::new("warn"));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_filter;
        false
    }
}
