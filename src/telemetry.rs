//! Opt-in `tracing` setup for hosts of the pipeline.
//!
//! Stages only emit events; no subscriber is ever installed implicitly.
//! `RUST_LOG` always wins over the fallback filter passed here, e.g.
//! `RUST_LOG=chart_pipeline::remote=trace`.

/// Fallback filter used by [`init_default_tracing`].
pub const DEFAULT_TRACING_FILTER: &str = "chart_pipeline=info";

/// Installs a compact stderr subscriber filtered by `RUST_LOG`, or by
/// `fallback_filter` when the variable is unset or unparsable.
///
/// Returns `false` without the `telemetry` feature, or when the host already
/// set a global subscriber.
#[must_use]
pub fn init_tracing(fallback_filter: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(fallback_filter));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
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

#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing(DEFAULT_TRACING_FILTER)
}
