//! Opt-in tracing setup for hosts of `dashboard-charts`.
//!
//! The library only emits `tracing` events. Hosts either install their own
//! subscriber or call one of the helpers below (requires the `telemetry`
//! feature). Output goes to stderr so stdout stays free for rendered SVG.

/// Chart lifecycle at `info`, everything else at `warn`.
pub const DEFAULT_FILTER: &str = "warn,dashboard_charts=info";

/// Same as [`init_tracing`] with [`DEFAULT_FILTER`].
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing(DEFAULT_FILTER)
}

/// Installs a compact stderr subscriber.
///
/// `RUST_LOG` wins when set; otherwise `fallback_filter` is used. Returns
/// `false` when the feature is disabled or a global subscriber already exists.
#[must_use]
pub fn init_tracing(fallback_filter: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(fallback_filter))
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
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
