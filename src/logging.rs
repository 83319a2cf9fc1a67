use std::io;
use tracing::{Level, Metadata, Subscriber};
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::driver::GAP_TARGET;

/// Events for the diagnostics stream: archive gaps and errors.
pub fn is_diagnostic(meta: &Metadata<'_>) -> bool {
    meta.target() == GAP_TARGET || *meta.level() == Level::ERROR
}

/// Subscriber writing progress to `progress` and diagnostics to `diagnostics`.
pub fn subscriber<P, D>(
    filter: EnvFilter,
    progress: P,
    diagnostics: D,
) -> impl Subscriber + Send + Sync + 'static
where
    P: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    D: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let progress = fmt::layer()
        .with_writer(progress)
        .with_filter(filter_fn(|meta| !is_diagnostic(meta)));

    let diagnostics = fmt::layer()
        .with_writer(diagnostics)
        .with_filter(filter_fn(is_diagnostic));

    tracing_subscriber::registry()
        .with(filter)
        .with(progress)
        .with(diagnostics)
}

/// Progress to stdout, gaps and errors to stderr. `RUST_LOG` overrides the
/// default `cci_extract=info` filter.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "cci_extract=info".into());

    subscriber(filter, io::stdout, io::stderr).init();
}
