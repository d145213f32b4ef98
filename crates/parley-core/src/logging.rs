//! Tracing subscriber setup.
//!
//! Call [`init`] once at process startup. Filtering comes from `RUST_LOG`
//! with a sensible default; `PARLEY_LOG_JSON=1` switches to JSON lines for
//! log aggregation.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// Safe to call more than once — later calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,parley_runtime=debug"));

    let json = std::env::var("PARLEY_LOG_JSON").is_ok_and(|v| v == "1");

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    // A second init (tests, embedders) is fine; keep the first subscriber.
    drop(result);
}
