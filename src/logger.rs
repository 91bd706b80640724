use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt::{self, format::FmtSpan}};

/// Filter used when `RUST_LOG` is unset. Interpolation and rendering report
/// per-image detail at debug level, so only milestones show by default.
pub const DEFAULT_DIRECTIVE: &str = "info";

/// Installs the global subscriber, reporting on stderr if one is already set.
pub fn init() {
    if let Err(e) = try_init(DEFAULT_DIRECTIVE) {
        eprintln!("Logging not initialized: {}", e);
    }
}

/// Installs the global subscriber with `default_directive` as the fallback
/// for `RUST_LOG`.
pub fn try_init(default_directive: &str) -> Result<(), TryInitError> {
    let env_filter = env_filter(default_directive);
    let span_events = span_events(&env_filter);

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_timer(fmt::time::uptime())
        .with_span_events(span_events);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
}

fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Pipeline stage timings are reported on span close once any directive
/// enables debug output.
fn span_events(filter: &EnvFilter) -> FmtSpan {
    let max_level = <EnvFilter as Layer<Registry>>::max_level_hint(filter);
    if max_level.is_some_and(|level| level >= LevelFilter::DEBUG) {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    }
}
