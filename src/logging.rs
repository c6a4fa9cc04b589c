//! Structured logging for the phylo pipeline.
//!
//! Uses `tracing`, with spans wrapping each pipeline stage for timing and
//! nested context in log output.

use crate::config::env::EnvConfig;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the logging system. Call once at program startup.
/// The log level is controlled via the `PHYLO_LOG_LEVEL` environment variable.
pub fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let config = EnvConfig::from_env();

    let filter = EnvFilter::new(&config.log_level)
        .add_directive(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()).parse()?);

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(config.debug_mode)
        .with_thread_names(config.debug_mode)
        .with_file(config.debug_mode)
        .with_line_number(config.debug_mode);

    tracing_subscriber::registry().with(filter).with(fmt_layer).try_init()?;
    Ok(())
}

#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt().with_env_filter("debug").with_test_writer().try_init();
}

pub use tracing::{debug, debug_span, error, error_span, event, info, info_span, span, trace, trace_span, warn, warn_span};

/// Log a completed pipeline stage with its wall-clock duration.
#[macro_export]
macro_rules! log_stage {
    ($stage:expr, $duration_ms:expr, $($field:tt)*) => {
        tracing::event!(
            tracing::Level::INFO,
            stage = $stage,
            duration_ms = $duration_ms,
            category = "pipeline",
            $($field)*
        );
    };
}

/// Span wrapping one pipeline stage (catalogue load, matrix fill, tree build,
/// reconstruction) for nested timing in log output.
#[macro_export]
macro_rules! phylo_span {
    ($name:expr) => {
        tracing::info_span!($name)
    };
    ($name:expr, $($field:tt)*) => {
        tracing::info_span!($name, $($field)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_and_span_macros_compile_and_run() {
        init_test_logging();
        info!("pipeline starting");
        let span = phylo_span!("catalogue_load", languages = 12);
        let _guard = span.enter();
        log_stage!("catalogue_load", 42, languages = 12);
    }
}
