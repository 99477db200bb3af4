//! Log setup for the CLI and the web server.
//!
//! Filtering follows `RUST_LOG` (default `info`). Pass progress is logged at
//! `debug`, individual assignments at `trace`, coverage gaps at `warn`.

use tracing_subscriber::{fmt, EnvFilter};

pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .init();
}

/// Verbose subscriber routed through the test harness; safe to call repeatedly.
#[cfg(test)]
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("duty_roster=trace"))
        .with_test_writer()
        .try_init();
}
