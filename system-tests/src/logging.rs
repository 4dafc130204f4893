// system-tests/src/logging.rs
// ============================================================================
// Module: Suite Logging
// Description: Tracing subscriber bootstrap for the products suites.
// Purpose: Route client and scenario events to the test output.
// Dependencies: tracing, tracing-subscriber
// ============================================================================

//! ## Overview
//! The filter directive comes from [`SuiteConfig::log_filter`], which
//! [`SuiteConfig::load`] has already validated. Installation is idempotent.

use tracing_subscriber::EnvFilter;

use crate::config::SuiteConfig;

/// Filter used when a hand-built config carries a directive that does not parse.
const FALLBACK_FILTER: &str = "warn";

/// Installs a fmt subscriber filtered by the configured directive.
///
/// Safe to call from every test; only the first call in a process installs a
/// subscriber.
pub fn init(config: &SuiteConfig) {
    let filter =
        EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new(FALLBACK_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_test_writer()
        .try_init();
}

/// Logs a scenario step at info level.
pub fn step(scenario: &str, message: &str) {
    tracing::info!(scenario, "{message}");
}
