// system-tests/src/lib.rs
// ============================================================================
// Module: Products System Tests Library
// Description: Shared configuration, client, and assertions for product suites.
// Purpose: Provide common utilities for the products system-test binaries.
// Dependencies: products-contract, reqwest, tokio, tracing
// ============================================================================

//! ## Overview
//! This crate hosts the pieces every products suite composes: environment
//! profiles and endpoint builders, an HTTP client that records a transcript of
//! each exchange, assertion helpers that propagate failures as errors, the
//! scenario-scoped created-product accumulator, a backoff retry helper, and
//! logging bootstrap. The suites themselves live in `system-tests/tests`.
//!
//! The service under test is a public mock that does not persist writes and
//! does not enforce validation. Suites default to asserting internal
//! consistency for invalid inputs; see [`config::Strictness`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod assertions;
pub mod client;
pub mod config;
pub mod context;
pub mod logging;
pub mod retry;


// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use assertions::AssertionError;
pub use assertions::Disposition;
pub use assertions::JsonType;
pub use client::ApiMethod;
pub use client::ApiResponse;
pub use client::ClientError;
pub use client::ProductsClient;
pub use client::TranscriptEntry;
pub use config::ConfigError;
pub use config::Profile;
pub use config::Strictness;
pub use config::SuiteConfig;
pub use context::CreatedProducts;
pub use retry::RetryPolicy;
pub use retry::retry_with_backoff;
