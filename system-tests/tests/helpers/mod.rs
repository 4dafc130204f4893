// system-tests/tests/helpers/mod.rs
// ============================================================================
// Module: Products Test Helpers
// Description: Shared helpers for the products system-tests.
// Purpose: Provide the scenario harness, artifacts, and a local service stub.
// Dependencies: products-system-tests, products-contract, axum
// ============================================================================

//! ## Overview
//! Shared helpers for the products system-tests.
//! Invariants:
//! - Every scenario owns its client, generator, and created-product list.
//! - Transcripts and summaries are written even when a scenario fails.

#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]

pub mod checks;
