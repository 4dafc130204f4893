// system-tests/src/config/mod.rs
// ============================================================================
// Module: Suite Configuration
// Description: Centralized configuration for the products system tests.
// Purpose: Provide typed access to profiles, overrides, and endpoint paths.
// Dependencies: url, thiserror
// ============================================================================

//! ## Overview
//! Suite configuration is selected by a named profile and refined with
//! environment overrides, then mapped into a small typed structure shared by
//! the client, the logger and the suites. Endpoint paths and status-code
//! constants live in [`endpoints`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod endpoints;
mod env;
mod profile;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use env::ConfigError;
pub use env::Strictness;
pub use env::SuiteConfig;
pub use env::SuiteEnv;
pub use env::read_env_strict;
pub use profile::Profile;
pub use profile::ProfileSettings;
