// crates/products-contract/src/lib.rs
// ============================================================================
// Module: Products Contract Library
// Description: Product model, JSON schemas, fixtures, and payload generators.
// Purpose: Single source of truth for the product shapes the suite observes.
// Dependencies: jsonschema, rand, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! `products-contract` describes the products resource of the API under test:
//! the typed model, the JSON Schema documents used to validate server
//! responses and request payloads, static fixtures, and randomized or
//! boundary-value generators for payloads and product IDs.
//!
//! Everything here is pure. Network access lives in the system-tests crate.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod fixtures;
pub mod generator;
pub mod model;
pub mod schema;


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use generator::PayloadOverrides;
pub use generator::ProductGenerator;
pub use model::PayloadField;
pub use model::Product;
pub use model::ProductPayload;
pub use model::Rating;
pub use schema::SchemaBuildError;
pub use schema::SchemaError;
pub use schema::SchemaKind;
pub use schema::SchemaValidator;
pub use schema::SchemaViolations;
pub use schema::product_payload_schema;
pub use schema::product_schema;
pub use schema::validate_payload;
pub use schema::validate_product;
