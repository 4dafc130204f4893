// crates/products-contract/src/schema.rs
// ============================================================================
// Module: Product Schemas
// Description: JSON Schema documents and a validator for product shapes.
// Purpose: Check response bodies and request payloads against declared shapes.
// Dependencies: jsonschema, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Two shapes are declared. The full product is what the service returns for
//! existing catalogue entries: positive integer `id`, strictly positive
//! `price`, and a `rating` block with `rate` in `[0, 5]`. The creation payload
//! is what clients send: no `id`, no `rating`, and `price` merely
//! non-negative.
//!
//! Validation is structural and never coerces. Every violated rule is reported,
//! not just the first.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use jsonschema::Draft;
use jsonschema::Validator;
use serde_json::Value;
use serde_json::json;
use thiserror::Error;

// ============================================================================
// SECTION: Schema Identifiers
// ============================================================================

/// `$id` of the full product schema.
pub const PRODUCT_SCHEMA_ID: &str = "products://contract/schemas/product.schema.json";

/// `$id` of the creation payload schema.
pub const PAYLOAD_SCHEMA_ID: &str = "products://contract/schemas/product-payload.schema.json";

// ============================================================================
// SECTION: Public Schema Entrypoints
// ============================================================================

/// Returns the JSON schema for a product returned by the service.
#[must_use]
pub fn product_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": PRODUCT_SCHEMA_ID,
        "title": "Product",
        "description": "Catalogue product as returned by the products API.",
        "type": "object",
        "required": ["id", "title", "price", "description", "image", "category", "rating"],
        "properties": {
            "id": {
                "type": "integer",
                "minimum": 1
            },
            "title": non_empty_string_schema(),
            "price": {
                "type": "number",
                "exclusiveMinimum": 0
            },
            "description": { "type": "string" },
            "image": uri_schema(),
            "category": { "type": "string" },
            "rating": rating_schema()
        }
    })
}

/// Returns the JSON schema for a create or update payload.
#[must_use]
pub fn product_payload_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": PAYLOAD_SCHEMA_ID,
        "title": "ProductPayload",
        "description": "Body submitted when creating or replacing a product.",
        "type": "object",
        "required": ["title", "price", "description", "image", "category"],
        "properties": {
            "id": false,
            "rating": false,
            "title": non_empty_string_schema(),
            "price": {
                "type": "number",
                "minimum": 0
            },
            "description": { "type": "string" },
            "image": uri_schema(),
            "category": { "type": "string" }
        }
    })
}

/// Returns the JSON schema for the rating block.
#[must_use]
pub fn rating_schema() -> Value {
    json!({
        "type": "object",
        "required": ["rate", "count"],
        "properties": {
            "rate": {
                "type": "number",
                "minimum": 0,
                "maximum": 5
            },
            "count": {
                "type": "integer",
                "minimum": 0
            }
        }
    })
}

/// Schema for a string that must contain at least one character.
fn non_empty_string_schema() -> Value {
    json!({
        "type": "string",
        "minLength": 1
    })
}

/// Schema for an absolute URI string.
fn uri_schema() -> Value {
    json!({
        "type": "string",
        "format": "uri"
    })
}

// ============================================================================
// SECTION: Validator
// ============================================================================

/// Which declared shape a validator enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    /// Full product returned by the service.
    Product,
    /// Create or update payload.
    Payload,
}

impl SchemaKind {
    /// Returns a stable label for the shape.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Payload => "payload",
        }
    }

    /// Returns the schema document for the shape.
    #[must_use]
    pub fn document(self) -> Value {
        match self {
            Self::Product => product_schema(),
            Self::Payload => product_payload_schema(),
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compiled validator for one declared shape.
pub struct SchemaValidator {
    /// Shape enforced by this validator.
    kind: SchemaKind,
    /// Compiled JSON Schema.
    validator: Validator,
}

impl fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaValidator").field("kind", &self.kind).finish_non_exhaustive()
    }
}

impl SchemaValidator {
    /// Compiles the validator for a shape.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaBuildError`] when the schema document fails to compile.
    pub fn for_kind(kind: SchemaKind) -> Result<Self, SchemaBuildError> {
        let validator = jsonschema::options()
            .with_draft(Draft::Draft202012)
            .should_validate_formats(true)
            .build(&kind.document())
            .map_err(|err| SchemaBuildError {
                kind,
                message: err.to_string(),
            })?;
        Ok(Self {
            kind,
            validator,
        })
    }

    /// Compiles the full product validator.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaBuildError`] when the schema document fails to compile.
    pub fn product() -> Result<Self, SchemaBuildError> {
        Self::for_kind(SchemaKind::Product)
    }

    /// Compiles the creation payload validator.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaBuildError`] when the schema document fails to compile.
    pub fn payload() -> Result<Self, SchemaBuildError> {
        Self::for_kind(SchemaKind::Payload)
    }

    /// Returns the shape this validator enforces.
    #[must_use]
    pub const fn kind(&self) -> SchemaKind {
        self.kind
    }

    /// Validates an instance, collecting every violation.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaViolations`] listing each violated rule.
    pub fn validate(&self, instance: &Value) -> Result<(), SchemaViolations> {
        let violations: Vec<String> =
            self.validator.iter_errors(instance).map(|err| err.to_string()).collect();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(SchemaViolations {
                kind: self.kind,
                violations,
            })
        }
    }

    /// Returns true when the instance satisfies the shape.
    #[must_use]
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validator.is_valid(instance)
    }
}

/// Validates a value against the full product shape.
///
/// # Errors
///
/// Returns [`SchemaError::Build`] when the schema fails to compile and
/// [`SchemaError::Violations`] when the value does not match.
pub fn validate_product(instance: &Value) -> Result<(), SchemaError> {
    SchemaValidator::product()?.validate(instance)?;
    Ok(())
}

/// Validates a value against the creation payload shape.
///
/// # Errors
///
/// Returns [`SchemaError::Build`] when the schema fails to compile and
/// [`SchemaError::Violations`] when the value does not match.
pub fn validate_payload(instance: &Value) -> Result<(), SchemaError> {
    SchemaValidator::payload()?.validate(instance)?;
    Ok(())
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Schema document failed to compile.
#[derive(Debug, Clone, Error)]
#[error("failed to compile {kind} schema: {message}")]
pub struct SchemaBuildError {
    /// Shape whose schema failed.
    pub kind: SchemaKind,
    /// Compiler message.
    pub message: String,
}

/// Every rule an instance violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} schema violated ({count} rule(s)): {joined}", count = .violations.len(), joined = .violations.join("; "))]
pub struct SchemaViolations {
    /// Shape that was checked.
    pub kind: SchemaKind,
    /// One message per violated rule.
    pub violations: Vec<String>,
}

impl SchemaViolations {
    /// Returns true when any violation message mentions `needle`.
    #[must_use]
    pub fn mentions(&self, needle: &str) -> bool {
        self.violations.iter().any(|message| message.contains(needle))
    }
}

/// Combined schema compile or validation failure.
#[derive(Debug, Clone, Error)]
pub enum SchemaError {
    /// Schema failed to compile.
    #[error(transparent)]
    Build(#[from] SchemaBuildError),
    /// Instance violated the schema.
    #[error(transparent)]
    Violations(#[from] SchemaViolations),
}
