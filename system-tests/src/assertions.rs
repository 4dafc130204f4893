// system-tests/src/assertions.rs
// ============================================================================
// Module: Response Assertions
// Description: Composable checks over API responses and JSON bodies.
// Purpose: Fail scenarios with expected-vs-actual errors instead of panics.
// Dependencies: products-contract, serde_json, thiserror, tracing
// ============================================================================

//! ## Overview
//! Every helper returns `Result<(), AssertionError>` (or the inspected value)
//! so scenarios propagate failures with `?`. No helper swallows a failure.
//! Field paths are dotted (`rating.rate`); the empty path addresses the root.
//!
//! Invalid-input scenarios go through [`expect_rejection`], which applies the
//! configured [`Strictness`] to the observed status.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use products_contract::SchemaBuildError;
use products_contract::SchemaValidator;
use products_contract::SchemaViolations;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::client::ApiResponse;
use crate::config::Strictness;
use crate::config::endpoints::status;

// ============================================================================
// SECTION: JSON Types
// ============================================================================

/// JSON value classes checked by [`field_type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonType {
    /// `null`.
    Null,
    /// `true` or `false`.
    Bool,
    /// Any number.
    Number,
    /// A number with no fractional part.
    Integer,
    /// A string.
    String,
    /// An array.
    Array,
    /// An object.
    Object,
}

impl JsonType {
    /// Classifies a value. Integral numbers, including finite floats with no
    /// fractional part such as `21.0`, classify as [`JsonType::Integer`].
    #[must_use]
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(number) if number.is_i64() || number.is_u64() => Self::Integer,
            Value::Number(number)
                if number.as_f64().is_some_and(|float| float.is_finite() && float.fract() == 0.0) =>
            {
                Self::Integer
            }
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Returns true when `value` belongs to this class.
    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        let actual = Self::of(value);
        actual == self || (self == Self::Number && actual == Self::Integer)
    }

    /// Returns the lower-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Assertion failures with expected and actual values.
#[derive(Debug, Error)]
pub enum AssertionError {
    /// Unexpected HTTP status.
    #[error("expected status {expected}, got {actual}: {body}")]
    Status {
        /// Expected status or status class.
        expected: String,
        /// Observed status.
        actual: u16,
        /// Truncated response body.
        body: String,
    },
    /// Content type missing or not matching.
    #[error(
        "expected content-type containing `{expected}`, got `{}`",
        actual.as_deref().unwrap_or("none")
    )]
    ContentType {
        /// Expected substring.
        expected: String,
        /// Observed header.
        actual: Option<String>,
    },
    /// Field absent or `null`.
    #[error("missing required field `{path}`")]
    MissingField {
        /// Field path.
        path: String,
    },
    /// Field present with the wrong JSON type.
    #[error("field `{path}` expected {expected}, got {actual}")]
    FieldType {
        /// Field path.
        path: String,
        /// Expected class.
        expected: JsonType,
        /// Observed class.
        actual: JsonType,
    },
    /// Numeric field outside inclusive bounds.
    #[error("field `{path}` = {actual} outside [{min}, {max}]")]
    OutOfRange {
        /// Field path.
        path: String,
        /// Observed value.
        actual: f64,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
    /// String blank or array shorter than required.
    #[error("field `{path}` has length {actual}, expected at least {min}")]
    TooShort {
        /// Field path.
        path: String,
        /// Observed length (trimmed for strings).
        actual: usize,
        /// Required length.
        min: usize,
    },
    /// Field value differs from the expected value.
    #[error("field `{path}` expected {expected}, got {actual}")]
    Mismatch {
        /// Field path.
        path: String,
        /// Expected value.
        expected: Value,
        /// Observed value.
        actual: Value,
    },
    /// Schema validation failed.
    #[error(transparent)]
    Schema(#[from] SchemaViolations),
    /// Schema validator could not be built.
    #[error(transparent)]
    SchemaBuild(#[from] SchemaBuildError),
}

/// Maximum response body characters kept in status errors.
const BODY_EXCERPT_CHARS: usize = 512;

/// Builds a status failure from a response.
fn status_error(expected: impl Into<String>, response: &ApiResponse) -> AssertionError {
    AssertionError::Status {
        expected: expected.into(),
        actual: response.status,
        body: response.raw_body.chars().take(BODY_EXCERPT_CHARS).collect(),
    }
}

// ============================================================================
// SECTION: Status and Headers
// ============================================================================

/// Asserts an exact status.
///
/// # Errors
///
/// Returns [`AssertionError::Status`] on mismatch.
pub fn status_eq(response: &ApiResponse, expected: u16) -> Result<(), AssertionError> {
    if response.status == expected {
        Ok(())
    } else {
        Err(status_error(expected.to_string(), response))
    }
}

/// Asserts the status is one of `allowed`.
///
/// # Errors
///
/// Returns [`AssertionError::Status`] when no entry matches.
pub fn status_in(response: &ApiResponse, allowed: &[u16]) -> Result<(), AssertionError> {
    if allowed.contains(&response.status) {
        Ok(())
    } else {
        let allowed: Vec<String> = allowed.iter().map(ToString::to_string).collect();
        Err(status_error(format!("one of [{}]", allowed.join(", ")), response))
    }
}

/// Asserts the status is strictly below `limit`.
///
/// # Errors
///
/// Returns [`AssertionError::Status`] when the status is at or above `limit`.
pub fn status_below(response: &ApiResponse, limit: u16) -> Result<(), AssertionError> {
    if response.status < limit {
        Ok(())
    } else {
        Err(status_error(format!("below {limit}"), response))
    }
}

/// Asserts the service did not fail with a 5xx.
///
/// # Errors
///
/// Returns [`AssertionError::Status`] for server errors.
pub fn not_server_error(response: &ApiResponse) -> Result<(), AssertionError> {
    status_below(response, status::INTERNAL_SERVER_ERROR)
}

/// Asserts the `content-type` header contains `needle`, case-insensitively.
///
/// # Errors
///
/// Returns [`AssertionError::ContentType`] when absent or not matching.
pub fn content_type_contains(response: &ApiResponse, needle: &str) -> Result<(), AssertionError> {
    let actual = response.content_type();
    let matched =
        actual.is_some_and(|value| value.to_ascii_lowercase().contains(&needle.to_ascii_lowercase()));
    if matched {
        Ok(())
    } else {
        Err(AssertionError::ContentType {
            expected: needle.to_string(),
            actual: actual.map(str::to_string),
        })
    }
}

// ============================================================================
// SECTION: Field Checks
// ============================================================================

/// Resolves a dotted path. The empty path returns the root.
#[must_use]
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(value);
    }
    path.split('.').try_fold(value, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|index| items.get(index)),
        _ => None,
    })
}

/// Resolves a path that must be present and not `null`.
fn require<'a>(value: &'a Value, path: &str) -> Result<&'a Value, AssertionError> {
    match lookup(value, path) {
        Some(found) if !found.is_null() => Ok(found),
        _ => Err(AssertionError::MissingField {
            path: path.to_string(),
        }),
    }
}

/// Asserts every field is present and defined.
///
/// # Errors
///
/// Returns [`AssertionError::MissingField`] for the first absent field.
pub fn required_fields(value: &Value, fields: &[&str]) -> Result<(), AssertionError> {
    for field in fields {
        require(value, field)?;
    }
    Ok(())
}

/// Asserts a field is present with the given JSON type.
///
/// # Errors
///
/// Returns [`AssertionError::MissingField`] or [`AssertionError::FieldType`].
pub fn field_type(value: &Value, path: &str, expected: JsonType) -> Result<(), AssertionError> {
    let found = lookup(value, path).ok_or_else(|| AssertionError::MissingField {
        path: path.to_string(),
    })?;
    if expected.matches(found) {
        Ok(())
    } else {
        Err(AssertionError::FieldType {
            path: path.to_string(),
            expected,
            actual: JsonType::of(found),
        })
    }
}

/// Asserts a numeric field lies in `[min, max]` and returns it.
///
/// # Errors
///
/// Returns an error when the field is missing, not a number, or out of range.
pub fn number_in_range(
    value: &Value,
    path: &str,
    min: f64,
    max: f64,
) -> Result<f64, AssertionError> {
    let actual = number_at(value, path)?;
    if actual >= min && actual <= max {
        Ok(actual)
    } else {
        Err(AssertionError::OutOfRange {
            path: path.to_string(),
            actual,
            min,
            max,
        })
    }
}

/// Asserts a string field is non-empty after trimming whitespace.
///
/// # Errors
///
/// Returns an error when the field is missing, not a string, or blank.
pub fn non_empty_string(value: &Value, path: &str) -> Result<(), AssertionError> {
    let found = require(value, path)?;
    let Some(text) = found.as_str() else {
        return Err(AssertionError::FieldType {
            path: path.to_string(),
            expected: JsonType::String,
            actual: JsonType::of(found),
        });
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AssertionError::TooShort {
            path: path.to_string(),
            actual: 0,
            min: 1,
        });
    }
    Ok(())
}

/// Asserts an array field holds at least `min_len` items and returns them.
///
/// # Errors
///
/// Returns an error when the field is missing, not an array, or too short.
pub fn non_empty_array<'a>(
    value: &'a Value,
    path: &str,
    min_len: usize,
) -> Result<&'a [Value], AssertionError> {
    let found = require(value, path)?;
    let Some(items) = found.as_array() else {
        return Err(AssertionError::FieldType {
            path: path.to_string(),
            expected: JsonType::Array,
            actual: JsonType::of(found),
        });
    };
    let min = min_len.max(1);
    if items.len() < min {
        return Err(AssertionError::TooShort {
            path: path.to_string(),
            actual: items.len(),
            min,
        });
    }
    Ok(items)
}

/// Asserts every top-level field of `submitted` appears unchanged in `actual`.
///
/// Numbers compare by value, so `10` matches `10.0`.
///
/// # Errors
///
/// Returns an error for the first field missing from or differing in `actual`.
pub fn payload_subset(submitted: &Value, actual: &Value) -> Result<(), AssertionError> {
    let Some(fields) = submitted.as_object() else {
        return Err(AssertionError::FieldType {
            path: String::new(),
            expected: JsonType::Object,
            actual: JsonType::of(submitted),
        });
    };
    let Some(returned) = actual.as_object() else {
        return Err(AssertionError::FieldType {
            path: String::new(),
            expected: JsonType::Object,
            actual: JsonType::of(actual),
        });
    };
    for (key, expected) in fields {
        compare_field(returned, key, expected)?;
    }
    Ok(())
}

/// Compares one submitted field with the returned object.
fn compare_field(
    returned: &Map<String, Value>,
    key: &str,
    expected: &Value,
) -> Result<(), AssertionError> {
    let Some(found) = returned.get(key) else {
        return Err(AssertionError::MissingField {
            path: key.to_string(),
        });
    };
    if json_eq(expected, found) {
        Ok(())
    } else {
        Err(AssertionError::Mismatch {
            path: key.to_string(),
            expected: expected.clone(),
            actual: found.clone(),
        })
    }
}

/// Equality with numbers compared by value.
#[must_use]
pub fn json_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => (a - b).abs() <= f64::EPSILON * a.abs().max(b.abs()).max(1.0),
            _ => a == b,
        },
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| json_eq(a, b))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter().all(|(key, value)| b.get(key).is_some_and(|other| json_eq(value, other)))
        }
        _ => left == right,
    }
}

/// Asserts a price field renders to the same two-decimal string as `expected`.
///
/// # Errors
///
/// Returns an error when the field is missing, not a number, or drifts.
pub fn price_exact_cents(value: &Value, path: &str, expected: f64) -> Result<(), AssertionError> {
    let actual = number_at(value, path)?;
    let expected = format!("{expected:.2}");
    let rendered = format!("{actual:.2}");
    if rendered == expected {
        Ok(())
    } else {
        Err(AssertionError::Mismatch {
            path: path.to_string(),
            expected: Value::String(expected),
            actual: Value::String(rendered),
        })
    }
}

/// Asserts a value satisfies a compiled schema.
///
/// # Errors
///
/// Returns [`AssertionError::Schema`] listing every violation.
pub fn matches_schema(validator: &SchemaValidator, value: &Value) -> Result<(), AssertionError> {
    validator.validate(value)?;
    Ok(())
}

/// Reads a numeric field.
fn number_at(value: &Value, path: &str) -> Result<f64, AssertionError> {
    let found = require(value, path)?;
    found.as_f64().ok_or_else(|| AssertionError::FieldType {
        path: path.to_string(),
        expected: JsonType::Number,
        actual: JsonType::of(found),
    })
}

// ============================================================================
// SECTION: Invalid Input Policy
// ============================================================================

/// Observed outcome of submitting invalid input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// The service accepted the input with a 2xx.
    Accepted,
    /// The service rejected the input with a 4xx.
    Rejected,
}

impl Disposition {
    /// Returns the lower-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a response to invalid input under the given strictness.
///
/// Permissive runs accept either outcome and log it; strict runs require a
/// 4xx. A 5xx or any other status class always fails.
///
/// # Errors
///
/// Returns [`AssertionError::Status`] when the outcome is not allowed.
pub fn expect_rejection(
    strictness: Strictness,
    response: &ApiResponse,
) -> Result<Disposition, AssertionError> {
    if response.is_client_error() {
        return Ok(Disposition::Rejected);
    }
    match (strictness, response.is_success()) {
        (Strictness::Permissive, true) => {
            info!(status = response.status, "service accepted invalid input");
            Ok(Disposition::Accepted)
        }
        (Strictness::Strict, true) => Err(status_error("4xx rejection", response)),
        (Strictness::Permissive, false) => Err(status_error("2xx or 4xx", response)),
        (Strictness::Strict, false) => Err(status_error("4xx rejection", response)),
    }
}
