// system-tests/src/config/endpoints.rs
// ============================================================================
// Module: Endpoints
// Description: Resource path builders and HTTP status constants.
// Purpose: Keep URL shapes and expected codes out of scenario bodies.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Paths are relative to the configured base URL. Product IDs are formatted
//! with `Display`, so non-numeric IDs reach the service unchanged.

use std::fmt;

// ============================================================================
// SECTION: Status Codes
// ============================================================================

/// HTTP status codes the suites assert on.
pub mod status {
    /// 200 OK.
    pub const OK: u16 = 200;
    /// 201 Created.
    pub const CREATED: u16 = 201;
    /// 400 Bad Request.
    pub const BAD_REQUEST: u16 = 400;
    /// 404 Not Found.
    pub const NOT_FOUND: u16 = 404;
    /// 500 Internal Server Error; anything at or above it is a server fault.
    pub const INTERNAL_SERVER_ERROR: u16 = 500;
    /// Statuses accepted for a successful create.
    pub const CREATE_SUCCESS: [u16; 2] = [OK, CREATED];
    /// Statuses accepted for a delete, repeated or not.
    pub const DELETE_OUTCOMES: [u16; 2] = [OK, NOT_FOUND];
}

// ============================================================================
// SECTION: Paths
// ============================================================================

/// Collection path for products.
pub const PRODUCTS_PATH: &str = "/products";

/// Sort order for the product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending by id.
    Asc,
    /// Descending by id.
    Desc,
}

impl SortOrder {
    /// Returns the query value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the product collection path.
#[must_use]
pub fn products() -> String {
    PRODUCTS_PATH.to_string()
}

/// Returns the path of a single product. Any displayable segment is accepted
/// so non-numeric IDs can be sent unchanged.
#[must_use]
pub fn product(id: impl fmt::Display) -> String {
    format!("{PRODUCTS_PATH}/{id}")
}

/// Returns the collection path with optional `limit` and `sort` parameters.
#[must_use]
pub fn products_query(limit: Option<usize>, sort: Option<SortOrder>) -> String {
    let mut params = Vec::new();
    if let Some(limit) = limit {
        params.push(format!("limit={limit}"));
    }
    if let Some(sort) = sort {
        params.push(format!("sort={sort}"));
    }
    if params.is_empty() {
        products()
    } else {
        format!("{PRODUCTS_PATH}?{}", params.join("&"))
    }
}
