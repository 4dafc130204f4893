// crates/products-contract/src/fixtures.rs
// ============================================================================
// Module: Product Fixtures
// Description: Static inputs shared across scenarios.
// Purpose: Keep catalogue constants and canned payloads in one place.
// Dependencies: crate::model
// ============================================================================

//! ## Overview
//! Constants describing the seeded catalogue of the service under test plus a
//! handful of canned payloads. The catalogue holds products `1..=20`.

use std::ops::RangeInclusive;

use crate::model::ProductPayload;

// ============================================================================
// SECTION: Catalogue Constants
// ============================================================================

/// Product categories known to the service.
pub const CATEGORIES: [&str; 4] = ["electronics", "jewelery", "men's clothing", "women's clothing"];

/// IDs of products that exist in the seeded catalogue.
pub const VALID_ID_RANGE: RangeInclusive<u64> = 1 ..= 20;

/// IDs that are guaranteed to miss the seeded catalogue.
pub const INVALID_ID_RANGE: RangeInclusive<u64> = 1000 ..= 9999;

/// Lowest and highest catalogue IDs.
pub const BOUNDARY_IDS: [u64; 2] = [1, 20];

/// Number of products in the seeded catalogue.
pub const CATALOGUE_SIZE: usize = 20;

/// Smallest positive price the suite submits.
pub const MIN_PRICE: f64 = 0.01;

/// Lower bound for randomly generated prices.
pub const PRICE_FLOOR: f64 = 1.0;

/// Upper bound for randomly generated prices.
pub const PRICE_CEILING: f64 = 999.0;

/// Inclusive bounds for `rating.rate`.
pub const RATING_RANGE: (f64, f64) = (0.0, 5.0);

/// Image URI used by generated payloads.
pub const DEFAULT_IMAGE: &str = "https://fakestoreapi.com/img/test-product.jpg";

/// Length used for oversized string payloads.
pub const OVERSIZED_LEN: usize = 5000;

// ============================================================================
// SECTION: Canned Payloads
// ============================================================================

/// Premium headphones payload used by the create scenarios.
#[must_use]
pub fn premium_headphones() -> ProductPayload {
    ProductPayload {
        title: "Premium Wireless Headphones".to_string(),
        price: 299.99,
        description: "Noise-cancelling over-ear headphones with 30 hour battery life.".to_string(),
        image: "https://fakestoreapi.com/img/headphones.jpg".to_string(),
        category: "electronics".to_string(),
    }
}

/// Returns true when the category is one of [`CATEGORIES`].
#[must_use]
pub fn is_known_category(category: &str) -> bool {
    CATEGORIES.contains(&category)
}
